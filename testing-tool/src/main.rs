use colored::*;
use serde_json::Value;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🚐 Transfer Admin Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let language = ask("Idioma (en/fr) [en]: ")?;
    let language = if language.is_empty() { "en".to_string() } else { language };

    let client = ApiClient {
        http: reqwest::Client::new(),
        base_url,
        language,
    };

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🩺 Health check");
        println!("2. 🏙️ Listar ciudades");
        println!("3. 🔍 Autocompletar lugares");
        println!("4. 💶 Pedir presupuesto");
        println!("5. 🚪 Salir");
        let choice = ask("Selecciona una opción (1-5): ")?;

        let result = match choice.as_str() {
            "1" => client.get("/health", &[]).await,
            "2" => client.get("/api/v1/cities", &[("per_page", "50".to_string())]).await,
            "3" => {
                let term = ask("Texto a buscar: ")?;
                let kind = ask("Tipo (vacío para todos): ")?;
                let mut params = vec![("q", term)];
                if !kind.is_empty() {
                    params.push(("type", kind));
                }
                client.get("/api/v1/autocomplete", &params).await
            }
            "4" => {
                let params = vec![
                    ("from", ask("Lugar de origen (UUID): ")?),
                    ("to", ask("Lugar de destino (UUID): ")?),
                    ("passengers", ask("Pasajeros: ")?),
                    ("trip_type", ask("Tipo de viaje (one_way/round_trip): ")?),
                ];
                client.get("/api/v1/quote", &params).await
            }
            "5" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{}", format!("❌ Error de conexión: {}", e).bright_red());
        }
    }

    Ok(())
}

fn ask(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", prompt.bright_yellow());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl ApiClient {
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<(), Box<dyn std::error::Error>> {
        let url = format!("{}{}", self.base_url, path);

        println!();
        println!("{}", "📤 URL:".bright_blue());
        println!("{}", url);

        let response = self
            .http
            .get(&url)
            .query(params)
            .header("Accept-Language", &self.language)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        println!();
        if status.is_success() {
            println!("{}", format!("✅ {}", status).bright_green().bold());
        } else {
            println!("{}", format!("⚠️ {}", status).bright_yellow().bold());
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => {
                println!("{}", serde_json::to_string_pretty(&json)?);
                summarize(&json);
            }
            Err(_) => println!("{}", body),
        }

        Ok(())
    }
}

/// Resumen corto de las respuestas conocidas
fn summarize(json: &Value) {
    if let Some(summary) = json.pointer("/meta/summary").and_then(Value::as_str) {
        println!("{}", format!("📊 {}", summary).bright_green().bold());
    }

    if let Some(options) = json.get("options").and_then(Value::as_array) {
        println!("{}", format!("🚐 {} opciones de vehículo", options.len()).bright_green().bold());
        for option in options {
            let name = option.pointer("/vehicle_type/name").and_then(Value::as_str).unwrap_or("?");
            let price = option.get("price").map(|p| p.to_string()).unwrap_or_default();
            let currency = option.get("currency").and_then(Value::as_str).unwrap_or("");
            println!("   • {} {} {}", name, price.trim_matches('"'), currency);
        }
    }

    if let Some(code) = json.get("code").and_then(Value::as_str) {
        println!("{}", format!("🏷️ Código de error: {}", code).bright_red());
    }
}

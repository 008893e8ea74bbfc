//! Localización de mensajes
//!
//! Los mensajes de la API se buscan por clave (`categoria.nombre`) en una
//! tabla por idioma. El idioma de cada request lo fija el middleware de
//! locale dentro de un task-local; fuera de un request se usa el idioma
//! por defecto configurado al arrancar.

mod en;
mod fr;

pub mod keys;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Idiomas soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    fn table(&self) -> &'static HashMap<&'static str, &'static str> {
        match self {
            Locale::Fr => &fr::MESSAGES,
            Locale::En => &en::MESSAGES,
        }
    }

    /// Elegir el idioma a partir de una cabecera `Accept-Language`.
    ///
    /// Respeta los pesos `q` y el orden de aparición; devuelve `None` si
    /// ninguna etiqueta corresponde a un idioma soportado.
    pub fn from_accept_language(header: &str) -> Option<Locale> {
        let mut candidates: Vec<(f32, usize, Locale)> = header
            .split(',')
            .enumerate()
            .filter_map(|(position, part)| {
                let mut pieces = part.trim().split(';');
                let tag = pieces.next()?.trim();
                let primary = tag.split('-').next()?;
                let locale = primary.parse::<Locale>().ok()?;
                let weight = pieces
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                (weight > 0.0).then_some((weight, position, locale))
            })
            .collect();

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        candidates.first().map(|(_, _, locale)| *locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Locale::Fr),
            "en" => Ok(Locale::En),
            other => Err(format!("Unsupported locale '{}'", other)),
        }
    }
}

lazy_static! {
    static ref DEFAULT_LOCALE: RwLock<Locale> = RwLock::new(Locale::default());
}

tokio::task_local! {
    static REQUEST_LOCALE: Locale;
}

/// Fijar el idioma por defecto del proceso
pub fn set_default_locale(locale: Locale) {
    if let Ok(mut current) = DEFAULT_LOCALE.write() {
        *current = locale;
    }
}

pub fn default_locale() -> Locale {
    DEFAULT_LOCALE.read().map(|locale| *locale).unwrap_or_default()
}

/// Idioma del request en curso, o el idioma por defecto
pub fn current_locale() -> Locale {
    REQUEST_LOCALE
        .try_with(|locale| *locale)
        .unwrap_or_else(|_| default_locale())
}

/// Ejecutar un future con un idioma de request fijado
pub async fn with_locale<F>(locale: Locale, future: F) -> F::Output
where
    F: std::future::Future,
{
    REQUEST_LOCALE.scope(locale, future).await
}

/// Traducir una clave en un idioma concreto.
///
/// Si la clave no existe en ese idioma se prueba el idioma por defecto y,
/// en último caso, se devuelve la propia clave.
pub fn translate(locale: Locale, key: &str) -> String {
    locale
        .table()
        .get(key)
        .or_else(|| default_locale().table().get(key))
        .map(|message| message.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Traducir reemplazando marcadores `:nombre`
pub fn translate_with(locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
    let mut message = translate(locale, key);
    // los nombres largos primero para que `:to` no pise `:total`
    let mut ordered: Vec<&(&str, &str)> = params.iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    for (name, value) in ordered {
        message = message.replace(&format!(":{}", name), value);
    }
    message
}

/// Traducir en el idioma del request en curso
pub fn t(key: &str) -> String {
    translate(current_locale(), key)
}

pub fn t_with(key: &str, params: &[(&str, &str)]) -> String {
    translate_with(current_locale(), key, params)
}

/// Código estable de un mensaje: `error.city_not_found` -> `CITY_NOT_FOUND`
pub fn message_code(key: &str) -> String {
    key.rsplit('.').next().unwrap_or(key).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_language_prefers_weight_then_order() {
        assert_eq!(Locale::from_accept_language("fr-FR,fr;q=0.9,en;q=0.8"), Some(Locale::Fr));
        assert_eq!(Locale::from_accept_language("de-DE, en;q=0.7, fr;q=0.5"), Some(Locale::En));
        assert_eq!(Locale::from_accept_language("fr;q=0.2, en"), Some(Locale::En));
        assert_eq!(Locale::from_accept_language("es, de"), None);
        assert_eq!(Locale::from_accept_language("en;q=0"), None);
    }

    #[test]
    fn test_translate_known_keys() {
        assert_eq!(translate(Locale::Fr, keys::CITY_NOT_FOUND), "Ville introuvable.");
        assert_eq!(translate(Locale::En, keys::CITY_NOT_FOUND), "City not found.");
    }

    #[test]
    fn test_translate_unknown_key_returns_key() {
        assert_eq!(translate(Locale::En, "error.does_not_exist"), "error.does_not_exist");
    }

    #[test]
    fn test_translate_with_placeholders() {
        let message = translate_with(
            Locale::En,
            keys::PAGINATION_SHOWING,
            &[("from", "1"), ("to", "15"), ("total", "42")],
        );
        assert_eq!(message, "Showing 1 to 15 of 42 results");
    }

    #[test]
    fn test_every_french_key_has_english_counterpart() {
        for key in fr::MESSAGES.keys() {
            assert!(en::MESSAGES.contains_key(key), "missing english message for {}", key);
        }
        assert_eq!(fr::MESSAGES.len(), en::MESSAGES.len());
    }

    #[test]
    fn test_cache_messages() {
        assert_eq!(message_code(keys::CACHE_CLEARED), "CLEARED");
        assert_eq!(
            translate_with(Locale::En, keys::CACHE_CLEARED, &[("count", "3")]),
            "Cache cleared: 3 entries removed."
        );
        assert_eq!(translate(Locale::Fr, keys::CACHE_DISABLED), "Cache des réponses désactivé.");
    }

    #[test]
    fn test_message_code() {
        assert_eq!(message_code(keys::RATE_NOT_AVAILABLE), "RATE_NOT_AVAILABLE");
        assert_eq!(message_code("plain"), "PLAIN");
    }

    #[tokio::test]
    async fn test_request_locale_scope() {
        let inside = with_locale(Locale::En, async { current_locale() }).await;
        assert_eq!(inside, Locale::En);
        assert_eq!(current_locale(), default_locale());
    }
}

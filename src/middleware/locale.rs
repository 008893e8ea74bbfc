//! Middleware de idioma
//!
//! Elige el idioma de cada request a partir de `Accept-Language` y ejecuta
//! el resto de la cadena dentro de ese idioma, de modo que los mensajes de
//! éxito y error salen traducidos.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::i18n::{self, Locale};

pub fn request_locale(request: &Request) -> Locale {
    request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(Locale::from_accept_language)
        .unwrap_or_else(i18n::default_locale)
}

pub async fn locale_middleware(request: Request, next: Next) -> Response {
    let locale = request_locale(&request);

    let mut response = i18n::with_locale(locale, next.run(request)).await;
    response
        .headers_mut()
        .insert(header::CONTENT_LANGUAGE, HeaderValue::from_static(locale.code()));
    response
}

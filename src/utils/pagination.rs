//! Paginación de listados

use serde::{Deserialize, Serialize};

use crate::i18n::{self, keys};

pub const DEFAULT_PER_PAGE: i64 = 15;
pub const MAX_PER_PAGE: i64 = 100;

/// Parámetros de paginación recibidos en la query
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.per_page()
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }
}

/// Metadatos de una página
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub summary: String,
}

impl PageMeta {
    pub fn new(params: &PageParams, total: i64, items_on_page: usize) -> Self {
        let per_page = params.per_page();
        let current_page = params.page();
        let last_page = ((total + per_page - 1) / per_page).max(1);

        let (from, to) = if items_on_page == 0 {
            (None, None)
        } else {
            let from = params.offset() + 1;
            (Some(from), Some(from + items_on_page as i64 - 1))
        };

        let summary = i18n::t_with(
            keys::PAGINATION_SHOWING,
            &[
                ("from", &from.unwrap_or(0).to_string()),
                ("to", &to.unwrap_or(0).to_string()),
                ("total", &total.to_string()),
            ],
        );

        Self {
            current_page,
            per_page,
            total,
            last_page,
            from,
            to,
            summary,
        }
    }
}

/// Respuesta paginada genérica
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PageParams, total: i64) -> Self {
        let meta = PageMeta::new(params, total, data.len());
        Self { data, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, per_page: Option<i64>) -> PageParams {
        PageParams { page, per_page }
    }

    #[test]
    fn test_defaults_and_clamping() {
        let p = params(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(p.offset(), 0);

        let p = params(Some(-3), Some(1000));
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), MAX_PER_PAGE);

        let p = params(Some(3), Some(0));
        assert_eq!(p.per_page(), 1);
        assert_eq!(p.offset(), 2);
    }

    #[test]
    fn test_meta_middle_page() {
        let meta = PageMeta::new(&params(Some(2), Some(10)), 25, 10);
        assert_eq!(meta.last_page, 3);
        assert_eq!(meta.from, Some(11));
        assert_eq!(meta.to, Some(20));
    }

    #[test]
    fn test_meta_last_partial_page() {
        let meta = PageMeta::new(&params(Some(3), Some(10)), 25, 5);
        assert_eq!(meta.from, Some(21));
        assert_eq!(meta.to, Some(25));
    }

    #[test]
    fn test_meta_empty() {
        let meta = PageMeta::new(&params(None, None), 0, 0);
        assert_eq!(meta.last_page, 1);
        assert_eq!(meta.from, None);
        assert_eq!(meta.to, None);
    }

    #[tokio::test]
    async fn test_summary_is_localized() {
        let meta = i18n::with_locale(i18n::Locale::En, async {
            PageMeta::new(&params(Some(1), Some(15)), 42, 15)
        })
        .await;
        assert_eq!(meta.summary, "Showing 1 to 15 of 42 results");
    }
}

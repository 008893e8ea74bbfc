use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::i18n::{self, keys};
use crate::utils::pagination::PageParams;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }

    /// Respuesta de creación con el mensaje localizado
    pub fn created(data: T) -> Self {
        Self::success_with_message(data, i18n::t(keys::CREATED))
    }

    /// Respuesta de actualización con el mensaje localizado
    pub fn updated(data: T) -> Self {
        Self::success_with_message(data, i18n::t(keys::UPDATED))
    }
}

impl ApiResponse<()> {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: Some(i18n::t(keys::DELETED)),
            data: None,
        }
    }
}

// Query común de los listados: paginación, búsqueda y filtro de estado
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub active: Option<bool>,
    pub city_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub vehicle_type_id: Option<Uuid>,
}

impl ListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

//! Claves de la tabla de mensajes

// success
pub const CREATED: &str = "success.created";
pub const UPDATED: &str = "success.updated";
pub const DELETED: &str = "success.deleted";
pub const IMPORT_COMPLETED: &str = "success.import_completed";

// error
pub const NOT_FOUND: &str = "error.not_found";
pub const CITY_NOT_FOUND: &str = "error.city_not_found";
pub const ZONE_NOT_FOUND: &str = "error.zone_not_found";
pub const LOCATION_NOT_FOUND: &str = "error.location_not_found";
pub const VEHICLE_TYPE_NOT_FOUND: &str = "error.vehicle_type_not_found";
pub const RATE_NOT_FOUND: &str = "error.rate_not_found";
pub const SERVICE_FEATURE_NOT_FOUND: &str = "error.service_feature_not_found";
pub const DUPLICATE_RESOURCE: &str = "error.duplicate_resource";
pub const RESOURCE_IN_USE: &str = "error.resource_in_use";
pub const TOO_MANY_REQUESTS: &str = "error.too_many_requests";
pub const SERVER_ERROR: &str = "error.server_error";

// validation
pub const VALIDATION_FAILED: &str = "validation.validation_failed";
pub const INVALID_LOCATION_TYPE: &str = "validation.invalid_location_type";
pub const ZONE_CITY_MISMATCH: &str = "validation.zone_city_mismatch";
pub const FEATURE_IDS_INVALID: &str = "validation.service_features_invalid";
pub const INVALID_IDENTIFIER: &str = "validation.invalid_identifier";

// business
pub const NO_ROUTE_FOUND: &str = "business.no_route_found";
pub const RATE_NOT_AVAILABLE: &str = "business.rate_not_available";
pub const INVALID_PARAMETERS: &str = "business.invalid_parameters";

// pagination
pub const PAGINATION_SHOWING: &str = "pagination.showing";

// cache
pub const CACHE_ENABLED: &str = "cache.enabled";
pub const CACHE_DISABLED: &str = "cache.disabled";
pub const CACHE_UNAVAILABLE: &str = "cache.unavailable";
pub const CACHE_CLEARED: &str = "cache.cleared";


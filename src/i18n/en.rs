use std::collections::HashMap;

lazy_static::lazy_static! {
    pub static ref MESSAGES: HashMap<&'static str, &'static str> = HashMap::from([
        ("success.created", "Resource created successfully."),
        ("success.updated", "Resource updated successfully."),
        ("success.deleted", "Resource deleted successfully."),
        ("success.import_completed", "Import finished: :created created, :existing existing."),
        ("error.not_found", "Resource not found."),
        ("error.city_not_found", "City not found."),
        ("error.zone_not_found", "Zone not found."),
        ("error.location_not_found", "Location not found."),
        ("error.vehicle_type_not_found", "Vehicle type not found."),
        ("error.rate_not_found", "Rate not found."),
        ("error.service_feature_not_found", "Service feature not found."),
        ("error.duplicate_resource", "This resource already exists."),
        ("error.resource_in_use", "This resource is still in use and cannot be deleted."),
        ("error.too_many_requests", "Too many requests. Please try again later."),
        ("error.server_error", "An internal error occurred."),
        ("validation.validation_failed", "Validation failed."),
        ("validation.invalid_location_type", "Invalid location type."),
        ("validation.zone_city_mismatch", "The zone does not belong to this city."),
        ("validation.service_features_invalid", "One or more service features do not exist."),
        ("validation.invalid_identifier", "Invalid identifier."),
        ("business.no_route_found", "No routes found for the specified locations."),
        ("business.rate_not_available", "Rate not available for this route."),
        ("business.invalid_parameters", "Invalid parameters."),
        ("pagination.showing", "Showing :from to :to of :total results"),
        ("cache.enabled", "Response cache enabled."),
        ("cache.disabled", "Response cache disabled."),
        ("cache.unavailable", "Response cache unavailable, responses are computed on every request."),
        ("cache.cleared", "Cache cleared: :count entries removed."),
    ]);
}

use std::collections::HashMap;

lazy_static::lazy_static! {
    pub static ref MESSAGES: HashMap<&'static str, &'static str> = HashMap::from([
        ("success.created", "Ressource créée avec succès."),
        ("success.updated", "Ressource mise à jour avec succès."),
        ("success.deleted", "Ressource supprimée avec succès."),
        ("success.import_completed", "Import terminé : :created créé(s), :existing existant(s)."),
        ("error.not_found", "Ressource introuvable."),
        ("error.city_not_found", "Ville introuvable."),
        ("error.zone_not_found", "Zone introuvable."),
        ("error.location_not_found", "Lieu introuvable."),
        ("error.vehicle_type_not_found", "Type de véhicule introuvable."),
        ("error.rate_not_found", "Tarif introuvable."),
        ("error.service_feature_not_found", "Service introuvable."),
        ("error.duplicate_resource", "Cette ressource existe déjà."),
        ("error.resource_in_use", "Cette ressource est encore utilisée et ne peut pas être supprimée."),
        ("error.too_many_requests", "Trop de requêtes. Veuillez réessayer plus tard."),
        ("error.server_error", "Une erreur interne est survenue."),
        ("validation.validation_failed", "La validation a échoué."),
        ("validation.invalid_location_type", "Type de lieu invalide."),
        ("validation.zone_city_mismatch", "La zone n'appartient pas à cette ville."),
        ("validation.service_features_invalid", "Un ou plusieurs services sont introuvables."),
        ("validation.invalid_identifier", "Identifiant invalide."),
        ("business.no_route_found", "Aucun trajet trouvé pour les lieux indiqués."),
        ("business.rate_not_available", "Tarif non disponible pour ce trajet."),
        ("business.invalid_parameters", "Paramètres invalides."),
        ("pagination.showing", "Affichage de :from à :to sur :total résultats"),
        ("cache.enabled", "Cache des réponses actif."),
        ("cache.disabled", "Cache des réponses désactivé."),
        ("cache.unavailable", "Cache des réponses indisponible, les réponses sont calculées à chaque requête."),
        ("cache.cleared", "Cache vidé : :count entrées supprimées."),
    ]);
}

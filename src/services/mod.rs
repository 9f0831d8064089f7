pub mod records_service;
pub mod tour_places_service;
pub mod users_service;

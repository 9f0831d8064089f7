pub mod bookings;
pub mod health;
pub mod metrics;
pub mod records;
pub mod regular_spending;
pub mod root;
pub mod swagger;
pub mod tour_places;
pub mod tour_plans;
pub mod tourist_wallet;
pub mod users;

use actix_web::{error::InternalError, web, HttpResponse, ResponseError};

use crate::utils::AppError;

/// Mounts every route of the gateway. Routes do not depend on the store being
/// connected; handlers answer 503 until it is.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/", web::get().to(root::greeting))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users))
                .route("", web::post().to(users::create_user))
                .route("/{email}", web::get().to(users::get_user))
                .route("/{email}", web::patch().to(users::update_user))
                .route("/{email}", web::put().to(users::update_user)),
        )
        .service(
            web::scope("/tour-places")
                .route("", web::get().to(tour_places::list_tour_places))
                .route("", web::post().to(tour_places::create_tour_place))
                .route("/{id}", web::get().to(tour_places::get_tour_place))
                .route("/{id}/hotel", web::get().to(tour_places::get_hotels))
                .route("/{id}/tourGuide", web::get().to(tour_places::get_tour_guides)),
        )
        .service(
            web::scope("/tourist-wallet")
                .route("", web::get().to(tourist_wallet::get_wallet))
                .route("", web::post().to(tourist_wallet::create_wallet)),
        )
        .service(
            web::scope("/regular-spending")
                .route("", web::get().to(regular_spending::list_spending))
                .route("", web::post().to(regular_spending::create_spending)),
        )
        .service(
            web::scope("/bookings")
                .route("", web::get().to(bookings::list_bookings))
                .route("", web::post().to(bookings::create_booking)),
        )
        .service(
            web::scope("/tour-plan")
                .route("", web::get().to(tour_plans::list_tour_plans))
                .route("", web::post().to(tour_plans::create_tour_plan)),
        );
}

/// Malformed JSON bodies get the same error shape as every other 400
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let app_error = AppError::InvalidRequest(format!("Invalid JSON body: {}", err));
        log::warn!("⚠️  {}", app_error);
        InternalError::from_response(err, app_error.error_response()).into()
    })
}

/// Query strings that do not deserialize (e.g. a repeated `email`) are 400s too
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let app_error = AppError::InvalidRequest(format!("Invalid query string: {}", err));
        log::warn!("⚠️  {}", app_error);
        InternalError::from_response(err, app_error.error_response()).into()
    })
}

/// Logs the failure (4xx as warn, 5xx as error) and renders it
pub(crate) fn error_response(context: &str, e: &AppError) -> HttpResponse {
    if e.status_code().is_server_error() {
        log::error!("❌ {}: {}", context, e);
    } else {
        log::warn!("⚠️  {}: {}", context, e);
    }
    e.error_response()
}

/// Initializes the gateway routes over the given store handle
#[cfg(test)]
macro_rules! test_app {
    ($handle:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($handle))
                .configure(crate::api::configure),
        )
        .await
    };
}

#[cfg(test)]
pub(crate) use test_app;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bhromonkari Server API",
        version = "1.0.0",
        description = "REST backend for the Bhromonkari travel planner. \n\n**Features:**\n- Users keyed by email\n- Tour places with hotels and tour guides\n- Tourist wallets and regular spending\n- Bookings and tour plans\n- Health monitoring and metrics\n\nDocuments are schema-free JSON objects stored as-is."
    ),
    paths(
        // Health & Metrics
        crate::api::root::greeting,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,

        // Tour places
        crate::api::tour_places::list_tour_places,
        crate::api::tour_places::create_tour_place,
        crate::api::tour_places::get_tour_place,
        crate::api::tour_places::get_hotels,
        crate::api::tour_places::get_tour_guides,

        // Email-keyed records
        crate::api::tourist_wallet::get_wallet,
        crate::api::tourist_wallet::create_wallet,
        crate::api::regular_spending::list_spending,
        crate::api::regular_spending::create_spending,
        crate::api::bookings::list_bookings,
        crate::api::bookings::create_booking,
        crate::api::tour_plans::list_tour_plans,
        crate::api::tour_plans::create_tour_plan,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
            crate::models::InsertAck,
            crate::models::UpdateAck,
        )
    ),
    tags(
        (name = "Health", description = "Greeting, health check and request metrics."),
        (name = "Users", description = "Users, uniquely identified by email."),
        (name = "Tour Places", description = "Tour places with their hotels and tour guides."),
        (name = "Tourist Wallet", description = "Wallet documents looked up by owner email."),
        (name = "Regular Spending", description = "Spending records, many per email."),
        (name = "Bookings", description = "Bookings, many per email."),
        (name = "Tour Plans", description = "Tour plans, many per email."),
    )
)]
pub struct ApiDoc;

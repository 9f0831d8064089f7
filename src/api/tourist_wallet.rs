use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::records,
    database::StoreHandle,
    models::{EmailQuery, InsertAck},
    services::records_service::TOURIST_WALLET,
};

#[utoipa::path(
    get,
    path = "/tourist-wallet",
    tag = "Tourist Wallet",
    params(EmailQuery),
    responses(
        (status = 200, description = "Wallet of the email", body = Object),
        (status = 400, description = "Missing email"),
        (status = 404, description = "Wallet not found"),
        (status = 503, description = "Document store is not ready")
    )
)]
pub async fn get_wallet(store: web::Data<StoreHandle>, query: web::Query<EmailQuery>) -> HttpResponse {
    log::info!("👛 GET /tourist-wallet - email: {:?}", query.filter());
    records::fetch_one(&store, &query, TOURIST_WALLET).await
}

#[utoipa::path(
    post,
    path = "/tourist-wallet",
    tag = "Tourist Wallet",
    request_body = Object,
    responses(
        (status = 201, description = "Wallet created", body = InsertAck),
        (status = 400, description = "Missing email"),
        (status = 503, description = "Document store is not ready")
    )
)]
pub async fn create_wallet(store: web::Data<StoreHandle>, body: web::Json<Value>) -> HttpResponse {
    log::info!("📝 POST /tourist-wallet");
    records::create(&store, body, TOURIST_WALLET).await
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::api::test_app;
    use crate::database::{InMemoryStore, StoreHandle};

    #[actix_web::test]
    async fn test_wallet_scenario() {
        let store = Arc::new(InMemoryStore::new());
        let app = test_app!(StoreHandle::ready(store.clone()));

        let req = test::TestRequest::post()
            .uri("/tourist-wallet")
            .set_json(json!({ "email": "a@x.com", "balance": 100 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let ack: Value = test::read_body_json(resp).await;
        assert_eq!(ack["acknowledged"], true);

        let req = test::TestRequest::get().uri("/tourist-wallet?email=a@x.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let wallet: Value = test::read_body_json(resp).await;
        assert_eq!(wallet["email"], "a@x.com");
        assert_eq!(wallet["balance"], 100);
        assert_eq!(wallet["_id"], ack["insertedId"]);

        let req = test::TestRequest::get().uri("/tourist-wallet?email=b@x.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_wallet_requires_email() {
        let store = Arc::new(InMemoryStore::new());
        let app = test_app!(StoreHandle::ready(store.clone()));

        let req = test::TestRequest::get().uri("/tourist-wallet").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Email query parameter is required");

        let req = test::TestRequest::post()
            .uri("/tourist-wallet")
            .set_json(json!({ "balance": 100 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

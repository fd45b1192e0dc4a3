//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;

use crate::{
    AppState,
    auth::{get_me, log_in, register_user, update_profile},
    endpoints, logging_middleware,
    record::{
        Expense, Income, RecordKind, create_record_endpoint, delete_record_endpoint,
        edit_record_endpoint, get_record_endpoint, get_stats_endpoint, list_records_endpoint,
    },
    report::{export_yearly_report, get_monthly_report, get_yearly_report},
};

/// Return a router with all the app's routes.
///
/// Every route except the root, registration and log in requires a bearer token.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(log_in))
        .route(endpoints::ME, get(get_me))
        .route(endpoints::PROFILE, put(update_profile))
        .merge(record_routes::<Expense>())
        .merge(record_routes::<Income>())
        .route(endpoints::MONTHLY_REPORT, get(get_monthly_report))
        .route(endpoints::YEARLY_REPORT, get(get_yearly_report))
        .route(endpoints::YEARLY_REPORT_EXPORT, get(export_yearly_report))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The routes for listing, creating, reading, replacing and deleting records
/// of kind `K`, and for their yearly statistics.
fn record_routes<K: RecordKind>() -> Router<AppState> {
    Router::new()
        .route(
            K::COLLECTION_ENDPOINT,
            get(list_records_endpoint::<K>).post(create_record_endpoint::<K>),
        )
        .route(K::STATS_ENDPOINT, get(get_stats_endpoint::<K>))
        .route(
            K::ITEM_ENDPOINT,
            get(get_record_endpoint::<K>)
                .put(edit_record_endpoint::<K>)
                .delete(delete_record_endpoint::<K>),
        )
}

async fn get_root() -> &'static str {
    "Fintrack API is running"
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found",
        })),
    )
        .into_response()
}

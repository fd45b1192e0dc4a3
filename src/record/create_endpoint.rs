//! Route handler for creating a record.

use axum::{Json, extract::State, http::StatusCode};
use time::OffsetDateTime;

use crate::{
    Error,
    auth::Session,
    extract::ApiJson,
    record::{Record, RecordForm, RecordKind, create_record, state::RecordState},
    response::ApiResponse,
};

/// Create a record of kind `K` owned by the user making the request.
///
/// The date defaults to today in the server's timezone. Responds with
/// `201 Created` and the new record.
pub async fn create_record_endpoint<K: RecordKind>(
    State(state): State<RecordState>,
    session: Session,
    ApiJson(form): ApiJson<RecordForm>,
) -> Result<(StatusCode, Json<ApiResponse<Record<K::Category>>>), Error> {
    let draft = form.into_draft::<K::Category>(state.today()?)?;
    let connection = state.connection()?;

    let record = create_record::<K>(
        session.user_id,
        draft,
        OffsetDateTime::now_utc(),
        &connection,
    )?;

    tracing::debug!("User {} created {} {}", session.user_id, K::NOUN, record.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(record))))
}

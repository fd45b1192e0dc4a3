//! Route handlers for listing a user's records and fetching a single record.

use axum::{Json, extract::State};

use crate::{
    Error,
    auth::Session,
    database_id::RecordId,
    extract::{ApiPath, ApiQuery},
    record::{
        Access, Record, RecordKind, get_owned_record,
        query::{ListQuery, list_records},
        state::RecordState,
    },
    response::{ApiResponse, ListResponse},
};

/// List the records of kind `K` owned by the user, optionally filtered by
/// month and category.
///
/// Responds with the matching records, newest first, with their count and total.
pub async fn list_records_endpoint<K: RecordKind>(
    State(state): State<RecordState>,
    session: Session,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<ListResponse<Record<K::Category>>>, Error> {
    let filter = query.into_filter::<K::Category>()?;
    let connection = state.connection()?;

    let list = list_records::<K>(session.user_id, &filter, &connection)?;

    Ok(Json(ListResponse {
        success: true,
        count: list.records.len(),
        total: list.total,
        data: list.records,
    }))
}

/// Get a single record of kind `K` owned by the user.
pub async fn get_record_endpoint<K: RecordKind>(
    State(state): State<RecordState>,
    session: Session,
    ApiPath(record_id): ApiPath<RecordId>,
) -> Result<Json<ApiResponse<Record<K::Category>>>, Error> {
    let connection = state.connection()?;

    get_owned_record::<K>(record_id, session.user_id, Access::Read, &connection)
        .map(|record| Json(ApiResponse::new(record)))
}

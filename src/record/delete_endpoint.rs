//! Route handler for deleting a record.

use axum::{Json, extract::State};

use crate::{
    Error,
    auth::Session,
    database_id::RecordId,
    extract::ApiPath,
    record::{Access, RecordKind, delete_record, get_owned_record, state::RecordState},
    response::{ApiResponse, Empty},
};

/// A route handler for deleting a record of kind `K`, responds with an empty object.
pub async fn delete_record_endpoint<K: RecordKind>(
    State(state): State<RecordState>,
    session: Session,
    ApiPath(record_id): ApiPath<RecordId>,
) -> Result<Json<ApiResponse<Empty>>, Error> {
    let connection = state.connection()?;

    get_owned_record::<K>(record_id, session.user_id, Access::Delete, &connection)?;

    match delete_record::<K>(record_id, &connection)? {
        0 => Err(Error::RecordNotFound(K::NOUN)),
        _ => {
            tracing::debug!("User {} deleted {} {record_id}", session.user_id, K::NOUN);
            Ok(Json(ApiResponse::new(Empty {})))
        }
    }
}

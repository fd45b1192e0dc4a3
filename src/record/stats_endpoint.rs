//! Route handler for the yearly statistics of a kind of record.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Error,
    auth::Session,
    extract::ApiQuery,
    record::{
        RecordKind,
        state::RecordState,
        stats::{YearStats, get_stats, year_range},
    },
    response::ApiResponse,
};

/// The query string accepted by the statistics endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StatsQuery {
    /// The year to summarise, defaults to the current year.
    pub year: Option<i32>,
}

/// Get the monthly and per-category totals of the user's records of kind `K`
/// for a year.
pub async fn get_stats_endpoint<K: RecordKind>(
    State(state): State<RecordState>,
    session: Session,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> Result<Json<ApiResponse<YearStats<K::Category>>>, Error> {
    let year = match query.year {
        Some(year) => year,
        None => state.today()?.year(),
    };
    let range = year_range(year)?;
    let connection = state.connection()?;

    get_stats::<K>(session.user_id, range, &connection).map(|stats| Json(ApiResponse::new(stats)))
}

//! A summary of one kind of record for a single month, compared to the month before.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    auth::UserID,
    record::{RecordKind, get_stats, month_range},
    report::change::{
        CategoryShare, Direction, category_shares, is_favourable, percentage_change,
    },
};

/// The summary of a month of expenses or income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport<C> {
    /// The month, 1 for January to 12 for December.
    pub month: u8,
    /// The year of the month.
    pub year: i32,
    /// The sum of the amounts of the month's records.
    pub total: f64,
    /// The number of records in the month.
    pub count: u32,
    /// The average amount per record, zero if there are no records.
    pub average: f64,
    /// The total of the previous month.
    pub previous_total: f64,
    /// The absolute change from the previous month's total, as a percentage.
    pub change: f64,
    /// Whether the total went up or down since the previous month.
    pub direction: Direction,
    /// Whether the change is good news, e.g. earning more or spending less.
    pub favourable: bool,
    /// The month's totals by category, largest first.
    pub categories: Vec<CategoryShare<C>>,
}

/// The month before `month` in `year`, rolling January back to the previous December.
pub fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        _ => (year, month.previous()),
    }
}

/// Summarise the records of kind `K` owned by `owner` in `month` of `year`.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] if the month is not between 1 and 12 or the year is unsupported,
/// - or [Error::SqlError] if there is an SQL error.
pub fn build_monthly_report<K: RecordKind>(
    owner: UserID,
    year: i32,
    month: u8,
    connection: &Connection,
) -> Result<MonthlyReport<K::Category>, Error> {
    let current = get_stats::<K>(owner, month_range(year, month)?, connection)?;

    let (total, count) = current
        .monthly
        .first()
        .map_or((0.0, 0), |month_total| (month_total.total, month_total.count));

    let (previous_year, previous) = previous_month(
        year,
        Month::try_from(month).map_err(|error| Error::Validation(error.to_string()))?,
    );
    let previous_total = get_stats::<K>(
        owner,
        month_range(previous_year, u8::from(previous))?,
        connection,
    )?
    .monthly
    .first()
    .map_or(0.0, |month_total| month_total.total);

    let change = percentage_change(total, previous_total);

    Ok(MonthlyReport {
        month,
        year,
        total,
        count,
        average: if count > 0 { total / f64::from(count) } else { 0.0 },
        previous_total,
        change: change.change,
        direction: change.direction,
        favourable: is_favourable::<K>(change.direction),
        categories: category_shares(&current.by_category, total),
    })
}

//! Route handlers for the monthly and yearly reports.

use axum::{
    Json,
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::Session,
    extract::ApiQuery,
    record::{Expense, ExpenseCategory, Income, IncomeCategory, RecordState},
    report::{
        export::{export_file_name, render_csv},
        monthly::{MonthlyReport, build_monthly_report},
        yearly::{YearlyReport, build_yearly_report},
    },
    response::ApiResponse,
};

/// Which kind of record a monthly report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Money that was spent.
    Expense,
    /// Money that was earned.
    Income,
}

/// The query string for the monthly report.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MonthlyReportQuery {
    /// Whether to report on expenses or income.
    pub kind: ReportKind,
    /// The month, 1 to 12. Defaults to the current month.
    pub month: Option<u8>,
    /// The year. Defaults to the current year.
    pub year: Option<i32>,
}

/// A monthly report on either kind of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnyMonthlyReport {
    /// A report on expenses.
    Expense(MonthlyReport<ExpenseCategory>),
    /// A report on income.
    Income(MonthlyReport<IncomeCategory>),
}

/// Get the summary of a month of the user's expenses or income.
pub async fn get_monthly_report(
    State(state): State<RecordState>,
    session: Session,
    ApiQuery(query): ApiQuery<MonthlyReportQuery>,
) -> Result<Json<ApiResponse<AnyMonthlyReport>>, Error> {
    let (year, month) = match (query.year, query.month) {
        (Some(year), Some(month)) => (year, month),
        (year, month) => {
            let today = state.today()?;
            (
                year.unwrap_or(today.year()),
                month.unwrap_or(u8::from(today.month())),
            )
        }
    };
    let connection = state.connection()?;

    let report = match query.kind {
        ReportKind::Expense => AnyMonthlyReport::Expense(build_monthly_report::<Expense>(
            session.user_id,
            year,
            month,
            &connection,
        )?),
        ReportKind::Income => AnyMonthlyReport::Income(build_monthly_report::<Income>(
            session.user_id,
            year,
            month,
            &connection,
        )?),
    };

    Ok(Json(ApiResponse::new(report)))
}

/// The query string for the yearly report.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct YearlyReportQuery {
    /// The year. Defaults to the current year.
    pub year: Option<i32>,
}

fn load_yearly_report(
    state: &RecordState,
    session: Session,
    query: YearlyReportQuery,
) -> Result<YearlyReport, Error> {
    let year = match query.year {
        Some(year) => year,
        None => state.today()?.year(),
    };
    let connection = state.connection()?;

    build_yearly_report(session.user_id, year, &connection)
}

/// Get the user's income and expenses for each month of a year.
pub async fn get_yearly_report(
    State(state): State<RecordState>,
    session: Session,
    ApiQuery(query): ApiQuery<YearlyReportQuery>,
) -> Result<Json<ApiResponse<YearlyReport>>, Error> {
    load_yearly_report(&state, session, query).map(|report| Json(ApiResponse::new(report)))
}

/// Download the yearly report as a CSV file.
pub async fn export_yearly_report(
    State(state): State<RecordState>,
    session: Session,
    ApiQuery(query): ApiQuery<YearlyReportQuery>,
) -> Result<Response, Error> {
    let report = load_yearly_report(&state, session, query)?;
    let csv = render_csv(&report, state.today()?)?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(report.year)),
            ),
        ],
        csv,
    )
        .into_response())
}

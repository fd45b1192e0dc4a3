//! The balance of income and expenses for each month of a year.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    auth::UserID,
    record::{
        Expense, ExpenseCategory, Income, IncomeCategory, fill_months, get_stats, year_range,
    },
    report::change::{CategoryShare, category_shares},
};

/// The income, expenses and balance of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBalance {
    /// The month, 1 for January to 12 for December.
    pub month: u8,
    /// The English name of the month, e.g. "January".
    pub name: String,
    /// The total income for the month.
    pub income: f64,
    /// The total expenses for the month.
    pub expenses: f64,
    /// Income minus expenses, negative when more was spent than earned.
    pub balance: f64,
}

/// The yearly balance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReport {
    /// The year the report covers.
    pub year: i32,
    /// One row for every month of the year, in calendar order.
    pub months: Vec<MonthBalance>,
    /// The total income for the year.
    pub total_income: f64,
    /// The total expenses for the year.
    pub total_expenses: f64,
    /// Total income minus total expenses.
    pub net_balance: f64,
    /// The year's expenses by category, largest first.
    pub expense_categories: Vec<CategoryShare<ExpenseCategory>>,
    /// The year's income by category, largest first.
    pub income_categories: Vec<CategoryShare<IncomeCategory>>,
}

/// Build the balance report of `owner` for `year`.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] if the year is unsupported,
/// - or [Error::SqlError] if there is an SQL error.
pub fn build_yearly_report(
    owner: UserID,
    year: i32,
    connection: &Connection,
) -> Result<YearlyReport, Error> {
    let range = year_range(year)?;
    let income = get_stats::<Income>(owner, range, connection)?;
    let expenses = get_stats::<Expense>(owner, range, connection)?;

    let months: Vec<MonthBalance> = fill_months(&income.monthly)
        .iter()
        .zip(fill_months(&expenses.monthly).iter())
        .map(|(income, expenses)| MonthBalance {
            month: income.month,
            name: Month::try_from(income.month)
                .map(|month| month.to_string())
                .unwrap_or_default(),
            income: income.total,
            expenses: expenses.total,
            balance: income.total - expenses.total,
        })
        .collect();

    let total_income: f64 = months.iter().map(|month| month.income).sum();
    let total_expenses: f64 = months.iter().map(|month| month.expenses).sum();

    Ok(YearlyReport {
        year,
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        expense_categories: category_shares(&expenses.by_category, total_expenses),
        income_categories: category_shares(&income.by_category, total_income),
        months,
    })
}

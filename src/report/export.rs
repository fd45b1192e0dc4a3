//! Renders the yearly report as a CSV file for downloading.

use csv::WriterBuilder;
use time::Date;

use crate::{Error, record::Category, report::yearly::YearlyReport};

/// The name of the file the yearly report for `year` is downloaded as.
pub fn export_file_name(year: i32) -> String {
    format!("financial_report_{year}.csv")
}

fn amount(value: f64) -> String {
    format!("{value:.2}")
}

fn percentage(share: f64) -> String {
    format!("{share:.1}%")
}

/// Write `report` as CSV.
///
/// The file has a title and the date it was generated, followed by the
/// summary, the month by month breakdown and, if there were any expenses,
/// the expense categories. Each section starts with a row holding its name.
///
/// # Errors
/// Returns [Error::CsvError] if the CSV could not be written.
pub fn render_csv(report: &YearlyReport, generated_on: Date) -> Result<String, Error> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(vec![]);

    let mut write = |record: &[&str]| {
        writer
            .write_record(record)
            .map_err(|error| Error::CsvError(error.to_string()))
    };

    write(&[format!("Yearly Financial Report - {}", report.year).as_str()])?;
    write(&[format!("Generated on: {generated_on}").as_str()])?;

    write(&["Financial Summary"])?;
    write(&["Category", "Amount"])?;
    write(&["Total Income", amount(report.total_income).as_str()])?;
    write(&["Total Expenses", amount(report.total_expenses).as_str()])?;
    write(&["Net Savings", amount(report.net_balance.abs()).as_str()])?;

    write(&["Monthly Breakdown"])?;
    write(&["Month", "Income", "Expenses", "Balance", "Status"])?;
    for month in &report.months {
        write(&[
            month.name.as_str(),
            amount(month.income).as_str(),
            amount(month.expenses).as_str(),
            amount(month.balance.abs()).as_str(),
            if month.balance >= 0.0 {
                "Positive"
            } else {
                "Negative"
            },
        ])?;
    }

    if !report.expense_categories.is_empty() {
        write(&["Expense Categories"])?;
        write(&["Category", "Amount", "% of Total"])?;
        for category in &report.expense_categories {
            write(&[
                category.category.as_str(),
                amount(category.total).as_str(),
                percentage(category.share).as_str(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

//! Expenses and income entries.
//!
//! Both kinds of record have the same shape and are handled by the same
//! generic code, parameterised by a [RecordKind]:
//! - The `Record` model and its validated `RecordDraft`
//! - Database functions for storing, listing and aggregating records
//! - Route handlers for the record endpoints

mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod list_endpoint;
mod query;
mod state;
mod stats;
mod stats_endpoint;

pub use category::{Category, ExpenseCategory, IncomeCategory};
pub use core::{
    Access, Expense, Income, Record, RecordDraft, RecordKind, create_record, create_record_table,
    delete_record, get_owned_record, get_record, replace_record,
};
pub use create_endpoint::create_record_endpoint;
pub use delete_endpoint::delete_record_endpoint;
pub use edit_endpoint::edit_record_endpoint;
pub use form::RecordForm;
pub use list_endpoint::{get_record_endpoint, list_records_endpoint};
pub use query::{ListQuery, RecordFilter, RecordList, list_records, month_range};
pub use state::RecordState;
pub use stats::{CategoryTotal, MonthlyTotal, YearStats, fill_months, get_stats, year_range};
pub use stats_endpoint::get_stats_endpoint;

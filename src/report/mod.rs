//! Reports built from the monthly and per-category aggregates: month on month
//! changes, the yearly balance and its CSV export.

mod change;
mod endpoints;
mod export;
mod monthly;
mod yearly;

pub use endpoints::{export_yearly_report, get_monthly_report, get_yearly_report};

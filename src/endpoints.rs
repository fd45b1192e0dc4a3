//! The API endpoints URIs.

/// The root route which reports that the API is running.
pub const ROOT: &str = "/";

/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";
/// The route for getting the current user's profile.
pub const ME: &str = "/api/auth/me";
/// The route for updating the current user's profile.
pub const PROFILE: &str = "/api/auth/profile";

/// The route to list and create expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route to access a single expense.
pub const EXPENSE: &str = "/api/expenses/{record_id}";
/// The route for the yearly expense statistics.
pub const EXPENSE_STATS: &str = "/api/expenses/stats";

/// The route to list and create income entries.
pub const INCOME: &str = "/api/income";
/// The route to access a single income entry.
pub const INCOME_ENTRY: &str = "/api/income/{record_id}";
/// The route for the yearly income statistics.
pub const INCOME_STATS: &str = "/api/income/stats";

/// The route for the report on a single month.
pub const MONTHLY_REPORT: &str = "/api/reports/monthly";
/// The route for the report on a whole year.
pub const YEARLY_REPORT: &str = "/api/reports/yearly";
/// The route to download the yearly report as a CSV file.
pub const YEARLY_REPORT_EXPORT: &str = "/api/reports/yearly/export";

/// Replace the first `{parameter}` in `endpoint_path` with `id`.
///
/// Paths without a parameter are returned unchanged.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{id}{}",
        &endpoint_path[..param_start],
        &endpoint_path[param_end..]
    )
}

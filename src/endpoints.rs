//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/entries/{entry_id}', use [format_endpoint].

/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
/// The route to list and create time entries.
pub const ENTRIES: &str = "/api/entries";
/// The route to access a single time entry.
pub const ENTRY: &str = "/api/entries/{entry_id}";
/// The route for summary statistics over a period.
pub const ENTRY_STATISTICS: &str = "/api/entries/statistics";
/// The route for hours per month of a year.
pub const ANNUAL_HOURS: &str = "/api/entries/annual";
/// The route for hours per day of a month.
pub const MONTHLY_HOURS: &str = "/api/entries/monthly";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to list categories that are not archived.
pub const ACTIVE_CATEGORIES: &str = "/api/categories/active";
/// The route to access a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to archive a category.
pub const ARCHIVE_CATEGORY: &str = "/api/categories/{category_id}/archive";
/// The route to unarchive a category.
pub const UNARCHIVE_CATEGORY: &str = "/api/categories/{category_id}/unarchive";
/// The route for the share of hours per category over a period.
pub const CATEGORY_DISTRIBUTION: &str = "/api/categories/distribution";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/entries/{entry_id}', '{entry_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// `endpoint_path` unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

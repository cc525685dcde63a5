//! Reports over logged hours: summary statistics, annual and monthly series,
//! and the distribution of hours across categories.

mod aggregation;
mod handlers;
mod query;

pub use handlers::{
    get_annual_hours_endpoint, get_category_distribution_endpoint, get_monthly_hours_endpoint,
    get_statistics_endpoint,
};

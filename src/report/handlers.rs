//! Endpoints that serve report data.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    period::{MonthQuery, Period, PeriodQuery, YearQuery, month_bounds, parse_month, year_bounds},
    report::{
        aggregation::{
            DayPoint, DistributionRow, MonthPoint, Statistics, annual_series,
            category_distribution, daily_series, monthly_statistics,
        },
        query::get_report_rows,
    },
};

/// The state needed for the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Totals and averages for a month, a year or all time.
pub async fn get_statistics_endpoint(
    State(state): State<ReportState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<Statistics>, Error> {
    let Query(query) = query?;
    let period = Period::from_query(&query)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows = get_report_rows(&period, &connection)?;

    Ok(Json(monthly_statistics(&rows)))
}

/// Hours per month of a year, always 12 points.
pub async fn get_annual_hours_endpoint(
    State(state): State<ReportState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<Vec<MonthPoint>>, Error> {
    let Query(YearQuery { year }) = query?;
    year_bounds(year)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows = get_report_rows(&Period::Year(year), &connection)?;

    Ok(Json(annual_series(&rows, year)))
}

/// Hours per day of a month, one point for every day of the month.
pub async fn get_monthly_hours_endpoint(
    State(state): State<ReportState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<DayPoint>>, Error> {
    let Query(MonthQuery { year, month }) = query?;
    let month = parse_month(month)?;
    month_bounds(year, month)?;
    let period = Period::Month { year, month };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows = get_report_rows(&period, &connection)?;

    daily_series(&rows, year, month).map(Json)
}

/// The share of hours per category for a month, a year or all time.
///
/// Archived categories are included so that past reports do not change.
pub async fn get_category_distribution_endpoint(
    State(state): State<ReportState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<Vec<DistributionRow>>, Error> {
    let Query(query) = query?;
    let period = Period::from_query(&query)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows = get_report_rows(&period, &connection)?;

    Ok(Json(category_distribution(&rows)))
}

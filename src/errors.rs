use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{Period, ProductVariant};

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("invalid period: {label}")]
    InvalidPeriod {
        label: String,
    },

    #[error("dynamic schedules require a monthly period, got {period}")]
    UnsupportedDynamicPeriod {
        period: Period,
    },

    #[error("{variant} portfolio has no rate tier for a duration of {months} months")]
    UnsupportedDuration {
        variant: ProductVariant,
        months: i32,
    },

    #[error("invalid date range: end {end} must be after start {start}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("column cannot be totalled: {column}")]
    UnsummableColumn {
        column: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::PortfolioError;

/// unique identifier for a portfolio
pub type PortfolioId = Uuid;

/// how the annual rate behaves across periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// the same rate every period
    Fixed,
    /// a fresh draw around the annual rate every period
    Variable,
}

/// length of one schedule period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    /// 15 days
    Fortnight,
    /// one calendar month
    Month,
}

/// product lines offered to investors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductVariant {
    /// short demo product, up to a few months
    Starter,
    /// multi-year product, rate tiered by duration
    Classic,
    /// one to twelve months
    Flexible,
}

/// how revenues are paid out; dynamic pays on the first of each month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMethod {
    Standard,
    Dynamic,
}

impl PayMethod {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, PayMethod::Dynamic)
    }
}

/// a single money box contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub amount: Money,
    pub date: NaiveDate,
}

impl Deposit {
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self { amount, date }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Fixed => write!(f, "fixed"),
            Category::Variable => write!(f, "variable"),
        }
    }
}

impl FromStr for Category {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Category::Fixed),
            "variable" => Ok(Category::Variable),
            other => Err(PortfolioError::InvalidConfiguration {
                message: format!("unknown category '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day => write!(f, "day"),
            Period::Week => write!(f, "week"),
            Period::Fortnight => write!(f, "fortnight"),
            Period::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Period {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "fortnight" => Ok(Period::Fortnight),
            "month" => Ok(Period::Month),
            _ => Err(PortfolioError::InvalidPeriod {
                label: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProductVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductVariant::Starter => write!(f, "starter"),
            ProductVariant::Classic => write!(f, "classic"),
            ProductVariant::Flexible => write!(f, "flexible"),
        }
    }
}

impl FromStr for ProductVariant {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starter" => Ok(ProductVariant::Starter),
            "classic" => Ok(ProductVariant::Classic),
            "flexible" => Ok(ProductVariant::Flexible),
            other => Err(PortfolioError::InvalidConfiguration {
                message: format!("unknown portfolio type '{}'", other),
            }),
        }
    }
}

impl FromStr for PayMethod {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PayMethod::Standard),
            "dynamic" => Ok(PayMethod::Dynamic),
            other => Err(PortfolioError::InvalidConfiguration {
                message: format!("unknown pay method '{}'", other),
            }),
        }
    }
}

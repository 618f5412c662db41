use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::decimal::{Money, Rate};
use crate::errors::{PortfolioError, Result};
use crate::interest::{withholding_rate, DayCountConvention};
use crate::types::{Category, Period};

/// terms the investor chooses; the product variant supplies the rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTerms {
    pub category: Category,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub principal: Money,
    pub dynamic: bool,
    pub period: Period,
}

impl PortfolioTerms {
    /// fixed-rate monthly terms, the shape every registered portfolio takes
    pub fn monthly(
        start_date: NaiveDate,
        end_date: NaiveDate,
        principal: Money,
        dynamic: bool,
    ) -> Self {
        Self {
            category: Category::Fixed,
            start_date,
            end_date,
            principal,
            dynamic,
            period: Period::Month,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_terms(self.start_date, self.end_date, self.principal)
    }

    /// calendar months between start and end, used for rate tiers
    pub fn months(&self) -> i32 {
        calendar::count_months(self.start_date, self.end_date)
    }

    /// attach a resolved annual rate
    pub fn with_rate(self, annual_rate: Rate) -> ProductDescriptor {
        ProductDescriptor {
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
            principal: self.principal,
            annual_rate,
            period: self.period,
            dynamic: self.dynamic,
        }
    }
}

/// everything the amortization engine needs to produce a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub category: Category,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub principal: Money,
    /// applied every period for fixed products, the mean of the draws for variable ones
    pub annual_rate: Rate,
    pub period: Period,
    /// cut-offs on the first of each month instead of the start date's day
    #[serde(default)]
    pub dynamic: bool,
}

impl ProductDescriptor {
    /// parse the shell's JSON representation and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: ProductDescriptor = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        check_terms(self.start_date, self.end_date, self.principal)
    }

    /// ISR for this product, fixed by its start date
    pub fn withholding_rate(&self) -> Rate {
        withholding_rate(self.start_date)
    }

    pub fn total_elapsed_days(&self) -> i64 {
        DayCountConvention::Actual360.days_between(self.start_date, self.end_date)
    }

    /// closed-form revenue over the whole term before tax
    pub fn gross_revenue_over_lifetime(&self) -> Money {
        DayCountConvention::Actual360.accrue_between(
            self.principal,
            self.annual_rate,
            self.start_date,
            self.end_date,
        )
    }

    /// closed-form revenue over the whole term net of ISR
    pub fn net_revenue_over_lifetime(&self) -> Money {
        DayCountConvention::Actual360.accrue_between(
            self.principal,
            self.annual_rate - self.withholding_rate(),
            self.start_date,
            self.end_date,
        )
    }
}

fn check_terms(start_date: NaiveDate, end_date: NaiveDate, principal: Money) -> Result<()> {
    if end_date <= start_date {
        return Err(PortfolioError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }

    if !principal.is_positive() {
        return Err(PortfolioError::InvalidAmount { amount: principal });
    }

    Ok(())
}

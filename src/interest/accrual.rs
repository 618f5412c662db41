use chrono::NaiveDate;

use crate::decimal::{Money, Rate};

/// day count convention for simple-interest accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DayCountConvention {
    /// actual days / 360, used for portfolio revenues
    Actual360,
    /// actual days / 365, used for money box deposits
    Actual365,
}

impl DayCountConvention {
    /// days in the convention's year
    pub fn year_basis(&self) -> u32 {
        match self {
            DayCountConvention::Actual360 => 360,
            DayCountConvention::Actual365 => 365,
        }
    }

    /// signed calendar days from `start` to `end`
    pub fn days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        (end - start).num_days()
    }

    /// simple interest on `principal` for `days`, unrounded
    pub fn simple_interest(&self, principal: Money, annual_rate: Rate, days: i64) -> Money {
        principal.apply_rate(annual_rate, days, self.year_basis())
    }

    /// simple interest between two dates, rounded to cents
    pub fn accrue_between(
        &self,
        principal: Money,
        annual_rate: Rate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Money {
        let days = self.days_between(start, end);
        self.simple_interest(principal, annual_rate, days).round_cents()
    }
}

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::decimal::Money;
use crate::errors::{PortfolioError, Result};
use crate::types::{Deposit, Period};

/// calendar distance between two consecutive cut-off dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Days(u64),
    /// month-aware; the day of month is clamped to the target month's length
    Months(u32),
}

impl Step {
    /// move `date` forward by one step
    pub fn advance(&self, date: NaiveDate) -> Result<NaiveDate> {
        self.advance_by(date, 1)
    }

    /// move `date` forward by `times` steps measured from `date` itself
    pub fn advance_by(&self, date: NaiveDate, times: u32) -> Result<NaiveDate> {
        let next = match *self {
            Step::Days(days) => date.checked_add_days(Days::new(days * times as u64)),
            Step::Months(months) => date.checked_add_months(Months::new(months * times)),
        };

        next.ok_or_else(|| PortfolioError::InvalidDate {
            message: format!("cannot advance {} by {:?} x{}", date, self, times),
        })
    }
}

/// calendar step for a period label
pub fn step_for(period: Period) -> Step {
    match period {
        Period::Day => Step::Days(1),
        Period::Week => Step::Days(7),
        Period::Fortnight => Step::Days(15),
        Period::Month => Step::Months(1),
    }
}

/// number of schedule periods in a year; daily schedules have no such share
pub fn periods_per_year(period: Period) -> Result<u32> {
    match period {
        Period::Week => Ok(52),
        Period::Fortnight => Ok(24),
        Period::Month => Ok(12),
        Period::Day => Err(PortfolioError::InvalidPeriod {
            label: period.to_string(),
        }),
    }
}

/// count how many cut-off dates fall after `start` and on or before `end`
///
/// Steps accumulate from the previous landing, so a month schedule started on
/// the 31st settles on the 28th/29th after February and stays there.
pub fn count_periods(start: NaiveDate, end: NaiveDate, period: Period) -> Result<u32> {
    let step = step_for(period);
    let mut count = 0;
    let mut date = step.advance(start)?;

    while date <= end {
        count += 1;
        date = step.advance(date)?;
    }

    Ok(count)
}

/// calendar-month difference, ignoring the day of month
pub fn count_months(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

/// deposit plan of a constant `amount` every `period`, first deposit on `start`
///
/// Monthly plans hold `count` deposits; weekly and fortnightly plans hold
/// `count + 1`, the extra one closing the final period.
pub fn recurring_deposits(
    amount: Money,
    period: Period,
    count: u32,
    start: NaiveDate,
) -> Result<Vec<Deposit>> {
    let offsets = match period {
        Period::Month => 0..count,
        Period::Week | Period::Fortnight => 0..count + 1,
        Period::Day => {
            return Err(PortfolioError::InvalidPeriod {
                label: period.to_string(),
            })
        }
    };

    let step = step_for(period);
    offsets
        .map(|i| {
            let date = step.advance_by(start, i)?;
            Ok(Deposit::new(amount, date))
        })
        .collect()
}

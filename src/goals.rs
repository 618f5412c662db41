use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ProductDescriptor;
use crate::decimal::{Money, Rate};
use crate::errors::{PortfolioError, Result};
use crate::interest::{current_withholding_rate, DayCountConvention};
use crate::types::Category;

/// savings goals accrue actual/360, one day at a time
const GOAL_DAY_COUNT: DayCountConvention = DayCountConvention::Actual360;

/// the part of a product a savings goal looks at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProduct {
    /// informational; both solvers treat every product as fixed
    pub category: Category,
    pub principal: Money,
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
}

impl GoalProduct {
    pub fn new(principal: Money, annual_rate: Rate, start_date: NaiveDate) -> Self {
        Self {
            category: Category::Fixed,
            principal,
            annual_rate,
            start_date,
        }
    }

    /// goals always net out the current ISR, whatever the start date
    fn effective_rate(&self, apply_tax: bool) -> Rate {
        if apply_tax {
            self.annual_rate - current_withholding_rate()
        } else {
            self.annual_rate
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(PortfolioError::InvalidAmount {
                amount: self.principal,
            });
        }
        Ok(())
    }
}

impl From<&ProductDescriptor> for GoalProduct {
    fn from(descriptor: &ProductDescriptor) -> Self {
        Self {
            category: descriptor.category,
            principal: descriptor.principal,
            annual_rate: descriptor.annual_rate,
            start_date: descriptor.start_date,
        }
    }
}

/// first date on which principal plus revenue reaches `target`
///
/// Revenue here is accrued on the target amount rather than the principal.
pub fn goal_date_for(target: Money, product: &GoalProduct, apply_tax: bool) -> Result<NaiveDate> {
    product.validate()?;

    let rate = product.effective_rate(apply_tax);
    if product.principal < target && !rate.is_positive() {
        return Err(PortfolioError::CalculationError {
            message: format!("goal {} unreachable at effective rate {}", target, rate),
        });
    }

    let mut revenue = Money::ZERO;
    let mut days: u64 = 1;

    while product.principal + revenue < target {
        revenue = GOAL_DAY_COUNT.simple_interest(target, rate, days as i64);
        days += 1;
    }

    tracing::debug!(%target, days, apply_tax, "solved goal date");

    product
        .start_date
        .checked_add_days(Days::new(days))
        .ok_or_else(|| PortfolioError::InvalidDate {
            message: format!("goal lies {} days after {}", days, product.start_date),
        })
}

/// revenue accrued on the principal by the day before `target_date`
pub fn goal_amount_for(
    target_date: NaiveDate,
    product: &GoalProduct,
    apply_tax: bool,
) -> Result<Money> {
    product.validate()?;

    let rate = product.effective_rate(apply_tax);
    let mut revenue = Money::ZERO;
    let mut days: u64 = 1;

    while next_day(product.start_date, days)? < target_date {
        revenue = GOAL_DAY_COUNT.simple_interest(product.principal, rate, days as i64);
        days += 1;
    }

    tracing::debug!(%target_date, days, apply_tax, "solved goal amount");

    Ok(revenue.round_cents())
}

fn next_day(start: NaiveDate, days: u64) -> Result<NaiveDate> {
    start
        .checked_add_days(Days::new(days))
        .ok_or_else(|| PortfolioError::InvalidDate {
            message: format!("cannot advance {} by {} days", start, days),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortfolioTerms;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn product() -> GoalProduct {
        GoalProduct::new(
            Money::from_major(1_000),
            Rate::from_percentage(10),
            date(2020, 1, 1),
        )
    }

    #[test]
    fn test_goal_date() {
        let reached = goal_date_for(Money::from_major(10_000), &product(), false).unwrap();
        assert_eq!(reached, date(2028, 11, 15));
    }

    #[test]
    fn test_goal_date_after_tax() {
        let reached = goal_date_for(Money::from_major(10_000), &product(), true).unwrap();
        assert_eq!(reached, date(2030, 5, 19));
    }

    #[test]
    fn test_goal_tax_ignores_start_year() {
        let older = GoalProduct::new(
            Money::from_major(1_000),
            Rate::from_percentage(10),
            date(2019, 1, 1),
        );

        let reached = goal_date_for(Money::from_major(10_000), &older, true).unwrap();
        assert_eq!(reached, date(2029, 5, 19));

        let amount = goal_amount_for(date(2020, 1, 1), &older, true).unwrap();
        assert_eq!(amount, Money::from_str_exact("86.45").unwrap());
    }

    #[test]
    fn test_goal_already_met() {
        let reached = goal_date_for(Money::from_major(500), &product(), false).unwrap();
        assert_eq!(reached, date(2020, 1, 2));
    }

    #[test]
    fn test_unreachable_goal() {
        let flat = GoalProduct::new(
            Money::from_major(1_000),
            Rate::from_percentage(1),
            date(2020, 1, 1),
        );

        assert!(matches!(
            goal_date_for(Money::from_major(2_000), &flat, true),
            Err(PortfolioError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_goal_amount() {
        let amount = goal_amount_for(date(2021, 1, 1), &product(), false).unwrap();
        assert_eq!(amount, Money::from_str_exact("101.39").unwrap());

        let after_tax = goal_amount_for(date(2021, 1, 1), &product(), true).unwrap();
        assert_eq!(after_tax, Money::from_str_exact("86.69").unwrap());
    }

    #[test]
    fn test_goal_amount_before_first_day() {
        assert_eq!(
            goal_amount_for(date(2020, 1, 2), &product(), false).unwrap(),
            Money::ZERO
        );
        assert_eq!(
            goal_amount_for(date(2019, 6, 1), &product(), false).unwrap(),
            Money::ZERO
        );
    }

    #[test]
    fn test_non_positive_principal() {
        let empty = GoalProduct::new(Money::ZERO, Rate::from_percentage(10), date(2020, 1, 1));

        assert!(matches!(
            goal_amount_for(date(2021, 1, 1), &empty, false),
            Err(PortfolioError::InvalidAmount { .. })
        ));
        assert!(matches!(
            goal_date_for(Money::from_major(10), &empty, false),
            Err(PortfolioError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_from_descriptor() {
        let principal = Money::from_major(1_000);
        let descriptor =
            PortfolioTerms::monthly(date(2020, 1, 1), date(2021, 1, 1), principal, false)
                .with_rate(Rate::from_percentage(10));

        assert_eq!(GoalProduct::from(&descriptor), product());
    }
}

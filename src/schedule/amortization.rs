use chrono::{Datelike, NaiveDate};

use crate::calendar;
use crate::config::ProductDescriptor;
use crate::decimal::{Money, Rate};
use crate::errors::{PortfolioError, Result};
use crate::interest::{DayCountConvention, RateSource};
use crate::schedule::{AmortizationLedger, LedgerRow};
use crate::types::{Category, Period};

/// days credited to every month of a dynamic schedule's stub periods
const STUB_MONTH_DAYS: i64 = 30;

/// first and last period lengths of a dynamic schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DynamicStubs {
    /// days from the start date to the end of its (30-day) month
    remaining_days: i64,
    /// the start date's day of month, carried into the final period
    surplus_days: i64,
}

impl DynamicStubs {
    fn for_start(start_date: NaiveDate) -> Self {
        let surplus_days = start_date.day() as i64;
        let remaining_days = if surplus_days == 31 {
            0
        } else {
            STUB_MONTH_DAYS - surplus_days
        };

        Self {
            remaining_days,
            surplus_days,
        }
    }

    fn last_period_days(&self) -> i64 {
        self.surplus_days + STUB_MONTH_DAYS
    }
}

/// periodic revenue schedule generator
pub struct AmortizationEngine;

impl AmortizationEngine {
    /// generate the revenue ledger of a product
    ///
    /// `rates` is only consulted for variable products, once per emitted row.
    pub fn generate<S: RateSource + ?Sized>(
        descriptor: &ProductDescriptor,
        rates: &mut S,
    ) -> Result<AmortizationLedger> {
        descriptor.validate()?;

        let stubs = if descriptor.dynamic {
            if descriptor.period != Period::Month {
                return Err(PortfolioError::UnsupportedDynamicPeriod {
                    period: descriptor.period,
                });
            }
            Some(DynamicStubs::for_start(descriptor.start_date))
        } else {
            None
        };

        let step = calendar::step_for(descriptor.period);
        let times = calendar::periods_per_year(descriptor.period)?;
        let (start, end) = (descriptor.start_date, descriptor.end_date);
        let n = calendar::count_periods(start, end, descriptor.period)?;

        let principal = descriptor.principal;
        let tax_withheld = principal
            .periodic_share(descriptor.withholding_rate(), times)
            .round_cents();

        let mut cut_off_date = step.advance(start)?;
        if stubs.is_some() {
            cut_off_date = cut_off_date.with_day(1).ok_or_else(|| PortfolioError::InvalidDate {
                message: format!("cannot anchor {} to the first of the month", cut_off_date),
            })?;
        }

        let mut rows = Vec::with_capacity(n as usize);
        let mut accumulated_net_revenue = Money::ZERO;

        for i in 1..=n {
            if cut_off_date > end {
                break;
            }

            let applied_rate = Self::applied_rate(descriptor, rates)?;
            let gross_revenue = match stubs {
                Some(stubs) if i == 1 => {
                    Self::stub_revenue(principal, applied_rate, stubs.remaining_days)
                }
                Some(stubs) if i == n => {
                    Self::stub_revenue(principal, applied_rate, stubs.last_period_days())
                }
                _ => principal.periodic_share(applied_rate, times).round_cents(),
            };

            accumulated_net_revenue += gross_revenue - tax_withheld;

            rows.push(LedgerRow {
                cut_off_date,
                capital: principal,
                applied_rate,
                gross_revenue,
                tax_withheld,
                accumulated_net_revenue,
            });

            cut_off_date = step.advance(cut_off_date)?;
        }

        tracing::debug!(
            category = %descriptor.category,
            period = %descriptor.period,
            dynamic = descriptor.dynamic,
            rows = rows.len(),
            "generated revenue ledger"
        );

        Ok(AmortizationLedger::from_rows(rows))
    }

    fn applied_rate<S: RateSource + ?Sized>(
        descriptor: &ProductDescriptor,
        rates: &mut S,
    ) -> Result<Rate> {
        match descriptor.category {
            Category::Fixed => Ok(descriptor.annual_rate),
            Category::Variable => rates.draw(descriptor.annual_rate),
        }
    }

    fn stub_revenue(principal: Money, rate: Rate, days: i64) -> Money {
        DayCountConvention::Actual360
            .simple_interest(principal, rate, days)
            .round_cents()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::DayCountConvention;
use crate::schedule::{Cell, Table};
use crate::types::{Deposit, Period};

/// annual rate paid on every money box deposit
pub const MONEY_BOX_RATE_PERCENT: u32 = 10;

/// money box revenues accrue actual/365
pub const MONEY_BOX_DAY_COUNT: DayCountConvention = DayCountConvention::Actual365;

pub fn money_box_rate() -> Rate {
    Rate::from_percentage(MONEY_BOX_RATE_PERCENT)
}

/// revenue of one deposit at the cut-off date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualRow {
    pub deposit_date: NaiveDate,
    pub deposit_amount: Money,
    pub revenue: Money,
    /// negative when the deposit is dated after the cut-off
    pub elapsed_days: i64,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AccrualTotals {
    pub deposit_amount: Money,
    pub revenue: Money,
    pub total: Money,
}

/// per-deposit accrual, in deposit order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualLedger {
    pub cut_off_date: NaiveDate,
    pub rows: Vec<AccrualRow>,
    pub totals: AccrualTotals,
}

impl AccrualLedger {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// tabulate with totals of deposits, revenues and totals
    pub fn to_table(&self) -> Result<Table> {
        let headers: Vec<String> = ["Deposit Date", "Deposit", "Revenues", "Days", "Total"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let body: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    Cell::Date(r.deposit_date),
                    Cell::Money(r.deposit_amount),
                    Cell::Money(r.revenue),
                    Cell::Days(r.elapsed_days),
                    Cell::Money(r.total),
                ]
            })
            .collect();

        Table::with_totals(headers, body, &[1, 2, 4])
    }
}

/// accrue every deposit from its own date to the shared `cut_off_date`
pub fn accrue(deposits: &[Deposit], cut_off_date: NaiveDate) -> AccrualLedger {
    let rate = money_box_rate();

    let rows: Vec<AccrualRow> = deposits
        .iter()
        .map(|deposit| {
            let deposit_amount = deposit.amount.round_cents();
            let elapsed_days = MONEY_BOX_DAY_COUNT.days_between(deposit.date, cut_off_date);
            let revenue = if deposit.amount.is_positive() && elapsed_days > 0 {
                MONEY_BOX_DAY_COUNT
                    .simple_interest(deposit.amount, rate, elapsed_days)
                    .round_cents()
            } else {
                Money::ZERO
            };

            AccrualRow {
                deposit_date: deposit.date,
                deposit_amount,
                revenue,
                elapsed_days,
                total: deposit_amount + revenue,
            }
        })
        .collect();

    let totals = AccrualTotals {
        deposit_amount: rows.iter().map(|r| r.deposit_amount).sum(),
        revenue: rows.iter().map(|r| r.revenue).sum(),
        total: rows.iter().map(|r| r.total).sum(),
    };

    tracing::debug!(
        deposits = rows.len(),
        %cut_off_date,
        revenue = %totals.revenue,
        "accrued money box"
    );

    AccrualLedger {
        cut_off_date,
        rows,
        totals,
    }
}

/// recurring-deposit savings plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyBox {
    /// amount of each planned contribution
    pub amount: Money,
    pub period: Period,
    pub start_date: NaiveDate,
    deposits: Vec<Deposit>,
}

impl MoneyBox {
    pub fn new(
        amount: Money,
        period: Period,
        start_date: NaiveDate,
        deposits: Vec<Deposit>,
    ) -> Self {
        Self {
            amount,
            period,
            start_date,
            deposits,
        }
    }

    /// box holding `count` planned contributions of `amount`
    pub fn from_plan(
        amount: Money,
        period: Period,
        count: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let deposits = calendar::recurring_deposits(amount, period, count, start_date)?;
        Ok(Self::new(amount, period, start_date, deposits))
    }

    pub fn deposits(&self) -> &[Deposit] {
        &self.deposits
    }

    /// record a further contribution; deposits are never removed
    pub fn deposit(&mut self, amount: Money, date: NaiveDate) {
        self.deposits.push(Deposit::new(amount, date));
    }

    pub fn accrue(&self, cut_off_date: NaiveDate) -> AccrualLedger {
        accrue(&self.deposits, cut_off_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortfolioError;
    use crate::schedule::table::TOTAL_LABEL;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn monthly_box() -> MoneyBox {
        let amount = Money::from_major(1_000);
        MoneyBox::from_plan(amount, Period::Month, 12, date(2019, 1, 1)).unwrap()
    }

    #[test]
    fn test_monthly_plan_accrual() {
        let ledger = monthly_box().accrue(date(2020, 7, 29));

        assert_eq!(ledger.len(), 12);
        assert_eq!(ledger.cut_off_date, date(2020, 7, 29));

        let january = &ledger.rows[0];
        assert_eq!(january.deposit_date, date(2019, 1, 1));
        assert_eq!(january.elapsed_days, 575);
        assert_eq!(january.revenue, money("157.53"));
        assert_eq!(january.total, money("1157.53"));

        let december = &ledger.rows[11];
        assert_eq!(december.elapsed_days, 241);
        assert_eq!(december.revenue, money("66.03"));

        assert_eq!(ledger.totals.deposit_amount, money("12000.00"));
        assert_eq!(ledger.totals.revenue, money("1343.02"));
        assert_eq!(ledger.totals.total, money("13343.02"));
    }

    #[test]
    fn test_deposit_on_cut_off_earns_nothing() {
        let cut_off = date(2020, 3, 1);
        let ledger = accrue(&[Deposit::new(Money::from_major(5_000), cut_off)], cut_off);

        assert_eq!(ledger.rows[0].elapsed_days, 0);
        assert_eq!(ledger.rows[0].revenue, Money::ZERO);
        assert_eq!(ledger.rows[0].total, Money::from_major(5_000));
    }

    #[test]
    fn test_non_positive_deposits_earn_nothing() {
        let deposits = vec![
            Deposit::new(Money::ZERO, date(2019, 1, 1)),
            Deposit::new(Money::from_major(-250), date(2019, 1, 1)),
        ];
        let ledger = accrue(&deposits, date(2020, 1, 1));

        assert!(ledger.rows.iter().all(|r| r.revenue == Money::ZERO));
        assert_eq!(ledger.rows[1].elapsed_days, 365);
        assert_eq!(ledger.totals.deposit_amount, Money::from_major(-250));
    }

    #[test]
    fn test_future_deposit_has_negative_days() {
        let future = Deposit::new(Money::from_major(100), date(2020, 2, 1));
        let ledger = accrue(&[future], date(2020, 1, 1));

        assert_eq!(ledger.rows[0].elapsed_days, -31);
        assert_eq!(ledger.rows[0].revenue, Money::ZERO);
    }

    #[test]
    fn test_rows_keep_input_order() {
        let amount = Money::from_major(100);
        let mut money_box = MoneyBox::new(amount, Period::Week, date(2020, 1, 1), Vec::new());
        money_box.deposit(Money::from_major(100), date(2020, 3, 1));
        money_box.deposit(Money::from_major(100), date(2020, 1, 1));

        let ledger = money_box.accrue(date(2020, 4, 1));
        assert_eq!(ledger.rows[0].deposit_date, date(2020, 3, 1));
        assert_eq!(ledger.rows[1].deposit_date, date(2020, 1, 1));
        assert!(ledger.rows[1].revenue > ledger.rows[0].revenue);
    }

    #[test]
    fn test_deposit_amounts_rounded_to_cents() {
        let ledger = accrue(&[Deposit::new(money("100.005"), date(2020, 1, 1))], date(2020, 1, 1));
        assert_eq!(ledger.rows[0].deposit_amount, money("100.00"));
    }

    #[test]
    fn test_table_totals() {
        let table = monthly_box().accrue(date(2020, 7, 29)).to_table().unwrap();

        assert_eq!(table.rows.len(), 13);
        assert_eq!(table.rows[12].label, TOTAL_LABEL);
        assert_eq!(
            table.total_of("Deposit").and_then(|c| c.as_money()),
            Some(money("12000.00"))
        );
        assert_eq!(
            table.total_of("Revenues").and_then(|c| c.as_money()),
            Some(money("1343.02"))
        );
        assert_eq!(
            table.total_of("Total").and_then(|c| c.as_money()),
            Some(money("13343.02"))
        );
        assert_eq!(table.total_of("Days"), None);
        assert_eq!(table.total_of("Deposit Date"), None);
    }

    #[test]
    fn test_daily_plan_rejected() {
        let result = MoneyBox::from_plan(Money::from_major(100), Period::Day, 3, date(2020, 1, 1));
        assert!(matches!(result, Err(PortfolioError::InvalidPeriod { .. })));
    }
}

/// serialization support for portfolios and their ledgers
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::moneybox::{AccrualLedger, MoneyBox};
use crate::portfolio::Portfolio;
use crate::schedule::AmortizationLedger;
use crate::types::{Category, Period, PortfolioId, ProductVariant};

/// serializable view of a portfolio and its ledger, as the renderer consumes it
#[derive(Debug, Serialize, Deserialize)]
pub struct PortfolioView {
    pub id: PortfolioId,
    pub variant: Option<ProductVariant>,
    pub terms: TermsView,
    pub lifetime: LifetimeView,
    pub ledger: AmortizationLedger,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub category: Category,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub principal: Money,
    pub annual_rate: Rate,
    pub withholding_rate: Rate,
    pub period: Period,
    pub dynamic: bool,
    pub reinvestment: bool,
}

/// closed-form figures over the whole term
#[derive(Debug, Serialize, Deserialize)]
pub struct LifetimeView {
    pub elapsed_days: i64,
    pub gross_revenue: Money,
    pub net_revenue: Money,
}

impl PortfolioView {
    pub fn from_portfolio(portfolio: &Portfolio, ledger: &AmortizationLedger) -> Self {
        let descriptor = &portfolio.descriptor;

        PortfolioView {
            id: portfolio.id,
            variant: portfolio.variant,
            terms: TermsView {
                category: descriptor.category,
                start_date: descriptor.start_date,
                end_date: descriptor.end_date,
                principal: descriptor.principal,
                annual_rate: descriptor.annual_rate,
                withholding_rate: descriptor.withholding_rate(),
                period: descriptor.period,
                dynamic: descriptor.dynamic,
                reinvestment: portfolio.reinvestment,
            },
            lifetime: LifetimeView {
                elapsed_days: descriptor.total_elapsed_days(),
                gross_revenue: descriptor.gross_revenue_over_lifetime(),
                net_revenue: descriptor.net_revenue_over_lifetime(),
            },
            ledger: ledger.clone(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// money box plan and its accrual at a cut-off date
#[derive(Debug, Serialize, Deserialize)]
pub struct MoneyBoxView {
    pub amount: Money,
    pub period: Period,
    pub start_date: NaiveDate,
    pub accrual: AccrualLedger,
}

impl MoneyBoxView {
    pub fn from_money_box(money_box: &MoneyBox, accrual: &AccrualLedger) -> Self {
        MoneyBoxView {
            amount: money_box.amount,
            period: money_box.period,
            start_date: money_box.start_date,
            accrual: accrual.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub mod amortization;
pub mod table;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

pub use amortization::AmortizationEngine;
pub use table::{to_table, Cell, LedgerColumn, Table, TableRow};

/// one settled period of a portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub cut_off_date: NaiveDate,
    /// invested principal; revenues are paid out, never capitalized
    pub capital: Money,
    pub applied_rate: Rate,
    pub gross_revenue: Money,
    pub tax_withheld: Money,
    /// running sum of gross revenue less tax up to and including this row
    pub accumulated_net_revenue: Money,
}

impl LedgerRow {
    pub fn net_revenue(&self) -> Money {
        self.gross_revenue - self.tax_withheld
    }
}

/// the trailing total row of a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LedgerTotals {
    pub gross_revenue: Money,
    pub tax_withheld: Money,
}

/// revenue ledger, ordered by cut-off date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AmortizationLedger {
    pub rows: Vec<LedgerRow>,
    pub totals: LedgerTotals,
}

impl AmortizationLedger {
    pub fn from_rows(rows: Vec<LedgerRow>) -> Self {
        let totals = LedgerTotals {
            gross_revenue: rows.iter().map(|r| r.gross_revenue).sum(),
            tax_withheld: rows.iter().map(|r| r.tax_withheld).sum(),
        };

        Self { rows, totals }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// net revenue accumulated by the last cut-off
    pub fn net_revenue(&self) -> Money {
        self.rows
            .last()
            .map(|r| r.accumulated_net_revenue)
            .unwrap_or(Money::ZERO)
    }

    /// row settled on `date`, if any
    pub fn row_on(&self, date: NaiveDate) -> Option<&LedgerRow> {
        self.rows.iter().find(|r| r.cut_off_date == date)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a AmortizationLedger {
    type Item = &'a LedgerRow;
    type IntoIter = std::slice::Iter<'a, LedgerRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

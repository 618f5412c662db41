use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};
use crate::errors::{PortfolioError, Result};
use crate::schedule::{AmortizationLedger, LedgerRow};

/// label of the trailing totals row
pub const TOTAL_LABEL: &str = "Total";

/// columns of a revenue ledger, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerColumn {
    CutOffDate,
    Capital,
    AppliedRate,
    GrossRevenue,
    TaxWithheld,
    AccumulatedNetRevenue,
}

impl LedgerColumn {
    pub const ALL: [LedgerColumn; 6] = [
        LedgerColumn::CutOffDate,
        LedgerColumn::Capital,
        LedgerColumn::AppliedRate,
        LedgerColumn::GrossRevenue,
        LedgerColumn::TaxWithheld,
        LedgerColumn::AccumulatedNetRevenue,
    ];

    /// accumulated revenue is already a running total, so it is left out by default
    pub const DEFAULT_TOTALS: [LedgerColumn; 2] =
        [LedgerColumn::GrossRevenue, LedgerColumn::TaxWithheld];

    pub fn header(&self) -> &'static str {
        match self {
            LedgerColumn::CutOffDate => "Cut-off Date",
            LedgerColumn::Capital => "Capital",
            LedgerColumn::AppliedRate => "Annual Rate",
            LedgerColumn::GrossRevenue => "Revenues",
            LedgerColumn::TaxWithheld => "ISR",
            LedgerColumn::AccumulatedNetRevenue => "Accumulated Revenues",
        }
    }

    fn cell(&self, row: &LedgerRow) -> Cell {
        match self {
            LedgerColumn::CutOffDate => Cell::Date(row.cut_off_date),
            LedgerColumn::Capital => Cell::Money(row.capital),
            LedgerColumn::AppliedRate => Cell::Rate(row.applied_rate),
            LedgerColumn::GrossRevenue => Cell::Money(row.gross_revenue),
            LedgerColumn::TaxWithheld => Cell::Money(row.tax_withheld),
            LedgerColumn::AccumulatedNetRevenue => Cell::Money(row.accumulated_net_revenue),
        }
    }
}

/// a single table value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Date(NaiveDate),
    Money(Money),
    Rate(Rate),
    Days(i64),
}

impl Cell {
    /// sum of two cells of the same kind; dates have no sum
    fn checked_add(self, other: Cell) -> Option<Cell> {
        match (self, other) {
            (Cell::Money(a), Cell::Money(b)) => Some(Cell::Money(a + b)),
            (Cell::Rate(a), Cell::Rate(b)) => Some(Cell::Rate(a + b)),
            (Cell::Days(a), Cell::Days(b)) => Some(Cell::Days(a + b)),
            _ => None,
        }
    }

    fn zero_like(&self) -> Option<Cell> {
        match self {
            Cell::Money(_) => Some(Cell::Money(Money::ZERO)),
            Cell::Rate(_) => Some(Cell::Rate(Rate::ZERO)),
            Cell::Days(_) => Some(Cell::Days(0)),
            Cell::Date(_) => None,
        }
    }

    pub fn as_money(&self) -> Option<Money> {
        match self {
            Cell::Money(m) => Some(*m),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Date(d) => write!(f, "{}", d),
            Cell::Money(m) => write!(f, "{}", m.round_cents()),
            Cell::Rate(r) => write!(f, "{}", r),
            Cell::Days(d) => write!(f, "{}", d),
        }
    }
}

/// labelled table row; `None` cells are blank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<Option<Cell>>,
}

/// rows ready for rendering, closed by a totals row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// build a numbered table and close it with totals of the `summed` column indexes
    pub fn with_totals(
        headers: Vec<String>,
        body: Vec<Vec<Cell>>,
        summed: &[usize],
    ) -> Result<Self> {
        if let Some(cells) = body.iter().find(|cells| cells.len() != headers.len()) {
            return Err(PortfolioError::InvalidConfiguration {
                message: format!("{} cells under {} headers", cells.len(), headers.len()),
            });
        }

        let mut totals: Vec<Option<Cell>> = vec![None; headers.len()];

        for &index in summed {
            let header = headers.get(index).ok_or_else(|| PortfolioError::InvalidConfiguration {
                message: format!("no column {} to total", index),
            })?;

            let mut total: Option<Cell> = None;
            for cells in &body {
                let cell = cells[index];
                let running = match total {
                    Some(running) => running,
                    None => cell.zero_like().ok_or_else(|| unsummable(header))?,
                };
                total = Some(running.checked_add(cell).ok_or_else(|| unsummable(header))?);
            }
            totals[index] = total;
        }

        let mut rows: Vec<TableRow> = body
            .into_iter()
            .enumerate()
            .map(|(i, cells)| TableRow {
                label: (i + 1).to_string(),
                cells: cells.into_iter().map(Some).collect(),
            })
            .collect();

        rows.push(TableRow {
            label: TOTAL_LABEL.to_string(),
            cells: totals,
        });

        Ok(Self { headers, rows })
    }

    pub fn total_row(&self) -> Option<&TableRow> {
        self.rows.last().filter(|r| r.label == TOTAL_LABEL)
    }

    /// value of the totals row under `header`
    pub fn total_of(&self, header: &str) -> Option<Cell> {
        let index = self.headers.iter().position(|h| h == header)?;
        self.total_row().and_then(|r| r.cells.get(index).copied().flatten())
    }
}

fn unsummable(header: &str) -> PortfolioError {
    PortfolioError::UnsummableColumn {
        column: header.to_string(),
    }
}

/// tabulate a ledger, totalling `columns_to_sum`
pub fn to_table(ledger: &AmortizationLedger, columns_to_sum: &[LedgerColumn]) -> Result<Table> {
    if let Some(date) = columns_to_sum.iter().find(|c| **c == LedgerColumn::CutOffDate) {
        return Err(unsummable(date.header()));
    }

    let headers: Vec<String> = LedgerColumn::ALL.iter().map(|c| c.header().to_string()).collect();
    let body: Vec<Vec<Cell>> = ledger
        .iter()
        .map(|row| LedgerColumn::ALL.iter().map(|c| c.cell(row)).collect())
        .collect();
    let summed: Vec<usize> = columns_to_sum
        .iter()
        .filter_map(|c| LedgerColumn::ALL.iter().position(|a| a == c))
        .collect();

    Table::with_totals(headers, body, &summed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortfolioTerms;
    use crate::interest::MeanRate;
    use crate::schedule::AmortizationEngine;

    fn ledger() -> AmortizationLedger {
        let start = NaiveDate::from_ymd_opt(2020, 1, 16).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 1, 16).unwrap();
        let descriptor = PortfolioTerms::monthly(start, end, Money::from_major(1_000_000), false)
            .with_rate(Rate::from_percentage(16));

        AmortizationEngine::generate(&descriptor, &mut MeanRate).unwrap()
    }

    #[test]
    fn test_default_totals() {
        let ledger = ledger();
        let table = to_table(&ledger, &LedgerColumn::DEFAULT_TOTALS).unwrap();

        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows.len(), 13);
        assert_eq!(table.rows[0].label, "1");

        let total = table.total_row().unwrap();
        assert_eq!(total.label, "Total");
        assert_eq!(total.cells[0], None);
        assert_eq!(total.cells[1], None);
        assert_eq!(total.cells[5], None);

        assert_eq!(
            table.total_of("Revenues").and_then(|c| c.as_money()),
            Some(ledger.totals.gross_revenue)
        );
        assert_eq!(
            table.total_of("ISR").and_then(|c| c.as_money()),
            Some(ledger.totals.tax_withheld)
        );
    }

    #[test]
    fn test_custom_totals() {
        let ledger = ledger();
        let table = to_table(&ledger, &[LedgerColumn::Capital]).unwrap();

        assert_eq!(
            table.total_of("Capital").and_then(|c| c.as_money()),
            Some(Money::from_major(12_000_000))
        );
        assert_eq!(table.total_of("Revenues"), None);
    }

    #[test]
    fn test_dates_cannot_be_totalled() {
        let result = to_table(&ledger(), &[LedgerColumn::CutOffDate]);
        assert!(matches!(
            result,
            Err(PortfolioError::UnsummableColumn { .. })
        ));
    }

    #[test]
    fn test_empty_ledger_totals_are_blank() {
        let empty = AmortizationLedger::default();
        let table = to_table(&empty, &LedgerColumn::DEFAULT_TOTALS).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert!(table.total_row().unwrap().cells.iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_malformed_tables_rejected() {
        let headers = vec!["Deposit".to_string(), "Days".to_string()];
        let ragged = vec![vec![Cell::Money(Money::from_major(1))]];
        assert!(matches!(
            Table::with_totals(headers.clone(), ragged, &[0]),
            Err(PortfolioError::InvalidConfiguration { .. })
        ));

        let body = vec![vec![Cell::Money(Money::from_major(1)), Cell::Days(3)]];
        assert!(matches!(
            Table::with_totals(headers, body, &[2]),
            Err(PortfolioError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_cell_display() {
        let revenue = Money::from_str_exact("13333.333").unwrap();
        assert_eq!(Cell::Money(revenue).to_string(), "13333.33");
        assert_eq!(Cell::Rate(Rate::from_percentage(16)).to_string(), "16%");
        assert_eq!(Cell::Days(575).to_string(), "575");
    }
}

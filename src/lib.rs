pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod goals;
pub mod interest;
pub mod moneybox;
pub mod portfolio;
pub mod rates;
pub mod schedule;
pub mod serialization;
pub mod types;

// re-export key types
pub use calendar::{
    count_months, count_periods, periods_per_year, recurring_deposits, step_for, Step,
};
pub use config::{PortfolioTerms, ProductDescriptor};
pub use decimal::{Money, Rate};
pub use errors::{PortfolioError, Result};
pub use goals::{goal_amount_for, goal_date_for, GoalProduct};
pub use interest::{
    current_withholding_rate, withholding_rate, DayCountConvention, GaussianRates, MeanRate,
    RateSource,
};
pub use moneybox::{accrue, AccrualLedger, AccrualRow, AccrualTotals, MoneyBox};
pub use portfolio::{Portfolio, PortfolioBuilder};
pub use rates::{RateSelector, RateTable, RateTier};
pub use schedule::{
    to_table, AmortizationEngine, AmortizationLedger, Cell, LedgerColumn, LedgerRow, LedgerTotals,
    Table, TableRow,
};
pub use serialization::{MoneyBoxView, PortfolioView};
pub use types::{Category, Deposit, PayMethod, Period, PortfolioId, ProductVariant};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

pub mod accrual;
pub mod tax;
pub mod variable;

pub use accrual::DayCountConvention;
pub use tax::{current_withholding_rate, withholding_rate};
pub use variable::{GaussianRates, MeanRate, RateSource, VARIABLE_RATE_STD_DEV};

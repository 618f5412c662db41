use chrono::{Datelike, NaiveDate};
use rust_decimal_macros::dec;

use crate::decimal::Rate;

/// the current ISR regime applies to products started on or after jan 1 of this year
pub const ISR_CUTOVER_YEAR: i32 = 2020;

/// ISR withheld on revenues of a product started on `start_date`
pub fn withholding_rate(start_date: NaiveDate) -> Rate {
    if start_date.year() >= ISR_CUTOVER_YEAR {
        current_withholding_rate()
    } else {
        Rate::from_percentage_decimal(dec!(1.04))
    }
}

/// ISR of the regime in force since the cutover
pub fn current_withholding_rate() -> Rate {
    Rate::from_percentage_decimal(dec!(1.45))
}

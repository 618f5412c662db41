use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::decimal::Rate;
use crate::errors::{PortfolioError, Result};

/// spread of variable rates, in percentage points
pub const VARIABLE_RATE_STD_DEV: f64 = 2.0;

/// source of per-period annual rates for variable products
pub trait RateSource {
    /// draw the annual rate for one period around `mean`
    fn draw(&mut self, mean: Rate) -> Result<Rate>;
}

impl<S: RateSource + ?Sized> RateSource for &mut S {
    fn draw(&mut self, mean: Rate) -> Result<Rate> {
        (**self).draw(mean)
    }
}

/// normally distributed rates, rounded to whole percentage points of the fraction (0.16, 0.17, ...)
pub struct GaussianRates<R: Rng> {
    rng: R,
    std_dev: f64,
}

impl<R: Rng> GaussianRates<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            std_dev: VARIABLE_RATE_STD_DEV,
        }
    }

    /// `std_dev` in percentage points; must be finite and non-negative
    pub fn with_std_dev(rng: R, std_dev: f64) -> Result<Self> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(PortfolioError::CalculationError {
                message: format!("invalid rate spread: std dev {}", std_dev),
            });
        }

        Ok(Self { rng, std_dev })
    }
}

impl GaussianRates<StdRng> {
    /// reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RateSource for GaussianRates<R> {
    fn draw(&mut self, mean: Rate) -> Result<Rate> {
        let mean_percent = mean.as_percentage().to_f64().ok_or_else(|| {
            PortfolioError::CalculationError {
                message: format!("rate {} is not representable as f64", mean),
            }
        })?;

        let normal = Normal::new(mean_percent, self.std_dev).map_err(|_| {
            PortfolioError::CalculationError {
                message: format!(
                    "invalid rate distribution: mean {}, std dev {}",
                    mean_percent, self.std_dev
                ),
            }
        })?;

        let sample = normal.sample(&mut self.rng);
        let percent = Decimal::from_f64(sample).ok_or_else(|| PortfolioError::CalculationError {
            message: format!("sampled rate {} is not a finite decimal", sample),
        })?;

        Ok(Rate::from_percentage_decimal(percent).round_dp(2))
    }
}

/// always the mean; no randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanRate;

impl RateSource for MeanRate {
    fn draw(&mut self, mean: Rate) -> Result<Rate> {
        Ok(mean)
    }
}

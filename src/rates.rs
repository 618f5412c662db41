use serde::{Deserialize, Serialize};
use std::ops::{Bound, RangeBounds};

use crate::decimal::{Money, Rate};
use crate::errors::{PortfolioError, Result};
use crate::types::ProductVariant;

/// principal at or above which the higher rate of a tier applies
pub const AMOUNT_THRESHOLD: i64 = 500_000;

/// one duration band of a rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    pub min_months: Bound<i32>,
    pub max_months: Bound<i32>,
    /// whole percent paid below the amount threshold
    pub below_threshold: u32,
    /// whole percent paid at or above the amount threshold
    pub at_or_above_threshold: u32,
}

impl RateTier {
    fn unbounded(below_threshold: u32, at_or_above_threshold: u32) -> Self {
        Self {
            min_months: Bound::Unbounded,
            max_months: Bound::Unbounded,
            below_threshold,
            at_or_above_threshold,
        }
    }

    pub fn covers(&self, months: i32) -> bool {
        (self.min_months, self.max_months).contains(&months)
    }

    pub fn rate_for(&self, principal: Money, threshold: Money) -> Rate {
        if principal < threshold {
            Rate::from_percentage(self.below_threshold)
        } else {
            Rate::from_percentage(self.at_or_above_threshold)
        }
    }
}

/// rate policy of one product variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub variant: ProductVariant,
    /// whole percent paid on every dynamic product, regardless of amount or duration
    pub dynamic_rate: u32,
    pub amount_threshold: Money,
    pub tiers: Vec<RateTier>,
}

impl RateTable {
    /// standard table for a variant
    pub fn for_variant(variant: ProductVariant) -> Self {
        let amount_threshold = Money::from_major(AMOUNT_THRESHOLD);

        match variant {
            ProductVariant::Starter => Self {
                variant,
                dynamic_rate: 7,
                amount_threshold,
                tiers: vec![RateTier::unbounded(10, 12)],
            },
            ProductVariant::Classic => Self {
                variant,
                dynamic_rate: 7,
                amount_threshold,
                tiers: vec![
                    RateTier {
                        min_months: Bound::Included(12),
                        max_months: Bound::Included(36),
                        below_threshold: 10,
                        at_or_above_threshold: 12,
                    },
                    RateTier {
                        min_months: Bound::Excluded(36),
                        max_months: Bound::Included(60),
                        below_threshold: 12,
                        at_or_above_threshold: 14,
                    },
                    RateTier {
                        min_months: Bound::Excluded(60),
                        max_months: Bound::Unbounded,
                        below_threshold: 14,
                        at_or_above_threshold: 16,
                    },
                ],
            },
            ProductVariant::Flexible => Self {
                variant,
                dynamic_rate: 4,
                amount_threshold,
                tiers: vec![RateTier::unbounded(5, 5)],
            },
        }
    }

    /// annual rate for a product of this variant
    pub fn select(&self, dynamic: bool, principal: Money, months: i32) -> Result<Rate> {
        if dynamic {
            return Ok(Rate::from_percentage(self.dynamic_rate));
        }

        self.tiers
            .iter()
            .find(|tier| tier.covers(months))
            .map(|tier| tier.rate_for(principal, self.amount_threshold))
            .ok_or_else(|| {
                tracing::warn!(variant = %self.variant, months, "no rate tier for duration");
                PortfolioError::UnsupportedDuration {
                    variant: self.variant,
                    months,
                }
            })
    }
}

/// maps product terms to an annual rate using the standard tables
pub struct RateSelector;

impl RateSelector {
    pub fn select(
        variant: ProductVariant,
        dynamic: bool,
        principal: Money,
        months: i32,
    ) -> Result<Rate> {
        RateTable::for_variant(variant).select(dynamic, principal, months)
    }
}

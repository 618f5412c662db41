use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::{PortfolioTerms, ProductDescriptor};
use crate::decimal::{Money, Rate};
use crate::errors::{PortfolioError, Result};
use crate::goals::GoalProduct;
use crate::interest::{GaussianRates, RateSource};
use crate::rates::RateSelector;
use crate::schedule::{to_table, AmortizationEngine, AmortizationLedger, LedgerColumn, Table};
use crate::types::{Category, PayMethod, Period, PortfolioId, ProductVariant};

/// an investment portfolio with a resolved annual rate
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub id: PortfolioId,
    /// `None` for ad-hoc products with an explicit rate
    pub variant: Option<ProductVariant>,
    pub descriptor: ProductDescriptor,
    /// whether revenues are meant to be reinvested at maturity
    pub reinvestment: bool,
}

impl Portfolio {
    /// create portfolio from a complete descriptor
    pub fn new(
        variant: Option<ProductVariant>,
        descriptor: ProductDescriptor,
        reinvestment: bool,
    ) -> Result<Self> {
        descriptor.validate()?;

        let id = Uuid::new_v4();
        tracing::debug!(
            %id,
            variant = ?variant,
            rate = %descriptor.annual_rate,
            principal = %descriptor.principal,
            "created portfolio"
        );

        Ok(Self {
            id,
            variant,
            descriptor,
            reinvestment,
        })
    }

    /// product line priced through the standard rate tables
    pub fn for_variant(variant: ProductVariant, terms: PortfolioTerms) -> Result<Self> {
        terms.validate()?;

        let rate = RateSelector::select(variant, terms.dynamic, terms.principal, terms.months())?;
        let reinvestment = !matches!(variant, ProductVariant::Starter);

        Self::new(Some(variant), terms.with_rate(rate), reinvestment)
    }

    pub fn starter(terms: PortfolioTerms) -> Result<Self> {
        Self::for_variant(ProductVariant::Starter, terms)
    }

    pub fn classic(terms: PortfolioTerms) -> Result<Self> {
        Self::for_variant(ProductVariant::Classic, terms)
    }

    pub fn flexible(terms: PortfolioTerms) -> Result<Self> {
        Self::for_variant(ProductVariant::Flexible, terms)
    }

    /// ad-hoc product with an explicit annual rate
    pub fn custom(terms: PortfolioTerms, annual_rate: Rate) -> Result<Self> {
        Self::new(None, terms.with_rate(annual_rate), false)
    }

    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::new()
    }

    pub fn annual_rate(&self) -> Rate {
        self.descriptor.annual_rate
    }

    pub fn withholding_rate(&self) -> Rate {
        self.descriptor.withholding_rate()
    }

    /// generate the ledger; variable products draw from a freshly seeded generator
    pub fn amortize(&self) -> Result<AmortizationLedger> {
        let mut rates = GaussianRates::from_entropy();
        self.amortize_with(&mut rates)
    }

    /// generate the ledger drawing variable rates from `rates`
    pub fn amortize_with<S: RateSource + ?Sized>(
        &self,
        rates: &mut S,
    ) -> Result<AmortizationLedger> {
        AmortizationEngine::generate(&self.descriptor, rates)
    }

    /// ledger in table form with the default revenue and ISR totals
    pub fn amortization_table(&self) -> Result<Table> {
        let ledger = self.amortize()?;
        to_table(&ledger, &LedgerColumn::DEFAULT_TOTALS)
    }

    pub fn gross_revenue_over_lifetime(&self) -> Money {
        self.descriptor.gross_revenue_over_lifetime()
    }

    pub fn net_revenue_over_lifetime(&self) -> Money {
        self.descriptor.net_revenue_over_lifetime()
    }

    /// savings-goal view of this portfolio
    pub fn goal_product(&self) -> GoalProduct {
        GoalProduct::from(&self.descriptor)
    }
}

/// field-by-field construction, as the registry shell reads a stored portfolio
pub struct PortfolioBuilder {
    variant: Option<ProductVariant>,
    category: Category,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    principal: Option<Money>,
    pay_method: PayMethod,
    period: Period,
    rate: Option<Rate>,
}

impl PortfolioBuilder {
    pub fn new() -> Self {
        Self {
            variant: None,
            category: Category::Fixed,
            start_date: None,
            end_date: None,
            principal: None,
            pay_method: PayMethod::Standard,
            period: Period::Month,
            rate: None,
        }
    }

    pub fn variant(mut self, variant: ProductVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn pay_method(mut self, pay_method: PayMethod) -> Self {
        self.pay_method = pay_method;
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// explicit annual rate; only for products without a variant
    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn build(self) -> Result<Portfolio> {
        let terms = PortfolioTerms {
            category: self.category,
            start_date: required(self.start_date, "start date")?,
            end_date: required(self.end_date, "end date")?,
            principal: required(self.principal, "principal")?,
            dynamic: self.pay_method.is_dynamic(),
            period: self.period,
        };

        match (self.variant, self.rate) {
            (Some(variant), None) => Portfolio::for_variant(variant, terms),
            (None, Some(rate)) => Portfolio::custom(terms, rate),
            (Some(variant), Some(_)) => Err(PortfolioError::InvalidConfiguration {
                message: format!("{} portfolios are priced by the rate table", variant),
            }),
            (None, None) => Err(PortfolioError::InvalidConfiguration {
                message: "either a product variant or a rate is required".to_string(),
            }),
        }
    }
}

impl Default for PortfolioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| PortfolioError::InvalidConfiguration {
        message: format!("{} is required", field),
    })
}

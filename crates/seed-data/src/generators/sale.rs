//! Daily sales generation.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use time::Date;

use dairy::{PaymentStatus, SaleItem};

use crate::calendar::HistoryWindow;
use crate::config::{CountRange, ValueRange, validate_choices, validate_probability};
use crate::error::SeedError;

/// Generated sale ready for insertion into `sales`.
#[derive(Debug, Clone)]
pub struct GeneratedSale {
    pub created_at: Date,
    pub customer_name: String,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub items: Vec<SaleItem>,
}

impl GeneratedSale {
    /// The `items` column value.
    pub fn items_json(&self) -> Result<String, SeedError> {
        Ok(serde_json::to_string(&self.items)?)
    }
}

/// Configuration for sale generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleGenConfig {
    /// Sales recorded per day.
    pub sales_per_day: CountRange,
    /// Total amount, rounded to 0.01.
    pub amount: ValueRange,
    /// Probability that a sale is already paid.
    pub paid_probability: f64,
    /// Quantity of the single line item.
    pub item_quantity: CountRange,
    pub customers: Vec<String>,
    /// Product names used for line items.
    pub item_products: Vec<String>,
}

impl Default for SaleGenConfig {
    fn default() -> Self {
        Self {
            sales_per_day: CountRange::new(1, 5),
            amount: ValueRange::new(100.0, 2000.0),
            paid_probability: 0.75,
            item_quantity: CountRange::new(1, 10),
            customers: [
                "Ahmet Yılmaz",
                "Ayşe Demir",
                "Mehmet Kaya",
                "Fatma Çelik",
                "Market A",
                "Market B",
                "Restoran X",
            ]
            .map(String::from)
            .to_vec(),
            item_products: ["Tam Yağlı Yoğurt", "Beyaz Peynir", "Kaşar"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl SaleGenConfig {
    pub fn validate(&self) -> Result<(), SeedError> {
        self.sales_per_day.validate("sales.sales_per_day")?;
        self.amount.validate_rounded("sales.amount", 2)?;
        validate_probability("sales.paid_probability", self.paid_probability)?;
        self.item_quantity.validate("sales.item_quantity")?;
        validate_choices("sales.customers", &self.customers)?;
        validate_choices("sales.item_products", &self.item_products)?;
        Ok(())
    }
}

/// Generates daily sales.
pub struct SaleGenerator {
    config: SaleGenConfig,
}

impl SaleGenerator {
    /// Creates a new sale generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: SaleGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: SaleGenConfig) -> Self {
        Self { config }
    }

    /// Generates sales for every day in the window, in date order.
    pub fn generate(
        &self,
        window: &HistoryWindow,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedSale>, SeedError> {
        self.config.validate()?;

        let paid = Bernoulli::new(self.config.paid_probability)
            .map_err(|e| SeedError::InvalidConfig(format!("sales.paid_probability: {e}")))?;

        let mut sales = Vec::new();
        for date in window.days() {
            sales.extend(self.generate_for_day(date, &paid, rng)?);
        }

        Ok(sales)
    }

    /// Generates the sales of a single day. The config must already be validated.
    pub(crate) fn generate_for_day(
        &self,
        date: Date,
        paid: &Bernoulli,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedSale>, SeedError> {
        let count = self.config.sales_per_day.sample(rng);
        (0..count)
            .map(|_| self.generate_single(date, paid, rng))
            .collect()
    }

    fn generate_single(
        &self,
        date: Date,
        paid: &Bernoulli,
        rng: &mut impl Rng,
    ) -> Result<GeneratedSale, SeedError> {
        let customer_name = pick(&self.config.customers, "sales.customers", rng)?;
        let total_amount = self.config.amount.sample_rounded(2, rng);
        let payment_status = if paid.sample(rng) {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        };

        // Single line item priced at the sale total
        let item = SaleItem {
            product: pick(&self.config.item_products, "sales.item_products", rng)?,
            quantity: self.config.item_quantity.sample(rng),
            price: total_amount,
        };

        Ok(GeneratedSale {
            created_at: date,
            customer_name,
            total_amount,
            payment_status,
            items: vec![item],
        })
    }
}

fn pick(choices: &[String], field: &str, rng: &mut impl Rng) -> Result<String, SeedError> {
    choices
        .choose(rng)
        .cloned()
        .ok_or_else(|| SeedError::InvalidConfig(format!("{field}: no values to choose from")))
}

impl Default for SaleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

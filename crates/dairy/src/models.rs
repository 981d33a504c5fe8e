use serde::{Deserialize, Serialize};

/// Schema namespace holding every dairy table.
pub const SCHEMA: &str = "public";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Products,
    MilkRecords,
    ProductionBatches,
    Sales,
    Returns,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Products => "products",
            Table::MilkRecords => "milk_records",
            Table::ProductionBatches => "production_batches",
            Table::Sales => "sales",
            Table::Returns => "returns",
        }
    }

    /// Schema-qualified table name, e.g. `public.sales`.
    pub fn qualified(&self, schema: &str) -> String {
        format!("{schema}.{}", self.as_str())
    }
}

/// Milking period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Evening,
}

impl Shift {
    /// Shifts in the order they occur during a day.
    pub const ALL: [Shift; 2] = [Shift::Morning, Shift::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Evening => "evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    InProgress,
    Completed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::InProgress => "in_progress",
            BatchStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
        }
    }
}

/// Product produced by a production batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Yogurt,
    WhiteCheese,
    KasharCheese,
    Butter,
    Ayran,
}

impl ProductType {
    pub const ALL: [ProductType; 5] = [
        ProductType::Yogurt,
        ProductType::WhiteCheese,
        ProductType::KasharCheese,
        ProductType::Butter,
        ProductType::Ayran,
    ];

    /// Name stored in `production_batches.product_type`.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Yogurt => "Yoğurt",
            ProductType::WhiteCheese => "Beyaz Peynir",
            ProductType::KasharCheese => "Kaşar Peyniri",
            ProductType::Butter => "Tereyağı",
            ProductType::Ayran => "Ayran",
        }
    }

    /// Batch number prefix: first three characters of the display name, uppercased.
    pub fn batch_code(&self) -> String {
        self.display_name()
            .chars()
            .take(3)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Kilograms of product obtained per liter of milk.
    pub fn yield_ratio(&self) -> f64 {
        match self {
            ProductType::Yogurt => 0.8,
            _ => 0.15,
        }
    }
}

/// Catalog category stored in `products.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Yogurt,
    Cheese,
    Butter,
    Beverage,
}

impl ProductCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Yogurt => "Yoğurt",
            ProductCategory::Cheese => "Peynir",
            ProductCategory::Butter => "Tereyağı",
            ProductCategory::Beverage => "İçecek",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub sku: String,
    pub unit_price: f64,
    pub stock_quantity: i32,
    pub category: ProductCategory,
}

impl Product {
    pub fn new(
        name: &str,
        sku: &str,
        unit_price: f64,
        stock_quantity: i32,
        category: ProductCategory,
    ) -> Self {
        Self {
            name: name.to_string(),
            sku: sku.to_string(),
            unit_price,
            stock_quantity,
            category,
        }
    }
}

/// One line of the `sales.items` JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub product: String,
    pub quantity: u32,
    pub price: f64,
}

//! The static product catalog.

use dairy::{Product, ProductCategory};

/// Catalog rows inserted into `products` on every run.
pub fn default_catalog() -> Vec<Product> {
    vec![
        Product::new("Tam Yağlı Yoğurt (1kg)", "YGT-001", 45.0, 150, ProductCategory::Yogurt),
        Product::new("Süzme Yoğurt (500g)", "YGT-002", 35.0, 80, ProductCategory::Yogurt),
        Product::new("Tam Yağlı Beyaz Peynir (Kg)", "PYN-001", 180.0, 45, ProductCategory::Cheese),
        Product::new("Taze Kaşar Peyniri (400g)", "PYN-002", 120.0, 60, ProductCategory::Cheese),
        Product::new("Köy Tereyağı (Kg)", "YAG-001", 350.0, 25, ProductCategory::Butter),
        Product::new("Yayık Ayranı (1L)", "ICE-001", 25.0, 100, ProductCategory::Beverage),
    ]
}

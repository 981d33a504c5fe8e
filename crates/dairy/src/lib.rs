pub mod models;

pub use models::{
    BatchStatus, PaymentStatus, Product, ProductCategory, ProductType, SaleItem, Shift, Table,
    SCHEMA,
};

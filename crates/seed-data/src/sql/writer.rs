//! SQL seed script writer.

use tracing::{debug, info};

use dairy::{Product, Table};

use crate::error::SeedError;
use crate::generators::{GeneratedBatch, GeneratedMilkRecord, GeneratedSale};
use crate::sql::SqlValue;

/// Tables cleared before seeding. `products` is kept; `returns` has no generator.
pub const TRUNCATED_TABLES: [Table; 4] = [
    Table::MilkRecords,
    Table::ProductionBatches,
    Table::Sales,
    Table::Returns,
];

/// Accumulates the statements of a seed script.
pub struct SeedWriter {
    schema: String,
    batch_size: Option<usize>,
    statements: Vec<String>,
}

impl SeedWriter {
    /// Creates a writer targeting the given schema.
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            batch_size: None,
            statements: Vec::new(),
        }
    }

    /// Limits the number of rows per `INSERT` statement.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size.max(1));
        self
    }

    /// Emits `TRUNCATE TABLE ... CASCADE` for the given tables.
    pub fn truncate(&mut self, tables: &[Table]) {
        let names: Vec<String> = tables.iter().map(|t| t.qualified(&self.schema)).collect();
        self.statements
            .push(format!("TRUNCATE TABLE {} CASCADE;", names.join(", ")));
    }

    pub fn write_products(&mut self, products: &[Product]) -> Result<(), SeedError> {
        let rows = products
            .iter()
            .map(|p| {
                vec![
                    SqlValue::text(&p.name),
                    SqlValue::text(&p.sku),
                    SqlValue::decimal(p.unit_price, 2),
                    SqlValue::Integer(i64::from(p.stock_quantity)),
                    SqlValue::text(p.category.label()),
                ]
            })
            .collect();

        self.insert(
            Table::Products,
            &["name", "sku", "unit_price", "stock_quantity", "category"],
            rows,
        )
    }

    pub fn write_milk_records(
        &mut self,
        records: &[GeneratedMilkRecord],
    ) -> Result<(), SeedError> {
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    SqlValue::Date(r.date),
                    SqlValue::text(r.shift.as_str()),
                    SqlValue::decimal(r.quantity_liters, 1),
                    SqlValue::decimal(r.fat_rate, 2),
                    SqlValue::decimal(r.ph_level, 2),
                    SqlValue::text(&r.notes),
                ]
            })
            .collect();

        self.insert(
            Table::MilkRecords,
            &["date", "shift", "quantity_liters", "fat_rate", "ph_level", "notes"],
            rows,
        )
    }

    pub fn write_batches(&mut self, batches: &[GeneratedBatch]) -> Result<(), SeedError> {
        let rows = batches
            .iter()
            .map(|b| {
                vec![
                    SqlValue::text(&b.batch_number),
                    SqlValue::text(b.product_type.display_name()),
                    SqlValue::decimal(b.milk_used_liters, 0),
                    SqlValue::Timestamp(b.start_time),
                    SqlValue::optional(b.end_time, SqlValue::Timestamp),
                    SqlValue::text(b.status.as_str()),
                    SqlValue::optional(b.output_quantity, |q| SqlValue::decimal(q, 1)),
                    SqlValue::optional(b.output_unit.as_deref(), SqlValue::text),
                ]
            })
            .collect();

        self.insert(
            Table::ProductionBatches,
            &[
                "batch_number",
                "product_type",
                "milk_used_liters",
                "start_time",
                "end_time",
                "status",
                "output_quantity",
                "output_unit",
            ],
            rows,
        )
    }

    pub fn write_sales(&mut self, sales: &[GeneratedSale]) -> Result<(), SeedError> {
        let rows = sales
            .iter()
            .map(|s| -> Result<Vec<SqlValue>, SeedError> {
                Ok(vec![
                    SqlValue::Date(s.created_at),
                    SqlValue::text(&s.customer_name),
                    SqlValue::decimal(s.total_amount, 2),
                    SqlValue::text(s.payment_status.as_str()),
                    SqlValue::text(s.items_json()?),
                ])
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.insert(
            Table::Sales,
            &[
                "created_at",
                "customer_name",
                "total_amount",
                "payment_status",
                "items",
            ],
            rows,
        )
    }

    /// Renders rows into one or more `INSERT` statements.
    fn insert(
        &mut self,
        table: Table,
        columns: &[&str],
        rows: Vec<Vec<SqlValue>>,
    ) -> Result<(), SeedError> {
        // An empty VALUES list is not valid SQL
        if rows.is_empty() {
            debug!("No rows for {}, skipping insert", table.as_str());
            return Ok(());
        }

        let target = table.qualified(&self.schema);
        let chunk_size = self.batch_size.unwrap_or(rows.len());

        for chunk in rows.chunks(chunk_size) {
            let mut tuples = Vec::with_capacity(chunk.len());
            for row in chunk {
                let values = row
                    .iter()
                    .map(SqlValue::render)
                    .collect::<Result<Vec<_>, _>>()?;
                tuples.push(format!("({})", values.join(", ")));
            }

            self.statements.push(format!(
                "INSERT INTO {target} ({}) VALUES\n{};",
                columns.join(", "),
                tuples.join(",\n")
            ));
        }

        info!("Wrote {} rows into {}", rows.len(), target);
        Ok(())
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Joins all statements into the final script.
    pub fn finish(self) -> String {
        self.statements.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dairy::{BatchStatus, PaymentStatus, ProductType, SaleItem, Shift};
    use time::macros::{date, datetime};

    use crate::generators::default_catalog;

    #[test]
    fn test_truncate_statement() {
        let mut writer = SeedWriter::new("public");
        writer.truncate(&TRUNCATED_TABLES);

        assert_eq!(
            writer.finish(),
            "TRUNCATE TABLE public.milk_records, public.production_batches, public.sales, public.returns CASCADE;"
        );
    }

    #[test]
    fn test_product_insert() {
        let mut writer = SeedWriter::new("public");
        writer.write_products(&default_catalog()).unwrap();

        let sql = writer.finish();
        assert!(sql.starts_with(
            "INSERT INTO public.products (name, sku, unit_price, stock_quantity, category) VALUES\n"
        ));
        assert!(sql.contains("('Tam Yağlı Yoğurt (1kg)', 'YGT-001', 45.00, 150, 'Yoğurt')"));
        assert!(sql.contains("('Yayık Ayranı (1L)', 'ICE-001', 25.00, 100, 'İçecek');"));
    }

    #[test]
    fn test_milk_record_row() {
        let mut writer = SeedWriter::new("public");
        writer
            .write_milk_records(&[GeneratedMilkRecord {
                date: date!(2024 - 02 - 01),
                shift: Shift::Morning,
                quantity_liters: 452.3,
                fat_rate: 3.8,
                ph_level: 6.71,
                notes: String::new(),
            }])
            .unwrap();

        assert!(
            writer
                .finish()
                .ends_with("('2024-02-01', 'morning', 452.3, 3.80, 6.71, '');")
        );
    }

    #[test]
    fn test_in_progress_batch_renders_nulls() {
        let mut writer = SeedWriter::new("public");
        writer
            .write_batches(&[GeneratedBatch {
                batch_number: "2024-AYR-104".to_string(),
                counter: 104,
                product_type: ProductType::Ayran,
                milk_used_liters: 612.0,
                start_time: datetime!(2024 - 03 - 31 08:00:00),
                end_time: None,
                status: BatchStatus::InProgress,
                output_quantity: None,
                output_unit: None,
            }])
            .unwrap();

        assert!(writer.finish().ends_with(
            "('2024-AYR-104', 'Ayran', 612, '2024-03-31 08:00:00', NULL, 'in_progress', NULL, NULL);"
        ));
    }

    #[test]
    fn test_sale_items_are_escaped() {
        let mut writer = SeedWriter::new("public");
        writer
            .write_sales(&[GeneratedSale {
                created_at: date!(2024 - 02 - 01),
                customer_name: "D'Angelo".to_string(),
                total_amount: 150.5,
                payment_status: PaymentStatus::Paid,
                items: vec![SaleItem {
                    product: "Kaşar".to_string(),
                    quantity: 2,
                    price: 150.5,
                }],
            }])
            .unwrap();

        let sql = writer.finish();
        assert!(sql.contains("'D''Angelo', 150.50, 'paid'"));
        assert!(sql.contains(r#"'[{"product":"Kaşar","quantity":2,"price":150.5}]'"#));
    }

    #[test]
    fn test_empty_table_is_skipped() {
        let mut writer = SeedWriter::new("public");
        writer.write_batches(&[]).unwrap();
        assert!(writer.statements().is_empty());
    }

    #[test]
    fn test_batch_size_splits_statements() {
        let mut writer = SeedWriter::new("public").with_batch_size(4);
        writer.write_products(&default_catalog()).unwrap();

        let statements = writer.statements();
        assert_eq!(statements.len(), 2);
        assert!(statements.iter().all(|s| s.starts_with("INSERT INTO public.products")));
        assert_eq!(statements[1].lines().count(), 3);
    }
}

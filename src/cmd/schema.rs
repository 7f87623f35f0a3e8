//! Schema command - print expected input formats

use clap::Args;
use schemars::schema_for;

use crate::store::Snapshot;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or csv-header
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the inventory snapshot file
    JsonSchema,
    /// CSV header row for the import format
    CsvHeader,
    /// CSV column descriptions for the import format
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(Snapshot);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("CSV Import Format");
        println!("=================");
        println!();
        for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:16} ({:8})  {}", name, req, description);
        }
        println!();
        println!("SKUs are trimmed and upper-cased on import");
        Ok(())
    }
}

const CSV_COLUMNS: &[&str] = &[
    "sku",
    "name",
    "category",
    "quantity",
    "unit_cost",
    "total_cost",
    "supplier",
    "location",
    "reorder_point",
    "barcode",
];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("sku", true, "Stock Keeping Unit, unique identifier"),
    ("name", true, "Item name / description"),
    ("category", false, "Category (defaults to empty)"),
    ("quantity", false, "Units on hand"),
    ("unit_cost", false, "Weighted-average cost per unit"),
    ("total_cost", false, "Cost basis of the units on hand"),
    ("supplier", false, "Supplier name"),
    ("location", false, "Storage location"),
    ("reorder_point", false, "Low-stock threshold (defaults to 5)"),
    ("barcode", false, "Secondary identifier (derived from SKU when empty)"),
];

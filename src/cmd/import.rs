//! Import command - load items from a CSV file into the catalog

use chrono::Utc;
use clap::Args;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::cmd::export::ItemRecord;
use crate::cmd::{load_catalog, save_catalog};
use crate::core::ItemEntry;

#[derive(Args, Debug)]
pub struct ImportCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// CSV file to import (stdin with "-")
    input: PathBuf,

    /// Actor recorded in the audit trail
    #[arg(long, default_value = "cli")]
    actor: String,
}

impl ImportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut catalog = load_catalog(&self.file)?;

        let imported = if self.input.as_os_str() == "-" {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            self.import_records(&mut catalog, buffer.as_bytes())?
        } else {
            let input = std::fs::File::open(&self.input)?;
            self.import_records(&mut catalog, input)?
        };

        save_catalog(&self.file, &catalog)?;
        println!("Imported {} items", imported);
        Ok(())
    }

    fn import_records<R: Read>(
        &self,
        catalog: &mut crate::core::Catalog,
        reader: R,
    ) -> anyhow::Result<usize> {
        let now = Utc::now();
        let mut rdr = csv::Reader::from_reader(reader);
        let mut imported = 0usize;

        for result in rdr.deserialize() {
            let record: ItemRecord = match result {
                Ok(record) => record,
                Err(err) => {
                    // one bad row does not abort the import
                    log::warn!("skipping malformed row: {err}");
                    continue;
                }
            };
            let mut entry = ItemEntry::new(record.sku, record.reorder_point, now);
            entry.name = record.name;
            entry.category = record.category;
            entry.supplier = record.supplier;
            entry.location = record.location;
            entry.quantity = record.quantity;
            entry.unit_cost = record.unit_cost;
            entry.total_cost = record.total_cost;
            entry.barcode = record.barcode;
            catalog.import_item(&self.actor, entry, now);
            imported += 1;
        }
        Ok(imported)
    }
}

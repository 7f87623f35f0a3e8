//! Remove command - delete an item and all its state

use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

use crate::cmd::{load_catalog, save_catalog};

#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// SKU to remove
    sku: String,

    /// Actor recorded in the audit trail
    #[arg(long, default_value = "cli")]
    actor: String,
}

impl RemoveCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut catalog = load_catalog(&self.file)?;
        match catalog.remove_item(&self.actor, &self.sku, Utc::now()) {
            Some(item) => {
                save_catalog(&self.file, &catalog)?;
                println!("Removed {} ({})", item.sku, item.name);
            }
            None => println!("No such item: {}", self.sku),
        }
        Ok(())
    }
}

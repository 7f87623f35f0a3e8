//! Supplier command - manage the supplier registry

use clap::{Args, Subcommand};
use std::path::PathBuf;
use tabled::{
    settings::Style,
    Table, Tabled,
};

use crate::cmd::{load_catalog, save_catalog};
use crate::core::Supplier;

#[derive(Args, Debug)]
pub struct SupplierCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    #[command(subcommand)]
    action: SupplierAction,
}

#[derive(Subcommand, Debug)]
enum SupplierAction {
    /// Register a supplier (names are unique, case-insensitive)
    Add {
        name: String,
        #[arg(long, default_value = "")]
        contact: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// List registered suppliers
    List {
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove a supplier by name
    Remove { name: String },
}

#[derive(Debug, Clone, Tabled)]
struct SupplierRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl SupplierCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut catalog = load_catalog(&self.file)?;
        match &self.action {
            SupplierAction::Add {
                name,
                contact,
                email,
                phone,
                address,
            } => {
                catalog.add_supplier(Supplier {
                    name: name.clone(),
                    contact_person: contact.clone(),
                    email: email.clone(),
                    phone: phone.clone(),
                    address: address.clone(),
                })?;
                save_catalog(&self.file, &catalog)?;
                println!("Registered supplier {}", name);
            }
            SupplierAction::List { json } => {
                let suppliers: Vec<&Supplier> = catalog.suppliers().collect();
                if *json {
                    println!("{}", serde_json::to_string_pretty(&suppliers)?);
                } else if suppliers.is_empty() {
                    println!("No suppliers registered");
                } else {
                    let rows: Vec<SupplierRow> = suppliers
                        .iter()
                        .map(|s| SupplierRow {
                            name: s.name.clone(),
                            contact: s.contact_person.clone(),
                            email: s.email.clone(),
                            phone: s.phone.clone(),
                        })
                        .collect();
                    let table = Table::new(rows).with(Style::rounded()).to_string();
                    println!("{}", table);
                }
            }
            SupplierAction::Remove { name } => match catalog.remove_supplier(name) {
                Some(removed) => {
                    save_catalog(&self.file, &catalog)?;
                    println!("Removed supplier {}", removed.name);
                }
                None => println!("No such supplier: {}", name),
            },
        }
        Ok(())
    }
}

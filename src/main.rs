use clap::{Parser, Subcommand};

mod cmd;
mod core;
mod store;

/// Purchased-inventory ledger: weighted-average costing, sale profits and
/// commissions over a JSON-file-backed catalog.
#[derive(Parser, Debug)]
#[command(name = "stocktake", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record purchased stock (creates the item on first purchase)
    Purchase(cmd::purchase::PurchaseCommand),
    /// Record a sale with optional commission
    Sell(cmd::sell::SellCommand),
    /// Remove an item and all its state
    Remove(cmd::remove::RemoveCommand),
    /// Search and list catalog items
    List(cmd::list::ListCommand),
    /// Inventory report: stock table, valuation and low-stock alerts
    Report(cmd::report::ReportCommand),
    /// Reorder suggestions for low-stock items
    Reorder(cmd::reorder::ReorderCommand),
    /// Sales history, totals and commissions over a window
    Sales(cmd::sales::SalesCommand),
    /// Manage the supplier registry
    Supplier(cmd::supplier::SupplierCommand),
    /// Export the item catalog to CSV
    Export(cmd::export::ExportCommand),
    /// Import items from a CSV file
    Import(cmd::import::ImportCommand),
    /// Self-contained HTML inventory and sales report
    Html(cmd::html_report::HtmlCommand),
    /// Show the audit trail
    Audit(cmd::audit::AuditCommand),
    /// Print the snapshot JSON schema / CSV import format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Purchase(cmd) => cmd.exec(),
        Commands::Sell(cmd) => cmd.exec(),
        Commands::Remove(cmd) => cmd.exec(),
        Commands::List(cmd) => cmd.exec(),
        Commands::Report(cmd) => cmd.exec(),
        Commands::Reorder(cmd) => cmd.exec(),
        Commands::Sales(cmd) => cmd.exec(),
        Commands::Supplier(cmd) => cmd.exec(),
        Commands::Export(cmd) => cmd.exec(),
        Commands::Import(cmd) => cmd.exec(),
        Commands::Html(cmd) => cmd.exec(),
        Commands::Audit(cmd) => cmd.exec(),
        Commands::Schema(cmd) => cmd.exec(),
    }
}

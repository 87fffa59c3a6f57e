//! Command-line entry point for the catalog admin.
//!
//! Reads `CATALOG_API_ENDPOINT` / `CATALOG_API_KEY`, runs one store action
//! and prints the resulting page (or the recorded error). Pass `--json` to
//! get the rows exactly as the API sent them.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use catalog_admin::{CatalogConfig, CatalogStore, RemoteCatalogClient};
use catalog_products::{ActiveFilter, DEFAULT_PAGE_SIZE, FilterOverrides, ProductId};

#[derive(Parser, Debug)]
#[command(name = "catalog-admin", version, about = "Manage the product catalog")]
struct Cli {
    /// Print the loaded products as JSON rows instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of products
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
        /// Include inactive products
        #[arg(long)]
        all: bool,
    },
    /// Switch a single product on or off
    SetStatus { id: ProductId, status: Switch },
    /// Switch several products on or off in one request
    BulkStatus {
        status: Switch,
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },
    /// Create a product from a JSON object
    Create { payload: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Switch {
    On,
    Off,
}

impl Switch {
    fn is_on(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    catalog_observability::init();

    let cli = Cli::parse();
    let config = CatalogConfig::from_env().context("failed to load catalog API configuration")?;
    tracing::info!(base_url = config.base_url(), "using management API");

    let store = CatalogStore::with_api(RemoteCatalogClient::new(&config));

    match cli.command {
        Command::List {
            search,
            page,
            page_size,
            all,
        } => {
            store.set_search(search).await;
            store.set_page(page).await;
            store.set_page_size(page_size).await;

            let mut overrides = FilterOverrides::new();
            if all {
                overrides = overrides.active(ActiveFilter::Any);
            }
            store.fetch_products(overrides).await?;
        }
        Command::SetStatus { id, status } => {
            store.update_product_status(&id, status.is_on()).await?;
            println!("product {id} switched {status:?}");
        }
        Command::BulkStatus { status, ids } => {
            store.bulk_update_status(&ids, status.is_on()).await?;
            println!("{} products switched {status:?}", ids.len());
        }
        Command::Create { payload } => {
            let payload: Value =
                serde_json::from_str(&payload).context("payload must be valid JSON")?;
            if !payload.is_object() {
                bail!("payload must be a JSON object");
            }
            let response = store.create_product(payload).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    let snapshot = store.snapshot().await;
    if let Some(error) = snapshot.error {
        bail!(error);
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot.products)?);
    } else {
        for product in &snapshot.products {
            let id = product.id().map_or_else(|| "-".to_string(), ToString::to_string);
            let status = if product.is_active() { "ON" } else { "OFF" };
            println!("{id}\t{status}\t{}", product.name());
        }
    }

    Ok(())
}

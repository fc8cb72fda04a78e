//! Pricewise preview
//!
//! Runs the storefront load flow against live services and an in-memory
//! page, optionally simulates a manual currency selection, and prints the
//! resulting page state.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricewise_core::page::{MemoryDocument, PageBinder, PricingSession, SessionCurrencySetter};
use pricewise_core::{CountryCurrencyMap, CurrencyResolver};
use pricewise_remote::{FilePreferenceStore, LookupServices};
use pricewise_shared::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Preview storefront prices in the visitor's currency")]
struct Cli {
    /// Simulate choosing this currency from the dropdown after load
    #[arg(long)]
    select: Option<String>,

    /// Value typed into the quantity input
    #[arg(long, default_value = "1")]
    quantity: String,

    /// Number of price display elements on the page
    #[arg(long, default_value_t = 1)]
    price_displays: usize,

    /// Preference file (overrides config/env)
    #[arg(long)]
    preference_path: Option<String>,
}

/// Checkout widget stand-in that logs session currency changes.
struct LoggedCheckout;

impl SessionCurrencySetter for LoggedCheckout {
    fn set_currency(&mut self, code: &str) {
        info!(currency = %code, "Checkout session currency set");
    }
}

fn print_page(doc: &MemoryDocument) {
    for (_, element) in doc.elements() {
        let mut parts = vec![element.id.as_deref().map_or_else(
            || format!(".{}", element.classes.join(".")),
            |id| format!("#{id}"),
        )];
        if !element.text.is_empty() {
            parts.push(format!("text={:?}", element.text));
        }
        if let Some(value) = &element.value {
            parts.push(format!("value={value:?}"));
        }
        if !element.options.is_empty() {
            parts.push(format!("options={}", element.options.len()));
        }
        parts.extend(
            element
                .attributes
                .iter()
                .map(|(name, value)| format!("{name}={value:?}")),
        );
        println!("{}", parts.join(" "));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricewise=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.preference_path {
        config.storage.preference_path = path;
    }

    let services = LookupServices::from_config(&config.services)?;
    let preferences = Arc::new(FilePreferenceStore::new(&config.storage.preference_path));
    info!(
        path = %config.storage.preference_path,
        base_price = %config.pricing.base_price,
        "Preview configured"
    );

    let document = MemoryDocument::storefront(&config.page, cli.price_displays, &cli.quantity);
    let resolver =
        CurrencyResolver::new(CountryCurrencyMap::from_table(config.resolver.country_table));
    let mut binder = PageBinder::new(
        document,
        LoggedCheckout,
        preferences,
        PricingSession::new(config.pricing.base_price),
    )
    .with_resolver(resolver)
    .with_selectors(config.page.clone());

    let currency = binder.load(&services.rates, &services.geo).await;
    info!(currency = %currency, "Initial load complete");

    if let Some(selected) = cli.select {
        binder.select_currency(&selected);
    }

    print_page(binder.document());
    Ok(())
}

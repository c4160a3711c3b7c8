use anyhow::Context;
use clap::Parser;
use hotel_listing_site::{FsCatalogStore, Locale, RouteDispatcher, SiteConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "site-preview")]
#[command(about = "Render the view-model a site path resolves to", long_about = None)]
struct Cli {
    /// Catalog root containing one directory per locale
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Locale to load; unsupported codes fall back to the default locale
    #[arg(short, long)]
    locale: Option<String>,

    /// Request path, optionally with a query string (e.g. "/paris-hotel/book?nights=2")
    path: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_listing_site=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = SiteConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let code = config
        .resolve_locale(cli.locale.as_deref().unwrap_or(&config.default_locale))
        .to_string();
    let locale = Locale::new(code).context("Invalid locale")?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        locale = %locale,
        path = %cli.path,
        "Dispatching"
    );

    let dispatcher = RouteDispatcher::new(FsCatalogStore::new(&config.data_dir), &config);
    let view = dispatcher
        .dispatch_path(&locale, &cli.path)
        .with_context(|| format!("Failed to dispatch {}", cli.path))?;

    if view.is_not_found() {
        tracing::info!(template = view.template(), "Lookup missed");
    }

    let output = serde_json::json!({
        "template": view.template(),
        "notFound": view.is_not_found(),
        "locals": view,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

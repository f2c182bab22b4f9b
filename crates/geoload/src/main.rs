use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use geoload::{
    BlobCache, RasterSource, ReqwestClient, ResourceLoader, SourceUrl, band_info, settings,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::cli::{App, Commands};
use crate::env::GeoloadEnv;

mod cli;
mod env;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();

    let mut proxy = settings::load(app.config.as_deref())?;
    if let Some(url) = app.proxy_url {
        proxy = proxy.proxy_url(url);
        settings::validate(&proxy)?;
    }
    settings::init(proxy)?;

    let cache_dir = match app.cache_dir {
        Some(dir) => dir,
        None => GeoloadEnv::new()?.cache().to_path_buf(),
    };
    let client = ReqwestClient::with_timeout(app.timeout.map(Duration::from_secs))?;
    let local_root = match app.local_root {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let loader = ResourceLoader::new(client, settings::global(), BlobCache::new(cache_dir))
        .with_local_root(local_root);

    match app.cmd {
        Commands::Fetch(arg) => {
            let resource = loader.load(&arg.url, arg.kind.into()).await?;
            if let Some(output) = &arg.output {
                tokio::fs::write(output, &resource.payload)
                    .await
                    .with_context(|| format!("Failed to write {}", output.display()))?;
            }
            print_json(&json!({
                "locator": resource.locator,
                "origin": resource.origin.as_str(),
                "bytes": resource.payload.len(),
                "metadata": resource.metadata,
            }))?;
        }
        Commands::Bands(arg) => {
            let source = RasterSource {
                urls: vec![SourceUrl {
                    url: arg.url,
                    min: arg.min,
                    max: arg.max,
                }],
            };
            let bands = band_info(&loader, Some(&source)).await?;
            print_json(&json!(bands))?;
        }
        Commands::Show(arg) => {
            let Some(resource) = loader.cached(&arg.url).await? else {
                bail!("{} is not cached", arg.url);
            };
            print_json(&json!({
                "locator": resource.locator,
                "bytes": resource.payload.len(),
                "metadata": resource.metadata,
            }))?;
        }
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use geoload::ResourceKind;

#[derive(Clone, Debug, Parser)]
#[command(name = "geoload", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Cache database directory [default: $GEOLOAD_ROOT/cache or ~/.geoload/cache]
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Settings file [default: ./geoload.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory relative locators resolve against [default: current directory]
    #[arg(long, global = true)]
    pub local_root: Option<PathBuf>,

    /// Override the CORS proxy base URL
    #[arg(long, global = true)]
    pub proxy_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "f", name = "fetch", about = "Load a resource through the cache")]
    Fetch(FetchArg),
    #[command(alias = "b", name = "bands", about = "Print band descriptors of a GeoTIFF")]
    Bands(BandsArg),
    #[command(alias = "s", name = "show", about = "Print a cached entry without fetching")]
    Show(ShowArg),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Raster,
    Geojson,
    Image,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Raster => ResourceKind::Raster,
            KindArg::Geojson => ResourceKind::FeatureCollection,
            KindArg::Image => ResourceKind::Image,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct FetchArg {
    pub url: String,

    #[arg(long, short, value_enum, default_value_t = KindArg::Raster)]
    pub kind: KindArg,

    /// Also write the payload to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct BandsArg {
    pub url: String,

    /// Declared minimum for every band
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Declared maximum for every band
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f64>,
}

#[derive(Args, Clone, Debug)]
pub struct ShowArg {
    pub url: String,
}

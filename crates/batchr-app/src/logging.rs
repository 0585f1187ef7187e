//! `tracing-subscriber` setup.
//!
//! The subscriber is installed before the config is read so loader
//! warnings are visible. The config's `logging.level` is applied
//! afterwards through a reload handle.

use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Level used until the config has been read.
pub const DEFAULT_LEVEL: &str = "info";

/// Directives appended after the level so wgpu internals stay quiet.
const QUIET_DEPENDENCIES: &[&str] = &["wgpu_core=warn", "wgpu_hal=warn", "naga=warn"];

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` plus `level` plus the quiet-dependency directives.
pub fn build_filter(level: &str) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env().add_directive(
        level
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );
    for directive in QUIET_DEPENDENCIES {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }
    filter
}

/// A fmt subscriber writing to `writer` whose filter can be swapped later.
pub fn subscriber<W>(level: &str, writer: W) -> (impl Subscriber + Send + Sync, FilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(build_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Install the global subscriber on stdout.
pub fn init(level: &str) -> FilterHandle {
    let (subscriber, handle) = subscriber(level, std::io::stdout);
    subscriber.init();
    handle
}

/// Switch to `level`, logging instead of failing if the swap is refused.
pub fn apply_level(handle: &FilterHandle, level: &str) {
    if let Err(e) = handle.reload(build_filter(level)) {
        tracing::warn!("Failed to apply log level {level}: {e}");
    }
}

//! Logging bootstrap.
//!
//! Installs a global `tracing` subscriber: `tracing-wasm` writes to the
//! browser console on wasm32, the `fmt` layer writes to stderr elsewhere.
//! The level sits behind a reload layer, so calling [`init_logging`] again
//! only changes the level. Initialization never panics.

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, Registry};

use super::error::{BoardError, BoardResult};

static LEVEL_HANDLE: OnceLock<reload::Handle<LevelFilter, Registry>> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn output_layer() -> tracing_wasm::WASMLayer {
    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_report_logs_in_timings(false)
        .build();
    tracing_wasm::WASMLayer::new(config)
}

#[cfg(not(target_arch = "wasm32"))]
fn output_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer().with_writer(std::io::stderr)
}

/// Installs the subscriber at `level` ("error" .. "trace", or "off").
pub fn init_logging(level: &str) -> BoardResult<()> {
    let filter: LevelFilter = level
        .trim()
        .parse()
        .map_err(|_| BoardError::InvalidConfig(format!("unsupported log level `{level}`")))?;

    if let Some(handle) = LEVEL_HANDLE.get() {
        return handle
            .modify(|current| *current = filter)
            .map_err(|_| BoardError::LoggerTaken);
    }

    let (filter_layer, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(output_layer())
        .try_init()
        .map_err(|_| BoardError::LoggerTaken)?;
    let _ = LEVEL_HANDLE.set(handle);

    tracing::info!("gravity board engine v{} logging at {}", env!("CARGO_PKG_VERSION"), filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(init_logging("loud"), Err(BoardError::InvalidConfig(_))));
    }

    #[test]
    fn repeated_init_adjusts_level() {
        init_logging("warn").unwrap();
        init_logging("debug").unwrap();
        let handle = LEVEL_HANDLE.get().unwrap();
        assert_eq!(handle.clone_current(), Some(LevelFilter::DEBUG));
        init_logging("warn").unwrap();
        assert_eq!(handle.clone_current(), Some(LevelFilter::WARN));
    }
}

//! The semdiff driver.
//!
//! Canonicalizes two versions of a source file and hands the results to a
//! textual diff tool, so that edits which do not change meaning
//! (`a.length` for `a.size`, `x + 0` for `x`, `b * a` for `a * b`) do not
//! show up as changes.
//!
//! Parsing, re-emitting source text, building the type model and diffing
//! are all external. Each one sits behind a trait in [`boundary`]; the
//! [`Driver`] only sequences them around [`semdiff_canon::canonicalize`]:
//!
//! ```text
//! parse ─▶ check ids ─▶ canonicalize ─▶ emit ─┐
//!                          ▲                  ├─▶ diff
//!            type model ───┘ (once)           │
//! parse ─▶ check ids ─▶ canonicalize ─▶ emit ─┘
//! ```

pub mod boundary;
mod config;
mod driver;
mod error;

use std::sync::Once;

pub use boundary::{
    BoxError, DiffInput, DiffOutcome, DiffTool, Emitter, Parsed, Source, SourceParser,
    TypeModelSource, Untyped,
};
pub use config::{Config, DiffOptions};
pub use driver::{Driver, Report, EMITTED_PREFIX};
pub use error::DriverError;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=semdiff_canon=debug` or `RUST_LOG=semdiff_canon=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

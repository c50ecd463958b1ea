//! Tracing setup. Diagnostics go to stderr so stdout stays reserved for
//! progress lines and `--json` output.
//!
//! The filter comes from `RUST_LOG`, e.g. `RUST_LOG=gitissuehelper=debug`.

use std::io::IsTerminal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "gitissuehelper=warn,octocrab=error";

pub fn init_logging() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

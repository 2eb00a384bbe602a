//! Tracing subscriber for the `elang` binary.
//!
//! ```bash
//! RUST_LOG=debug elang main.e
//! RUST_LOG="elang_eval=trace,elang_parse=debug" elang main.e
//! ```
//!
//! Events go to stderr as an indented tree, so program output on stdout is
//! unaffected.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Does nothing unless `RUST_LOG` is set;
/// later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }

        let filter = EnvFilter::from_default_env();
        let tree = tracing_tree::HierarchicalLayer::default()
            .with_writer(std::io::stderr)
            .with_indent_amount(2)
            .with_indent_lines(true)
            .with_targets(true);

        // Another subscriber may already be installed by an embedder.
        let _ = Registry::default().with(filter).with(tree).try_init();
    });
}

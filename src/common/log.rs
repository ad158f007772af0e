use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, registry};
use tracing_tree::HierarchicalLayer;

const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber: an `EnvFilter` read from `RUST_LOG`
/// (falling back to `info`) feeding an indented span tree on stderr.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let tree = HierarchicalLayer::new(2)
        .with_writer(std::io::stderr)
        .with_indent_lines(true)
        .with_targets(true)
        .with_bracketed_fields(true);

    if let Err(e) = registry().with(filter).with(tree).try_init() {
        tracing::debug!("logging already initialized: {e}");
    }
}

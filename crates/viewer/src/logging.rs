use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One-shot tracing setup for binaries and tests. Safe to call more than
/// once; later calls are ignored.
pub fn init_logging() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_ansi(false);
    let _ = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(LevelFilter::INFO))
        .try_init();
}

//! Centralised tracing initialisation for hardware-translate binaries.
//!
//! Call [`init_tracing`] once at program start. Log lines go to stderr so
//! stdout stays free for translated machines. Subsequent calls are ignored.

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// `RUST_LOG` when set, otherwise everything at `level` and above.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Stderr formatter, plain text or newline-delimited JSON.
fn stderr_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Initialise the global tracing subscriber.
///
/// `json` switches the output to one JSON object per line. `level` is the
/// default verbosity when `RUST_LOG` is not set.
pub fn init_tracing(json: bool, level: Level) {
    tracing_subscriber::registry()
        .with(stderr_layer(json))
        .with(env_filter(level))
        .try_init()
        .ok();
}

use time::macros::format_description;
use time::UtcOffset;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "dshbd=info";

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Compact, time-only lines for a terminal; full timestamps and targets otherwise.
fn fmt_layer(interactive: bool, offset: UtcOffset) -> Box<dyn Layer<Registry> + Send + Sync> {
    if interactive {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(true)
            .with_target(false)
            .with_timer(OffsetTime::new(
                offset,
                format_description!("[hour]:[minute]:[second]"),
            ))
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_timer(OffsetTime::new(
                offset,
                format_description!("[day].[month].[year] [hour]:[minute]:[second]"),
            ))
            .boxed()
    }
}

pub fn init_logging() {
    let directives = std::env::var("RUST_LOG").ok();
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let layer = fmt_layer(console::user_attended(), offset)
        .with_filter(env_filter(directives.as_deref()));
    tracing_subscriber::registry().with(layer).init();
}

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "sterling_b2b=info,sterling_b2b_mcp=info";

/// Install the global subscriber.
///
/// Output goes to stderr; stdout belongs to the stdio transport.
pub fn setup_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()?;

    Ok(())
}

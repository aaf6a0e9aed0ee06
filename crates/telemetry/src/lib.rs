//! Tracing subscriber bootstrap.

use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `telemetry.log_filter`. Returns `false`
/// when a global subscriber was already installed (e.g. by a previous call in
/// the same process), which is not treated as an error.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_filter)?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init().is_ok(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true))
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::info!(
            target: "shelf-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let settings = TelemetrySettings::default();
        let _ = init(&settings).unwrap();
        assert!(!init(&settings).unwrap());
    }
}

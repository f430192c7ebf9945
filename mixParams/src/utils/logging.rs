use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global tracing subscriber. Later calls leave the first subscriber in place.
pub fn init_logging(verbose: bool) {
    let crate_level = if verbose { "mixparams=debug" } else { "mixparams=info" };

    let env_filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive(crate_level.parse().unwrap_or_else(|_| Level::INFO.into()));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already installed, keeping the existing one");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        init_logging(false);
        init_logging(true);
        tracing::info!("still logging");
    }
}

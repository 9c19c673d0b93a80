use anyhow::{Context, Result};
use corefile_gen::Config;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_init();

    let config = Config::from_env().context("resolving configuration")?;
    let corefile = corefile_gen::write(&config).context("generating Corefile")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Corefile generated:\n{corefile}").context("echoing Corefile")?;
    stdout.flush().context("echoing Corefile")?;
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corefile_gen=info".into()),
        )
        .init();
}

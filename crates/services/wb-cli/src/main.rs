use anyhow::{Context, Result};
use clap::Parser;
use wb_cli::cli::Cli;
use wb_cli::run;
use wb_config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::from_dir(cli.config.as_str())
        .with_context(|| format!("failed to load settings from '{}'", cli.config))?;
    wb_telemetry::init_subscriber("water-bill", &settings.log.level)?;

    let output = run(&cli, &settings)?;
    println!("{}", output.trim_end());
    Ok(())
}

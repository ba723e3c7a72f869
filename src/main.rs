mod cli;
mod config;
mod logging;

use std::io::Write;
use std::process;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use tracing::info;

use sabbats::ephemeris::{Ephemeris, LowPrecisionSun, TabulatedEphemeris};
use sabbats::ical::Calendar;
use sabbats::sabbat::sabbats_for_year;

use crate::cli::Cli;
use crate::config::SabbatsConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = SabbatsConfig::load(cli.config.as_deref())?;
    config.apply_cli(cli);
    let year = config.year_or(|| Local::now().year());
    let options = config.sabbat_options();

    let ephemeris: Box<dyn Ephemeris> = match &config.ephemeris {
        Some(path) => Box::new(
            TabulatedEphemeris::load(path).context("failed to load ephemeris")?,
        ),
        None => Box::new(LowPrecisionSun),
    };

    let events = sabbats_for_year(&ephemeris, year, &options)
        .with_context(|| format!("failed to compute sabbats for {year}"))?;
    info!(year, n_events = events.len(), "sabbats computed");

    if cli.list {
        let mut stdout = std::io::stdout().lock();
        for event in &events {
            writeln!(stdout, "{}  {}", event.date, event.title)?;
        }
        return Ok(());
    }

    let text = Calendar::new(events)
        .with_prodid(config.calendar.prodid.as_str())
        .with_refresh_interval(config.calendar.refresh_interval.as_str())
        .to_ical(Utc::now());

    if config.writes_stdout() {
        std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("failed to write calendar to stdout")?;
    } else {
        std::fs::write(&config.output, text)
            .with_context(|| format!("failed to write calendar: {}", config.output.display()))?;
        println!("Created {} for year {}", config.output.display(), year);
    }
    Ok(())
}

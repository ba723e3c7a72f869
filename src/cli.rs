use std::path::PathBuf;

use clap::Parser;

/// Generate a calendar of the eight seasonal sabbats.
#[derive(Debug, Parser)]
#[command(
    name = "sabbats",
    version,
    about = "Compute the solstices, equinoxes and cross-quarter days of a year"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file [default: sabbats.toml, if present].
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Year to compute [default: the current year].
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Output calendar path, `-` for stdout. Overrides config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Solar longitude table to use instead of the built-in model.
    #[arg(short, long)]
    pub ephemeris: Option<PathBuf>,

    /// Print the dates instead of writing a calendar.
    #[arg(short, long)]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "sabbats", "-vv", "--year", "2024", "-o", "-", "--ephemeris", "sun.txt",
        ])
        .unwrap();
        assert_eq!(2, cli.verbose);
        assert_eq!(Some(2024), cli.year);
        assert_eq!(Some(PathBuf::from("-")), cli.output);
        assert_eq!(Some(PathBuf::from("sun.txt")), cli.ephemeris);
        assert!(!cli.list);
        assert!(cli.config.is_none());
    }

    #[test]
    fn rejects_bad_year() {
        assert!(Cli::try_parse_from(["sabbats", "--year", "MMXXIV"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::letters::DateKey;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "letter-combiner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Archive student letters and combine admission and scholarship letters")]
#[command(
    long_about = "Letter Combiner moves every dated batch of admission and scholarship letters \
                  from the input folder to the archive, combines the letters of students who \
                  received both for the chosen date, and appends a text report."
)]
#[command(after_help = "EXAMPLES:\n  \
    letter-combiner 20220125\n  \
    letter-combiner 20220125 --base-dir /srv/mailroom --verbose\n  \
    letter-combiner 20220125 -i ./Input -a ./Archive -o ./Output\n  \
    letter-combiner --config office.toml --dry-run")]
pub struct Cli {
    /// Batch date to combine, as YYYYMMDD
    #[arg(value_parser = validate_date_key)]
    pub date: Option<String>,

    /// Input root holding Admission/ and Scholarship/
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Archive root the dated batches are moved into
    #[arg(short, long)]
    pub archive: Option<PathBuf>,

    /// Output root for combined letters and reports
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base directory for relative roots
    #[arg(short, long, help = "Directory that relative input/archive/output paths resolve against")]
    pub base_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show the resolved folders and date without moving anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_base_directory(self.base_dir.clone())
            .with_input(self.input.clone())
            .with_archive(self.archive.clone())
            .with_output(self.output.clone())
            .with_date(self.date.clone())
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_date_key(s: &str) -> std::result::Result<String, String> {
    DateKey::parse(s.trim())
        .map(String::from)
        .map_err(|_| format!("'{}' is not a date in YYYYMMDD form (e.g. 20220125)", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("letter-combiner").chain(args.iter().copied()))
    }

    #[test]
    fn test_valid_dates() {
        for date in ["20220125", "20240426", " 20220125 "] {
            assert!(validate_date_key(date).is_ok(), "Should accept: {:?}", date);
        }
        assert_eq!(validate_date_key(" 20220125 ").unwrap(), "20220125");
    }

    #[test]
    fn test_invalid_dates() {
        for date in ["2022-01-25", "01/25/2022", "2022012", "not-a-date", ""] {
            assert!(validate_date_key(date).is_err(), "Should reject: {:?}", date);
        }
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = parse(&[
            "20220125", "-i", "/in", "-a", "/archive", "-o", "/out", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.date.as_deref(), Some("20220125"));
        assert_eq!(cli.input, Some(PathBuf::from("/in")));
        assert_eq!(cli.verbosity_level(), 2);
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(parse(&["20220125", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_bad_date_is_rejected_by_parser() {
        assert!(parse(&["2022-01-25"]).is_err());
    }

    #[test]
    fn test_overrides_follow_flags() {
        let cli = parse(&["20240426", "--base-dir", "/srv/mail"]).unwrap();
        let overrides = cli.create_cli_overrides();

        assert_eq!(overrides.base_directory, Some(PathBuf::from("/srv/mail")));
        assert_eq!(overrides.date.as_deref(), Some("20240426"));
        assert!(overrides.input.is_none());
    }
}

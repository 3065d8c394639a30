use clap::Parser;
use letter_combiner::{
    Cli, LetterCombiner, LetterError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let combiner = match LetterCombiner::from_cli(&cli) {
        Ok(combiner) => combiner,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&combiner);
    }

    match combiner.run() {
        Ok(summary) => {
            combiner.output_formatter().print_run_report(&summary);
            0
        }
        Err(e) => {
            combiner.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &LetterError) -> i32 {
    match error {
        LetterError::Config { .. } => 2,
        LetterError::InvalidDate { .. } => 3,
        LetterError::NotFound { .. } => 4,
        LetterError::InvalidFileName { .. } => 5,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "letter-combiner.toml".to_string());

    match LetterCombiner::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  letter-combiner --config {}", config_path);
            println!("\nEdit the folders and date to match your office.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(combiner: &LetterCombiner) -> i32 {
    let formatter = combiner.output_formatter();

    formatter.info("DRY RUN MODE - No letters will be moved or combined");
    formatter.print_separator();

    let plan = match combiner.plan() {
        Ok(plan) => plan,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            return exit_code_for(&e);
        }
    };

    if formatter.mode() == OutputMode::Json {
        formatter.print_json(&plan);
        return 0;
    }

    println!("  Date:    {} ({})", plan.date, plan.date.us_format());
    println!("  Input:   {}", plan.roots.input.display());
    println!("  Archive: {}", plan.roots.archive.display());
    println!("  Output:  {}", plan.roots.output.display());

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to archive and combine the letters");

    0
}

fn print_startup_error(error: &LetterError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use letter_combiner::cli::OutputFormat;
    use letter_combiner::Config;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cli_with(config: Option<PathBuf>, generate_config: bool) -> Cli {
        Cli {
            date: Some("20220125".to_string()),
            input: None,
            archive: None,
            output: None,
            base_dir: None,
            config,
            output_format: OutputFormat::Plain,
            verbose: 0,
            quiet: true,
            dry_run: !generate_config,
            generate_config,
        }
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let exit_code = handle_generate_config(&cli_with(Some(config_path.clone()), true));
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[directories]"));
    }

    #[test]
    fn test_dry_run_mode() {
        let mut config = Config::default();
        config.run.date = Some("20220125".to_string());
        let combiner = LetterCombiner::new(config, OutputMode::Plain, 0, true);

        assert_eq!(handle_dry_run(&combiner), 0);
    }

    #[test]
    fn test_dry_run_without_date() {
        let combiner = LetterCombiner::new(Config::default(), OutputMode::Plain, 0, true);
        assert_eq!(handle_dry_run(&combiner), 2);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&LetterError::InvalidDate {
                date: "x".to_string()
            }),
            3
        );
        assert_eq!(
            exit_code_for(&LetterError::NotFound {
                path: "/nowhere".to_string()
            }),
            4
        );
        assert_eq!(
            exit_code_for(&LetterError::AlreadyExists {
                path: "/a".to_string()
            }),
            1
        );
    }
}

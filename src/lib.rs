pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod letters;
pub mod pipeline;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, DirectoryConfig, RootDirectories, RunConfig};
pub use error::{LetterError, Result, UserFriendlyError};

// Core functionality re-exports
pub use fs::{DiskFileSystem, FileSystem, MemoryFileSystem};
pub use letters::{Category, DateKey, FileIndex};
pub use pipeline::{
    ArchiveSummary, CombineProgress, CombineSummary, CombinedLetter, CombinedReport,
    LetterService,
};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

/// Everything one archive, combine and report run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub date: DateKey,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub roots: RootDirectories,
    pub archive: ArchiveSummary,
    pub index: FileIndex,
    pub combined: CombineSummary,
    pub report: CombinedReport,
}

/// What a run would operate on, without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunPlan {
    pub date: DateKey,
    pub roots: RootDirectories,
}

/// Main library interface: configuration, console output and the pipeline
/// over one filesystem.
pub struct LetterCombiner<F: FileSystem = DiskFileSystem> {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    service: LetterService<F>,
}

impl LetterCombiner<DiskFileSystem> {
    /// Create a combiner working on the real disk.
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self::with_file_system(config, DiskFileSystem::new(), output_mode, verbose, quiet)
    }

    /// Create a combiner from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = OutputMode::from(&cli_args.output_format);

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }
}

impl<F: FileSystem> LetterCombiner<F> {
    pub fn with_file_system(
        config: Config,
        file_system: F,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // Bars would corrupt machine-readable output
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            service: LetterService::new(file_system),
        }
    }

    /// Resolve the target date and roots without changing anything.
    pub fn plan(&self) -> Result<RunPlan> {
        let date = self.config.target_date()?;
        let current_dir = self.service.fs().current_dir()?;
        let roots = self.config.resolve_roots(&current_dir)?;

        Ok(RunPlan { date, roots })
    }

    /// Run the configured date through every stage.
    pub fn run(&self) -> Result<RunSummary> {
        let plan = self.plan()?;
        self.run_plan(plan)
    }

    /// Run `date` through every stage, ignoring any configured date.
    pub fn run_for_date(&self, date: &DateKey) -> Result<RunSummary> {
        let current_dir = self.service.fs().current_dir()?;
        let roots = self.config.resolve_roots(&current_dir)?;

        self.run_plan(RunPlan {
            date: date.clone(),
            roots,
        })
    }

    fn run_plan(&self, plan: RunPlan) -> Result<RunSummary> {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let RunPlan { date, roots } = plan;

        self.output_formatter
            .start_operation(&format!("Combining letters for {}", date.us_format()));
        self.output_formatter.debug(&format!(
            "Input: {} | Archive: {} | Output: {}",
            roots.input.display(),
            roots.archive.display(),
            roots.output.display()
        ));

        // Step 1: Archive every delivered batch and index the target date
        let (archive, index) = self.archive_letters(&roots.input, &roots.archive, &date)?;

        // Step 2: Pair and combine
        let combined = self.combine_letters(&index, &roots.output)?;

        // Step 3: Append the report
        let report = self.service.generate_report(&roots.output, &date)?;
        self.output_formatter.success(&format!(
            "Report updated: {} ({} letters)",
            report.path.display(),
            report.count()
        ));

        Ok(RunSummary {
            date,
            started_at,
            duration: start_time.elapsed(),
            roots,
            archive,
            index,
            combined,
            report,
        })
    }

    fn archive_letters(
        &self,
        input_root: &Path,
        archive_root: &Path,
        date: &DateKey,
    ) -> Result<(ArchiveSummary, FileIndex)> {
        let spinner = self.progress_manager.create_spinner("Archiving letters");

        let archive = self.service.archive_all(input_root, archive_root)?;
        ui::progress::finish_stage(&spinner, &format!("Archived {} files", archive.files_moved));
        self.output_formatter.debug(&archive.display_summary());

        let index = self.service.index_date(archive_root, date)?;
        self.output_formatter.info(&format!(
            "Found {} admission and {} scholarship letters",
            index.files(Category::Admission).len(),
            index.files(Category::Scholarship).len()
        ));

        Ok((archive, index))
    }

    fn combine_letters(&self, index: &FileIndex, output_root: &Path) -> Result<CombineSummary> {
        let admissions = index.files(Category::Admission).len() as u64;
        let combine_progress = self.progress_manager.create_combine_progress(admissions);
        let progress_callback = {
            let pb = combine_progress.clone();
            move |progress: &CombineProgress| {
                ui::progress::update_combine_progress(&pb, progress);
            }
        };

        let combined =
            self.service
                .combine_all_with_progress(index, output_root, Some(&progress_callback))?;

        ui::progress::finish_stage(
            &combine_progress,
            &format!("Combined {} letters", combined.len()),
        );

        Ok(combined)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    pub fn service(&self) -> &LetterService<F> {
        &self.service
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &LetterError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Combine the letters of `date` under `base_dir` using the default layout.
pub fn combine_letters_simple(base_dir: &Path, date: &str) -> Result<RunSummary> {
    let mut config = Config::default();
    config.directories.base_directory = Some(base_dir.to_path_buf());
    config.run.date = Some(date.to_string());
    config.validate()?;

    LetterCombiner::new(config, OutputMode::Plain, 0, true).run()
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "letter-combiner {} ({}) built on {} for {}",
            self.version, self.git_hash, self.build_date, self.target
        )
    }
}

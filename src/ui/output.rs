use crate::cli::OutputFormat;
use crate::error::{LetterError, UserFriendlyError};
use crate::letters::Category;
use crate::ui::progress::format_duration;
use crate::RunSummary;
use console::{style, Emoji, StyledObject, Term};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static ENVELOPE: Emoji = Emoji("✉️  ", "> ");
static HINT: Emoji = Emoji("💡 ", "? ");

/// Kind of console line, with where and when it shows up.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Operation,
    Success,
    Error,
    Suggestion,
    Info,
    Debug,
}

impl Level {
    /// Lowest `-v` count at which the line is printed.
    fn min_verbosity(self) -> u8 {
        match self {
            Level::Info => 1,
            Level::Debug => 2,
            _ => 0,
        }
    }

    /// Errors and suggestions print even in quiet mode.
    fn survives_quiet(self) -> bool {
        matches!(self, Level::Error | Level::Suggestion)
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Error | Level::Suggestion)
    }

    fn json_name(self) -> &'static str {
        match self {
            Level::Operation => "operation_start",
            Level::Success => "success",
            Level::Error => "error",
            Level::Suggestion => "suggestion",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    fn plain_prefix(self) -> &'static str {
        match self {
            Level::Operation => "STARTING",
            Level::Success => "SUCCESS",
            Level::Error => "ERROR",
            Level::Suggestion => "SUGGESTION",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    fn emoji(self) -> Option<&'static Emoji<'static, 'static>> {
        match self {
            Level::Operation => Some(&ENVELOPE),
            Level::Success => Some(&CHECKMARK),
            Level::Error => Some(&CROSS),
            Level::Suggestion => Some(&HINT),
            Level::Info => Some(&INFO),
            Level::Debug => None,
        }
    }

    fn paint(self, message: &str) -> StyledObject<&str> {
        match self {
            Level::Operation => style(message).bold(),
            Level::Success => style(message).green().bold(),
            Level::Error => style(message).red().bold(),
            Level::Suggestion | Level::Info => style(message).cyan(),
            Level::Debug => style(message).dim(),
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    level: &'static str,
    message: &'a str,
    timestamp: String,
}

/// Console output for humans, scripts (`plain`) and JSON consumers.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors =
            mode == OutputMode::Human && !quiet && Term::stdout().features().colors_supported();

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(Level::Operation, operation);
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn print_user_friendly_error(&self, error: &LetterError) {
        self.emit(Level::Error, &error.user_message());

        if let Some(suggestion) = error.suggestion() {
            self.emit(Level::Suggestion, &suggestion);
        }
    }

    /// Print the result of a run in the configured mode.
    pub fn print_run_report(&self, summary: &RunSummary) {
        match self.mode {
            OutputMode::Human if self.quiet => {}
            OutputMode::Human => self.print_human_report(summary),
            OutputMode::Json => self.print_json(summary),
            OutputMode::Plain => self.print_plain_report(summary),
        }
    }

    /// Pretty-print any serializable value as one JSON document.
    pub fn print_json<T: Serialize>(&self, value: &T) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        );
    }

    pub fn print_separator(&self) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        if self.use_colors {
            println!("{}", style("─".repeat(60)).dim());
        } else {
            println!("{}", "-".repeat(60));
        }
    }

    fn should_show(&self, level: Level) -> bool {
        if self.quiet {
            return level.survives_quiet();
        }
        self.verbose_level >= level.min_verbosity()
    }

    fn emit(&self, level: Level, message: &str) {
        if !self.should_show(level) {
            return;
        }

        let line = match self.mode {
            OutputMode::Json => {
                let json = JsonLine {
                    kind: "message",
                    level: level.json_name(),
                    message,
                    timestamp: chrono::Utc::now().to_rfc3339(),
                };
                serde_json::to_string(&json).unwrap_or_else(|_| "{}".to_string())
            }
            OutputMode::Plain => format!("{}: {}", level.plain_prefix(), message),
            OutputMode::Human => self.human_line(level, message),
        };

        if level.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn human_line(&self, level: Level, message: &str) -> String {
        match (level.emoji(), self.use_colors) {
            (Some(emoji), true) => format!("{}{}", emoji, level.paint(message)),
            (None, true) => format!("  {}", level.paint(message)),
            (_, false) if level == Level::Suggestion => format!("Suggestion: {}", message),
            (Some(emoji), false) => format!("{}{}", emoji.1, message),
            (None, false) => format!("  {}: {}", level.plain_prefix(), message),
        }
    }

    fn highlight(&self, value: impl ToString) -> String {
        if self.use_colors {
            style(value.to_string()).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }

    fn print_human_report(&self, summary: &RunSummary) {
        println!();
        let title = format!("Letters for {}", summary.date.us_format());
        if self.use_colors {
            println!("{}{}", ENVELOPE, style(title).bold().cyan());
        } else {
            println!("=== {} ===", title);
        }
        println!();

        println!("  Files archived:   {}", self.highlight(summary.archive.files_moved));
        for category in Category::ALL {
            println!(
                "  {:<18}{}",
                format!("{}:", category),
                self.highlight(summary.index.files(category).len())
            );
        }
        println!("  Letters combined: {}", self.highlight(summary.combined.len()));
        println!("  Report:           {}", summary.report.path.display());
        println!(
            "  Time taken:       {}",
            self.highlight(format_duration(summary.duration))
        );

        if self.verbose_level > 0 && !summary.combined.is_empty() {
            println!();
            println!("Combined students:");
            for letter in &summary.combined.letters {
                println!("  {} -> {}", letter.student_id, letter.output.display());
            }
        }

        self.print_separator();
    }

    fn print_plain_report(&self, summary: &RunSummary) {
        println!("REPORT: Letters combined for {}", summary.date);
        println!("Archived: {}", summary.archive.files_moved);
        for category in Category::ALL {
            println!("{}: {}", category, summary.index.files(category).len());
        }
        println!("Combined: {}", summary.combined.len());
        for id in summary.combined.student_ids() {
            println!("\t{}", id);
        }
        println!("Report file: {}", summary.report.path.display());
        println!("Duration: {:?}", summary.duration);
    }
}

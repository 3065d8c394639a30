use crate::pipeline::CombineProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Terminal progress for the archive and combine stages.
///
/// When disabled every bar is hidden, so callers never branch on it.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    /// Bar counting processed admission letters.
    pub fn create_combine_progress(&self, total_admissions: u64) -> ProgressBar {
        self.attach(
            ProgressBar::new(total_admissions),
            combine_style(),
            "Pairing letters...",
        )
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        self.attach(ProgressBar::new_spinner(), spinner_style(), message)
    }

    pub fn clear(&self) {
        if self.enabled {
            self.multi_progress.clear().ok();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn attach(&self, pb: ProgressBar, style: ProgressStyle, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(pb);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK);
        pb
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

fn combine_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} admissions {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(SPINNER_FRAMES)
}

pub fn update_combine_progress(pb: &ProgressBar, progress: &CombineProgress) {
    pb.set_position(progress.admissions_processed as u64);

    let message = match progress.current_student {
        Some(ref student) => format!("{} ({} combined)", student, progress.letters_written),
        None => "Pairing letters...".to_string(),
    };
    pb.set_message(message);
}

/// Finish `pb` with `message` and the time the stage took.
pub fn finish_stage(pb: &ProgressBar, message: &str) {
    let elapsed = format_duration(pb.elapsed());
    pb.finish_with_message(format!("{} in {}", message, elapsed));
}

pub(crate) fn format_duration(duration: Duration) -> String {
    match duration.as_secs() {
        0 => format!("{}ms", duration.as_millis()),
        secs @ 1..=59 => format!("{}s", secs),
        secs => format!("{}m {}s", secs / 60, secs % 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_manager_hides_bars() {
        let manager = ProgressManager::new(false);

        assert!(!manager.is_enabled());
        assert!(manager.create_combine_progress(10).is_hidden());
        assert!(manager.create_spinner("Archiving").is_hidden());
    }

    #[test]
    fn test_update_combine_progress() {
        let pb = ProgressBar::hidden();
        pb.set_length(4);

        let mut progress = CombineProgress::new(4);
        progress.admissions_processed = 3;
        progress.letters_written = 2;
        progress.current_student = Some("11111111".to_string());

        update_combine_progress(&pb, &progress);

        assert_eq!(pb.position(), 3);
        assert_eq!(pb.message(), "11111111 (2 combined)");
    }

    #[test]
    fn test_finish_stage_marks_bar_finished() {
        let pb = ProgressBar::hidden();
        finish_stage(&pb, "Archived 6 files");

        assert!(pb.is_finished());
        assert!(pb.message().starts_with("Archived 6 files in "));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }
}

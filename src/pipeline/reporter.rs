use crate::error::{LetterError, Result};
use crate::fs::FileSystem;
use crate::letters::{letter_file, DateKey};
use crate::pipeline::LetterService;
use serde::Serialize;
use std::path::{Path, PathBuf};

const RULE: &str = "-----------------------------";

/// One report block as appended to `<date>-report.txt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedReport {
    pub date: DateKey,
    pub student_ids: Vec<String>,
    pub path: PathBuf,
}

impl CombinedReport {
    pub fn count(&self) -> usize {
        self.student_ids.len()
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{} Report\n{}\n\nNumber of Combined Letters: {}\n",
            self.date.us_format(),
            RULE,
            self.count()
        );
        for id in &self.student_ids {
            out.push('\t');
            out.push_str(id);
            out.push('\n');
        }
        out
    }
}

impl<F: FileSystem> LetterService<F> {
    /// Append a report block for every file in `output_root/<date>`.
    ///
    /// Expects the directory to hold only combined letters. Running it again
    /// appends another block, and that block also counts the report file.
    pub fn generate_report(&self, output_root: &Path, date: &DateKey) -> Result<CombinedReport> {
        let report_dir = output_root.join(date.as_str());
        let files = self.fs.list_files(&report_dir)?;

        let student_ids = files
            .iter()
            .map(|file| {
                letter_file::student_id_from_path(file)
                    .map(str::to_string)
                    .ok_or_else(|| LetterError::InvalidFileName {
                        name: letter_file::file_name(file).into_owned(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let report = CombinedReport {
            date: date.clone(),
            student_ids,
            path: report_dir.join(letter_file::report_file_name(date)),
        };

        self.fs.append(&report.path, &report.render())?;

        Ok(report)
    }
}

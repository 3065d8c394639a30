use crate::error::Result;
use crate::fs::FileSystem;
use crate::letters::{letter_file, Category, DateKey, FileIndex};
use crate::pipeline::LetterService;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedLetter {
    pub student_id: String,
    pub admission: PathBuf,
    pub scholarship: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombineSummary {
    pub date: DateKey,
    pub output_dir: PathBuf,
    pub letters: Vec<CombinedLetter>,
}

impl CombineSummary {
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn student_ids(&self) -> Vec<&str> {
        self.letters.iter().map(|l| l.student_id.as_str()).collect()
    }
}

/// Snapshot handed to the progress callback after each admission letter.
#[derive(Debug, Clone)]
pub struct CombineProgress {
    pub admissions_processed: usize,
    pub total_admissions: usize,
    pub letters_written: usize,
    pub current_student: Option<String>,
}

impl CombineProgress {
    pub fn new(total_admissions: usize) -> Self {
        Self {
            admissions_processed: 0,
            total_admissions,
            letters_written: 0,
            current_student: None,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total_admissions == 0 {
            0.0
        } else {
            (self.admissions_processed as f64 / self.total_admissions as f64) * 100.0
        }
    }
}

impl<F: FileSystem> LetterService<F> {
    /// Pair admission and scholarship letters of the indexed date and write
    /// one combined letter per pair under `output_root/<date>`.
    pub fn combine_all(&self, index: &FileIndex, output_root: &Path) -> Result<CombineSummary> {
        self.combine_all_with_progress(index, output_root, None)
    }

    pub fn combine_all_with_progress(
        &self,
        index: &FileIndex,
        output_root: &Path,
        progress_callback: Option<&dyn Fn(&CombineProgress)>,
    ) -> Result<CombineSummary> {
        let output_dir = output_root.join(index.date().as_str());
        self.fs.create_dir_all(&output_dir)?;

        let admissions = index.files(Category::Admission);
        let scholarships = index.files(Category::Scholarship);

        let mut progress = CombineProgress::new(admissions.len());
        let mut letters = Vec::new();

        for admission in admissions {
            // No id means nothing to pair with
            let id = letter_file::student_id_from_path(admission);

            if let Some(id) = id {
                for scholarship in scholarships.iter().filter(|s| path_contains(s, id)) {
                    let output = output_dir.join(letter_file::combined_file_name(
                        id,
                        letter_file::extension(admission),
                    ));

                    if self.combine_two(admission, scholarship, &output)? {
                        progress.letters_written += 1;
                        letters.push(CombinedLetter {
                            student_id: id.to_string(),
                            admission: admission.clone(),
                            scholarship: scholarship.clone(),
                            output,
                        });
                    }
                }
            }

            progress.admissions_processed += 1;
            progress.current_student = id.map(str::to_string);
            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        Ok(CombineSummary {
            date: index.date().clone(),
            output_dir,
            letters,
        })
    }

    /// Write `file_a` followed by `file_b` to `result`, replacing it.
    ///
    /// Returns `Ok(false)` without touching anything when either source is
    /// missing.
    pub fn combine_two(&self, file_a: &Path, file_b: &Path, result: &Path) -> Result<bool> {
        if !self.fs.file_exists(file_a) || !self.fs.file_exists(file_b) {
            return Ok(false);
        }

        let mut combined = self.fs.read_to_string(file_a)?;
        combined.push_str(&self.fs.read_to_string(file_b)?);
        self.fs.write(result, &combined)?;

        Ok(true)
    }
}

/// Substring test against the whole scholarship path, folders included.
fn path_contains(path: &Path, id: &str) -> bool {
    path.to_string_lossy().contains(id)
}

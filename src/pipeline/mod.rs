pub mod archiver;
pub mod combiner;
pub mod reporter;

pub use archiver::ArchiveSummary;
pub use combiner::{CombineProgress, CombineSummary, CombinedLetter};
pub use reporter::CombinedReport;

use crate::fs::FileSystem;

/// Archive, combine and report stages over an injected filesystem.
///
/// Each stage takes everything it needs as arguments and returns its result,
/// so stages can be run and tested one at a time.
pub struct LetterService<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> LetterService<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }
}

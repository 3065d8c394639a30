use crate::error::{LetterError, Result};
use crate::fs::FileSystem;
use crate::letters::{Category, DateKey, FileIndex};
use crate::pipeline::LetterService;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::Path;

/// What `archive_all` moved, per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArchiveSummary {
    pub dates_moved: BTreeMap<Category, Vec<String>>,
    pub files_moved: usize,
}

impl ArchiveSummary {
    pub fn dates(&self, category: Category) -> &[String] {
        self.dates_moved
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn display_summary(&self) -> String {
        let mut summary = format!("Archive Results:\n  Files moved: {}\n", self.files_moved);
        for (category, dates) in &self.dates_moved {
            summary.push_str(&format!("  {}: {}\n", category, dates.join(", ")));
        }
        summary
    }
}

impl<F: FileSystem> LetterService<F> {
    /// Archive every dated batch, then index the batch for `date`.
    pub fn archive_and_index(
        &self,
        input_root: &Path,
        archive_root: &Path,
        date: &DateKey,
    ) -> Result<FileIndex> {
        self.archive_all(input_root, archive_root)?;
        self.index_date(archive_root, date)
    }

    /// Move every `<Category>/<date>` directory from `input_root` into
    /// `archive_root`. The category directories themselves stay behind.
    pub fn archive_all(&self, input_root: &Path, archive_root: &Path) -> Result<ArchiveSummary> {
        let mut summary = ArchiveSummary::default();

        for category in Category::ALL {
            let from = input_root.join(category.dir_name());
            let to = archive_root.join(category.dir_name());

            let (dates, files) = self.move_date_directories(&from, &to)?;
            summary.files_moved += files;
            summary.dates_moved.insert(category, dates);
        }

        Ok(summary)
    }

    /// List the archived files of `date` for both categories.
    pub fn index_date(&self, archive_root: &Path, date: &DateKey) -> Result<FileIndex> {
        let mut index = FileIndex::new(date.clone());

        for category in Category::ALL {
            let dir = archive_root.join(category.dir_name()).join(date.as_str());
            index.insert(category, self.fs.list_files(&dir)?);
        }

        Ok(index)
    }

    fn move_date_directories(&self, from: &Path, to: &Path) -> Result<(Vec<String>, usize)> {
        self.fs.create_dir_all(to)?;

        let mut dates = Vec::new();
        let mut files_moved = 0;

        for source_dir in self.fs.list_dirs(from)? {
            let dir_name = last_component(&source_dir)?;
            let dest_dir = to.join(dir_name);
            self.fs.create_dir_all(&dest_dir)?;

            for file in self.fs.list_files(&source_dir)? {
                let dest = dest_dir.join(last_component(&file)?);
                self.fs.move_file(&file, &dest, true)?;
                files_moved += 1;
            }

            self.fs.remove_dir(&source_dir)?;
            dates.push(dir_name.to_string_lossy().into_owned());
        }

        Ok((dates, files_moved))
    }
}

/// Raw final component, so destinations keep names that are not UTF-8.
fn last_component(path: &Path) -> Result<&OsStr> {
    path.file_name().ok_or_else(|| LetterError::InvalidFileName {
        name: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LetterError;
    use crate::fs::MemoryFileSystem;
    use crate::pipeline::fixtures::{path, roots, seeded_fs, ARCHIVE, INPUT, OUTPUT};

    fn date() -> DateKey {
        DateKey::parse("20220125").unwrap()
    }

    #[test]
    fn test_archive_moves_every_date() {
        let service = LetterService::new(seeded_fs());
        let (input, archive, _) = roots();

        let summary = service.archive_all(input, archive).unwrap();
        let fs = service.fs();

        assert_eq!(summary.files_moved, 6);
        assert_eq!(summary.dates(Category::Admission), ["20220125", "20240426"]);
        assert_eq!(summary.dates(Category::Scholarship), ["20220125", "20240426"]);

        // Category folders survive, their date folders do not
        assert_eq!(
            fs.list_dirs(input).unwrap(),
            vec![path(&[INPUT, "Admission"]), path(&[INPUT, "Scholarship"])]
        );
        for category in Category::ALL {
            assert!(fs.list_dirs(&input.join(category.dir_name())).unwrap().is_empty());
            assert_eq!(
                fs.list_dirs(&archive.join(category.dir_name())).unwrap(),
                vec![
                    path(&[ARCHIVE, category.dir_name(), "20220125"]),
                    path(&[ARCHIVE, category.dir_name(), "20240426"]),
                ]
            );
        }

        assert_eq!(
            fs.list_files(&path(&[ARCHIVE, "Admission", "20240426"])).unwrap(),
            vec![path(&[ARCHIVE, "Admission", "20240426", "admission-22222222.txt"])]
        );
        assert!(fs.list_dirs(Path::new(OUTPUT)).unwrap().is_empty());
    }

    #[test]
    fn test_index_is_scoped_to_target_date() {
        let service = LetterService::new(seeded_fs());
        let (input, archive, _) = roots();

        let index = service.archive_and_index(input, archive, &date()).unwrap();

        assert_eq!(index.date(), &date());
        assert_eq!(
            index.files(Category::Admission),
            [
                path(&[ARCHIVE, "Admission", "20220125", "admission-11111111.txt"]),
                path(&[ARCHIVE, "Admission", "20220125", "admission-88888888.txt"]),
            ]
        );
        assert_eq!(
            index.files(Category::Scholarship),
            [
                path(&[ARCHIVE, "Scholarship", "20220125", "scholarship-11111111.txt"]),
                path(&[ARCHIVE, "Scholarship", "20220125", "scholarship-88888888.txt"]),
            ]
        );
    }

    #[test]
    fn test_archive_overwrites_existing_letters() {
        let fs = MemoryFileSystem::new()
            .with_file(path(&[INPUT, "Admission", "20220125", "admission-1.txt"]), "fresh")
            .with_dir(path(&[INPUT, "Scholarship"]))
            .with_file(path(&[ARCHIVE, "Admission", "20220125", "admission-1.txt"]), "stale");
        let service = LetterService::new(fs);
        let (input, archive, _) = roots();

        service.archive_all(input, archive).unwrap();

        let archived = path(&[ARCHIVE, "Admission", "20220125", "admission-1.txt"]);
        assert_eq!(service.fs().read_to_string(&archived).unwrap(), "fresh");
    }

    #[test]
    fn test_missing_target_date_is_not_found() {
        let service = LetterService::new(seeded_fs());
        let (input, archive, _) = roots();
        let absent = DateKey::parse("19991231").unwrap();

        let error = service.archive_and_index(input, archive, &absent).unwrap_err();
        assert!(matches!(error, LetterError::NotFound { .. }));

        // Archiving still happened before the lookup failed
        assert!(service
            .fs()
            .dir_exists(&path(&[ARCHIVE, "Admission", "20240426"])));
    }

    #[test]
    fn test_missing_category_folder_propagates() {
        let fs = MemoryFileSystem::new().with_dir(path(&[INPUT, "Admission"]));
        let service = LetterService::new(fs);
        let (input, archive, _) = roots();

        let error = service.archive_all(input, archive).unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn test_empty_input_archives_nothing() {
        let fs = MemoryFileSystem::new()
            .with_dir(path(&[INPUT, "Admission"]))
            .with_dir(path(&[INPUT, "Scholarship"]));
        let service = LetterService::new(fs);
        let (input, archive, _) = roots();

        let summary = service.archive_all(input, archive).unwrap();

        assert_eq!(summary.files_moved, 0);
        assert!(service.fs().dir_exists(&archive.join("Admission")));
        assert!(service.fs().dir_exists(&archive.join("Scholarship")));
        assert_eq!(service.fs().list_dirs(archive).unwrap().len(), 2);
        assert!(service
            .fs()
            .list_dirs(&archive.join("Admission"))
            .unwrap()
            .is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_date_folder_keeps_its_own_directory() {
        use std::os::unix::ffi::OsStrExt;

        let odd = OsStr::from_bytes(b"2022\xff0125");
        let fs = MemoryFileSystem::new()
            .with_dir(path(&[INPUT, "Scholarship"]))
            .with_file(
                Path::new(INPUT).join("Admission").join(odd).join("admission-1.txt"),
                "A1",
            );
        let service = LetterService::new(fs);
        let (input, archive, _) = roots();

        let summary = service.archive_all(input, archive).unwrap();
        let fs = service.fs();

        assert_eq!(summary.files_moved, 1);
        assert_eq!(summary.dates(Category::Admission), ["2022\u{FFFD}0125"]);
        assert!(fs.file_exists(&archive.join("Admission").join(odd).join("admission-1.txt")));
        assert!(!fs.file_exists(&archive.join("Admission").join("admission-1.txt")));
    }

    #[test]
    fn test_last_component_rejects_bare_root() {
        assert!(matches!(
            last_component(Path::new("/")),
            Err(LetterError::InvalidFileName { .. })
        ));
        assert_eq!(
            last_component(Path::new("/in/20220125")).unwrap(),
            OsStr::new("20220125")
        );
    }
}

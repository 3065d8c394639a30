use letter_combiner::{
    combine_letters_simple, Category, DateKey, DiskFileSystem, LetterError, LetterService,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Office {
    _temp: TempDir,
    root: PathBuf,
}

impl Office {
    fn new() -> Self {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path().join("CombinedLetters");
        Self { _temp: temp, root }
    }

    fn deliver(&self, category: &str, date: &str, name: &str, contents: &str) {
        let dir = self.root.join("Input").join(category).join(date);
        fs::create_dir_all(&dir).expect("create input dir");
        fs::write(dir.join(name), contents).expect("write letter");
    }

    fn input(&self) -> PathBuf {
        self.root.join("Input")
    }

    fn archive(&self) -> PathBuf {
        self.root.join("Archive")
    }

    fn output(&self) -> PathBuf {
        self.root.join("Output")
    }

    fn base(&self) -> &Path {
        self.root.parent().expect("tempdir parent")
    }
}

fn scenario() -> Office {
    let office = Office::new();
    for id in ["11111111", "88888888"] {
        office.deliver(
            "Admission",
            "20220125",
            &format!("admission-{}.txt", id),
            &format!("Dear {}, you are admitted.\n", id),
        );
        office.deliver(
            "Scholarship",
            "20220125",
            &format!("scholarship-{}.txt", id),
            &format!("Dear {}, you won a scholarship.\n", id),
        );
    }
    office.deliver("Admission", "20220125", "admission-33333333.txt", "orphan\n");
    office.deliver("Scholarship", "20240426", "scholarship-22222222.txt", "later\n");
    office
}

#[test]
fn combines_and_reports_on_disk() {
    let office = scenario();
    let summary = combine_letters_simple(office.base(), "20220125").expect("run succeeds");

    assert_eq!(summary.archive.files_moved, 6);
    assert_eq!(summary.combined.student_ids(), vec!["11111111", "88888888"]);

    let day = office.output().join("20220125");
    assert_eq!(
        fs::read_to_string(day.join("combined-88888888.txt")).unwrap(),
        "Dear 88888888, you are admitted.\nDear 88888888, you won a scholarship.\n"
    );
    assert!(!day.join("combined-33333333.txt").exists());

    let report = fs::read_to_string(day.join("20220125-report.txt")).unwrap();
    assert_eq!(
        report,
        "01/25/2022 Report\n-----------------------------\n\nNumber of Combined Letters: 2\n\t11111111\n\t88888888\n"
    );
}

#[test]
fn archive_empties_input_but_keeps_category_folders() {
    let office = scenario();
    let service = LetterService::new(DiskFileSystem::new());

    service
        .archive_all(&office.input(), &office.archive())
        .expect("archive succeeds");

    for category in Category::ALL {
        let input_dir = office.input().join(category.dir_name());
        assert!(input_dir.is_dir());
        assert_eq!(fs::read_dir(&input_dir).unwrap().count(), 0);
    }
    assert!(office
        .archive()
        .join("Scholarship")
        .join("20240426")
        .join("scholarship-22222222.txt")
        .is_file());
}

#[test]
fn second_report_appends_a_block() {
    let office = scenario();
    let date = DateKey::parse("20220125").unwrap();
    combine_letters_simple(office.base(), "20220125").expect("run succeeds");

    let service = LetterService::new(DiskFileSystem::new());
    let second = service
        .generate_report(&office.output(), &date)
        .expect("second report");

    // The report file itself sorts first and is counted
    assert_eq!(second.student_ids, vec!["report", "11111111", "88888888"]);

    let report = fs::read_to_string(&second.path).unwrap();
    assert_eq!(report.matches("01/25/2022 Report").count(), 2);
    assert!(report.ends_with("Number of Combined Letters: 3\n\treport\n\t11111111\n\t88888888\n"));
}

#[test]
fn missing_date_is_not_found() {
    let office = scenario();
    let error = combine_letters_simple(office.base(), "20230301").unwrap_err();

    assert!(matches!(error, LetterError::NotFound { .. }));
    assert!(!office.output().join("20230301").exists());
}

use crate::letters::DateKey;
use std::borrow::Cow;
use std::path::Path;

pub const COMBINED_PREFIX: &str = "combined";
pub const REPORT_SUFFIX: &str = "-report.txt";

/// Student id embedded in a `<prefix>-<id>.<ext>` file name: the text
/// between the first `-` and the next `.` (or the end of the name).
pub fn student_id(file_name: &str) -> Option<&str> {
    let (_, rest) = file_name.split_once('-')?;
    let id = rest.split('.').next().unwrap_or(rest);

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// `student_id` applied to the final component of `path`.
pub fn student_id_from_path(path: &Path) -> Option<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(student_id)
}

/// Final component of `path` for display; invalid UTF-8 is replaced.
pub fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or(Cow::Borrowed(""))
}

/// Extension after the last `.`, as `Path::extension` sees it.
pub fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

pub fn combined_file_name(student_id: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{}-{}.{}", COMBINED_PREFIX, student_id, ext),
        None => format!("{}-{}", COMBINED_PREFIX, student_id),
    }
}

pub fn report_file_name(date: &DateKey) -> String {
    format!("{}{}", date, REPORT_SUFFIX)
}

use crate::letters::{Category, DateKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Archived letter files of one date, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileIndex {
    date: DateKey,
    files: BTreeMap<Category, Vec<PathBuf>>,
}

impl FileIndex {
    pub fn new(date: DateKey) -> Self {
        Self {
            date,
            files: BTreeMap::new(),
        }
    }

    pub fn with_files(mut self, category: Category, files: Vec<PathBuf>) -> Self {
        self.insert(category, files);
        self
    }

    pub fn insert(&mut self, category: Category, files: Vec<PathBuf>) {
        self.files.insert(category, files);
    }

    pub fn date(&self) -> &DateKey {
        &self.date
    }

    /// Files of `category`; empty when the category was never indexed.
    pub fn files(&self, category: Category) -> &[PathBuf] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_files(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_files() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[PathBuf])> {
        self.files.iter().map(|(c, f)| (*c, f.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_category_is_empty() {
        let index = FileIndex::new(DateKey::parse("20220125").unwrap())
            .with_files(Category::Admission, vec![PathBuf::from("/a/admission-1.txt")]);

        assert_eq!(index.files(Category::Admission).len(), 1);
        assert!(index.files(Category::Scholarship).is_empty());
        assert_eq!(index.total_files(), 1);
        assert!(!index.is_empty());
        assert_eq!(index.date().as_str(), "20220125");
    }

    #[test]
    fn test_iteration_follows_category_order() {
        let index = FileIndex::new(DateKey::parse("20220125").unwrap())
            .with_files(Category::Scholarship, vec![])
            .with_files(Category::Admission, vec![]);

        let order: Vec<Category> = index.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Category::Admission, Category::Scholarship]);
    }
}

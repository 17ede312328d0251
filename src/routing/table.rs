//! Path → URL lookup tables.

use std::collections::HashMap;

use crate::routing::record::Record;

/// An immutable path → URL mapping backing one layer.
///
/// Built once from a record sequence; later records overwrite earlier ones
/// with the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    entries: HashMap<String, String>,
}

impl PathTable {
    /// An empty table. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold records into a table, last write wins.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        records.into_iter().collect()
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries sorted by path.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(p, u)| (p.as_str(), u.as_str()))
            .collect();
        entries.sort_unstable();
        entries.into_iter()
    }
}

impl FromIterator<Record> for PathTable {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        iter.into_iter()
            .map(|record| (record.path, record.url))
            .collect()
    }
}

impl FromIterator<(String, String)> for PathTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_record_wins() {
        let table = PathTable::from_records(vec![
            Record::new("/dup", "https://first"),
            Record::new("/other", "https://other"),
            Record::new("/dup", "https://second"),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/dup"), Some("https://second"));
    }

    #[test]
    fn test_exact_case_sensitive_lookup() {
        let table = PathTable::from_records(vec![Record::new("/Docs", "https://docs")]);

        assert_eq!(table.get("/Docs"), Some("https://docs"));
        assert_eq!(table.get("/docs"), None);
        assert_eq!(table.get("/Docs/"), None);
        assert_eq!(table.get("/Doc"), None);
        assert!(!table.contains(""));
    }

    #[test]
    fn test_iter_sorted() {
        let table: PathTable = vec![
            ("/b".to_string(), "2".to_string()),
            ("/a".to_string(), "1".to_string()),
        ]
        .into_iter()
        .collect();

        let entries: Vec<_> = table.iter_sorted().collect();
        assert_eq!(entries, vec![("/a", "1"), ("/b", "2")]);
    }
}

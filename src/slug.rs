// Slug matching over catalog records
//
// Lookups scan in catalog order and the first match wins. SlugIndex keeps the
// same contract by inserting in catalog order and ignoring later duplicates.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    CaseInsensitive,
}

impl MatchMode {
    pub fn matches(self, candidate: &str, target: &str) -> bool {
        match self {
            MatchMode::Exact => candidate == target,
            // Whole-string lowering so context rules such as the Greek final sigma apply
            MatchMode::CaseInsensitive => candidate.to_lowercase() == target.to_lowercase(),
        }
    }

    // Key under which a value is stored in a SlugIndex
    pub fn normalize(self, value: &str) -> String {
        match self {
            MatchMode::Exact => value.to_string(),
            MatchMode::CaseInsensitive => value.to_lowercase(),
        }
    }
}

pub fn find_first<'a, T, F>(records: &'a [T], selector: F, target: &str, mode: MatchMode) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    records
        .iter()
        .find(|record| mode.matches(selector(record), target))
}

pub fn filter_all<'a, T, F>(records: &'a [T], selector: F, target: &str, mode: MatchMode) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    records
        .iter()
        .filter(|record| mode.matches(selector(record), target))
        .collect()
}

// Map from normalized slug to the first record carrying it
#[derive(Debug)]
pub struct SlugIndex<'a, T> {
    mode: MatchMode,
    entries: HashMap<String, &'a T>,
}

impl<'a, T> SlugIndex<'a, T> {
    pub fn build<F>(records: &'a [T], selector: F, mode: MatchMode) -> Self
    where
        F: Fn(&T) -> &str,
    {
        let mut entries = HashMap::with_capacity(records.len());
        for record in records {
            entries
                .entry(mode.normalize(selector(record)))
                .or_insert(record);
        }
        Self { mode, entries }
    }

    pub fn get(&self, target: &str) -> Option<&'a T> {
        self.entries.get(&self.mode.normalize(target)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

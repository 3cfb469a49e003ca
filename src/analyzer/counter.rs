use std::collections::HashMap;

/// Counts occurrences of string keys, remembering the order in which keys
/// were first seen.
#[derive(Debug, Default, Clone)]
pub struct FrequencyCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyCounter {
    pub fn new() -> FrequencyCounter {
        FrequencyCounter {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1,
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All counts in first-seen order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// The `n` highest counts, highest first. Equal counts keep first-seen
    /// order.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

//! Inspiration prompts.
//!
//! A prompt library is a plain text file of categories:
//!
//! ```text
//! >>> Food & Cooking
//! Describe the smell of your grandmother's kitchen.
//!
//! Write a recipe as if it were a love letter.
//! Include one ingredient you hate.
//! >>> Travel
//! ...
//! ```
//!
//! Lines before the first header are ignored. Blank lines separate prompts, so
//! a prompt may span several lines. A repeated header replaces the earlier
//! category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const HEADER: &str = ">>>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptLibrary {
    categories: Vec<(String, Vec<String>)>,
}

impl PromptLibrary {
    pub fn parse(raw: &str) -> Self {
        let mut library = Self::default();
        let mut current: Option<String> = None;
        let mut bucket: Vec<&str> = Vec::new();

        for line in raw.lines() {
            if let Some(name) = header_name(line) {
                library.flush(current.take(), &bucket);
                current = Some(name.to_string());
                bucket.clear();
            } else if current.is_some() {
                bucket.push(line);
            }
        }
        library.flush(current, &bucket);
        library
    }

    fn flush(&mut self, category: Option<String>, bucket: &[&str]) {
        let Some(category) = category else {
            return;
        };
        if bucket.is_empty() {
            return;
        }

        let mut prompts = Vec::new();
        let mut acc: Vec<&str> = Vec::new();
        for line in bucket {
            if line.trim().is_empty() {
                if !acc.is_empty() {
                    prompts.push(acc.join("\n").trim().to_string());
                    acc.clear();
                }
            } else {
                acc.push(line);
            }
        }
        if !acc.is_empty() {
            prompts.push(acc.join("\n").trim().to_string());
        }

        match self.categories.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => *existing = prompts,
            None => self.categories.push((category, prompts)),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn prompts(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, prompts)| prompts.as_slice())
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.categories.iter().map(|(_, p)| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn header_name(line: &str) -> Option<&str> {
    let name = line.strip_prefix(HEADER)?.trim();
    (!name.is_empty()).then_some(name)
}

/// Per-category position in the library. Persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptCursor {
    positions: BTreeMap<String, usize>,
}

impl PromptCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next prompt in `category`, wrapping around at the end.
    pub fn next<'a>(&mut self, library: &'a PromptLibrary, category: &str) -> Option<&'a str> {
        let prompts = library.prompts(category);
        if prompts.is_empty() {
            return None;
        }
        let position = self.positions.entry(category.to_string()).or_insert(0);
        let ix = *position % prompts.len();
        *position = ix + 1;
        Some(prompts[ix].as_str())
    }

    /// Start `category` over from its first prompt.
    pub fn restart(&mut self, category: &str) {
        self.positions.insert(category.to_string(), 0);
    }
}

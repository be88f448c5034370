//! # Section Indexing
//!
//! Section ids are opaque and awkward to type, so the outline is presented
//! with 1-based positions:
//!
//! ```text
//!  * 1. Title Page
//!    2. Copyright
//!    3. Chapter 1
//! ```
//!
//! A [`SectionSelector`] is whatever the user typed to pick a section: a
//! position, a section id, or a title. Resolution never fails loudly; an
//! unmatched selector resolves to `None` and the operation becomes a no-op.

use crate::markup::word_count;
use crate::model::SectionId;
use crate::outline::SectionStore;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSelector {
    /// 1-based position in the outline.
    Position(usize),
    /// A section id, or failing that a title (case-insensitive).
    Text(String),
}

impl fmt::Display for SectionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionSelector::Position(n) => write!(f, "{}", n),
            SectionSelector::Text(t) => write!(f, "\"{}\"", t),
        }
    }
}

impl FromStr for SectionSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty section selector".to_string());
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = s.parse() {
                return Ok(SectionSelector::Position(n));
            }
        }
        Ok(SectionSelector::Text(s.to_string()))
    }
}

impl From<&SectionId> for SectionSelector {
    fn from(id: &SectionId) -> Self {
        SectionSelector::Text(id.as_str().to_string())
    }
}

impl SectionSelector {
    pub fn resolve(&self, store: &SectionStore) -> Option<SectionId> {
        match self {
            SectionSelector::Position(n) => n
                .checked_sub(1)
                .and_then(|ix| store.sections().get(ix))
                .map(|s| s.id.clone()),
            SectionSelector::Text(text) => {
                let sections = store.sections();
                sections
                    .iter()
                    .find(|s| s.id.as_str() == text)
                    .or_else(|| {
                        sections
                            .iter()
                            .find(|s| s.title.eq_ignore_ascii_case(text))
                    })
                    .map(|s| s.id.clone())
            }
        }
    }
}

/// One row of the rendered outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub position: usize,
    pub id: SectionId,
    pub title: String,
    pub is_active: bool,
    pub words: usize,
}

/// Outline rows in store order. Word counts use stored content, so callers
/// should capture first if the active section's count matters.
pub fn index_sections(store: &SectionStore) -> Vec<SectionEntry> {
    let active = store.active_id();
    store
        .sections()
        .iter()
        .enumerate()
        .map(|(ix, section)| SectionEntry {
            position: ix + 1,
            id: section.id.clone(),
            title: section.title.clone(),
            is_active: Some(&section.id) == active,
            words: word_count(&section.content),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::surface::MemorySurface;

    fn store() -> SectionStore {
        let mut surface = MemorySurface::new();
        let mut store = SectionStore::with_ids(SequentialIds::new());
        for title in ["Title Page", "Copyright", "Chapter 1"] {
            store.add_section(title, &mut surface);
        }
        store
    }

    #[test]
    fn parses_positions_and_text() {
        assert_eq!("2".parse::<SectionSelector>(), Ok(SectionSelector::Position(2)));
        assert_eq!(
            "Chapter 1".parse::<SectionSelector>(),
            Ok(SectionSelector::Text("Chapter 1".to_string()))
        );
        assert!("  ".parse::<SectionSelector>().is_err());
    }

    #[test]
    fn resolves_by_position() {
        let store = store();
        assert_eq!(
            SectionSelector::Position(2).resolve(&store),
            Some(SectionId::from("sec_2"))
        );
        assert_eq!(SectionSelector::Position(0).resolve(&store), None);
        assert_eq!(SectionSelector::Position(9).resolve(&store), None);
    }

    #[test]
    fn resolves_by_id_then_title() {
        let store = store();
        let by_id = SectionSelector::Text("sec_3".to_string());
        assert_eq!(by_id.resolve(&store), Some(SectionId::from("sec_3")));

        let by_title = SectionSelector::Text("copyright".to_string());
        assert_eq!(by_title.resolve(&store), Some(SectionId::from("sec_2")));

        let missing = SectionSelector::Text("Epilogue".to_string());
        assert_eq!(missing.resolve(&store), None);
    }

    #[test]
    fn index_marks_active_and_numbers_from_one() {
        let store = store();
        let entries = index_sections(&store);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].position, 1);
        assert!(entries[0].is_active);
        assert!(!entries[2].is_active);
        assert_eq!(entries[2].title, "Chapter 1");
    }
}

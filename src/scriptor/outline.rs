//! # Section Store
//!
//! The ordered collection of document sections and the identity of the one
//! currently shown on the editing surface.
//!
//! ## Activation
//!
//! Activation is a two-state machine:
//!
//! ```text
//!   NoActiveSection  ──activate(Some(id))──▶  Active(id)
//!   Active(a)        ──activate(Some(b))──▶  Active(b)
//!   Active(a)        ──activate(None)─────▶  NoActiveSection
//!   Active(a)        ──delete(a)──────────▶  Active(first) | NoActiveSection
//! ```
//!
//! While a section is active, the editing surface holds its live content and
//! the stored `content` may lag behind. Every transition out of `Active(a)`
//! first *captures* the surface into `a`, so no edit is lost by switching.
//! Serialization captures too (see [`crate::codec::serialize`]).
//!
//! ## Missing ids
//!
//! Operations naming an id that is not in the store are silent no-ops. They
//! report `false` so callers can skip a save, but never fail.

use crate::ids::{IdGenerator, RandomIds};
use crate::model::{Section, SectionId};
use crate::surface::EditingSurface;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    NoActiveSection,
    Active(SectionId),
}

impl Activation {
    pub fn id(&self) -> Option<&SectionId> {
        match self {
            Activation::NoActiveSection => None,
            Activation::Active(id) => Some(id),
        }
    }
}

#[derive(Debug)]
pub struct SectionStore {
    sections: Vec<Section>,
    activation: Activation,
    /// Ids deleted during this session. Never handed out again.
    retired: HashSet<SectionId>,
    ids: Box<dyn IdGenerator>,
}

impl Default for SectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionStore {
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }

    pub fn with_ids(ids: impl IdGenerator + 'static) -> Self {
        Self {
            sections: Vec::new(),
            activation: Activation::NoActiveSection,
            retired: HashSet::new(),
            ids: Box::new(ids),
        }
    }

    /// Builds a store from already-validated sections.
    ///
    /// `preferred_active` is honoured when it names a section in `sections`;
    /// otherwise the first section becomes active, or none when empty.
    /// Ids must already be unique.
    pub(crate) fn from_sections(
        sections: Vec<Section>,
        preferred_active: Option<SectionId>,
    ) -> Self {
        let active = preferred_active
            .filter(|id| sections.iter().any(|s| &s.id == id))
            .or_else(|| sections.first().map(|s| s.id.clone()));

        let mut store = Self::new();
        store.sections = sections;
        store.activation = match active {
            Some(id) => Activation::Active(id),
            None => Activation::NoActiveSection,
        };
        store
    }

    /// A store holding one empty section per title; the first is active and loaded.
    pub fn with_titles<I, T, S>(titles: I, surface: &mut S) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        S: EditingSurface + ?Sized,
    {
        let mut store = Self::new();
        for title in titles {
            store.add_section(title, surface);
        }
        store
    }

    /// Discards every section and starts over from `titles`.
    ///
    /// The discarded ids join the retired set, so nothing from before the
    /// reset is handed out again this session.
    pub fn reset_to<I, T, S>(&mut self, titles: I, surface: &mut S)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        S: EditingSurface + ?Sized,
    {
        self.retired
            .extend(self.sections.drain(..).map(|section| section.id));
        self.activation = Activation::NoActiveSection;
        surface.set_content("");
        for title in titles {
            self.add_section(title, surface);
        }
    }

    pub fn set_id_generator(&mut self, ids: impl IdGenerator + 'static) {
        self.ids = Box::new(ids);
    }

    // --- Queries ---

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Ordered `(id, title)` pairs for rendering an outline.
    pub fn list_sections(&self) -> impl Iterator<Item = (&SectionId, &str)> + Clone + '_ {
        self.sections.iter().map(|s| (&s.id, s.title.as_str()))
    }

    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn active_id(&self) -> Option<&SectionId> {
        self.activation.id()
    }

    pub fn active_section(&self) -> Option<&Section> {
        self.active_id().and_then(|id| self.get(id))
    }

    // --- Mutations ---

    /// Appends a new empty section and returns its id.
    ///
    /// When nothing is active yet, the new section becomes active.
    pub fn add_section<S>(&mut self, title: impl Into<String>, surface: &mut S) -> SectionId
    where
        S: EditingSurface + ?Sized,
    {
        let id = self.fresh_id();
        self.sections.push(Section::new(id.clone(), title));
        log::debug!("added section {}", id);

        if self.activation == Activation::NoActiveSection {
            self.activate(Some(&id), surface);
        }
        id
    }

    /// Overwrites a section's title. Returns `false` when the id is unknown.
    pub fn rename_section(&mut self, id: &SectionId, new_title: impl Into<String>) -> bool {
        match self.sections.iter_mut().find(|s| &s.id == id) {
            Some(section) => {
                section.title = new_title.into();
                true
            }
            None => false,
        }
    }

    /// Removes a section. Returns `false` when the id is unknown.
    ///
    /// Deleting the active section captures the surface first (the captured
    /// value goes away with the section), then activates the first remaining
    /// section or clears the surface.
    pub fn delete_section<S>(&mut self, id: &SectionId, surface: &mut S) -> bool
    where
        S: EditingSurface + ?Sized,
    {
        let Some(ix) = self.position(id) else {
            return false;
        };

        let was_active = self.active_id() == Some(id);
        if was_active {
            self.capture(surface);
        }

        let removed = self.sections.remove(ix);
        log::debug!("deleted section {}", removed.id);
        self.retired.insert(removed.id);

        if was_active {
            self.activation = Activation::NoActiveSection;
            match self.sections.first().map(|s| s.id.clone()) {
                Some(next) => self.load(&next, surface),
                None => surface.set_content(""),
            }
        }
        true
    }

    /// Capture-then-switch.
    ///
    /// `None` leaves no section active and clears the surface. An unknown id
    /// is ignored and returns `false` without capturing.
    pub fn activate<S>(&mut self, id: Option<&SectionId>, surface: &mut S) -> bool
    where
        S: EditingSurface + ?Sized,
    {
        match id {
            None => {
                self.capture(surface);
                self.activation = Activation::NoActiveSection;
                surface.set_content("");
                true
            }
            Some(id) => {
                if !self.contains(id) {
                    return false;
                }
                self.capture(surface);
                self.load(id, surface);
                true
            }
        }
    }

    /// Writes the surface content into the active section, if any.
    ///
    /// Idempotent: capturing twice without edits in between changes nothing.
    pub fn capture<S>(&mut self, surface: &S) -> bool
    where
        S: EditingSurface + ?Sized,
    {
        let Activation::Active(active) = &self.activation else {
            return false;
        };
        match self.sections.iter_mut().find(|s| &s.id == active) {
            Some(section) => {
                section.content = surface.get_content();
                true
            }
            None => false,
        }
    }

    /// Reloads the active section's stored content into the surface.
    ///
    /// Used after stored content changed behind the surface's back (replace,
    /// import, clear). Does not capture.
    pub fn refresh_surface<S>(&self, surface: &mut S)
    where
        S: EditingSurface + ?Sized,
    {
        match self.active_section() {
            Some(section) => surface.set_content(&section.content),
            None => surface.set_content(""),
        }
    }

    /// Applies `edit` to the stored content of one section.
    pub fn edit_content(&mut self, id: &SectionId, edit: impl FnOnce(&mut String)) -> bool {
        match self.sections.iter_mut().find(|s| &s.id == id) {
            Some(section) => {
                edit(&mut section.content);
                true
            }
            None => false,
        }
    }

    /// Applies `edit` to the stored content of every section, in order.
    pub fn edit_all_contents(&mut self, mut edit: impl FnMut(&mut String)) {
        for section in &mut self.sections {
            edit(&mut section.content);
        }
    }

    fn load<S>(&mut self, id: &SectionId, surface: &mut S)
    where
        S: EditingSurface + ?Sized,
    {
        let content = self.get(id).map(|s| s.content.as_str()).unwrap_or_default();
        surface.set_content(content);
        self.activation = Activation::Active(id.clone());
        log::debug!("activated section {}", id);
    }

    fn fresh_id(&mut self) -> SectionId {
        loop {
            let candidate = self.ids.next_id();
            if !candidate.as_str().is_empty()
                && !self.retired.contains(&candidate)
                && !self.contains(&candidate)
            {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::surface::MemorySurface;

    fn store_with(titles: &[&str]) -> (SectionStore, MemorySurface, Vec<SectionId>) {
        let mut surface = MemorySurface::new();
        let mut store = SectionStore::with_ids(SequentialIds::new());
        let ids = titles
            .iter()
            .map(|t| store.add_section(*t, &mut surface))
            .collect();
        (store, surface, ids)
    }

    fn titles(store: &SectionStore) -> Vec<&str> {
        store.list_sections().map(|(_, title)| title).collect()
    }

    #[test]
    fn ids_are_pairwise_distinct() {
        let mut surface = MemorySurface::new();
        let mut store = SectionStore::new();
        let ids: Vec<_> = (0..500)
            .map(|i| store.add_section(format!("Chapter {}", i), &mut surface))
            .collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[derive(Debug)]
    struct Stuttering {
        queue: Vec<&'static str>,
    }

    impl IdGenerator for Stuttering {
        fn next_id(&mut self) -> SectionId {
            SectionId::from(self.queue.remove(0))
        }
    }

    #[test]
    fn colliding_and_retired_ids_are_redrawn() {
        let mut surface = MemorySurface::new();
        let mut store = SectionStore::with_ids(Stuttering {
            queue: vec!["a", "a", "", "b", "a", "b", "c"],
        });
        let a = store.add_section("A", &mut surface);
        let b = store.add_section("B", &mut surface);
        assert_eq!((a.as_str(), b.as_str()), ("a", "b"));

        store.delete_section(&a, &mut surface);
        let c = store.add_section("C", &mut surface);
        assert_eq!(c.as_str(), "c");
    }

    #[test]
    fn reset_never_reissues_ids_from_before() {
        let mut surface = MemorySurface::new();
        let mut store = SectionStore::with_ids(Stuttering {
            queue: vec!["a", "b", "a", "b", "c", "d"],
        });
        let a = store.add_section("A", &mut surface);
        store.add_section("B", &mut surface);
        store.delete_section(&a, &mut surface);
        surface.type_text("lost");

        store.reset_to(["Intro", "Outro"], &mut surface);

        let ids: Vec<_> = store.list_sections().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);
        assert_eq!(titles(&store), vec!["Intro", "Outro"]);
        assert_eq!(store.active_id().map(SectionId::as_str), Some("c"));
        assert_eq!(surface.as_str(), "");
    }

    #[test]
    fn first_added_section_becomes_active() {
        let (store, surface, ids) = store_with(&["Title Page", "Copyright"]);
        assert_eq!(store.active_id(), Some(&ids[0]));
        assert_eq!(surface.as_str(), "");
    }

    #[test]
    fn order_is_preserved_across_middle_delete() {
        let (mut store, mut surface, ids) = store_with(&["A", "B", "C", "D"]);
        assert!(store.delete_section(&ids[1], &mut surface));
        assert_eq!(titles(&store), vec!["A", "C", "D"]);
    }

    #[test]
    fn list_sections_is_restartable() {
        let (store, _surface, _ids) = store_with(&["A", "B"]);
        let listing = store.list_sections();
        let first: Vec<_> = listing.clone().collect();
        let second: Vec<_> = listing.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn activate_captures_before_switching() {
        let (mut store, mut surface, ids) = store_with(&["A", "B"]);
        store.edit_content(&ids[1], |c| c.push_str("<p>B body</p>"));

        surface.type_text("X");
        assert!(store.activate(Some(&ids[1]), &mut surface));

        assert_eq!(store.get(&ids[0]).unwrap().content, "X");
        assert_eq!(surface.as_str(), "<p>B body</p>");
        assert_eq!(store.active_id(), Some(&ids[1]));
    }

    #[test]
    fn activate_none_captures_and_clears_surface() {
        let (mut store, mut surface, ids) = store_with(&["A"]);
        surface.type_text("draft");
        assert!(store.activate(None, &mut surface));

        assert_eq!(store.activation(), &Activation::NoActiveSection);
        assert_eq!(store.get(&ids[0]).unwrap().content, "draft");
        assert_eq!(surface.as_str(), "");
    }

    #[test]
    fn activate_unknown_id_is_ignored() {
        let (mut store, mut surface, ids) = store_with(&["A"]);
        surface.type_text("unsaved");
        assert!(!store.activate(Some(&SectionId::from("nope")), &mut surface));

        assert_eq!(store.active_id(), Some(&ids[0]));
        assert_eq!(store.get(&ids[0]).unwrap().content, "");
        assert_eq!(surface.as_str(), "unsaved");
    }

    #[test]
    fn capture_is_idempotent() {
        let (mut store, mut surface, ids) = store_with(&["A"]);
        surface.type_text("same");
        store.capture(&surface);
        store.capture(&surface);
        assert_eq!(store.get(&ids[0]).unwrap().content, "same");
    }

    #[test]
    fn deleting_active_moves_to_first_remaining() {
        let (mut store, mut surface, ids) = store_with(&["A", "B", "C"]);
        store.edit_content(&ids[1], |c| c.push_str("b"));
        surface.type_text("a-edits");

        assert!(store.delete_section(&ids[0], &mut surface));

        assert_eq!(store.active_id(), Some(&ids[1]));
        assert_eq!(titles(&store), vec!["B", "C"]);
        assert_eq!(surface.as_str(), "b");
    }

    #[test]
    fn deleting_last_section_leaves_nothing_active() {
        let (mut store, mut surface, ids) = store_with(&["A"]);
        surface.type_text("gone");
        assert!(store.delete_section(&ids[0], &mut surface));

        assert!(store.is_empty());
        assert_eq!(store.active_id(), None);
        assert_eq!(surface.as_str(), "");
    }

    #[test]
    fn deleting_inactive_section_keeps_surface() {
        let (mut store, mut surface, ids) = store_with(&["A", "B"]);
        surface.type_text("typing in A");
        assert!(store.delete_section(&ids[1], &mut surface));

        assert_eq!(store.active_id(), Some(&ids[0]));
        assert_eq!(surface.as_str(), "typing in A");
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let (mut store, mut surface, _ids) = store_with(&["A", "B"]);
        let before: Vec<Section> = store.sections().to_vec();
        let missing = SectionId::from("nonexistent");

        assert!(!store.rename_section(&missing, "X"));
        assert!(!store.delete_section(&missing, &mut surface));
        assert_eq!(store.sections(), before.as_slice());
    }

    #[test]
    fn rename_overwrites_title() {
        let (mut store, _surface, ids) = store_with(&["Chapter 1"]);
        assert!(store.rename_section(&ids[0], "Prologue"));
        assert_eq!(titles(&store), vec!["Prologue"]);
    }

    #[test]
    fn from_sections_falls_back_to_first() {
        let sections = vec![
            Section::new(SectionId::from("x"), "X"),
            Section::new(SectionId::from("y"), "Y"),
        ];
        let store = SectionStore::from_sections(sections.clone(), Some(SectionId::from("zz")));
        assert_eq!(store.active_id(), Some(&SectionId::from("x")));

        let store = SectionStore::from_sections(sections, Some(SectionId::from("y")));
        assert_eq!(store.active_id(), Some(&SectionId::from("y")));

        let store = SectionStore::from_sections(Vec::new(), Some(SectionId::from("y")));
        assert_eq!(store.activation(), &Activation::NoActiveSection);
    }
}

use crate::index::SectionEntry;
use crate::model::{PresentationSettings, SectionId};
use crate::outline::SectionStore;
use crate::surface::EditingSurface;
use std::path::PathBuf;

pub mod config;
pub mod editing;
pub mod goal;
pub mod prompt;
pub mod replace;
pub mod sections;
pub mod settings;
pub mod transfer;

/// Everything a command may touch: the sections, the presentation settings
/// and the surface showing the active section.
#[derive(Debug)]
pub struct Workspace<S: EditingSurface> {
    pub store: SectionStore,
    pub settings: PresentationSettings,
    pub surface: S,
}

impl<S: EditingSurface> Workspace<S> {
    /// A workspace with one empty section per title, first one active.
    pub fn with_titles<I, T>(titles: I, mut surface: S) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let store = SectionStore::with_titles(titles, &mut surface);
        Self {
            store,
            settings: PresentationSettings::default(),
            surface,
        }
    }

    /// Swaps in restored state and loads the active section onto the surface.
    pub fn replace_state(&mut self, store: SectionStore, settings: PresentationSettings) {
        self.store = store;
        self.settings = settings;
        self.store.refresh_surface(&mut self.surface);
    }

    pub fn capture(&mut self) -> bool {
        self.store.capture(&self.surface)
    }
}

#[derive(Debug, Clone)]
pub struct ScriptorPaths {
    pub data_dir: PathBuf,
}

/// How a command's changes should reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Nothing changed.
    #[default]
    None,
    /// Structural change: write now.
    Immediate,
    /// Part of a burst of edits: write after the quiet period.
    Debounced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub save: SaveMode,
    pub affected_section: Option<SectionId>,
    pub listed_sections: Vec<SectionEntry>,
    /// Free text produced by the command (section body, prompt, ...).
    pub output: Option<String>,
    pub written_paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_save(mut self, save: SaveMode) -> Self {
        self.save = save;
        self
    }

    pub fn with_affected_section(mut self, id: SectionId) -> Self {
        self.affected_section = Some(id);
        self
    }

    pub fn with_listed_sections(mut self, sections: Vec<SectionEntry>) -> Self {
        self.listed_sections = sections;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_written_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.written_paths = paths;
        self
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque section identity. Stable for the lifetime of the section and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    /// Serialized rich-text markup. Never interpreted by the store.
    pub content: String,
}

impl Section {
    pub fn new(id: SectionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Planner,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::A4,
        PageSize::Letter,
        PageSize::Legal,
        PageSize::Planner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
            PageSize::Planner => "planner",
        }
    }

    /// Printable page dimensions used by the HTML export, as CSS lengths.
    pub fn dimensions(self) -> (&'static str, &'static str) {
        match self {
            PageSize::A4 => ("210mm", "297mm"),
            PageSize::Letter => ("8.5in", "11in"),
            PageSize::Legal => ("8.5in", "14in"),
            PageSize::Planner => ("5.5in", "8.5in"),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PageSize::ALL
            .into_iter()
            .find(|size| size.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown page size '{}' (expected a4, letter, legal or planner)",
                    s
                )
            })
    }
}

/// Presentation state that travels with the sections but has no invariants of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentationSettings {
    pub theme: Theme,
    pub page_size: PageSize,
    /// Opaque background image reference. Empty means no background.
    pub background_ref: String,
}

impl PresentationSettings {
    pub fn has_background(&self) -> bool {
        !self.background_ref.is_empty()
    }
}

//! # Persistence Codec
//!
//! Converts the section store and presentation settings to and from the
//! durable project record:
//!
//! ```json
//! {
//!   "version": 1,
//!   "theme": "light",
//!   "sections": [{ "id": "sec_1a2b3c4d5e", "title": "Title Page", "content": "<p>…</p>" }],
//!   "activeId": "sec_1a2b3c4d5e",
//!   "pageSize": "a4",
//!   "backgroundRef": ""
//! }
//! ```
//!
//! ## Compatibility
//!
//! Records written before the `version` tag existed decode as version 0. They
//! stored section markup under `html` and the background under `bg`, the
//! latter wrapped as a CSS `url("…")`; both are accepted and normalised.
//! Records from a newer version are refused rather than guessed at.
//!
//! Restore is best-effort: any failure yields a [`RestoreError`] and the caller
//! keeps the store it already had.

use crate::model::{PageSize, PresentationSettings, Section, SectionId};
use crate::outline::SectionStore;
use crate::surface::EditingSurface;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Version written by this build.
pub const RECORD_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("no saved project found")]
    Missing,

    #[error("saved project is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("saved project has version {0}, newer than supported version {RECORD_VERSION}")]
    UnsupportedVersion(u32),

    #[error("saved project contains duplicate section id: {0}")]
    DuplicateId(String),

    #[error("saved project contains a section with an empty id")]
    EmptyId,

    #[error("saved project could not be read: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "html")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub theme: Option<String>,
    pub sections: Vec<PersistedSection>,
    #[serde(default)]
    pub active_id: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
    #[serde(default, alias = "bg")]
    pub background_ref: Option<String>,
}

/// Captures the surface into the active section, then projects the store.
pub fn serialize<S>(
    store: &mut SectionStore,
    surface: &S,
    settings: &PresentationSettings,
) -> PersistedRecord
where
    S: EditingSurface + ?Sized,
{
    store.capture(surface);
    snapshot(store, settings)
}

/// Projects the store as it is, without capturing.
pub fn snapshot(store: &SectionStore, settings: &PresentationSettings) -> PersistedRecord {
    PersistedRecord {
        version: RECORD_VERSION,
        theme: Some(settings.theme.as_str().to_string()),
        sections: store
            .sections()
            .iter()
            .map(|s| PersistedSection {
                id: s.id.as_str().to_string(),
                title: s.title.clone(),
                content: s.content.clone(),
            })
            .collect(),
        active_id: store.active_id().map(|id| id.as_str().to_string()),
        page_size: Some(settings.page_size.as_str().to_string()),
        background_ref: Some(settings.background_ref.clone()),
    }
}

/// Rebuilds a section store and settings from a record.
pub fn deserialize(
    record: PersistedRecord,
) -> Result<(SectionStore, PresentationSettings), RestoreError> {
    if record.version > RECORD_VERSION {
        return Err(RestoreError::UnsupportedVersion(record.version));
    }

    let mut seen = HashSet::with_capacity(record.sections.len());
    let mut sections = Vec::with_capacity(record.sections.len());
    for persisted in record.sections {
        if persisted.id.is_empty() {
            return Err(RestoreError::EmptyId);
        }
        if !seen.insert(persisted.id.clone()) {
            return Err(RestoreError::DuplicateId(persisted.id));
        }
        sections.push(
            Section::new(SectionId::new(persisted.id), persisted.title)
                .with_content(persisted.content),
        );
    }

    let preferred = record
        .active_id
        .filter(|id| !id.is_empty())
        .map(SectionId::new);
    let store = SectionStore::from_sections(sections, preferred);

    let settings = PresentationSettings {
        theme: parse_or_default(record.theme.as_deref(), "theme"),
        page_size: parse_or_default::<PageSize>(record.page_size.as_deref(), "page size"),
        background_ref: record
            .background_ref
            .map(|bg| unwrap_css_url(&bg).to_string())
            .unwrap_or_default(),
    };

    Ok((store, settings))
}

pub fn encode(record: &PersistedRecord) -> serde_json::Result<String> {
    serde_json::to_string(record)
}

pub fn decode(raw: &str) -> Result<PersistedRecord, RestoreError> {
    if raw.trim().is_empty() {
        return Err(RestoreError::Missing);
    }
    Ok(serde_json::from_str(raw)?)
}

/// Convenience for the usual load path: raw text straight to state.
pub fn restore(raw: Option<&str>) -> Result<(SectionStore, PresentationSettings), RestoreError> {
    let raw = raw.ok_or(RestoreError::Missing)?;
    deserialize(decode(raw)?)
}

fn parse_or_default<T>(value: Option<&str>, what: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value {
        None | Some("") => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            log::warn!("ignoring saved {}: {}", what, err);
            T::default()
        }),
    }
}

/// `url("blob:abc")` → `blob:abc`. Anything else is returned unchanged.
fn unwrap_css_url(value: &str) -> &str {
    let trimmed = value.trim();
    let Some(inner) = trimmed
        .strip_prefix("url(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return value;
    };
    let inner = inner.trim();
    for quote in ['"', '\''] {
        if let Some(unquoted) = inner
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return unquoted;
        }
    }
    inner
}

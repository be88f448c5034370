//! Changes made through the editing surface itself.
//!
//! Typing only touches the surface; the store catches up on the next capture.
//! That is why `write` and `append` ask for a debounced save while `clear`,
//! which rewrites stored content directly, saves at once.

use crate::commands::{CmdMessage, CmdResult, SaveMode, Workspace};
use crate::error::Result;
use crate::surface::EditingSurface;

/// Replaces everything on the surface with `markup`.
pub fn write<S: EditingSurface>(ws: &mut Workspace<S>, markup: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(id) = ws.store.active_id().cloned() else {
        result.add_message(CmdMessage::warning("No section open."));
        return Ok(result);
    };
    if ws.surface.get_content() == markup {
        return Ok(result);
    }
    ws.surface.set_content(markup);
    Ok(result
        .with_save(SaveMode::Debounced)
        .with_affected_section(id))
}

/// Adds `markup` after whatever is on the surface.
pub fn append<S: EditingSurface>(ws: &mut Workspace<S>, markup: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(id) = ws.store.active_id().cloned() else {
        result.add_message(CmdMessage::warning("No section open."));
        return Ok(result);
    };
    if markup.is_empty() {
        return Ok(result);
    }
    let mut content = ws.surface.get_content();
    content.push_str(markup);
    ws.surface.set_content(&content);
    Ok(result
        .with_save(SaveMode::Debounced)
        .with_affected_section(id))
}

/// Empties the active section.
pub fn clear<S: EditingSurface>(ws: &mut Workspace<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(id) = ws.store.active_id().cloned() else {
        result.add_message(CmdMessage::warning("No section open."));
        return Ok(result);
    };
    ws.store.edit_content(&id, String::clear);
    ws.store.refresh_surface(&mut ws.surface);

    if let Some(section) = ws.store.get(&id) {
        result.add_message(CmdMessage::success(format!("Cleared: {}", section.title)));
    }
    Ok(result
        .with_save(SaveMode::Immediate)
        .with_affected_section(id))
}

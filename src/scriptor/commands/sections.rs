use crate::commands::{CmdMessage, CmdResult, SaveMode, Workspace};
use crate::error::Result;
use crate::index::{index_sections, SectionSelector};
use crate::surface::EditingSurface;

/// A blank title adds nothing.
pub fn add<S: EditingSurface>(ws: &mut Workspace<S>, title: &str) -> Result<CmdResult> {
    let title = title.trim();
    if title.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("Section title cannot be blank."));
        return Ok(result);
    }

    let id = ws.store.add_section(title, &mut ws.surface);
    let position = ws.store.len();

    let mut result = CmdResult::default()
        .with_save(SaveMode::Immediate)
        .with_affected_section(id);
    result.add_message(CmdMessage::success(format!(
        "Section added ({}): {}",
        position, title
    )));
    Ok(result)
}

/// A blank title leaves the section as it was.
pub fn rename<S: EditingSurface>(
    ws: &mut Workspace<S>,
    selector: &SectionSelector,
    new_title: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(id) = selector.resolve(&ws.store) else {
        result.add_message(CmdMessage::warning(format!("No section {}", selector)));
        return Ok(result);
    };

    let new_title = new_title.trim();
    if new_title.is_empty() {
        result.add_message(CmdMessage::info("Title unchanged."));
        return Ok(result);
    }

    let old_title = ws
        .store
        .get(&id)
        .map(|s| s.title.clone())
        .unwrap_or_default();
    ws.store.rename_section(&id, new_title);
    result.add_message(CmdMessage::success(format!(
        "Renamed \"{}\" to \"{}\"",
        old_title, new_title
    )));
    Ok(result
        .with_save(SaveMode::Immediate)
        .with_affected_section(id))
}

pub fn delete<S: EditingSurface>(
    ws: &mut Workspace<S>,
    selector: &SectionSelector,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(id) = selector.resolve(&ws.store) else {
        result.add_message(CmdMessage::warning(format!("No section {}", selector)));
        return Ok(result);
    };

    let title = ws
        .store
        .get(&id)
        .map(|s| s.title.clone())
        .unwrap_or_default();
    ws.store.delete_section(&id, &mut ws.surface);
    result.add_message(CmdMessage::success(format!("Section deleted: {}", title)));

    match ws.store.active_section() {
        Some(active) => result.add_message(CmdMessage::info(format!(
            "Now editing: {}",
            active.title
        ))),
        None => result.add_message(CmdMessage::info("No sections left.")),
    }
    Ok(result
        .with_save(SaveMode::Immediate)
        .with_affected_section(id))
}

/// Switches the surface to another section, or to none with `None`.
pub fn activate<S: EditingSurface>(
    ws: &mut Workspace<S>,
    selector: Option<&SectionSelector>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(selector) = selector else {
        ws.store.activate(None, &mut ws.surface);
        result.add_message(CmdMessage::info("No section open."));
        return Ok(result.with_save(SaveMode::Immediate));
    };

    let Some(id) = selector.resolve(&ws.store) else {
        result.add_message(CmdMessage::warning(format!("No section {}", selector)));
        return Ok(result);
    };

    ws.store.activate(Some(&id), &mut ws.surface);
    if let Some(section) = ws.store.get(&id) {
        result.add_message(CmdMessage::info(format!("Now editing: {}", section.title)));
    }
    Ok(result
        .with_save(SaveMode::Immediate)
        .with_affected_section(id))
}

pub fn list<S: EditingSurface>(ws: &mut Workspace<S>) -> Result<CmdResult> {
    ws.capture();
    let entries = index_sections(&ws.store);
    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info("No sections. Add one with `scriptor add <title>`."));
    }
    Ok(result.with_listed_sections(entries))
}

/// The active section's live content.
pub fn show<S: EditingSurface>(ws: &Workspace<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match ws.store.active_section() {
        Some(section) => {
            let id = section.id.clone();
            result.add_message(CmdMessage::info(format!("# {}", section.title)));
            Ok(result
                .with_output(ws.surface.get_content())
                .with_affected_section(id))
        }
        None => {
            result.add_message(CmdMessage::info("No section open."));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{id, workspace};
    use crate::model::SectionId;

    fn pos(n: usize) -> SectionSelector {
        SectionSelector::Position(n)
    }

    #[test]
    fn add_appends_and_saves_immediately() {
        let mut ws = workspace(&["Title Page"]);
        let result = add(&mut ws, "  Chapter 2 ").unwrap();

        assert_eq!(result.save, SaveMode::Immediate);
        assert_eq!(result.affected_section, Some(id(2)));
        assert_eq!(ws.store.sections()[1].title, "Chapter 2");
        assert_eq!(ws.store.active_id(), Some(&id(1)));
    }

    #[test]
    fn blank_add_creates_nothing() {
        let mut ws = workspace(&["Title Page"]);
        let result = add(&mut ws, " \t ").unwrap();

        assert_eq!(result.save, SaveMode::None);
        assert_eq!(result.affected_section, None);
        assert_eq!(ws.store.len(), 1);
    }

    #[test]
    fn rename_by_title() {
        let mut ws = workspace(&["Title Page", "Chapter 1"]);
        let sel: SectionSelector = "chapter 1".parse().unwrap();
        let result = rename(&mut ws, &sel, "Prologue").unwrap();

        assert_eq!(result.save, SaveMode::Immediate);
        assert_eq!(ws.store.sections()[1].title, "Prologue");
    }

    #[test]
    fn blank_rename_keeps_title_and_skips_save() {
        let mut ws = workspace(&["Title Page"]);
        let result = rename(&mut ws, &pos(1), "   ").unwrap();

        assert_eq!(result.save, SaveMode::None);
        assert_eq!(ws.store.sections()[0].title, "Title Page");
    }

    #[test]
    fn unknown_selector_is_a_quiet_no_op() {
        let mut ws = workspace(&["A", "B"]);
        let before = ws.store.sections().to_vec();

        for result in [
            rename(&mut ws, &pos(7), "X").unwrap(),
            delete(&mut ws, &pos(7)).unwrap(),
            activate(&mut ws, Some(&SectionSelector::Text("nope".into()))).unwrap(),
        ] {
            assert_eq!(result.save, SaveMode::None);
        }
        assert_eq!(ws.store.sections(), before.as_slice());
        assert_eq!(ws.store.active_id(), Some(&id(1)));
    }

    #[test]
    fn delete_active_opens_first_remaining() {
        let mut ws = workspace(&["A", "B", "C"]);
        ws.store.edit_content(&id(2), |c| c.push_str("<p>b</p>"));
        ws.surface.type_text("lost with A");

        let result = delete(&mut ws, &pos(1)).unwrap();

        assert_eq!(result.save, SaveMode::Immediate);
        assert_eq!(ws.store.active_id(), Some(&id(2)));
        assert_eq!(ws.surface.as_str(), "<p>b</p>");
    }

    #[test]
    fn activate_captures_current_section() {
        let mut ws = workspace(&["A", "B"]);
        ws.surface.type_text("draft of A");

        activate(&mut ws, Some(&pos(2))).unwrap();
        assert_eq!(ws.store.get(&id(1)).unwrap().content, "draft of A");

        activate(&mut ws, Some(&SectionSelector::from(&SectionId::from("sec_1")))).unwrap();
        assert_eq!(ws.surface.as_str(), "draft of A");
    }

    #[test]
    fn activate_none_clears_surface() {
        let mut ws = workspace(&["A"]);
        ws.surface.type_text("kept");
        let result = activate(&mut ws, None).unwrap();

        assert_eq!(result.save, SaveMode::Immediate);
        assert_eq!(ws.store.active_id(), None);
        assert_eq!(ws.surface.as_str(), "");
        assert_eq!(ws.store.get(&id(1)).unwrap().content, "kept");
    }

    #[test]
    fn list_counts_live_words() {
        let mut ws = workspace(&["A", "B"]);
        ws.surface.type_text("<p>three small words</p>");

        let result = list(&mut ws).unwrap();
        assert_eq!(result.listed_sections.len(), 2);
        assert_eq!(result.listed_sections[0].words, 3);
        assert!(result.listed_sections[0].is_active);
        assert_eq!(result.save, SaveMode::None);
    }

    #[test]
    fn show_returns_surface_content() {
        let mut ws = workspace(&["A"]);
        ws.surface.type_text("<p>hello</p>");
        let result = show(&ws).unwrap();
        assert_eq!(result.output.as_deref(), Some("<p>hello</p>"));

        let empty = workspace(&[]);
        assert_eq!(show(&empty).unwrap().output, None);
    }
}

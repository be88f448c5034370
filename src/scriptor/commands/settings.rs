use crate::commands::{CmdMessage, CmdResult, SaveMode, Workspace};
use crate::error::Result;
use crate::model::{PageSize, Theme};
use crate::surface::EditingSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Show,
    Set(Theme),
    Toggle,
}

pub fn theme<S: EditingSurface>(ws: &mut Workspace<S>, change: ThemeChange) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let next = match change {
        ThemeChange::Show => {
            result.add_message(CmdMessage::info(ws.settings.theme.as_str()));
            return Ok(result);
        }
        ThemeChange::Set(theme) => theme,
        ThemeChange::Toggle => ws.settings.theme.toggled(),
    };

    if next == ws.settings.theme {
        result.add_message(CmdMessage::info(format!("Theme is already {}", next)));
        return Ok(result);
    }
    ws.settings.theme = next;
    result.add_message(CmdMessage::success(format!("Theme set to {}", next)));
    Ok(result.with_save(SaveMode::Debounced))
}

pub fn page_size<S: EditingSurface>(
    ws: &mut Workspace<S>,
    size: Option<PageSize>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(size) = size else {
        let (width, height) = ws.settings.page_size.dimensions();
        result.add_message(CmdMessage::info(format!(
            "{} ({} x {})",
            ws.settings.page_size, width, height
        )));
        return Ok(result);
    };

    if size == ws.settings.page_size {
        result.add_message(CmdMessage::info(format!("Page size is already {}", size)));
        return Ok(result);
    }
    ws.settings.page_size = size;
    result.add_message(CmdMessage::success(format!("Page size set to {}", size)));
    Ok(result.with_save(SaveMode::Debounced))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundChange {
    Show,
    Set(String),
    Clear,
}

pub fn background<S: EditingSurface>(
    ws: &mut Workspace<S>,
    change: BackgroundChange,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let next = match change {
        BackgroundChange::Show => {
            if ws.settings.has_background() {
                result.add_message(CmdMessage::info(ws.settings.background_ref.clone()));
            } else {
                result.add_message(CmdMessage::info("No background."));
            }
            return Ok(result);
        }
        BackgroundChange::Set(reference) => reference.trim().to_string(),
        BackgroundChange::Clear => String::new(),
    };

    if next == ws.settings.background_ref {
        result.add_message(CmdMessage::info("Background unchanged."));
        return Ok(result);
    }
    if next.is_empty() {
        result.add_message(CmdMessage::success("Background cleared"));
    } else {
        result.add_message(CmdMessage::success(format!("Background set to {}", next)));
    }
    ws.settings.background_ref = next;
    Ok(result.with_save(SaveMode::Debounced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::workspace;

    #[test]
    fn toggle_flips_theme_and_debounces() {
        let mut ws = workspace(&["A"]);
        let result = theme(&mut ws, ThemeChange::Toggle).unwrap();
        assert_eq!(ws.settings.theme, Theme::Dark);
        assert_eq!(result.save, SaveMode::Debounced);

        theme(&mut ws, ThemeChange::Toggle).unwrap();
        assert_eq!(ws.settings.theme, Theme::Light);
    }

    #[test]
    fn setting_same_theme_does_not_save() {
        let mut ws = workspace(&["A"]);
        let result = theme(&mut ws, ThemeChange::Set(Theme::Light)).unwrap();
        assert_eq!(result.save, SaveMode::None);
    }

    #[test]
    fn page_size_changes_are_debounced() {
        let mut ws = workspace(&["A"]);
        let result = page_size(&mut ws, Some(PageSize::Planner)).unwrap();
        assert_eq!(ws.settings.page_size, PageSize::Planner);
        assert_eq!(result.save, SaveMode::Debounced);

        let shown = page_size(&mut ws, None).unwrap();
        assert_eq!(shown.messages[0].content, "planner (5.5in x 8.5in)");
    }

    #[test]
    fn background_set_and_clear() {
        let mut ws = workspace(&["A"]);
        background(&mut ws, BackgroundChange::Set(" cover.png ".into())).unwrap();
        assert_eq!(ws.settings.background_ref, "cover.png");

        let result = background(&mut ws, BackgroundChange::Clear).unwrap();
        assert!(!ws.settings.has_background());
        assert_eq!(result.save, SaveMode::Debounced);

        let again = background(&mut ws, BackgroundChange::Clear).unwrap();
        assert_eq!(again.save, SaveMode::None);
    }
}

use crate::commands::{CmdMessage, CmdResult, SaveMode, Workspace};
use crate::error::Result;
use crate::surface::EditingSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceScope {
    /// Only the open section.
    #[default]
    Active,
    /// Every section.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occurrences {
    /// The first match in each section.
    #[default]
    First,
    All,
}

/// Literal search and replace over stored section content.
///
/// The surface is captured first and reloaded afterwards, so the open section
/// sees the result immediately.
pub fn run<S: EditingSurface>(
    ws: &mut Workspace<S>,
    search: &str,
    replacement: &str,
    scope: ReplaceScope,
    occurrences: Occurrences,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if search.is_empty() {
        result.add_message(CmdMessage::warning("Nothing to search for."));
        return Ok(result);
    }

    ws.capture();

    let mut hits = 0;
    let mut touched = 0;
    let mut apply = |content: &mut String| {
        let (next, n) = replace_in(content, search, replacement, occurrences);
        if n > 0 {
            *content = next;
            hits += n;
            touched += 1;
        }
    };

    match scope {
        ReplaceScope::Active => {
            let Some(id) = ws.store.active_id().cloned() else {
                result.add_message(CmdMessage::warning("No section open."));
                return Ok(result);
            };
            ws.store.edit_content(&id, &mut apply);
        }
        ReplaceScope::All => ws.store.edit_all_contents(&mut apply),
    }

    if hits == 0 {
        result.add_message(CmdMessage::info(format!("No matches for \"{}\"", search)));
        return Ok(result);
    }

    ws.store.refresh_surface(&mut ws.surface);
    result.add_message(CmdMessage::success(format!(
        "Replaced {} occurrence{} in {} section{}",
        hits,
        plural(hits),
        touched,
        plural(touched)
    )));
    Ok(result.with_save(SaveMode::Immediate))
}

fn replace_in(
    haystack: &str,
    search: &str,
    replacement: &str,
    occurrences: Occurrences,
) -> (String, usize) {
    match occurrences {
        Occurrences::First => match haystack.find(search) {
            Some(_) => (haystack.replacen(search, replacement, 1), 1),
            None => (String::new(), 0),
        },
        Occurrences::All => {
            let n = haystack.matches(search).count();
            if n == 0 {
                (String::new(), 0)
            } else {
                (haystack.replace(search, replacement), n)
            }
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

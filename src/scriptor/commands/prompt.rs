use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::prompts::{PromptCursor, PromptLibrary};

/// Next prompt from `category`, or the category list when none is given.
///
/// Category names match case-insensitively. `restart` starts the category
/// over before drawing.
pub fn run(
    library: &PromptLibrary,
    cursor: &mut PromptCursor,
    category: Option<&str>,
    restart: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if library.is_empty() {
        result.add_message(CmdMessage::warning("The prompt library is empty."));
        return Ok(result);
    }

    let Some(wanted) = category else {
        let listing = library
            .categories()
            .map(|name| format!("{} ({})", name, library.prompts(name).len()))
            .collect::<Vec<_>>()
            .join("\n");
        return Ok(result.with_output(listing));
    };

    let Some(name) = library
        .categories()
        .find(|name| name.eq_ignore_ascii_case(wanted.trim()))
    else {
        result.add_message(CmdMessage::warning(format!("No category \"{}\"", wanted)));
        return Ok(result);
    };

    if restart {
        cursor.restart(name);
    }
    match cursor.next(library, name) {
        Some(prompt) => Ok(result.with_output(prompt)),
        None => {
            result.add_message(CmdMessage::warning(format!("No prompts in \"{}\"", name)));
            Ok(result)
        }
    }
}

use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use scriptor::api::ScriptorApi;
use scriptor::commands::config::ConfigAction;
use scriptor::commands::replace::{Occurrences, ReplaceScope};
use scriptor::commands::settings::{BackgroundChange, ThemeChange};
use scriptor::commands::transfer::ExportFormat;
use scriptor::commands::{CmdMessage, CmdResult, MessageLevel, ScriptorPaths};
use scriptor::config::ScriptorConfig;
use scriptor::editor::edit_markup;
use scriptor::error::{Result, ScriptorError};
use scriptor::index::SectionEntry;
use scriptor::model::Theme;
use scriptor::store::fs::FsBackend;
use scriptor::surface::MemorySurface;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, ScopeArg, ThemeArg};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ScriptorApi<FsBackend, MemorySurface>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let outcome = match cli.command {
        Some(Commands::List) | None => handle_list(&mut ctx),
        Some(Commands::Add { title }) => handle_result(ctx.api.add_section(&title)),
        Some(Commands::Rename { section, title }) => {
            handle_result(ctx.api.rename_section(&section, &title))
        }
        Some(Commands::Delete { section }) => handle_result(ctx.api.delete_section(&section)),
        Some(Commands::Open { section }) => {
            handle_result(ctx.api.open_section(section.as_deref()))
        }
        Some(Commands::Show) => handle_show(&ctx),
        Some(Commands::Write { text }) => handle_result(ctx.api.write(&text)),
        Some(Commands::Append { text }) => handle_result(ctx.api.append(&text)),
        Some(Commands::Edit) => handle_edit(&mut ctx),
        Some(Commands::Clear) => handle_result(ctx.api.clear_section()),
        Some(Commands::Theme { mode }) => {
            let change = match mode {
                None => ThemeChange::Show,
                Some(ThemeArg::Light) => ThemeChange::Set(Theme::Light),
                Some(ThemeArg::Dark) => ThemeChange::Set(Theme::Dark),
                Some(ThemeArg::Toggle) => ThemeChange::Toggle,
            };
            handle_result(ctx.api.set_theme(change))
        }
        Some(Commands::PageSize { size }) => {
            handle_result(ctx.api.set_page_size(size.as_deref()))
        }
        Some(Commands::Background { reference, clear }) => {
            let change = match (reference, clear) {
                (_, true) => BackgroundChange::Clear,
                (Some(reference), false) => BackgroundChange::Set(reference),
                (None, false) => BackgroundChange::Show,
            };
            handle_result(ctx.api.set_background(change))
        }
        Some(Commands::Replace {
            search,
            replacement,
            all,
            scope,
        }) => {
            let scope = match scope {
                ScopeArg::Active => ReplaceScope::Active,
                ScopeArg::All => ReplaceScope::All,
            };
            let occurrences = if all {
                Occurrences::All
            } else {
                Occurrences::First
            };
            handle_result(ctx.api.replace(&search, &replacement, scope, occurrences))
        }
        Some(Commands::Import { file }) => handle_result(ctx.api.import_file(&file)),
        Some(Commands::Export {
            output,
            archive,
            text,
        }) => {
            let format = match (archive, text) {
                (true, _) => ExportFormat::Archive,
                (false, true) => ExportFormat::Text,
                (false, false) => ExportFormat::Html,
            };
            handle_result(ctx.api.export(format, output))
        }
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx, yes),
        Some(Commands::Goal) => handle_result(ctx.api.check_goal()),
        Some(Commands::Prompt {
            category,
            library,
            restart,
        }) => handle_result(ctx.api.next_prompt(
            category.as_deref(),
            library.as_deref(),
            restart,
        )),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    };

    // Debounced changes must reach disk before the process goes away. A failed
    // write is reported the same way as one during the command.
    if let Err(e) = ctx.api.flush() {
        log::error!("failed to save project: {}", e);
    }
    outcome
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "crafted", "scriptor")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                ScriptorError::Api(
                    "Could not determine a data directory. Pass --data-dir.".to_string(),
                )
            })?,
    };

    let config = ScriptorConfig::load(&data_dir)?;
    let backend = FsBackend::new(data_dir.clone());
    let paths = ScriptorPaths { data_dir };
    let api = ScriptorApi::open(backend, MemorySurface::new(), config, paths);

    Ok(AppContext { api })
}

fn handle_result(result: Result<CmdResult>) -> Result<()> {
    let result = result?;
    if let Some(output) = &result.output {
        println!("{}", output);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_sections()?;
    print_sections(&result.listed_sections);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.show_section()?;
    print_messages(&result.messages);
    if let Some(output) = &result.output {
        println!("{}", output);
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext) -> Result<()> {
    let Some(current) = ctx.api.active_content() else {
        print_messages(&[CmdMessage::warning("No section open.")]);
        return Ok(());
    };
    let edited = edit_markup(&current)?;
    if edited == current {
        print_messages(&[CmdMessage::info("No changes.")]);
        return Ok(());
    }
    handle_result(ctx.api.write(&edited))?;
    print_messages(&[CmdMessage::success("Section updated.")]);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        print!("This discards every section. [Y] To reset: ");
        io::stdout().flush().map_err(ScriptorError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(ScriptorError::Io)?;
        if input.trim() != "Y" {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }
    handle_result(ctx.api.reset_project())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    handle_result(ctx.api.config_action(action))
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 80;
const WORDS_WIDTH: usize = 12;
const ACTIVE_MARKER: &str = "▸";

fn print_sections(sections: &[SectionEntry]) {
    for entry in sections {
        let left_prefix = if entry.is_active {
            format!("  {} ", ACTIVE_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", entry.position);

        let fixed_width = left_prefix.width() + idx_str.width() + WORDS_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&entry.title, available);
        let padding = available.saturating_sub(title_display.width());

        let words = format!("{:>width$}", format_words(entry.words), width = WORDS_WIDTH);
        let (prefix, title) = if entry.is_active {
            (left_prefix.green(), title_display.bold())
        } else {
            (left_prefix.normal(), title_display.normal())
        };

        println!(
            "{}{}{}{}{}",
            prefix,
            idx_str.yellow(),
            title,
            " ".repeat(padding),
            words.dimmed()
        );
    }
}

fn format_words(n: usize) -> String {
    match n {
        0 => "empty".to_string(),
        1 => "1 word".to_string(),
        n => format!("{} words", n),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

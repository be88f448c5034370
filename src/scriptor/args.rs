use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.4.2" for releases, "0.4.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "scriptor", bin_name = "scriptor", version = get_version())]
#[command(about = "Write books one section at a time, with autosave", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the project and config (defaults to the OS data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List sections
    #[command(alias = "ls")]
    List,

    /// Add a section at the end of the outline
    #[command(alias = "n")]
    Add {
        /// Title of the new section
        title: String,
    },

    /// Rename a section
    #[command(alias = "mv")]
    Rename {
        /// Position, id or title of the section
        section: String,

        /// New title (blank keeps the old one)
        title: String,
    },

    /// Delete a section
    #[command(alias = "rm")]
    Delete {
        /// Position, id or title of the section
        section: String,
    },

    /// Open a section for editing
    #[command(alias = "o")]
    Open {
        /// Position, id or title of the section (omit to close the open one)
        section: Option<String>,
    },

    /// Print the open section
    #[command(alias = "v")]
    Show,

    /// Replace the open section's content
    Write {
        /// Markup to write
        text: String,
    },

    /// Append to the open section
    #[command(alias = "a")]
    Append {
        /// Markup to append
        text: String,
    },

    /// Edit the open section in $EDITOR
    #[command(alias = "e")]
    Edit,

    /// Empty the open section
    Clear,

    /// Show, set or toggle the theme
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },

    /// Show or set the page size
    PageSize {
        /// a4, letter, legal or planner
        size: Option<String>,
    },

    /// Show, set or clear the page background
    #[command(alias = "bg")]
    Background {
        /// Image reference (path or URL)
        #[arg(conflicts_with = "clear")]
        reference: Option<String>,

        /// Remove the background
        #[arg(long)]
        clear: bool,
    },

    /// Search and replace text
    Replace {
        search: String,

        replacement: String,

        /// Replace every occurrence, not just the first in each section
        #[arg(long)]
        all: bool,

        /// Sections to search
        #[arg(long, value_enum, default_value_t = ScopeArg::Active)]
        scope: ScopeArg,
    },

    /// Append a .txt, .html or .md file to the open section
    Import { file: PathBuf },

    /// Export the book as HTML, plain text or an archive
    Export {
        /// Output file (defaults to a timestamped name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a .tar.gz with one HTML file per section
        #[arg(long, conflicts_with = "text")]
        archive: bool,

        /// Write plain text with the markup stripped
        #[arg(long)]
        text: bool,
    },

    /// Discard the saved project and start from the default outline
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show progress toward the daily word goal
    Goal,

    /// Draw a writing prompt
    Prompt {
        /// Category to draw from (omit to list categories)
        category: Option<String>,

        /// Prompt library file
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// Start the category over from its first prompt
        #[arg(long)]
        restart: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., daily-goal)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Active,
    All,
}

//! # API Facade
//!
//! [`ScriptorApi`] is the single controller for a project. It is built once
//! at startup and owns everything that used to be ambient state: the
//! workspace (sections, settings, editing surface), the storage backend, the
//! save scheduler and the clock.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Boots** the project: default outline first, then a best-effort restore
//! - **Dispatches** to the command functions in `commands/*.rs`
//! - **Normalizes inputs** (section selectors, page size names)
//! - **Decides when to save**: every command reports a [`SaveMode`] and the
//!   facade either writes at once or (re)arms the debounce timer
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: it returns [`CmdResult`]s, never prints
//! - **Fail on storage errors**: a failed write is logged and the in-memory
//!   project stays authoritative; the next successful write catches up
//!
//! ## Driving the Debounce
//!
//! There is no timer thread. An interactive front end calls [`ScriptorApi::tick`]
//! from its event loop; a one-shot front end calls [`ScriptorApi::flush`]
//! before exiting.
//!
//! ## Generic Over Backend and Surface
//!
//! - Production: `ScriptorApi<FsBackend, MemorySurface>`
//! - Testing: `ScriptorApi<MemBackend, MemorySurface>` with a `ManualClock`

use crate::codec::{self, RestoreError};
use crate::commands::config::ConfigAction;
use crate::commands::replace::{Occurrences, ReplaceScope};
use crate::commands::settings::{BackgroundChange, ThemeChange};
use crate::commands::transfer::ExportFormat;
use crate::commands::{self, CmdResult, SaveMode, ScriptorPaths, Workspace};
use crate::config::ScriptorConfig;
use crate::error::{Result, ScriptorError};
use crate::index::SectionSelector;
use crate::model::{PageSize, PresentationSettings};
use crate::prompts::{PromptCursor, PromptLibrary};
use crate::scheduler::{Clock, SaveScheduler, SystemClock};
use crate::store::{StorageBackend, DAILY_KEY, PROJECT_KEY, PROMPTS_KEY};
use crate::surface::EditingSurface;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ScriptorApi<B: StorageBackend, S: EditingSurface> {
    workspace: Workspace<S>,
    backend: B,
    scheduler: SaveScheduler,
    clock: Box<dyn Clock>,
    config: ScriptorConfig,
    paths: ScriptorPaths,
    restored: bool,
}

impl<B: StorageBackend, S: EditingSurface> ScriptorApi<B, S> {
    /// Builds the default outline, then replaces it with the saved project if
    /// one can be restored. Building the defaults never writes.
    pub fn open(backend: B, surface: S, config: ScriptorConfig, paths: ScriptorPaths) -> Self {
        let workspace = Workspace::with_titles(config.default_sections.clone(), surface);
        let scheduler = SaveScheduler::new(config.save_delay());
        let mut api = Self {
            workspace,
            backend,
            scheduler,
            clock: Box::new(SystemClock),
            config,
            paths,
            restored: false,
        };
        api.restore();
        api
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn restore(&mut self) {
        let raw = match self.backend.read(PROJECT_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("{}", RestoreError::Storage(e.to_string()));
                return;
            }
        };
        match codec::restore(raw.as_deref()) {
            Ok((store, settings)) => {
                log::debug!("restored {} sections", store.len());
                self.workspace.replace_state(store, settings);
                self.restored = true;
            }
            Err(RestoreError::Missing) => log::debug!("no saved project, starting fresh"),
            Err(e) => log::warn!("keeping default project: {}", e),
        }
    }

    /// Whether the saved project replaced the default outline at startup.
    pub fn restored(&self) -> bool {
        self.restored
    }

    pub fn workspace(&self) -> &Workspace<S> {
        &self.workspace
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ScriptorConfig {
        &self.config
    }

    pub fn paths(&self) -> &ScriptorPaths {
        &self.paths
    }

    // --- Persistence ---

    /// Captures and writes the project now, dropping any pending debounced save.
    pub fn save_now(&mut self) -> Result<()> {
        self.scheduler.cancel();
        let ws = &mut self.workspace;
        let record = codec::serialize(&mut ws.store, &ws.surface, &ws.settings);
        let raw = codec::encode(&record)?;
        self.backend.write(PROJECT_KEY, &raw)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save_now() {
            log::error!("failed to save project: {}", e);
        }
    }

    /// Runs the debounced save if its quiet period has passed.
    pub fn tick(&mut self) -> bool {
        if self.scheduler.poll(self.clock.now()) {
            self.persist();
            true
        } else {
            false
        }
    }

    /// Writes any pending debounced save immediately.
    pub fn flush(&mut self) -> Result<()> {
        if self.scheduler.take_pending() {
            self.save_now()?;
        }
        Ok(())
    }

    pub fn is_save_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn apply(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        let result = result?;
        match result.save {
            SaveMode::None => {}
            SaveMode::Immediate => self.persist(),
            SaveMode::Debounced => self.scheduler.signal(self.clock.now()),
        }
        Ok(result)
    }

    // --- Sections ---

    pub fn add_section(&mut self, title: &str) -> Result<CmdResult> {
        let result = commands::sections::add(&mut self.workspace, title);
        self.apply(result)
    }

    pub fn rename_section(&mut self, selector: &str, title: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        let result = commands::sections::rename(&mut self.workspace, &selector, title);
        self.apply(result)
    }

    pub fn delete_section(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        let result = commands::sections::delete(&mut self.workspace, &selector);
        self.apply(result)
    }

    /// Opens a section on the surface, or closes the current one with `None`.
    pub fn open_section(&mut self, selector: Option<&str>) -> Result<CmdResult> {
        let selector = selector.map(parse_selector).transpose()?;
        let result = commands::sections::activate(&mut self.workspace, selector.as_ref());
        self.apply(result)
    }

    pub fn list_sections(&mut self) -> Result<CmdResult> {
        commands::sections::list(&mut self.workspace)
    }

    pub fn show_section(&self) -> Result<CmdResult> {
        commands::sections::show(&self.workspace)
    }

    /// Live markup of the open section, if any.
    pub fn active_content(&self) -> Option<String> {
        self.workspace
            .store
            .active_id()
            .map(|_| self.workspace.surface.get_content())
    }

    // --- Editing ---

    pub fn write(&mut self, markup: &str) -> Result<CmdResult> {
        let result = commands::editing::write(&mut self.workspace, markup);
        self.apply(result)
    }

    pub fn append(&mut self, markup: &str) -> Result<CmdResult> {
        let result = commands::editing::append(&mut self.workspace, markup);
        self.apply(result)
    }

    pub fn clear_section(&mut self) -> Result<CmdResult> {
        let result = commands::editing::clear(&mut self.workspace);
        self.apply(result)
    }

    pub fn replace(
        &mut self,
        search: &str,
        replacement: &str,
        scope: ReplaceScope,
        occurrences: Occurrences,
    ) -> Result<CmdResult> {
        let result =
            commands::replace::run(&mut self.workspace, search, replacement, scope, occurrences);
        self.apply(result)
    }

    // --- Presentation ---

    pub fn set_theme(&mut self, change: ThemeChange) -> Result<CmdResult> {
        let result = commands::settings::theme(&mut self.workspace, change);
        self.apply(result)
    }

    pub fn set_page_size(&mut self, size: Option<&str>) -> Result<CmdResult> {
        let size = size
            .map(|s| s.parse::<PageSize>())
            .transpose()
            .map_err(ScriptorError::Api)?;
        let result = commands::settings::page_size(&mut self.workspace, size);
        self.apply(result)
    }

    pub fn set_background(&mut self, change: BackgroundChange) -> Result<CmdResult> {
        let result = commands::settings::background(&mut self.workspace, change);
        self.apply(result)
    }

    // --- Import / Export ---

    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        let result = commands::transfer::import(&mut self.workspace, path);
        self.apply(result)
    }

    pub fn export(&mut self, format: ExportFormat, output: Option<PathBuf>) -> Result<CmdResult> {
        commands::transfer::export(&mut self.workspace, format, output)
    }

    // --- Project ---

    /// Forgets the saved project and starts over from the default outline.
    pub fn reset_project(&mut self) -> Result<CmdResult> {
        self.scheduler.cancel();
        self.backend.remove(PROJECT_KEY)?;

        let ws = &mut self.workspace;
        ws.store
            .reset_to(self.config.default_sections.clone(), &mut ws.surface);
        ws.settings = PresentationSettings::default();

        let mut result = CmdResult::default().with_save(SaveMode::Immediate);
        result.add_message(commands::CmdMessage::success(format!(
            "Project reset to {} default sections",
            self.workspace.store.len()
        )));
        self.apply(Ok(result))
    }

    // --- Daily goal ---

    pub fn check_goal(&mut self) -> Result<CmdResult> {
        self.check_goal_on(Local::now().date_naive())
    }

    /// Compares the open section against the daily goal, stamping `today`
    /// the first time it is reached.
    pub fn check_goal_on(&mut self, today: NaiveDate) -> Result<CmdResult> {
        let last_stamp = match self.backend.read(DAILY_KEY) {
            Ok(raw) => raw.as_deref().and_then(commands::goal::parse_stamp),
            Err(e) => {
                log::warn!("could not read daily goal stamp: {}", e);
                None
            }
        };

        let progress =
            commands::goal::check(&self.workspace, self.config.daily_goal, last_stamp, today);
        if progress.celebrate {
            let stamp = commands::goal::format_stamp(today);
            if let Err(e) = self.backend.write(DAILY_KEY, &stamp) {
                log::error!("failed to record daily goal: {}", e);
            }
        }
        Ok(commands::goal::report(&progress))
    }

    // --- Prompts ---

    /// Draws the next prompt from `category`, or lists categories.
    ///
    /// The library is `library` if given, else the configured one.
    pub fn next_prompt(
        &mut self,
        category: Option<&str>,
        library: Option<&Path>,
        restart: bool,
    ) -> Result<CmdResult> {
        let path = library
            .map(Path::to_path_buf)
            .or_else(|| self.config.prompt_library.clone())
            .ok_or_else(|| {
                ScriptorError::Api(
                    "No prompt library. Pass --library or set prompt-library.".to_string(),
                )
            })?;
        let raw = fs::read_to_string(&path).map_err(ScriptorError::Io)?;
        let library = PromptLibrary::parse(&raw);

        let mut cursor = self.load_prompt_cursor();
        let result = commands::prompt::run(&library, &mut cursor, category, restart)?;

        if category.is_some() {
            match serde_json::to_string(&cursor) {
                Ok(raw) => {
                    if let Err(e) = self.backend.write(PROMPTS_KEY, &raw) {
                        log::error!("failed to save prompt positions: {}", e);
                    }
                }
                Err(e) => log::error!("failed to encode prompt positions: {}", e),
            }
        }
        Ok(result)
    }

    fn load_prompt_cursor(&self) -> PromptCursor {
        match self.backend.read(PROMPTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("ignoring saved prompt positions: {}", e);
                PromptCursor::new()
            }),
            Ok(None) => PromptCursor::new(),
            Err(e) => {
                log::warn!("could not read prompt positions: {}", e);
                PromptCursor::new()
            }
        }
    }

    // --- Config ---

    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&mut self.config, &self.paths.data_dir, action)?;
        self.scheduler.set_quiet(self.config.save_delay());
        Ok(result)
    }
}

fn parse_selector(raw: &str) -> Result<SectionSelector> {
    raw.parse().map_err(ScriptorError::Api)
}

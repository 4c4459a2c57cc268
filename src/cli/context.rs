//! Runtime state shared by every command: configuration, storage and output.

use std::{io::IsTerminal, path::PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm};
use giftbook_config::{Backend, Config, ConfigManager};
use giftbook_core::{storage::RecordStorage, GroupedFormatter};
use giftbook_domain::LabelStyle;
use giftbook_storage_json::JsonRecordStorage;
use giftbook_storage_sqlite::SqliteRecordStorage;
use tracing::debug;

use crate::cli::{
    args::did_you_mean,
    commands,
    output::{configure_color, Formatter},
    registry::{CommandEntry, CommandRegistry},
};
use crate::errors::CliError;

const SQLITE_FILE: &str = "giftbook.db";

pub struct AppContext {
    pub registry: CommandRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub app_dir: PathBuf,
    pub formatter: Formatter,
    /// Set by `--yes`: confirmations pass without prompting.
    pub assume_yes: bool,
}

impl AppContext {
    /// Loads the config under `app_dir` and registers every command.
    pub fn new(app_dir: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(app_dir.clone())?;
        let config = config_manager.load()?;
        let formatter = Formatter::new(configure_color(config.ui_color_enabled));
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        debug!(app_dir = %app_dir.display(), backend = %config.backend, "context ready");
        Ok(Self {
            registry,
            config_manager,
            config,
            app_dir,
            formatter,
            assume_yes: false,
        })
    }

    pub fn data_root(&self) -> PathBuf {
        self.config.resolve_data_root(&self.app_dir)
    }

    /// Opens the backend selected in the config.
    pub fn open_storage(&self) -> Result<Box<dyn RecordStorage>, CliError> {
        let root = self.data_root();
        let storage: Box<dyn RecordStorage> = match self.config.backend {
            Backend::Json => Box::new(JsonRecordStorage::with_retention(
                root,
                self.config.backup_retention,
            )?),
            Backend::Sqlite => Box::new(SqliteRecordStorage::open(&root.join(SQLITE_FILE))?),
        };
        debug!(storage = %storage.describe(), "opened storage");
        Ok(storage)
    }

    pub fn amounts(&self) -> GroupedFormatter {
        GroupedFormatter::new(self.config.currency_unit.clone())
    }

    pub fn label_style(&self) -> LabelStyle {
        self.config.label_style()
    }

    pub fn persist_config(&self) -> Result<(), CliError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Asks before a destructive change. Fails without a terminal unless `--yes`.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CliError> {
        if self.assume_yes {
            return Ok(true);
        }
        if !std::io::stdin().is_terminal() {
            return Err(CliError::Command(format!(
                "{prompt} Confirmation needs a terminal; rerun with --yes."
            )));
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        if !confirmed {
            self.formatter.print_detail("Cancelled; nothing changed.");
        }
        Ok(confirmed)
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Runs one command line: the command name followed by its arguments.
    pub fn dispatch(&mut self, argv: &[String]) -> Result<(), CliError> {
        let Some((name, rest)) = argv.split_first() else {
            return self.run("help", &[]);
        };
        self.run(&name.to_lowercase(), rest)
    }

    fn run(&mut self, name: &str, rest: &[String]) -> Result<(), CliError> {
        let name = match name {
            "-h" | "--help" => "help",
            "-V" | "--version" => "version",
            other => other,
        };
        let Some(handler) = self.command(name).map(|entry| entry.handler) else {
            return Err(self.unknown_command(name));
        };
        let args = crate::cli::args::ParsedArgs::parse(rest)?;
        self.assume_yes = args.switch("yes");
        handler(self, &args)
    }

    fn unknown_command(&self, input: &str) -> CliError {
        let hint = did_you_mean(input, self.registry.names())
            .map(|best| format!(" Did you mean `{best}`?"))
            .unwrap_or_default();
        CliError::Input(format!(
            "unknown command `{input}`.{hint} Run `help` to see available commands."
        ))
    }
}

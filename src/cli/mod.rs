pub mod args;
pub mod commands;
pub mod context;
pub mod dashboard;
pub mod output;
pub mod registry;
pub mod table;

use crate::errors::CliError;

pub use context::AppContext;

pub type CommandResult = Result<(), CliError>;

/// Runs the command named by the process arguments.
pub fn run_cli() -> CommandResult {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    run_with_args(&argv)
}

pub fn run_with_args(argv: &[String]) -> CommandResult {
    let mut context = AppContext::new(giftbook_config::app_dir())?;
    context.dispatch(argv)
}

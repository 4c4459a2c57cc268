use giftbook_core::StatsService;

use crate::cli::args::ParsedArgs;
use crate::cli::context::AppContext;
use crate::cli::dashboard::DashboardView;
use crate::cli::registry::CommandEntry;
use crate::cli::CommandResult;
use crate::errors::GiftbookError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "stats",
        "Show totals, shares and yearly trends",
        "stats [--json]",
        cmd_stats,
    )]
}

fn cmd_stats(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&["json"])?;
    let records = context.open_storage()?.list()?;
    let dashboard = StatsService::dashboard(&records);

    if args.switch("json") {
        let json = serde_json::to_string_pretty(&dashboard).map_err(GiftbookError::from)?;
        println!("{json}");
        return Ok(());
    }

    let amounts = context.amounts();
    DashboardView {
        dashboard: &dashboard,
        labels: context.label_style(),
        amounts: &amounts,
        formatter: context.formatter,
    }
    .print();
    Ok(())
}

use anyhow::{Ok, Result};

use super::command_result::{CommandResult, CommandSummary, StatusSummary};
use super::helper::open_gateway;
use crate::cli::args::StatusCommand;

pub fn status(cmd: StatusCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let gateway = open_gateway(&args.common)?;

    let mut view = gateway.snapshot();

    if args.unused_only {
        view.keys.retain(|k| k.unused_since.is_some());
    }

    // The --lang flags are a per-invocation display filter; which languages a
    // viewer prefers is not catalog state.
    let langs_shown = if args.langs.is_empty() {
        view.config.langs.clone()
    } else {
        args.langs
            .iter()
            .filter(|l| view.config.langs.contains(l))
            .cloned()
            .collect()
    };

    Ok(CommandResult {
        summary: CommandSummary::Status(StatusSummary {
            view,
            langs_shown,
            unused_only: args.unused_only,
        }),
        warning_count: 0,
        exit_on_warnings: false,
    })
}

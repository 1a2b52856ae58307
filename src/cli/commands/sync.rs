use anyhow::{Ok, Result};

use super::command_result::{CommandResult, CommandSummary, SyncSummary};
use super::helper::open_gateway;
use crate::cli::args::SyncCommand;
use crate::core::CancelToken;

pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let gateway = open_gateway(&args.common)?;

    let cancel = CancelToken::new();
    let outcome = gateway.parse_source_files(&cancel, args.common.verbose)?;

    let warning_count = outcome.diagnostics.len();

    Ok(CommandResult {
        summary: CommandSummary::Sync(SyncSummary {
            created: outcome.stats.created,
            revived: outcome.stats.revived,
            marked_unused: outcome.stats.marked_unused,
            unchanged: outcome.stats.unchanged,
            total_keys: outcome.snapshot.keys.len(),
            files_scanned: outcome.files_scanned,
            skipped_matches: outcome.skipped_matches,
            diagnostics: outcome.diagnostics,
        }),
        warning_count,
        exit_on_warnings: false,
    })
}

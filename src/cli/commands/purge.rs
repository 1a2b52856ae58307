use anyhow::{Ok, Result};
use chrono::{Duration, Utc};

use super::command_result::{CommandResult, CommandSummary, PurgeSummary};
use super::helper::open_gateway;
use crate::cli::args::PurgeCommand;

pub fn purge(cmd: PurgeCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let gateway = open_gateway(&args.common)?;

    let cutoff = Utc::now() - Duration::days(i64::from(args.before));

    let summary = if args.apply {
        let outcome = gateway.store().purge_keys(cutoff)?;
        PurgeSummary {
            candidates: outcome.purged_keys,
            removed_translations: outcome.removed_translations,
            cutoff_days: args.before,
            is_apply: true,
        }
    } else {
        let snapshot = gateway.store().snapshot();
        let candidates = snapshot
            .keys
            .iter()
            .filter(|k| matches!(k.unused_since, Some(since) if since < cutoff))
            .cloned()
            .collect::<Vec<_>>();
        let removed_translations = snapshot
            .translations
            .iter()
            .filter(|t| candidates.iter().any(|k| k.id == t.key_id))
            .count();
        PurgeSummary {
            candidates,
            removed_translations,
            cutoff_days: args.before,
            is_apply: false,
        }
    };

    Ok(CommandResult {
        summary: CommandSummary::Purge(summary),
        warning_count: 0,
        exit_on_warnings: false,
    })
}

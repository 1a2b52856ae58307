//! Terminal rendering for command results.

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::commands::{
    CommandResult, CommandSummary, InitSummary, PurgeSummary, StatusSummary, SyncSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::KeyView;

const MAX_CELL_WIDTH: usize = 40;

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Sync(summary) => print_sync(summary, verbose),
        CommandSummary::Status(summary) => print_status(summary),
        CommandSummary::Purge(summary) => print_purge(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_sync(summary: &SyncSummary, verbose: bool) {
    println!(
        "Scanned {} source file{}",
        summary.files_scanned,
        plural(summary.files_scanned)
    );
    println!(
        "  {} created, {} revived, {} marked unused, {} unchanged ({} key{} total)",
        count_colored(summary.created, "green"),
        count_colored(summary.revived, "cyan"),
        count_colored(summary.marked_unused, "yellow"),
        summary.unchanged,
        summary.total_keys,
        plural(summary.total_keys)
    );
    if summary.skipped_matches > 0 {
        println!(
            "  {} dynamic invocation{} could not be extracted",
            summary.skipped_matches,
            plural(summary.skipped_matches)
        );
    }

    if !summary.diagnostics.is_empty() {
        if verbose {
            for diagnostic in &summary.diagnostics {
                eprintln!(
                    "{} {} - {}",
                    "warning:".bold().yellow(),
                    diagnostic.file,
                    diagnostic.message
                );
            }
        } else {
            eprintln!(
                "{} {} file(s) skipped (use -v for details)",
                "warning:".bold().yellow(),
                summary.diagnostics.len()
            );
        }
    }
}

fn print_status(summary: &StatusSummary) {
    let keys = &summary.view.keys;
    if keys.is_empty() {
        if summary.unused_only {
            println!("No unused keys.");
        } else {
            println!("Catalog is empty. Run `lingot sync` to scan your sources.");
        }
        return;
    }

    let mut header: Vec<String> = vec![
        format!("KEY [{}]", keys.len()),
        "CONTEXT".to_string(),
        "STATE".to_string(),
    ];
    header.extend(summary.langs_shown.iter().cloned());

    let rows: Vec<Vec<String>> = keys.iter().map(|key| status_row(key, summary)).collect();

    // Column widths from header and content, capped per cell
    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    print_row(&header, &widths, |s| s.bold().to_string());
    for (key, row) in keys.iter().zip(&rows) {
        if key.unused_since.is_some() {
            print_row(row, &widths, |s| s.dimmed().to_string());
        } else {
            print_row(row, &widths, |s| s.to_string());
        }
    }
}

fn status_row(key: &KeyView, summary: &StatusSummary) -> Vec<String> {
    let state = match key.unused_since {
        Some(since) => format!("unused since {}", since.format("%Y-%m-%d")),
        None => "active".to_string(),
    };

    let mut row = vec![
        truncate(&key.text),
        truncate(key.context.as_deref().unwrap_or("-")),
        state,
    ];
    for lang in &summary.langs_shown {
        let cell = key
            .translations
            .iter()
            .find(|t| &t.lang == lang && !t.is_deleted)
            .map(|t| truncate(&t.text))
            .unwrap_or_else(|| "-".to_string());
        row.push(cell);
    }
    row
}

fn print_purge(summary: &PurgeSummary) {
    if summary.candidates.is_empty() {
        println!(
            "No keys unused for more than {} day{}.",
            summary.cutoff_days,
            plural(summary.cutoff_days as usize)
        );
        return;
    }

    if summary.is_apply {
        println!(
            "Deleted {} key{} and {} translation{}.",
            summary.candidates.len(),
            plural(summary.candidates.len()),
            summary.removed_translations,
            plural(summary.removed_translations)
        );
    } else {
        println!(
            "{} key{} unused for more than {} days ({} translation{} attached):",
            summary.candidates.len(),
            plural(summary.candidates.len()),
            summary.cutoff_days,
            summary.removed_translations,
            plural(summary.removed_translations)
        );
    }

    for key in &summary.candidates {
        let context = key
            .context
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        let since = key
            .unused_since
            .map(|s| s.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("  \"{}\"{} - unused since {}", truncate(&key.text), context, since);
    }

    if !summary.is_apply {
        println!("\nDry run. Re-run with {} to delete them.", "--apply".bold());
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!("Created {}", CONFIG_FILE_NAME.bold());
    }
}

// ============================================================
// Table helpers
// ============================================================

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to the max cell width, accounting for wide characters.
fn truncate(s: &str) -> String {
    if display_width(s) <= MAX_CELL_WIDTH {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > MAX_CELL_WIDTH - 1 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn print_row(cells: &[String], widths: &[usize], style: impl Fn(&str) -> String) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let pad = widths[i].saturating_sub(display_width(cell));
        line.push_str(&style(cell));
        line.push_str(&" ".repeat(pad));
        if i + 1 < cells.len() {
            line.push_str("  ");
        }
    }
    println!("{}", line.trim_end());
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn count_colored(n: usize, color: &str) -> String {
    if n == 0 {
        return n.to_string();
    }
    match color {
        "green" => n.to_string().green().to_string(),
        "cyan" => n.to_string().cyan().to_string(),
        "yellow" => n.to_string().yellow().to_string(),
        _ => n.to_string(),
    }
}

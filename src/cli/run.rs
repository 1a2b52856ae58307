use std::{fs, path::Path};

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, CommandSummary, InitSummary},
    commands::{purge::purge, status::status, sync::sync},
};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Purge(cmd)) => purge(cmd),
        Some(Command::Init) => {
            init()?;
            Ok(CommandResult {
                summary: CommandSummary::Init(InitSummary { created: true }),
                warning_count: 0,
                exit_on_warnings: false,
            })
        }
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}

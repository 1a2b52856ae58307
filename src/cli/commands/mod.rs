pub mod command_result;
pub mod helper;
pub mod purge;
pub mod status;
pub mod sync;

pub use command_result::{
    CommandResult, CommandSummary, InitSummary, PurgeSummary, StatusSummary, SyncSummary,
};

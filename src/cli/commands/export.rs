use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportTarget};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        unmatched,
        force,
    } = cmd
    {
        let target = if *unmatched {
            ExportTarget::Unmatched
        } else {
            ExportTarget::Attendance
        };

        let mut pool = open_pool(cfg)?;
        ExportLogic::export(&mut pool, *format, file, range, target, *force)?;
    }
    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{error, success};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            ConfigLogic::check(cfg);
        }

        if *edit_config {
            let path_str = path.to_string_lossy().to_string();
            match ConfigLogic::edit(&path_str, editor) {
                Ok(()) => success(format!("Configuration file edited: {}", path_str)),
                Err(e) => error(format!("Failed to edit configuration file: {}", e)),
            }
        }
    }

    Ok(())
}

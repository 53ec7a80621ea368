//! Config command handler

use pinpoint::EngineConfig;

use crate::commands::ConfigArgs;
use crate::config::CliConfig;
use crate::error::CliResult;

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<String> {
    let engine = if args.defaults {
        EngineConfig::default()
    } else {
        config.engine.clone()
    };
    Ok(engine.to_yaml()?)
}

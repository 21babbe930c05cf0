use crate::cli_args::ConfigArgs;
use aggrecat_core::AggregatorConfig;
use anyhow::Result;

pub fn handle_config_command(_args: &ConfigArgs) -> Result<()> {
    let config = AggregatorConfig::default();
    print!("{}", config.to_toml_string()?);
    Ok(())
}

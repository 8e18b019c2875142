use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::str::FromStr;

/// Overrides the log level, e.g. `GL_HANDLES_LOG=trace`
const LEVEL_VAR: &str = "GL_HANDLES_LOG";

fn level_from_env() -> LevelFilter {
    std::env::var(LEVEL_VAR)
        .ok()
        .and_then(|level| LevelFilter::from_str(&level).ok())
        .unwrap_or(LevelFilter::Info)
}

pub fn init_logger() -> anyhow::Result<()> {
    let config = ConfigBuilder::new()
        // .set_target_level(LevelFilter::Trace)
        .build();

    TermLogger::init(
        level_from_env(),
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    Ok(())
}

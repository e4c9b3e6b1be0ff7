use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Sets up `env_logger` as the global logger, writing to `target`.
///
/// `RUST_LOG` is read first; the `--verbose` level decides the global filter
pub fn config_logger(verbose_level: u8, target: Target) -> Result<()> {
    let level = level_for(verbose_level)?;

    Builder::from_default_env()
        .target(target)
        .format_indent(Some(4))
        .format_module_path(false)
        .format_timestamp_millis()
        .filter(None, level)
        .try_init()
        .with_context(|| "create-pika-app wasn't able to set up the logger")
}

/// `info` by default, `debug` with a single `--verbose`
fn level_for(verbose_level: u8) -> Result<LevelFilter> {
    match verbose_level {
        0 => Ok(LevelFilter::Info),
        1 => Ok(LevelFilter::Debug),
        _ => Err(eyre!(
            "create-pika-app maximum allowed verbosity level is: '--verbose'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() -> Result<()> {
        assert_eq!(level_for(0)?, LevelFilter::Info);
        assert_eq!(level_for(1)?, LevelFilter::Debug);
        assert!(level_for(2).is_err());
        Ok(())
    }

    #[test]
    fn test_rejects_more_than_one_verbosity_level() {
        assert!(config_logger(2, Target::Stderr).is_err());
    }
}

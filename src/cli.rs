//! Command-line arguments and config assembly for the terminal runner.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::SessionConfig;

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// JSON session config to load before env overrides.
    pub config: Option<PathBuf>,
    /// Seed override (wins over file and env).
    pub seed: Option<u32>,
    pub help: bool,
}

pub const USAGE: &str = "usage: drift-tetris [--config <file.json>] [--seed <n>]

keys: arrows/WASD/HJKL move, up/W/K rotate, space hard drop, R restart, Q quit
env:  TETRIS_SEED, TETRIS_GRAVITY_MS, TETRIS_DRIFT_MS, TETRIS_BOARD_WIDTH,
      TETRIS_BOARD_HEIGHT, TETRIS_LOG_PATH, TETRIS_LOG_LEVEL";

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                out.seed = Some(seed);
            }
            "--help" | "-h" => out.help = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(out)
}

/// Layer defaults, the config file, `lookup` overrides, then CLI flags, and validate.
pub fn build_config(args: &CliArgs, lookup: impl Fn(&str) -> Option<String>) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    config.apply_overrides(lookup);
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("invalid session config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_config_and_seed() {
        let cli = parse_args(&args(&["--config", "game.json", "--seed", "42"])).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("game.json")));
        assert_eq!(cli.seed, Some(42));
        assert!(!cli.help);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "-3"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn cli_seed_wins_over_env() {
        let cli = CliArgs {
            seed: Some(9),
            ..CliArgs::default()
        };
        let config = build_config(&cli, |key| match key {
            "TETRIS_SEED" => Some("5".to_string()),
            "TETRIS_GRAVITY_MS" => Some("500".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.gravity_interval_ms, 500);
    }

    #[test]
    fn invalid_override_is_reported() {
        let err = build_config(&CliArgs::default(), |key| match key {
            "TETRIS_DRIFT_MS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("drift"));
    }
}

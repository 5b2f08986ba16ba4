//! CLI argument parsing using clap

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Disk usage with persisted per-directory size caches
#[derive(Parser, Debug)]
#[command(name = "cachedu")]
#[command(version)]
#[command(about = "Summarize disk usage, reusing per-directory size caches", long_about = None)]
pub struct Cli {
    /// Paths to measure
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Ignore existing cache records and recompute everything
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Print a trace line for every directory visited
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Keep per-directory records down to this depth; deeper subtrees are
    /// cached as a whole
    #[arg(short = 'l', long = "level", value_name = "N", default_value = "0")]
    pub level: usize,

    /// Walk the tree without reading or writing cache records
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Remove all cache records under each path before measuring
    #[arg(long = "clear-cache")]
    pub clear_cache: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments into a Config
    pub fn into_config(self) -> Result<Config> {
        let output_format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Console
        };

        let config = Config {
            paths: self.paths,
            force_renew: self.force,
            cache_level: self.level,
            verbose: self.verbose,
            use_cache: !self.no_cache,
            clear_cache: self.clear_cache,
            output_format,
        };
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["cachedu"]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.paths, vec![PathBuf::from(".")]);
        assert_eq!(config.cache_level, 0);
        assert!(!config.force_renew);
        assert!(!config.verbose);
        assert!(config.use_cache);
        assert!(!config.clear_cache);
        assert_eq!(config.output_format, OutputFormat::Console);
    }

    #[test]
    fn test_cli_json_output() {
        let cli = Cli::parse_from(["cachedu", "--json", "data"]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.paths, vec![PathBuf::from("data")]);
    }

    #[test]
    fn test_cli_all_options() {
        let cli = Cli::parse_from([
            "cachedu",
            "-f",
            "-v",
            "-l",
            "2",
            "--clear-cache",
            "one",
            "two",
        ]);
        let config = cli.into_config().unwrap();

        assert!(config.force_renew);
        assert!(config.verbose);
        assert_eq!(config.cache_level, 2);
        assert!(config.clear_cache);
        assert_eq!(config.paths, vec![PathBuf::from("one"), PathBuf::from("two")]);
    }

    #[test]
    fn test_cli_no_cache() {
        let cli = Cli::parse_from(["cachedu", "--no-cache", "/tmp"]);
        let config = cli.into_config().unwrap();

        assert!(!config.use_cache);
    }

    #[test]
    fn test_cli_rejects_bad_level() {
        assert!(Cli::try_parse_from(["cachedu", "-l", "deep"]).is_err());
        assert!(Cli::try_parse_from(["cachedu", "-l", "-1"]).is_err());
    }
}

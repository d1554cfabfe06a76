//! Command-line argument parsing for Schema Pilot.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output of the final screen.
    #[default]
    Text,
    /// JSON output with screen, state, and metadata.
    Json,
    /// Frame-by-frame output showing state after each event.
    Frames,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "frames" => Ok(Self::Frames),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: text, json, or frames"
            )),
        }
    }
}

/// Chat with an AI database architect and get a schema, ER diagram and
/// starter queries.
#[derive(Parser, Debug)]
#[command(name = "schema-pilot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Generation latency in milliseconds (overrides config and environment)
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    // === Headless mode options ===
    /// Run in headless mode (no terminal UI, for testing/automation)
    #[arg(long)]
    pub headless: bool,

    /// Comma-separated events to execute in headless mode (e.g., "type:hello,key:enter")
    #[arg(long, value_name = "EVENTS")]
    pub events: Option<String>,

    /// Path to script file with events (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Screen size for headless mode (WIDTHxHEIGHT, e.g., "120x40")
    #[arg(long, value_name = "SIZE", default_value = "120x40")]
    pub size: String,

    /// Output format for headless mode
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Write output to file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Stop on first assertion failure
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies flags that override configuration values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(latency_ms) = self.latency_ms {
            config.generation.latency_ms = latency_ms;
        }
    }

    /// Returns true if headless mode is enabled.
    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Parses the screen size from the --size argument.
    /// Returns (width, height) or an error.
    pub fn parse_screen_size(&self) -> std::result::Result<(u16, u16), String> {
        let (width, height) = self.size.split_once('x').ok_or_else(|| {
            format!(
                "Invalid size format: '{}'. Expected WIDTHxHEIGHT (e.g., 120x40)",
                self.size
            )
        })?;
        let width = width
            .parse::<u16>()
            .map_err(|_| format!("Invalid width: '{width}'"))?;
        let height = height
            .parse::<u16>()
            .map_err(|_| format!("Invalid height: '{height}'"))?;
        Ok((width, height))
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }

    /// Validates headless mode arguments.
    /// Returns an error message if validation fails.
    pub fn validate_headless(&self) -> std::result::Result<(), String> {
        if !self.headless {
            return Ok(());
        }

        // Headless mode requires either --events or --script
        if self.events.is_none() && self.script.is_none() {
            return Err("--headless requires --events or --script".to_string());
        }

        self.parse_screen_size()?;
        self.parse_output_format()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn test_defaults() {
        let cli = parse_args(&["schema-pilot"]);
        assert!(!cli.headless);
        assert!(cli.latency_ms.is_none());
        assert_eq!(cli.parse_screen_size().unwrap(), (120, 40));
        assert_eq!(cli.parse_output_format().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_parse_config_path() {
        let cli = parse_args(&["schema-pilot", "--config", "/path/to/config.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
        assert_eq!(cli.config_path(), PathBuf::from("/path/to/config.toml"));
    }

    #[test]
    fn test_latency_flag_overrides_config() {
        let cli = parse_args(&["schema-pilot", "--latency-ms", "20"]);
        let mut config = Config::default();
        config.generation.latency_ms = 900;

        cli.apply_overrides(&mut config);
        assert_eq!(config.generation.latency_ms, 20);
    }

    #[test]
    fn test_no_latency_flag_keeps_config() {
        let cli = parse_args(&["schema-pilot"]);
        let mut config = Config::default();
        config.generation.latency_ms = 900;

        cli.apply_overrides(&mut config);
        assert_eq!(config.generation.latency_ms, 900);
    }

    // === Headless mode tests ===

    #[test]
    fn test_parse_headless_flag() {
        let cli = parse_args(&["schema-pilot", "--headless", "--events", "key:esc"]);
        assert!(cli.is_headless());
        assert_eq!(cli.events, Some("key:esc".to_string()));
    }

    #[test]
    fn test_parse_headless_with_script() {
        let cli = parse_args(&["schema-pilot", "--headless", "--script", "test.txt"]);
        assert!(cli.headless);
        assert_eq!(cli.script, Some("test.txt".to_string()));
    }

    #[test]
    fn test_parse_screen_size() {
        let cli = parse_args(&["schema-pilot", "--size", "80x24"]);
        assert_eq!(cli.parse_screen_size().unwrap(), (80, 24));
    }

    #[test]
    fn test_parse_screen_size_invalid() {
        let cli = parse_args(&["schema-pilot", "--size", "invalid"]);
        assert!(cli.parse_screen_size().is_err());

        let cli = parse_args(&["schema-pilot", "--size", "80xabc"]);
        assert!(cli.parse_screen_size().is_err());
    }

    #[test]
    fn test_parse_output_format() {
        let cli = parse_args(&["schema-pilot", "--output", "json"]);
        assert_eq!(cli.parse_output_format().unwrap(), OutputFormat::Json);

        let cli = parse_args(&["schema-pilot", "--output", "FRAMES"]);
        assert_eq!(cli.parse_output_format().unwrap(), OutputFormat::Frames);

        let cli = parse_args(&["schema-pilot", "--output", "xml"]);
        assert!(cli.parse_output_format().is_err());
    }

    #[test]
    fn test_validate_headless_requires_events_or_script() {
        let cli = parse_args(&["schema-pilot", "--headless"]);
        let result = cli.validate_headless();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("requires --events or --script"));
    }

    #[test]
    fn test_validate_headless_with_events() {
        let cli = parse_args(&["schema-pilot", "--headless", "--events", "key:esc"]);
        assert!(cli.validate_headless().is_ok());
    }

    #[test]
    fn test_validate_not_headless() {
        let cli = parse_args(&["schema-pilot", "--size", "bogus"]);
        assert!(cli.validate_headless().is_ok());
    }

    #[test]
    fn test_headless_output_file_and_fail_fast() {
        let cli = parse_args(&[
            "schema-pilot",
            "--headless",
            "--events",
            "key:esc",
            "--output-file",
            "result.json",
            "--fail-fast",
        ]);
        assert_eq!(cli.output_file, Some(PathBuf::from("result.json")));
        assert!(cli.fail_fast);
    }
}

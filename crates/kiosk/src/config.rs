//! Kiosk configuration loaded from environment variables.

/// How replies are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,

    /// One JSON snapshot per reply, for a front end driving the kiosk.
    Json,
}

impl OutputFormat {
    /// Parses `text` or `json`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Kiosk configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `SHOP_NAME`: name used in the greeting (default: `"Pizzaria Super Delícias"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `KIOSK_OUTPUT`: `text` or `json` (default: `text`)
#[derive(Debug, Clone)]
pub struct Config {
    pub shop_name: String,
    pub log_level: String,
    pub output: OutputFormat,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            shop_name: std::env::var("SHOP_NAME").unwrap_or(defaults.shop_name),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            output: std::env::var("KIOSK_OUTPUT")
                .ok()
                .and_then(|v| OutputFormat::parse(&v))
                .unwrap_or(defaults.output),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shop_name: "Pizzaria Super Delícias".to_string(),
            log_level: "info".to_string(),
            output: OutputFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.shop_name, "Pizzaria Super Delícias");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse(" TEXT "), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }
}

use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Pause taken before producing each element of the 1..=9 sequence.
pub const DEFAULT_ELEMENT_DELAY_MS: u64 = 500;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Milliseconds to pause before producing each element of the sequence
    #[arg(long, env, default_value_t = DEFAULT_ELEMENT_DELAY_MS)]
    pub element_delay_ms: u64,

    /// Seconds between keep-alive comments on an idle event stream
    #[arg(long, env, default_value_t = 15)]
    pub sse_keep_alive_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    /// Defaults plus whatever the environment sets, without reading the
    /// process command line.
    fn default() -> Self {
        Config::parse_from([env!("CARGO_PKG_NAME")])
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn set_element_delay_ms(mut self, element_delay_ms: u64) -> Self {
        self.element_delay_ms = element_delay_ms;
        self
    }

    pub fn element_delay(&self) -> Duration {
        Duration::from_millis(self.element_delay_ms)
    }

    pub fn sse_keep_alive(&self) -> Duration {
        Duration::from_secs(self.sse_keep_alive_secs)
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_env_parses_case_insensitively() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("Development".parse::<RustEnv>(), Ok(RustEnv::Development));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }

    #[test]
    fn test_rust_env_display_round_trips_through_from_str() {
        for env in [RustEnv::Development, RustEnv::Production, RustEnv::Staging] {
            assert_eq!(env.to_string().parse::<RustEnv>(), Ok(env));
        }
    }

    #[test]
    fn test_command_line_flags_override_defaults() {
        let config = Config::parse_from([
            "onenine",
            "--port",
            "4747",
            "--element-delay-ms",
            "20",
            "--log-level-filter",
            "DEBUG",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);

        assert_eq!(config.port, 4747);
        assert_eq!(config.element_delay(), Duration::from_millis(20));
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_set_element_delay_ms_replaces_delay() {
        let config = Config::parse_from(["onenine", "--element-delay-ms", "500"])
            .set_element_delay_ms(5);
        assert_eq!(config.element_delay(), Duration::from_millis(5));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let result = Config::try_parse_from(["onenine", "--log-level-filter", "LOUD"]);
        assert!(result.is_err());
    }
}

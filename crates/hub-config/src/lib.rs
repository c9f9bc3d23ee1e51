use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_env(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        };
        write!(f, "{}", value)
    }
}

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1_000;
pub const DEFAULT_NOTICE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    pub service_name: String,
    pub environment: Environment,
    pub log_level: String,
    pub metrics_addr: Option<String>,
    pub simulation_enabled: bool,
    pub tick_interval_ms: u64,
    pub submit_delay_ms: u64,
    pub notice_timeout_ms: u64,
    pub export_dir: PathBuf,
    pub sim_seed: Option<u64>,
}

impl HubConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        Self::from_lookup(default_service_name, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(default_service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Lookup(lookup);
        Self {
            service_name: vars.string("HUB_SERVICE_NAME", default_service_name),
            environment: Environment::from_env(&vars.string("HUB_ENV", "local")),
            log_level: vars.string("HUB_LOG_LEVEL", "info"),
            metrics_addr: vars.optional("HUB_METRICS_ADDR"),
            simulation_enabled: vars.bool("HUB_SIMULATION", true),
            tick_interval_ms: vars
                .u64("HUB_TICK_INTERVAL_MS", DEFAULT_TICK_INTERVAL_MS)
                .max(1),
            submit_delay_ms: vars.u64("HUB_SUBMIT_DELAY_MS", DEFAULT_SUBMIT_DELAY_MS),
            notice_timeout_ms: vars.u64("HUB_NOTICE_TIMEOUT_MS", DEFAULT_NOTICE_TIMEOUT_MS),
            export_dir: PathBuf::from(vars.string("HUB_EXPORT_DIR", ".")),
            sim_seed: vars
                .optional("HUB_SIM_SEED")
                .and_then(|value| value.parse::<u64>().ok()),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn notice_timeout(&self) -> Duration {
        Duration::from_millis(self.notice_timeout_ms)
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn u64(&self, key: &str, default: u64) -> u64 {
        self.optional(key)
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(default)
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        self.optional(key)
            .map(|value| match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => default,
            })
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> HubConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        HubConfig::from_lookup("hub-runtime", |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_reference_session() {
        let config = config_from(&[]);
        assert_eq!(config.service_name, "hub-runtime");
        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.tick_interval(), Duration::from_secs(5));
        assert_eq!(config.submit_delay(), Duration::from_secs(1));
        assert_eq!(config.notice_timeout(), Duration::from_secs(5));
        assert!(config.simulation_enabled);
        assert!(config.metrics_addr.is_none());
        assert!(config.sim_seed.is_none());
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("HUB_TICK_INTERVAL_MS", "soon"),
            ("HUB_SIMULATION", "maybe"),
            ("HUB_SIM_SEED", "-4"),
            ("HUB_ENV", "mars"),
        ]);
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert!(config.simulation_enabled);
        assert!(config.sim_seed.is_none());
        assert_eq!(config.environment, Environment::Local);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("HUB_ENV", "production"),
            ("HUB_TICK_INTERVAL_MS", "250"),
            ("HUB_SIMULATION", "off"),
            ("HUB_SIM_SEED", "7"),
            ("HUB_EXPORT_DIR", "/tmp/exports"),
            ("HUB_METRICS_ADDR", " 127.0.0.1:9000 "),
        ]);
        assert_eq!(config.environment, Environment::Prod);
        assert_eq!(config.tick_interval_ms, 250);
        assert!(!config.simulation_enabled);
        assert_eq!(config.sim_seed, Some(7));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.metrics_addr.as_deref(), Some("127.0.0.1:9000"));
    }

    #[test]
    fn zero_tick_interval_is_clamped() {
        let config = config_from(&[("HUB_TICK_INTERVAL_MS", "0")]);
        assert_eq!(config.tick_interval_ms, 1);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DirectoryConfig {
    pub db_path: String,
    pub log_level: String,
    /// Delay applied before each operation takes effect, mimicking the
    /// network round trip the presentation layer would otherwise see.
    /// Zero disables the delay entirely.
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    500
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            db_path: "./data/directory".to_string(),
            log_level: "info".to_string(),
            simulated_latency_ms: default_latency_ms(),
        }
    }
}

impl DirectoryConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => {
                        tracing::info!("Config loaded from {}", path);
                        c
                    }
                    Err(e) => {
                        tracing::warn!("Error parsing config: {}. Using defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::warn!("Error reading config: {}. Using defaults.", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }

    /// Config for tests and embedded use: no delay, in-memory-friendly.
    pub fn immediate() -> Self {
        Self {
            simulated_latency_ms: 0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_src = r#"
            db_path = "/tmp/dir"
            log_level = "debug"
            simulated_latency_ms = 25
        "#;
        let config: DirectoryConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.db_path, "/tmp/dir");
        assert_eq!(config.simulated_latency_ms, 25);
    }

    #[test]
    fn test_latency_defaults_when_omitted() {
        let toml_src = r#"
            db_path = "/tmp/dir"
            log_level = "info"
        "#;
        let config: DirectoryConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.simulated_latency_ms, 500);
    }
}

//! Relay server configuration

use serde::{Deserialize, Serialize};

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Server bind address
    pub bind_addr: String,
    /// Maximum concurrent rooms
    pub max_rooms: usize,
    /// Rate limit (requests per second per IP)
    pub rate_limit: u32,
    /// Idle timeout in seconds for a `Ready` room with no forwarded traffic
    pub room_idle_timeout_secs: u64,
    /// How long an ephemeral room waits for a second joiner before expiring
    #[serde(default = "default_ephemeral_join_timeout_secs")]
    pub ephemeral_join_timeout_secs: u64,
    /// Maximum size of a single WebSocket frame, in bytes
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

fn default_ephemeral_join_timeout_secs() -> u64 {
    300
}

fn default_max_message_bytes() -> usize {
    32 * 1024 * 1024
}

impl RelayConfig {
    /// Minimum room idle timeout (prevents accidental zero = never-expire)
    const MIN_ROOM_IDLE_TIMEOUT: u64 = 10;

    /// Validate and clamp configuration values
    pub fn validate(&mut self) {
        if self.room_idle_timeout_secs < Self::MIN_ROOM_IDLE_TIMEOUT {
            self.room_idle_timeout_secs = Self::MIN_ROOM_IDLE_TIMEOUT;
        }
        if self.ephemeral_join_timeout_secs < Self::MIN_ROOM_IDLE_TIMEOUT {
            self.ephemeral_join_timeout_secs = Self::MIN_ROOM_IDLE_TIMEOUT;
        }
        if self.max_rooms == 0 {
            self.max_rooms = 1;
        }
    }

    /// Load configuration from a TOML file, falling back to defaults for
    /// any field the file omits
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:4433".to_string(),
            max_rooms: 5000,
            rate_limit: 100,
            room_idle_timeout_secs: 120,
            ephemeral_join_timeout_secs: default_ephemeral_join_timeout_secs(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_after_validate() {
        let mut cfg = RelayConfig::default();
        cfg.validate();
        assert_eq!(cfg.bind_addr, "0.0.0.0:4433");
        assert!(cfg.room_idle_timeout_secs >= RelayConfig::MIN_ROOM_IDLE_TIMEOUT);
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let mut cfg = RelayConfig::default();
        cfg.room_idle_timeout_secs = 0;
        cfg.ephemeral_join_timeout_secs = 0;
        cfg.validate();
        assert_eq!(cfg.room_idle_timeout_secs, RelayConfig::MIN_ROOM_IDLE_TIMEOUT);
        assert_eq!(cfg.ephemeral_join_timeout_secs, RelayConfig::MIN_ROOM_IDLE_TIMEOUT);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: RelayConfig = RelayConfig::from_toml_str(
            r#"
            bind_addr = "127.0.0.1:9000"
            max_rooms = 10
            rate_limit = 50
            room_idle_timeout_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.ephemeral_join_timeout_secs, default_ephemeral_join_timeout_secs());
    }
}

use std::{env, time::Duration};

// Runtime/server constants (not gameplay tuning).

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_LOBBY_API_BASE_URL: &str = "https://api.argedik.com";
const DEFAULT_TERMS_SERVICE_URL: &str = "http://127.0.0.1:3002";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 1500;

pub const COMMAND_CHANNEL_CAPACITY: usize = 64;
// Finished games linger briefly; untouched ones are dropped after half an hour.
pub const COMPLETED_GAME_GRACE: Duration = Duration::from_secs(300);
pub const IDLE_GAME_TIMEOUT: Duration = Duration::from_secs(1800);

#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub http_port: u16,
    pub lobby_api_base_url: String,
    pub terms_service_url: String,
    pub upstream_timeout: Duration,
    /// Block clicks while a mismatch announcement is showing.
    pub lock_during_announcement: bool,
}

impl ArenaConfig {
    pub fn from_env() -> Self {
        Self::resolve(|key| env::var(key).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let http_port = lookup("ARENA_SERVER_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let lobby_api_base_url = lookup("LOBBY_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOBBY_API_BASE_URL.to_string());
        let terms_service_url = lookup("TERMS_SERVICE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TERMS_SERVICE_URL.to_string());
        let millis = lookup("UPSTREAM_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_MS);
        let lock_during_announcement = lookup("LOCK_DURING_ANNOUNCEMENT")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            http_port,
            lobby_api_base_url,
            terms_service_url,
            upstream_timeout: Duration::from_millis(millis),
            lock_during_announcement,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve_with(pairs: &[(&str, &str)]) -> ArenaConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ArenaConfig::resolve(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = resolve_with(&[]);
        assert_eq!(config.http_port, 3001);
        assert_eq!(config.lobby_api_base_url, "https://api.argedik.com");
        assert_eq!(config.terms_service_url, "http://127.0.0.1:3002");
        assert_eq!(config.upstream_timeout, Duration::from_millis(1500));
        assert!(config.lock_during_announcement);
    }

    #[test]
    fn announcement_lock_can_be_turned_off() {
        assert!(!resolve_with(&[("LOCK_DURING_ANNOUNCEMENT", "false")]).lock_during_announcement);
        assert!(!resolve_with(&[("LOCK_DURING_ANNOUNCEMENT", " 0 ")]).lock_during_announcement);
        assert!(resolve_with(&[("LOCK_DURING_ANNOUNCEMENT", "maybe")]).lock_during_announcement);
    }

    #[test]
    fn env_overrides_and_bad_values_fall_back() {
        let config = resolve_with(&[
            ("ARENA_SERVER_PORT", "4100"),
            ("LOBBY_API_BASE_URL", "http://lobby.local"),
            ("TERMS_SERVICE_URL", "  "),
            ("UPSTREAM_TIMEOUT_MS", "soon"),
        ]);
        assert_eq!(config.http_port, 4100);
        assert_eq!(config.lobby_api_base_url, "http://lobby.local");
        assert_eq!(config.terms_service_url, "http://127.0.0.1:3002");
        assert_eq!(config.upstream_timeout, Duration::from_millis(1500));
    }
}

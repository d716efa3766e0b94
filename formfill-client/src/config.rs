use std::time::Duration;

use crate::ClientError;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_AUTOSAVE_SECS: u64 = 30;
const DEFAULT_INDICATOR_CLEAR_MS: u64 = 3000;
const DEFAULT_USER_AGENT: &str = "formfill-client";

/// Connection and timing settings for the form service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub autosave_interval: Duration,
    /// How long "Saved" stays visible before the indicator clears.
    pub indicator_clear_delay: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_SECS),
            indicator_clear_delay: Duration::from_millis(DEFAULT_INDICATOR_CLEAR_MS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Read overrides from `FORMFILL_*` environment variables.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ClientError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(base_url) = var("FORMFILL_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(raw) = var("FORMFILL_AUTOSAVE_SECS") {
            config.autosave_interval = parse_autosave_secs(&raw)?;
        }
        if let Some(raw) = var("FORMFILL_INDICATOR_CLEAR_MS") {
            let millis = raw.parse::<u64>().map_err(|_| {
                ClientError::Configuration(
                    "FORMFILL_INDICATOR_CLEAR_MS must be an unsigned integer.".to_owned(),
                )
            })?;
            config.indicator_clear_delay = Duration::from_millis(millis);
        }
        if let Some(user_agent) = var("FORMFILL_USER_AGENT") {
            config.user_agent = user_agent;
        }
        Ok(config)
    }

    /// Full URL for a service path such as `/forms/response/7/save`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_autosave_secs(value: &str) -> Result<Duration, ClientError> {
    let seconds = value.parse::<u64>().map_err(|_| {
        ClientError::Configuration("FORMFILL_AUTOSAVE_SECS must be an unsigned integer.".to_owned())
    })?;
    if seconds == 0 {
        return Err(ClientError::Configuration(
            "FORMFILL_AUTOSAVE_SECS must be greater than zero.".to_owned(),
        ));
    }

    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.autosave_interval, Duration::from_secs(30));
        assert_eq!(config.indicator_clear_delay, Duration::from_secs(3));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FORMFILL_BASE_URL", "https://forms.example.org/"),
            ("FORMFILL_AUTOSAVE_SECS", "10"),
            ("FORMFILL_INDICATOR_CLEAR_MS", "500"),
            ("FORMFILL_USER_AGENT", " kiosk "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://forms.example.org");
        assert_eq!(config.autosave_interval, Duration::from_secs(10));
        assert_eq!(config.indicator_clear_delay, Duration::from_millis(500));
        assert_eq!(config.user_agent, "kiosk");
        assert_eq!(
            config.url("/forms/response/1/save"),
            "https://forms.example.org/forms/response/1/save"
        );
    }

    #[test]
    fn zero_autosave_interval_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("FORMFILL_AUTOSAVE_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));

        let err =
            ClientConfig::from_lookup(lookup(&[("FORMFILL_AUTOSAVE_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("unsigned integer"));
    }
}

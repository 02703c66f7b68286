use crate::decision::DEFAULT_SELL_THRESHOLD;
use crate::error::{Error, Result};
use bigdecimal::BigDecimal;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_SYMBOL: &str = "DIA";
pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// One hour of history at the default interval.
pub const DEFAULT_HISTORY_CAPACITY: usize = 720;

pub const ENV_API_KEY: &str = "STOCKMEOW_API_KEY";
pub const ENV_SYMBOL: &str = "STOCKMEOW_SYMBOL";

const SETTINGS_FILE: &str = "settings.conf";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub symbol: String,
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub sell_threshold: BigDecimal,
    pub history_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            sell_threshold: BigDecimal::from(DEFAULT_SELL_THRESHOLD),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl Settings {
    /// Defaults, then `settings.conf` from the config dir, then environment.
    pub fn load() -> Self {
        let path = settings_path();
        let mut settings = Self::load_from(&path);
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Defaults overlaid with the file at `path`, if it exists.
    pub fn load_from(path: &Path) -> Self {
        let mut settings = Self::default();
        if !path.exists() {
            return settings;
        }
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                info!(target: "settings", "loading {}", path.display());
                settings.apply_conf(&raw);
            }
            Err(e) => warn!(target: "settings", "failed to read {}: {e}", path.display()),
        }
        settings
    }

    /// Small `key=value` format; bad lines are logged and skipped.
    pub fn apply_conf(&mut self, raw: &str) {
        for (lineno, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((k, v)) = line.split_once('=') else {
                warn!(target: "settings", "line {}: expected key=value", lineno + 1);
                continue;
            };
            if let Err(e) = self.set(k.trim(), v.trim()) {
                warn!(target: "settings", "line {}: {e}; keeping previous value", lineno + 1);
            }
        }
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (env, key) in [(ENV_API_KEY, "api_key"), (ENV_SYMBOL, "symbol")] {
            if let Some(v) = lookup(env) {
                if let Err(e) = self.set(key, v.trim()) {
                    warn!(target: "settings", "{env}: {e}");
                }
            }
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_key" => self.api_key = non_empty(key, value)?.to_string(),
            "symbol" => self.symbol = non_empty(key, value)?.to_ascii_uppercase(),
            "base_url" => {
                let url = non_empty(key, value)?;
                reqwest::Url::parse(url).map_err(|e| invalid(key, e))?;
                self.base_url = url.to_string();
            }
            "poll_interval_secs" => {
                self.poll_interval_secs = parse_num::<u64>(key, value)?.clamp(1, 3600)
            }
            "request_timeout_secs" => {
                self.request_timeout_secs = parse_num::<u64>(key, value)?.clamp(1, 120)
            }
            "history_capacity" => {
                self.history_capacity = parse_num::<usize>(key, value)?.clamp(1, 100_000)
            }
            "sell_threshold" => {
                self.sell_threshold = BigDecimal::from_str(value).map_err(|e| invalid(key, e))?
            }
            _ => return Err(invalid(key, "unknown key")),
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `<base>?function=TIME_SERIES_DAILY&symbol=<SYMBOL>&apikey=<KEY>`
    pub fn request_url(&self) -> Result<reqwest::Url> {
        reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", self.symbol.as_str()),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| invalid("base_url", e))
    }
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        Err(invalid(key, "empty value"))
    } else {
        Ok(value)
    }
}

fn parse_num<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| invalid(key, e))
}

fn invalid(key: &str, detail: impl std::fmt::Display) -> Error {
    Error::Setting {
        key: key.to_string(),
        detail: detail.to_string(),
    }
}

/// Platform config dir, falling back to `./data` when no home is known.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "stockmeow")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

pub fn settings_path() -> PathBuf {
    config_dir().join(SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_constants() {
        let s = Settings::default();
        assert_eq!(s.symbol, "DIA");
        assert_eq!(s.poll_interval(), Duration::from_secs(5));
        assert_eq!(s.sell_threshold, BigDecimal::from(50));
    }

    #[test]
    fn conf_overlays_and_skips_bad_lines() {
        let mut s = Settings::default();
        s.apply_conf(
            "# comment\n\
             symbol = spy\n\
             poll_interval_secs=0\n\
             request_timeout_secs = nope\n\
             sell_threshold=420.5\n\
             garbage line\n\
             colour=blue\n",
        );
        assert_eq!(s.symbol, "SPY");
        assert_eq!(s.poll_interval_secs, 1);
        assert_eq!(s.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(s.sell_threshold, BigDecimal::from_str("420.5").unwrap());
    }

    #[test]
    fn env_overrides_win() {
        let mut s = Settings::default();
        s.apply_conf("api_key=from_file\n");
        s.apply_overrides(|k| match k {
            ENV_API_KEY => Some("from_env".to_string()),
            _ => None,
        });
        assert_eq!(s.api_key, "from_env");
        assert_eq!(s.symbol, DEFAULT_SYMBOL);
    }

    #[test]
    fn request_url_carries_query() {
        let mut s = Settings::default();
        s.api_key = "KEY123".into();
        let url = s.request_url().unwrap();
        assert_eq!(url.host_str(), Some("www.alphavantage.co"));
        assert_eq!(url.path(), "/query");
        assert_eq!(
            url.query(),
            Some("function=TIME_SERIES_DAILY&symbol=DIA&apikey=KEY123")
        );
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let mut s = Settings::default();
        assert!(s.set("base_url", "not a url").is_err());
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let s = Settings::load_from(Path::new("/definitely/not/here/settings.conf"));
        assert_eq!(s, Settings::default());
    }
}

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use giftbook_domain::LabelStyle;
use serde::{de::Deserializer, Deserialize, Serialize};

use crate::ConfigError;

/// Keys accepted by [`Config::set`], in display order.
pub const KEYS: &[&str] = &[
    "locale",
    "currency_unit",
    "backend",
    "data_root",
    "backup_retention",
    "ui_color_enabled",
];

/// Stores user-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    /// Suffix printed after every amount.
    #[serde(default = "Config::default_currency_unit")]
    pub currency_unit: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the records. Defaults to `<app dir>/data`.
    pub data_root: Option<PathBuf>,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency_unit: Self::default_currency_unit(),
            backend: Backend::default(),
            data_root: None,
            backup_retention: Self::default_backup_retention(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency_unit() -> String {
        "KRW".into()
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Korean taxonomy labels for `ko*` locales, English keys otherwise.
    pub fn label_style(&self) -> LabelStyle {
        if self.locale.to_ascii_lowercase().starts_with("ko") {
            LabelStyle::Korean
        } else {
            LabelStyle::English
        }
    }

    pub fn resolve_data_root(&self, app_dir: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => app_dir.join("data"),
        }
    }

    /// Validates `value` and stores it under `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "locale" => {
                if value.is_empty() {
                    return Err(invalid("must not be empty"));
                }
                self.locale = value.to_string();
            }
            "currency_unit" => {
                if value.is_empty() {
                    return Err(invalid("must not be empty"));
                }
                self.currency_unit = value.to_string();
            }
            "backend" => {
                self.backend = value
                    .parse()
                    .map_err(|_| invalid("expected `json` or `sqlite`"))?;
            }
            "data_root" => {
                self.data_root = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            "backup_retention" => {
                let retention: usize = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number"))?;
                if retention == 0 {
                    return Err(invalid("must keep at least one backup"));
                }
                self.backup_retention = retention;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled =
                    parse_flag(value).ok_or_else(|| invalid("expected true or false"))?;
            }
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("unknown key; expected one of {}", KEYS.join(", ")),
                })
            }
        }
        Ok(())
    }

    /// Current values as `(key, value)` pairs in [`KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency_unit", self.currency_unit.clone()),
            ("backend", self.backend.to_string()),
            (
                "data_root",
                self.data_root
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "default".into()),
            ),
            ("backup_retention", self.backup_retention.to_string()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
        ]
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Where the record collection is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for Backend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Backend::Json),
            "sqlite" | "sql" => Ok(Backend::Sqlite),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Backend::Json => "json",
            Backend::Sqlite => "sqlite",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Backend {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_locale_selects_local_labels() {
        let mut config = Config::default();
        assert_eq!(config.label_style(), LabelStyle::English);
        config.set("locale", "ko-KR").unwrap();
        assert_eq!(config.label_style(), LabelStyle::Korean);
    }

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        config.set("backend", "SQLite").unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert!(config.set("backend", "csv").is_err());
        assert!(config.set("backup_retention", "0").is_err());
        config.set("ui_color_enabled", "off").unwrap();
        assert!(!config.ui_color_enabled);
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn unknown_backend_falls_back_to_json() {
        let config: Config = serde_json::from_str(r#"{"backend": "redis"}"#).unwrap();
        assert_eq!(config.backend, Backend::Json);
        assert_eq!(config.currency_unit, "KRW");
    }
}

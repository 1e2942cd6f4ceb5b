//! Run configuration for a tally collection.

use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{FixedOffset, Weekday};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;

/// Maximum history page size accepted by the GitHub GraphQL API.
pub const MAX_PAGE_SIZE: u32 = 100;

fn default_weekdays() -> Vec<String> {
    ["monday", "tuesday", "wednesday", "thursday", "friday"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_utc_offset() -> String {
    "-03:00".to_owned()
}

fn default_excluded_branches() -> Vec<String> {
    vec!["master".to_owned(), "develop".to_owned()]
}

const fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

/// Settings controlling which branches, collaborators, and weekdays get tallied.
///
/// All fields are optional in the configuration file; unspecified fields use
/// the defaults below.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Weekdays to collect, by name ("monday" or "mon", case-insensitive).
    #[serde(default = "default_weekdays")]
    pub weekdays: Vec<String>,

    /// Fixed UTC offset defining the local calendar day, e.g. "-03:00".
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,

    /// Branch names excluded from counting (integration branches).
    #[serde(default = "default_excluded_branches")]
    pub excluded_branches: Vec<String>,

    /// Collaborator logins excluded from counting (bots, maintainers).
    #[serde(default)]
    pub excluded_logins: Vec<String>,

    /// Known email → login translations applied to co-author credit before
    /// the tables are summed. Collaborator profile emails are added on top
    /// of this map at collection time.
    #[serde(default)]
    pub email_logins: HashMap<String, String>,

    /// Number of commits fetched per branch/day/collaborator query.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weekdays: default_weekdays(),
            utc_offset: default_utc_offset(),
            excluded_branches: default_excluded_branches(),
            excluded_logins: Vec::new(),
            email_logins: HashMap::new(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading commit-tally configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                Utf8PathBuf::from("tally.toml"),
                Utf8PathBuf::from("tally.yml"),
                Utf8PathBuf::from("tally.yaml"),
                Utf8PathBuf::from("tally.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading commit-tally configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self).into_app_err("serializing configuration to TOML")?,
            "yml" | "yaml" => serde_yaml::to_string(self).into_app_err("serializing configuration to YAML")?,
            "json" => serde_json::to_string_pretty(self).into_app_err("serializing configuration to JSON")?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))
    }

    /// The configured weekdays, parsed and deduplicated in declaration order.
    pub fn weekdays(&self) -> Result<Vec<Weekday>> {
        let mut parsed = Vec::with_capacity(self.weekdays.len());
        for name in &self.weekdays {
            let weekday: Weekday = name
                .parse()
                .map_err(|_| app_err!("'{name}' is not a weekday name"))?;
            if !parsed.contains(&weekday) {
                parsed.push(weekday);
            }
        }

        if parsed.is_empty() {
            return Err(app_err!("no weekdays configured"));
        }

        Ok(parsed)
    }

    /// The configured UTC offset, parsed.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset
            .parse()
            .map_err(|_| app_err!("'{}' is not a valid UTC offset (expected e.g. \"-03:00\")", self.utc_offset))
    }

    /// Check the configuration for suspicious values, appending a message per finding.
    ///
    /// Findings here don't prevent a run; hard errors surface when the values
    /// are actually used.
    pub fn validate(&self, warnings: &mut Vec<String>) {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            warnings.push(format!(
                "page_size {} is outside the accepted range 1..={MAX_PAGE_SIZE}; queries will fail or miss commits",
                self.page_size
            ));
        }

        let mut seen = Vec::new();
        for name in &self.weekdays {
            // Unparseable names are a hard error in weekdays(), not a warning here.
            if let Ok(weekday) = name.parse::<Weekday>() {
                if seen.contains(&weekday) {
                    warnings.push(format!("weekday '{name}' is listed more than once"));
                } else {
                    seen.push(weekday);
                }
            }
        }

        for email in self.email_logins.keys() {
            if email.chars().any(char::is_uppercase) {
                warnings.push(format!(
                    "email_logins key '{email}' contains uppercase characters; extracted co-author emails are lowercased and will not match it"
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        assert!(warnings.is_empty());

        let weekdays = config.weekdays().unwrap();
        assert_eq!(
            weekdays,
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        );
        assert_eq!(config.utc_offset().unwrap(), FixedOffset::west_opt(3 * 3600).unwrap());
    }

    #[test]
    fn weekday_parsing_accepts_short_names_and_dedups() {
        let config = Config {
            weekdays: vec!["Mon".to_owned(), "monday".to_owned(), "SAT".to_owned()],
            ..Config::default()
        };
        assert_eq!(config.weekdays().unwrap(), vec![Weekday::Mon, Weekday::Sat]);
    }

    #[test]
    fn bad_weekday_is_an_error() {
        let config = Config {
            weekdays: vec!["someday".to_owned()],
            ..Config::default()
        };
        let _ = config.weekdays().unwrap_err();
    }

    #[test]
    fn empty_weekday_list_is_an_error() {
        let config = Config {
            weekdays: Vec::new(),
            ..Config::default()
        };
        let _ = config.weekdays().unwrap_err();
    }

    #[test]
    fn bad_offset_is_an_error() {
        let config = Config {
            utc_offset: "south".to_owned(),
            ..Config::default()
        };
        let _ = config.utc_offset().unwrap_err();
    }

    #[test]
    fn validation_flags_suspicious_values() {
        let mut email_logins = HashMap::new();
        let _ = email_logins.insert("Ada@Example.com".to_owned(), "ada".to_owned());

        let config = Config {
            weekdays: vec!["mon".to_owned(), "monday".to_owned()],
            page_size: 0,
            email_logins,
            ..Config::default()
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn toml_round_trip() {
        let text = r#"
            weekdays = ["mon", "wed"]
            utc_offset = "+02:00"
            excluded_branches = ["main"]
            excluded_logins = ["some-bot"]
            page_size = 50

            [email_logins]
            "ada@example.com" = "ada"
        "#;

        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.weekdays().unwrap(), vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(config.excluded_branches, vec!["main"]);
        assert_eq!(config.excluded_logins, vec!["some-bot"]);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.email_logins.get("ada@example.com").map(String::as_str), Some("ada"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let _ = toml::from_str::<Config>("no_such_field = 1").unwrap_err();
    }
}

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

use crate::{error::Error, weekday};

pub const DEFAULT_PATH: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Page the menu is scraped from.
    pub url: Url,
    /// German weekday names on which a notification is sent.
    pub days_to_show: Vec<String>,
    pub gotify: GotifyConfig,
    #[serde(with = "check_time")]
    pub check_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GotifyConfig {
    pub server_url: Url,
    pub api_key: String,
    pub enabled: bool,
}

impl Config {
    pub fn default_config() -> crate::Result<Self> {
        Ok(Self {
            url: Url::parse("https://www.meinspeiseplan.info/rbzw")?,
            days_to_show: vec!["Montag".to_owned(), "Donnerstag".to_owned()],
            gotify: GotifyConfig {
                server_url: Url::parse("https://your-gotify-server.com")?,
                api_key: "YOUR-API-KEY-HERE".to_owned(),
                enabled: false,
            },
            check_time: NaiveTime::from_hms_opt(6, 0, 0)
                .ok_or_else(|| Error::config_error("default check time is invalid"))?,
        })
    }

    fn validate(self) -> crate::Result<Self> {
        if let Some(day) = self
            .days_to_show
            .iter()
            .find(|day| !weekday::is_weekday_name(day))
        {
            return Err(Error::Config(format!(
                "{day:?} is not one of {}",
                weekday::WEEKDAYS.join(", ")
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn is_notification_day(&self, date: NaiveDate) -> bool {
        let name = weekday::german_weekday(&date);
        self.days_to_show.iter().any(|day| day == name)
    }
}

/// `HH:MM` on disk.
mod check_time {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        // chrono alone would also take "6:00"
        let two_digits = raw.len() == 5
            && raw.as_bytes()[2] == b':'
            && raw.bytes().enumerate().all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !two_digits {
            return Err(D::Error::custom(format!("check_time {raw:?} is not HH:MM")));
        }
        NaiveTime::parse_from_str(&raw, FORMAT)
            .map_err(|e| D::Error::custom(format!("check_time {raw:?} is not HH:MM: {e}")))
    }
}

/// The json file holding the [`Config`]. Only [`ConfigStore::init`] ever writes to it.
#[derive(Debug, Clone)]
pub struct ConfigStore(PathBuf);

impl ConfigStore {
    pub fn new(p: impl AsRef<Path>) -> Self {
        Self(p.as_ref().to_owned())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Loads the config, writing the defaults first if there is no file yet.
    /// A file that exists but can't be read is an error, never replaced.
    pub async fn init(&self) -> crate::Result<Config> {
        if fs::try_exists(&self.0).await? {
            return self.load().await;
        }
        let config = Config::default_config()?;
        let tmp = self.0.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&config)?).await?;
        fs::rename(&tmp, &self.0).await?;
        log::info!("Created default config at {}", self.0.display());
        Ok(config)
    }

    pub async fn load(&self) -> crate::Result<Config> {
        let raw = match fs::read_to_string(&self.0).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::MissingConfig(self.0.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()
    }
}

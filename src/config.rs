use chrono::NaiveTime;
use chrono_tz::Tz;
use std::{fmt::Display, path::PathBuf, str::FromStr};
use teloxide::types::{ChatId, UserId};

use crate::service::countdown::MonthDay;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub locale: String,
    pub timezone: Tz,
    pub log: LogConfig,
    pub reminder: Option<ReminderConfig>,
    pub countdown: CountdownConfig,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub token: String,
    pub proxy: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct ReminderConfig {
    pub chat_id: ChatId,
    pub user_id: UserId,
    /// Shown in the mention; falls back to a localized "you".
    pub user_name: Option<String>,
    /// Local wall-clock time in the configured zone.
    pub time: NaiveTime,
}

#[derive(Clone, Debug, Default)]
pub struct CountdownConfig {
    pub target: Option<MonthDay>,
}

const DEFAULT_LOCALE: &str = "zh-TW";
const DEFAULT_TIMEZONE: &str = "Asia/Taipei";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_REMINDER_TIME: &str = "21:00";

fn required(get: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String, ConfigError> {
    get(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn optional(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    get(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        reason: format!("{} ({})", value, e),
    })
}

/// Builds the config from a key/value source such as the Shuttle secret store.
pub fn build_config(get: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
    info!("Building AppConfig...");

    let telegram = TelegramConfig {
        token: required(&get, "TELEGRAM_BOT_TOKEN")?,
        proxy: optional(&get, "TELEGRAM_PROXY"),
    };

    let timezone = parse::<Tz>(
        "TIMEZONE",
        &optional(&get, "TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
    )?;

    let reminder = match optional(&get, "REMINDER_CHAT_ID") {
        Some(chat_id) => {
            let time = optional(&get, "REMINDER_TIME").unwrap_or_else(|| DEFAULT_REMINDER_TIME.to_string());
            Some(ReminderConfig {
                chat_id: ChatId(parse::<i64>("REMINDER_CHAT_ID", &chat_id)?),
                user_id: UserId(parse::<u64>("REMINDER_USER_ID", &required(&get, "REMINDER_USER_ID")?)?),
                user_name: optional(&get, "REMINDER_USER_NAME"),
                time: NaiveTime::parse_from_str(&time, "%H:%M").map_err(|e| ConfigError::Invalid {
                    key: "REMINDER_TIME",
                    reason: format!("{} ({})", time, e),
                })?,
            })
        }
        None => {
            warn!("REMINDER_CHAT_ID not set, daily reminder disabled");
            None
        }
    };

    let countdown = CountdownConfig {
        target: optional(&get, "COUNTDOWN_DATE")
            .map(|value| parse::<MonthDay>("COUNTDOWN_DATE", &value))
            .transpose()?,
    };

    let config = AppConfig {
        telegram,
        locale: optional(&get, "BOT_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        timezone,
        log: LogConfig {
            dir: PathBuf::from(optional(&get, "LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())),
        },
        reminder,
        countdown,
    };
    info!("AppConfig built");

    Ok(config)
}

#[cfg(test)]
impl AppConfig {
    pub fn new_test_config(log_dir: PathBuf) -> Self {
        Self {
            telegram: TelegramConfig {
                token: "test_token".to_string(),
                proxy: None,
            },
            locale: "en".to_string(),
            timezone: chrono_tz::Asia::Taipei,
            log: LogConfig { dir: log_dir },
            reminder: Some(ReminderConfig {
                chat_id: ChatId(-100),
                user_id: UserId(7),
                user_name: Some("Sam".to_string()),
                time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            }),
            countdown: CountdownConfig {
                target: Some(MonthDay { month: 12, day: 25 }),
            },
        }
    }
}

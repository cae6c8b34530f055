use chrono::{DateTime, TimeZone};
use teloxide::{payloads::SendMessageSetters, prelude::Requester, types::ParseMode, utils::html, Bot};

use crate::{
    config::ReminderConfig,
    service::countdown::{days_until, MonthDay},
    state::AppState,
    storage::WeeklyLogStore,
    utils::time::{format_date, local_now},
};

use super::ServiceError;

fn mention(reminder: &ReminderConfig) -> String {
    let name = reminder
        .user_name
        .clone()
        .unwrap_or_else(|| t!("reminder.default_name").to_string());

    format!("<a href=\"tg://user?id={}\">{}</a>", reminder.user_id.0, html::escape(&name))
}

fn countdown_line(target: Option<MonthDay>, days: Option<i64>) -> Option<String> {
    let (target, days) = (target?, days?);

    let line = if days == 0 {
        t!("reminder.countdown_today", date = target.to_string())
    } else {
        t!("reminder.countdown", days = days, date = target.to_string())
    };

    Some(line.to_string())
}

/// Daily summary for the reminder chat, HTML formatted.
pub async fn compose_reminder<T: TimeZone>(
    store: &WeeklyLogStore,
    reminder: &ReminderConfig,
    target: Option<MonthDay>,
    at: &DateTime<T>,
) -> Result<String, ServiceError> {
    let count = store.count_for_chat_today(reminder.chat_id.0, at).await?;
    let local = at.with_timezone(&store.timezone());

    let mut lines = vec![
        t!("reminder.greeting", mention = mention(reminder), date = format_date(&local)).to_string(),
        t!("reminder.count", count = count).to_string(),
    ];

    if count == 0 {
        lines.push(t!("reminder.nudge").to_string());
    }

    if let Some(line) = countdown_line(target, days_until(target, at, store.timezone())) {
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

pub async fn send_reminder(bot: &Bot, state: &AppState) -> Result<(), ServiceError> {
    let Some(reminder) = &state.config.reminder else {
        return Ok(());
    };

    let now = local_now(state.config.timezone);
    let text = compose_reminder(&state.logs, reminder, state.config.countdown.target, &now).await?;

    bot.send_message(reminder.chat_id, text)
        .parse_mode(ParseMode::Html)
        .await?;

    info!("Reminder sent to chat {}", reminder.chat_id);

    Ok(())
}

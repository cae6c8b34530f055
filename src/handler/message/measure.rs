use chrono::Utc;
use teloxide::prelude::*;

use crate::error::{BotError, HandlerResult};
use crate::service::dialogue::{model::MeasureState, MeasureDialogue};
use crate::service::health::{assess, HealthReport, ThresholdSide};
use crate::state::AppState;
use crate::storage::Record;
use crate::utils::{
    display_name,
    parse::{parse_measurement, parse_positive},
    time::local_now,
};

async fn require_text(bot: &Bot, msg: &Message) -> HandlerResult<Option<String>> {
    match msg.text() {
        Some(text) => Ok(Some(text.trim().to_string())),
        None => {
            bot.send_message(msg.chat.id, t!("messages.text_required")).await?;
            Ok(None)
        }
    }
}

pub(super) async fn handle_message_height(bot: Bot, dialogue: MeasureDialogue, msg: Message) -> HandlerResult<()> {
    let Some(text) = require_text(&bot, &msg).await? else {
        return Ok(());
    };

    let Some(height) = parse_positive(&text) else {
        bot.send_message(msg.chat.id, t!("messages.measure.invalid_height")).await?;
        return Ok(());
    };

    dialogue
        .update(MeasureState::AwaitingWeight { height })
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

    bot.send_message(msg.chat.id, t!("messages.measure.ask_weight")).await?;

    Ok(())
}

pub(super) async fn handle_message_weight(
    bot: Bot,
    dialogue: MeasureDialogue,
    msg: Message,
    state: AppState,
    height: f64,
) -> HandlerResult<()> {
    let Some(text) = require_text(&bot, &msg).await? else {
        return Ok(());
    };

    let Some(report) = parse_positive(&text).and_then(|weight| finite_report(height, weight)) else {
        bot.send_message(msg.chat.id, t!("messages.measure.invalid_weight")).await?;
        return Ok(());
    };

    complete_measurement(bot, dialogue, msg, state, report).await
}

pub(super) async fn handle_message_combined(
    bot: Bot,
    dialogue: MeasureDialogue,
    msg: Message,
    state: AppState,
) -> HandlerResult<()> {
    let Some(text) = require_text(&bot, &msg).await? else {
        return Ok(());
    };

    let Some(report) = parse_measurement(&text).and_then(|(height, weight)| finite_report(height, weight)) else {
        bot.send_message(msg.chat.id, t!("messages.bmi.invalid_format")).await?;
        return Ok(());
    };

    complete_measurement(bot, dialogue, msg, state, report).await
}

/// Extreme but parseable inputs can still overflow the BMI.
fn finite_report(height: f64, weight: f64) -> Option<HealthReport> {
    let report = assess(height, weight);
    report.bmi.is_finite().then_some(report)
}

async fn complete_measurement(
    bot: Bot,
    dialogue: MeasureDialogue,
    msg: Message,
    state: AppState,
    report: HealthReport,
) -> HandlerResult<()> {
    // leave the flow before any I/O so a failure below cannot strand the chat
    dialogue
        .exit()
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

    bot.send_message(msg.chat.id, format_report(&report)).await?;

    let (user_id, username) = match msg.from.as_ref() {
        Some(user) => (user.id.0, display_name(user)),
        None => (0, msg.chat.id.to_string()),
    };

    let now = local_now(state.config.timezone);
    let record = Record::new(msg.chat.id.0, user_id, username, &report, now.with_timezone(&Utc));

    if let Err(e) = state.logs.append(record, &now).await {
        error!("Failed to persist measurement for chat {}: {}", msg.chat.id, e);
        bot.send_message(msg.chat.id, t!("messages.storage_error")).await?;
    }

    Ok(())
}

pub(crate) fn format_report(report: &HealthReport) -> String {
    let bmi = format!("{:.1}", report.bmi);
    let diff = format!("{:.1}", report.distance.diff);

    let military = match report.military.reason {
        Some(reason) => t!(
            "messages.result.military_with_reason",
            rank = report.military.rank.label(),
            reason = reason.label()
        ),
        None => t!("messages.result.military", rank = report.military.rank.label()),
    };

    let distance = match (report.distance.reached, report.distance.side) {
        (true, ThresholdSide::Low) => t!("messages.result.exempt_below", diff = diff),
        (true, ThresholdSide::High) => t!("messages.result.exempt_above", diff = diff),
        (false, ThresholdSide::Low) => t!("messages.result.distance_low", diff = diff),
        (false, ThresholdSide::High) => t!("messages.result.distance_high", diff = diff),
    };

    [
        t!("messages.result.bmi", bmi = bmi, status = report.status.label()).to_string(),
        military.to_string(),
        distance.to_string(),
    ]
    .join("\n")
}

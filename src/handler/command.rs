use teloxide::dispatching::{HandlerExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::{types::Message, Bot};

use crate::command::Command;
use crate::error::{BotError, HandlerResult};
use crate::service::countdown::days_until;
use crate::service::dialogue::{model::MeasureState, MeasureDialogue};
use crate::state::AppState;
use crate::utils::time::local_now;

async fn handle_start(bot: Bot, msg: Message) -> HandlerResult<()> {
    let first_name = msg.from.as_ref().map(|user| user.first_name.clone()).unwrap_or_default();

    bot.send_message(msg.chat.id, t!("commands.start", first_name = first_name))
        .await?;

    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> HandlerResult<()> {
    bot.send_message(msg.chat.id, t!("commands.help")).await?;

    Ok(())
}

async fn handle_bmi(bot: Bot, dialogue: MeasureDialogue, msg: Message) -> HandlerResult<()> {
    dialogue
        .update(MeasureState::AwaitingCombinedInput)
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

    bot.send_message(msg.chat.id, t!("messages.bmi.prompt")).await?;

    Ok(())
}

async fn handle_measure(bot: Bot, dialogue: MeasureDialogue, msg: Message) -> HandlerResult<()> {
    dialogue
        .update(MeasureState::AwaitingHeight)
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

    bot.send_message(msg.chat.id, t!("messages.measure.ask_height")).await?;

    Ok(())
}

async fn handle_cancel(bot: Bot, dialogue: MeasureDialogue, msg: Message) -> HandlerResult<()> {
    dialogue
        .exit()
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

    bot.send_message(msg.chat.id, t!("messages.cancelled")).await?;

    Ok(())
}

async fn handle_today(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let now = local_now(state.config.timezone);

    let text = match state.logs.count_for_chat_today(msg.chat.id.0, &now).await {
        Ok(count) => t!("commands.today", count = count),
        Err(e) => {
            error!("Failed to count today's records for chat {}: {}", msg.chat.id, e);
            t!("messages.internal_error")
        }
    };

    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}

async fn handle_countdown(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let now = local_now(state.config.timezone);
    let target = state.config.countdown.target;

    let text = match (target, days_until(target, &now, state.config.timezone)) {
        (Some(target), Some(0)) => t!("commands.countdown.today", date = target.to_string()),
        (Some(target), Some(days)) => t!("commands.countdown.days", days = days, date = target.to_string()),
        _ => t!("commands.countdown.not_configured"),
    };

    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}

async fn handle_id(bot: Bot, msg: Message) -> HandlerResult<()> {
    let user_id = msg
        .from
        .as_ref()
        .map(|user| user.id.to_string())
        .unwrap_or_else(|| "-".to_string());

    bot.send_message(
        msg.chat.id,
        t!("commands.id", chat_id = msg.chat.id, user_id = user_id),
    )
    .await?;

    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: MeasureDialogue,
    state: AppState,
) -> HandlerResult<()> {
    debug!("Command {:?} in chat {}", cmd, msg.chat.id);

    match cmd {
        Command::Start => handle_start(bot, msg).await?,
        Command::Help => handle_help(bot, msg).await?,
        Command::Bmi => handle_bmi(bot, dialogue, msg).await?,
        Command::Measure => handle_measure(bot, dialogue, msg).await?,
        Command::Cancel => handle_cancel(bot, dialogue, msg).await?,
        Command::Today => handle_today(bot, msg, state).await?,
        Command::Countdown => handle_countdown(bot, msg, state).await?,
        Command::Id => handle_id(bot, msg).await?,
    }

    Ok(())
}

pub fn get_command_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command)
}

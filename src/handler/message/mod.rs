mod measure;

use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    dptree,
    prelude::Requester,
    types::{Message, Update},
    Bot,
};

use crate::{
    error::{BotError, HandlerResult},
    service::dialogue::{model::MeasureState, MeasureDialogue},
    utils::parse::is_stop_keyword,
};

/// Messages in idle chats are consumed without a reply.
pub fn get_message_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    Update::filter_message()
        .branch(
            dptree::filter(|msg: Message, state: MeasureState| {
                state.is_active() && msg.text().is_some_and(is_stop_keyword)
            })
            .endpoint(handle_message_stop),
        )
        .branch(dptree::case![MeasureState::AwaitingHeight].endpoint(measure::handle_message_height))
        .branch(dptree::case![MeasureState::AwaitingWeight { height }].endpoint(measure::handle_message_weight))
        .branch(dptree::case![MeasureState::AwaitingCombinedInput].endpoint(measure::handle_message_combined))
        .branch(dptree::case![MeasureState::Idle].endpoint(handle_message_idle))
}

async fn handle_message_idle(msg: Message) -> HandlerResult<()> {
    debug!("Ignoring message {} in idle chat {}", msg.id.0, msg.chat.id);

    Ok(())
}

async fn handle_message_stop(bot: Bot, dialogue: MeasureDialogue, msg: Message) -> HandlerResult<()> {
    info!("Measurement stopped by keyword in chat {}", msg.chat.id);

    dialogue
        .exit()
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

    bot.send_message(msg.chat.id, t!("messages.cancelled")).await?;

    Ok(())
}

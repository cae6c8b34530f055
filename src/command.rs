use teloxide::{
    macros::BotCommands,
    prelude::Requester,
    types::BotCommand,
    Bot,
};

use crate::error::HandlerResult;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Help,
    Bmi,
    Measure,
    Cancel,
    Today,
    Countdown,
    Id,
}

impl Command {
    pub fn user_commands() -> Vec<BotCommand> {
        vec![
            BotCommand::new("bmi", t!("commands.description.bmi")),
            BotCommand::new("measure", t!("commands.description.measure")),
            BotCommand::new("cancel", t!("commands.description.cancel")),
            BotCommand::new("today", t!("commands.description.today")),
            BotCommand::new("countdown", t!("commands.description.countdown")),
            BotCommand::new("id", t!("commands.description.id")),
            BotCommand::new("help", t!("commands.description.help")),
        ]
    }
}

pub async fn setup_user_commands(bot: &Bot) -> HandlerResult<()> {
    bot.delete_my_commands().await?;
    bot.set_my_commands(Command::user_commands()).await?;
    Ok(())
}

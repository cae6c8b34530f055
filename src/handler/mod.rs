mod command;
mod message;

use command::get_command_handler;
use message::get_message_handler;
use teloxide::{
    dispatching::{
        dialogue::{self, ErasedStorage},
        UpdateHandler,
    },
    types::Update,
};

use crate::service::dialogue::model::MeasureState;

pub fn get_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    // commands win over the dialogue so /cancel always works mid-measurement
    dialogue::enter::<Update, ErasedStorage<MeasureState>, MeasureState, _>()
        .branch(get_command_handler())
        .branch(get_message_handler())
}

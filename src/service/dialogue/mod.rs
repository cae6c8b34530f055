use std::sync::Arc;

use model::MeasureState;
use teloxide::dispatching::dialogue::{ErasedStorage, InMemStorage, Storage};

pub mod model;

pub type MeasureDialogue = teloxide::dispatching::dialogue::Dialogue<MeasureState, ErasedStorage<MeasureState>>;

pub struct DialogueService;

impl DialogueService {
    /// Sessions live in process memory and never expire on their own.
    pub fn get_dialogue_storage() -> Arc<ErasedStorage<MeasureState>> {
        InMemStorage::<MeasureState>::new().erase()
    }
}

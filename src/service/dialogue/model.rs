use serde::{Deserialize, Serialize};

/// Per-chat measurement flow. `Idle` is what the storage yields for chats without a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum MeasureState {
    #[default]
    Idle,
    // Step by step (/measure)
    AwaitingHeight,
    AwaitingWeight {
        height: f64,
    },
    // Single line "height,weight" (/bmi)
    AwaitingCombinedInput,
}

impl MeasureState {
    pub fn is_active(&self) -> bool {
        !matches!(self, MeasureState::Idle)
    }
}

use serde::{Deserialize, Serialize};

/// One page of accumulated output, handed to the caller at each
/// suspension boundary. Choice entries are index-parallel to the
/// interpreter's pending-choice table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueResponse {
    pub texts: Vec<String>,
    pub choices: Vec<String>,
}

impl DialogueResponse {
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.choices.is_empty()
    }
}

/// Notifications produced by one step/resume cycle, in emission order.
/// `Signal` events fire during dispatch; `Ended` fires when the stack
/// empties with no pending choices; exactly one `Response` closes
/// every cycle that ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DialogueEvent {
    Signal { payload: String },
    Ended,
    Response(DialogueResponse),
}

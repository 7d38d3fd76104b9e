// Code generated by gnap-codec generate. DO NOT EDIT.

use crate::types::StartMode;
use super::{InteractionFinish, InteractionHint};

record! {
    /// The interaction modes the client instance supports.
    pub struct InteractionRequest: INTERACTION_REQUEST {
        finish: [InteractionFinish] => "finish",
        hints: InteractionHint => "hints",
        start: [StartMode] => "start" [required],
    }
}

impl InteractionRequest {
    /// Creates a new `InteractionRequest` with its required fields set.
    pub fn new(start: StartMode) -> Self {
        let mut record = Self::default();
        record.add_start([start]);
        record
    }
}

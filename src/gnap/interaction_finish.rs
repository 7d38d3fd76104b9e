// Code generated by gnap-codec generate. DO NOT EDIT.

use crate::types::FinishMode;

record! {
    /// How the client instance is notified that an interaction finished.
    pub struct InteractionFinish: INTERACTION_FINISH {
        hash_method: String => "hash_method",
        method: FinishMode => "method" [required],
        nonce: String => "nonce" [required],
        uri: String => "uri" [required],
    }
}

impl InteractionFinish {
    /// Creates a new `InteractionFinish` with its required fields set.
    pub fn new(method: FinishMode, nonce: impl Into<String>, uri: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.set_method(method);
        record.set_nonce(nonce);
        record.set_uri(uri);
        record
    }
}

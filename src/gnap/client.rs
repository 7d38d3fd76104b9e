// Code generated by gnap-codec generate. DO NOT EDIT.

use super::Key;

record! {
    /// The client instance making a request.
    /// May be sent as a bare instance identifier.
    pub struct Client: CLIENT {
        class_id: String => "class_id",
        instance_id: String => "instance_id" [shorthand],
        key: Key => "key" [required],
    }
}

impl Client {
    /// Creates a new `Client` with its required fields set.
    pub fn new(key: Key) -> Self {
        let mut record = Self::default();
        record.set_key(key);
        record
    }
}

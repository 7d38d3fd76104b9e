// Code generated by gnap-codec generate. DO NOT EDIT.

record! {
    pub struct UserCode: USER_CODE {
        code: String => "code" [required],
        url: String => "url",
    }
}

impl UserCode {
    /// Creates a new `UserCode` with its required fields set.
    pub fn new(code: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.set_code(code);
        record
    }
}

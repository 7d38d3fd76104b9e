// Code generated by gnap-codec generate. DO NOT EDIT.

use super::AccessToken;

record! {
    /// Information the client instance needs to continue a grant request.
    pub struct RequestContinuation: REQUEST_CONTINUATION {
        access_token: AccessToken => "access_token" [required],
        uri: String => "uri" [required],
        wait: i64 => "wait",
    }
}

impl RequestContinuation {
    /// Creates a new `RequestContinuation` with its required fields set.
    pub fn new(access_token: AccessToken, uri: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.set_access_token(access_token);
        record.set_uri(uri);
        record
    }
}

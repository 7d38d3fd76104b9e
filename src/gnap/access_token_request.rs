// Code generated by gnap-codec generate. DO NOT EDIT.

use crate::types::AccessTokenAttribute;
use super::ResourceAccess;

record! {
    /// One access token requested in a grant request.
    pub struct AccessTokenRequest: ACCESS_TOKEN_REQUEST {
        access: [ResourceAccess] => "access" [required],
        flags: [AccessTokenAttribute] => "flags",
        label: String => "label",
    }
}

impl AccessTokenRequest {
    /// Creates a new `AccessTokenRequest` with its required fields set.
    pub fn new(access: ResourceAccess) -> Self {
        let mut record = Self::default();
        record.add_access([access]);
        record
    }
}

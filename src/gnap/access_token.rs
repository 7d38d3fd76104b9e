// Code generated by gnap-codec generate. DO NOT EDIT.

use crate::value::Jwk;
use super::ResourceAccess;

record! {
    /// An access token issued by the authorization server.
    pub struct AccessToken: ACCESS_TOKEN {
        access: [ResourceAccess] => "access" [required],
        bound: bool => "bound",
        durable: bool => "durable",
        expires_in: i64 => "expires_in",
        key: Jwk => "key",
        label: String => "label",
        manage: String => "manage",
        split: bool => "split",
        value: String => "value" [required],
    }
}

impl AccessToken {
    /// Creates a new `AccessToken` with its required fields set.
    pub fn new(access: ResourceAccess, value: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.add_access([access]);
        record.set_value(value);
        record
    }
}

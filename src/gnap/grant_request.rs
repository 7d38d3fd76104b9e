// Code generated by gnap-codec generate. DO NOT EDIT.

use super::{AccessTokenRequest, Client, InteractionRequest, SubjectRequest};

record! {
    /// A request for a grant, sent by the client instance to the grant endpoint.
    pub struct GrantRequest: GRANT_REQUEST, rule = super::rules::labelled_access_tokens {
        access_tokens: [AccessTokenRequest] => "access_token" [collapsible],
        capabilities: [String] => "capabilities",
        client: Client => "client",
        interact: InteractionRequest => "interact",
        subject: SubjectRequest => "subject",
    }
}

// Code generated by gnap-codec generate. DO NOT EDIT.

use super::{AccessToken, InteractionResponse, RequestContinuation};

record! {
    /// The authorization server's response to a grant request.
    pub struct GrantResponse: GRANT_RESPONSE {
        access_token: AccessToken => "access_token",
        continuation: RequestContinuation => "continue",
        error: String => "error",
        interact: InteractionResponse => "interact",
    }
}

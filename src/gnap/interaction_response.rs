// Code generated by gnap-codec generate. DO NOT EDIT.

use super::UserCode;

record! {
    pub struct InteractionResponse: INTERACTION_RESPONSE {
        app: String => "app",
        finish: String => "finish",
        redirect: String => "redirect",
        user_code: UserCode => "user_code",
    }
}

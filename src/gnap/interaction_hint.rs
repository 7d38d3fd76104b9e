// Code generated by gnap-codec generate. DO NOT EDIT.

record! {
    pub struct InteractionHint: INTERACTION_HINT {
        ui_locales: [String] => "ui_locales",
    }
}

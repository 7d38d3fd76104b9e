// Code generated by gnap-codec generate. DO NOT EDIT.

record! {
    pub struct ClientDisplay: CLIENT_DISPLAY {
        logo_uri: String => "logo_uri",
        name: String => "name",
        uri: String => "uri",
    }
}

// Code generated by gnap-codec generate. DO NOT EDIT.

record! {
    /// The access, resource, and metadata associated with them.
    pub struct ResourceAccess: RESOURCE_ACCESS {
        actions: [String] => "actions",
        datatypes: [String] => "datatypes",
        identifier: String => "identifier",
        locations: [String] => "locations",
        typ: String => "type" [required],
    }
}

impl ResourceAccess {
    /// Creates a new `ResourceAccess` with its required fields set.
    pub fn new(typ: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.set_typ(typ);
        record
    }
}

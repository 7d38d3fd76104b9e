// Code generated by gnap-codec generate. DO NOT EDIT.

record! {
    pub struct SubjectRequest: SUBJECT_REQUEST {
        assertions: [String] => "assertions",
        sub_ids: [String] => "sub_ids",
    }
}

// Code generated by gnap-codec generate. DO NOT EDIT.

use crate::types::ProofForm;
use crate::value::Jwk;

record! {
    /// A key presented by the client instance, with its proofing method.
    pub struct Key: KEY {
        cert: String => "cert",
        cert_s256: String => "cert#S256",
        jwk: Jwk => "jwk",
        proof: ProofForm => "proof",
    }
}

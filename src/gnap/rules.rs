//! Cross-field rules referenced by the generated records.

use super::GrantRequest;
use crate::error::ValidationError;
use crate::record::OpenRecord;

/// When more than one access token is requested, each must carry a label.
pub fn labelled_access_tokens(request: &GrantRequest) -> Result<(), ValidationError> {
    let tokens = request.access_tokens();
    if tokens.len() < 2 {
        return Ok(());
    }
    match tokens.iter().position(|token| !token.is_present("label")) {
        Some(index) => Err(ValidationError::Rule {
            rule: "labelled_access_tokens",
            message: format!(
                "access_token/{}: \"label\" is required when multiple access tokens are requested",
                index
            ),
        }),
        None => Ok(()),
    }
}

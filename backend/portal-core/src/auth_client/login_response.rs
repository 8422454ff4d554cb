//! Extracting the session token from a successful `/login` answer.
//!
//! Servers in the field answer in one of two shapes, and nothing in the
//! response says which. The shape is therefore configured, not sniffed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separates the label from the token in a text answer, e.g. `"Token: abc.def.ghi"`.
const TOKEN_DELIMITER: &str = ": ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginResponseFormat {
    /// `{"token": "<token>"}`
    #[default]
    TokenField,
    /// A JSON string such as `"Login successful: <token>"`. The token is the
    /// text between the first and second `": "`.
    DelimitedText,
}

impl LoginResponseFormat {
    /// Pull the token out of a parsed response body.
    ///
    /// Returns `None` when the body has the wrong shape or the token is empty.
    pub fn extract_token(&self, body: &Value) -> Option<String> {
        let token = match self {
            LoginResponseFormat::TokenField => body.get("token")?.as_str()?.trim(),
            LoginResponseFormat::DelimitedText => {
                let text = body.as_str()?;
                text.split(TOKEN_DELIMITER).nth(1)?
            }
        };

        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

//! Agent payload shapes
//!
//! Deployed agents disagree on where the prompt lives, so the wrapper is
//! chosen by configuration rather than negotiated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::RelayError;

/// Where the prompt is placed in the invocation payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// `{"prompt": "..."}`
    #[default]
    Prompt,
    /// `{"input": {"prompt": "..."}}`
    Input,
}

impl PayloadShape {
    /// Build the JSON payload for `prompt`
    pub fn wrap(&self, prompt: &str) -> Value {
        match self {
            PayloadShape::Prompt => json!({ "prompt": prompt }),
            PayloadShape::Input => json!({ "input": { "prompt": prompt } }),
        }
    }

    /// Encode the payload as the bytes sent to the runtime
    pub fn encode(&self, prompt: &str) -> Vec<u8> {
        self.wrap(prompt).to_string().into_bytes()
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadShape::Prompt => f.write_str("prompt"),
            PayloadShape::Input => f.write_str("input"),
        }
    }
}

impl FromStr for PayloadShape {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(PayloadShape::Prompt),
            "input" => Ok(PayloadShape::Input),
            other => Err(RelayError::Config(format!(
                "unknown payload shape '{}' (expected 'prompt' or 'input')",
                other
            ))),
        }
    }
}

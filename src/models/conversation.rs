use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ChatRole;

/// One message in the symptom conversation. Never edited after it is logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into(), sent_at: Utc::now() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into(), sent_at: Utc::now() }
    }
}

use chrono::Utc;
use serde::Serialize;

use crate::session::SessionState;
use crate::services::{interactions::InteractionIndex, nutrition, symptoms};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub medicine_count: usize,
    pub interaction_count: usize,
    pub conversation_turns: usize,
    pub assistant_typing: bool,
    pub interaction_table_size: usize,
    pub symptom_rule_count: usize,
    pub deficiency_rule_count: usize,
    pub uptime_seconds: u64,
}

/// Get current system status
pub fn get_system_status(state: &SessionState) -> Result<SystemStatus, String> {
    let session = state.0.lock().map_err(|e| e.to_string())?;
    let uptime = (Utc::now() - session.started_at()).num_seconds().max(0) as u64;

    Ok(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        medicine_count: session.medicines().len(),
        interaction_count: session.findings().len(),
        conversation_turns: session.conversation().len(),
        assistant_typing: session.is_typing(),
        interaction_table_size: InteractionIndex::global().len(),
        symptom_rule_count: symptoms::rule_count(),
        deficiency_rule_count: nutrition::rule_count(),
        uptime_seconds: uptime,
    })
}

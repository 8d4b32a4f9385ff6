// Smart Health AI — Core Library
// Rule-based medicine, symptom and nutrition advisor. Not medical advice.

mod commands;
mod error;
pub mod models;
mod services;
pub mod session;
mod shell;

use std::sync::Arc;

pub use error::ValidationError;
pub use services::interactions::{find_interactions, InteractionIndex};
pub use services::nutrition::{analyze, NO_DEFICIENCY_NAME};
pub use services::symptoms::{classify, Classification, DISCLAIMER, INSUFFICIENT_INFO_TEXT};
pub use session::{MedicineSnapshot, ScheduleSlot, Session, SessionState};

/// Start the interactive Smart Health AI client
pub fn run() {
    env_logger::init();

    let settings = commands::settings::get_settings();
    let state = Arc::new(SessionState::new());
    log::info!(
        "Smart Health AI started — typing delay {}ms, {} medicines in interaction table",
        settings.typing_delay_ms,
        services::interactions::InteractionIndex::global().len()
    );

    let runtime = tokio::runtime::Runtime::new().expect("Failed to start async runtime");
    if let Err(e) = runtime.block_on(shell::run_shell(state, settings)) {
        log::error!("Shell stopped: {:#}", e);
        std::process::exit(1);
    }
}

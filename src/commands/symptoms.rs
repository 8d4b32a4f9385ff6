use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::models::ChatTurn;
use crate::session::SessionState;

/// A submitted symptom query: the logged user turn plus the deferred reply.
pub struct SymptomExchange {
    pub user_turn: ChatTurn,
    /// Resolves to the assistant turn once `delay` has elapsed.
    pub reply: JoinHandle<Option<ChatTurn>>,
}

/// Log the user's symptom text now and schedule the classifier reply after `delay`.
/// Must be called from inside a tokio runtime.
pub fn submit_symptom_text(
    state: &Arc<SessionState>,
    text: &str,
    delay: Duration,
) -> Result<SymptomExchange, String> {
    let user_turn = {
        let mut session = state.0.lock().map_err(|e| e.to_string())?;
        session.begin_exchange(text).map_err(|e| {
            log::warn!("Symptom query not accepted: {}", e);
            e.to_string()
        })?
    };

    let state = Arc::clone(state);
    let reply = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        match state.0.lock() {
            Ok(mut session) => session.complete_exchange(),
            Err(e) => {
                log::error!("Session lock poisoned, assistant reply dropped: {}", e);
                None
            }
        }
    });

    Ok(SymptomExchange { user_turn, reply })
}

pub fn get_conversation(state: &SessionState) -> Result<Vec<ChatTurn>, String> {
    let session = state.0.lock().map_err(|e| e.to_string())?;
    Ok(session.conversation().to_vec())
}

pub fn is_typing(state: &SessionState) -> Result<bool, String> {
    let session = state.0.lock().map_err(|e| e.to_string())?;
    Ok(session.is_typing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;
    use crate::services::symptoms::{DISCLAIMER, INSUFFICIENT_INFO_TEXT};

    const DELAY: Duration = Duration::from_millis(1500);

    #[tokio::test(start_paused = true)]
    async fn reply_lands_after_the_delay() {
        let state = Arc::new(SessionState::new());
        let exchange = submit_symptom_text(&state, "fever cough headache", DELAY).unwrap();
        assert_eq!(exchange.user_turn.role, ChatRole::User);
        assert_eq!(get_conversation(&state).unwrap().len(), 1);
        assert!(is_typing(&state).unwrap());

        tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
        assert_eq!(get_conversation(&state).unwrap().len(), 1);
        assert!(is_typing(&state).unwrap());

        let reply = exchange.reply.await.unwrap().unwrap();
        assert_eq!(reply.role, ChatRole::Assistant);
        assert!(reply.text.ends_with(DISCLAIMER));
        assert!(!is_typing(&state).unwrap());

        let log = get_conversation(&state).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].text, "fever cough headache");
        assert_eq!(log[1], reply);
    }

    #[tokio::test(start_paused = true)]
    async fn second_query_is_refused_while_typing() {
        let state = Arc::new(SessionState::new());
        let first = submit_symptom_text(&state, "I feel great", DELAY).unwrap();

        let err = submit_symptom_text(&state, "nausea and headache", DELAY).err().unwrap();
        assert_eq!(err, "an assistant reply is still pending");

        let reply = first.reply.await.unwrap().unwrap();
        assert_eq!(reply.text, INSUFFICIENT_INFO_TEXT);

        let second = submit_symptom_text(&state, "nausea and headache", DELAY).unwrap();
        let reply = second.reply.await.unwrap().unwrap();
        assert!(reply.text.contains("Migraine or Tension Headache"));
        assert_eq!(get_conversation(&state).unwrap().len(), 4);
    }

    #[tokio::test]
    async fn blank_query_is_refused_without_scheduling() {
        let state = Arc::new(SessionState::new());
        assert!(submit_symptom_text(&state, " \n\t", DELAY).is_err());
        assert!(get_conversation(&state).unwrap().is_empty());
        assert!(!is_typing(&state).unwrap());
    }
}

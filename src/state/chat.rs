//! Chat Session State
//!
//! Message history and send plumbing for the assistant panel. The panel
//! does not interpret conversation content; the only structured thing it
//! reacts to is the optional action envelope on a reply, which goes through
//! the frontend action table.

use leptos::*;

use crate::api;
use crate::state::actions;
use crate::state::global::GlobalState;

/// Static chat labels.
pub const CHAT_TITLE: &str = "CareLoop Assistant";
pub const INITIAL_GREETING: &str =
    "Hello! Please enter your User ID (1-100) to get started. \u{1f44b}";

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One rendered chat message.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Chat session state provided alongside [`GlobalState`].
#[derive(Clone)]
pub struct ChatSession {
    pub messages: RwSignal<Vec<ChatMessage>>,
    pub sending: RwSignal<bool>,
}

/// Provide the chat session, seeded with the assistant greeting.
pub fn provide_chat_session() {
    let session = ChatSession {
        messages: create_rw_signal(vec![ChatMessage {
            role: ChatRole::Assistant,
            content: INITIAL_GREETING.to_string(),
        }]),
        sending: create_rw_signal(false),
    };

    provide_context(session);
}

/// Run the backend handshake. The loading gate opens once this resolves,
/// success or not; `backend_ready` tracks whether the assistant is usable.
pub fn run_handshake(state: GlobalState) {
    spawn_local(async move {
        match api::check_health().await {
            Ok(_) => {
                state.backend_ready.set(true);
                state.last_sync.set(Some(chrono::Utc::now().timestamp_millis()));
            }
            Err(e) => {
                state.backend_ready.set(false);
                web_sys::console::warn_1(&format!("backend handshake failed: {}", e).into());
                state.show_error(&format!("Backend unreachable: {}", e));
            }
        }
        // One-way: the page becomes interactive whether or not the
        // handshake succeeded.
        state.loading.set(false);
    });
}

/// Send one user message to the agent backend and append the reply.
///
/// Whitespace-only input is a no-op. A failed send appends nothing from the
/// assistant; the failure surfaces as a transient toast and the user can
/// simply send again.
pub fn send_message(state: GlobalState, session: ChatSession, text: String) {
    let text = text.trim().to_string();
    if text.is_empty() {
        return;
    }

    session.messages.update(|messages| {
        messages.push(ChatMessage {
            role: ChatRole::User,
            content: text.clone(),
        });
    });
    session.sending.set(true);

    let user_id = state.current_user.get_untracked().map(|user| user.id);

    spawn_local(async move {
        match api::send_chat_message(&text, user_id).await {
            Ok(reply) => {
                session.messages.update(|messages| {
                    messages.push(ChatMessage {
                        role: ChatRole::Assistant,
                        content: reply.content,
                    });
                });

                // The backend may drive the dashboard through the action
                // table; a rejected invocation must not take the page down.
                if let Some(action) = reply.action {
                    if let Err(e) = actions::dispatch(&state, action) {
                        web_sys::console::warn_1(
                            &format!("backend action rejected: {}", e).into(),
                        );
                        state.show_error(&e.to_string());
                    }
                }
            }
            Err(e) => {
                state.show_error(&format!("Assistant unavailable: {}", e));
            }
        }
        session.sending.set(false);
    });
}

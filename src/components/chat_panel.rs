//! Chat Panel Component
//!
//! Right-hand assistant pane. The panel renders the conversation and sends
//! user turns to the backend; it never interprets message content itself.
//! When the backend is unreachable the panel is disabled with a retry
//! affordance rather than failing the page.

use leptos::*;

use crate::components::loading::InlineLoading;
use crate::state::chat::{self, run_handshake, ChatMessage, ChatRole, ChatSession, CHAT_TITLE};
use crate::state::global::GlobalState;

/// Assistant chat panel
#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = use_context::<ChatSession>().expect("ChatSession not found");

    let (input, set_input) = create_signal(String::new());

    let state_for_submit = state.clone();
    let session_for_submit = session.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let text = input.get();
        if text.trim().is_empty() {
            return;
        }

        chat::send_message(state_for_submit.clone(), session_for_submit.clone(), text);
        set_input.set(String::new());
    };

    let state_for_retry = state.clone();
    let backend_ready = state.backend_ready;
    let sending = session.sending;
    let messages = session.messages;

    view! {
        <aside class="w-96 bg-gray-800 border-l border-gray-700 flex flex-col">
            // Header
            <div class="px-4 py-3 border-b border-gray-700 flex items-center justify-between">
                <h2 class="font-semibold">{CHAT_TITLE}</h2>
                {move || {
                    if backend_ready.get() {
                        view! {
                            <span class="w-2 h-2 bg-green-400 rounded-full" title="Connected" />
                        }.into_view()
                    } else {
                        view! {
                            <span class="w-2 h-2 bg-red-400 rounded-full" title="Offline" />
                        }.into_view()
                    }
                }}
            </div>

            // Message list
            <div class="flex-1 overflow-y-auto p-4 space-y-3">
                {move || {
                    messages.get()
                        .into_iter()
                        .map(|message| view! { <ChatBubble message=message /> })
                        .collect_view()
                }}

                {move || {
                    if sending.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-gray-400 text-sm">
                                <InlineLoading />
                                <span>"Assistant is thinking..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>

            // Offline banner with retry
            {move || {
                if !backend_ready.get() {
                    let state = state_for_retry.clone();
                    view! {
                        <div class="px-4 py-3 bg-red-900/40 border-t border-red-800 text-sm
                                    flex items-center justify-between">
                            <span class="text-red-300">"Assistant offline"</span>
                            <button
                                on:click=move |_| run_handshake(state.clone())
                                class="px-3 py-1 bg-red-700 hover:bg-red-600 rounded text-white"
                            >
                                "Retry"
                            </button>
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // Input
            <form on:submit=on_submit class="p-3 border-t border-gray-700 flex space-x-2">
                <input
                    type="text"
                    placeholder="Message the assistant..."
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    disabled=move || !backend_ready.get() || sending.get()
                    class="flex-1 bg-gray-700 rounded-lg px-3 py-2 text-sm
                           border border-gray-600 focus:border-primary-500 focus:outline-none
                           disabled:opacity-50"
                />
                <button
                    type="submit"
                    disabled=move || !backend_ready.get() || sending.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg text-sm font-medium transition-colors"
                >
                    "Send"
                </button>
            </form>
        </aside>
    }
}

/// Single chat message bubble
#[component]
fn ChatBubble(message: ChatMessage) -> impl IntoView {
    let (alignment, bubble) = match message.role {
        ChatRole::User => ("flex justify-end", "bg-primary-600 text-white"),
        ChatRole::Assistant => ("flex justify-start", "bg-gray-700 text-gray-100"),
    };

    view! {
        <div class=alignment>
            <div class=format!(
                "{} max-w-[85%] rounded-lg px-3 py-2 text-sm whitespace-pre-wrap",
                bubble
            )>
                {message.content}
            </div>
        </div>
    }
}

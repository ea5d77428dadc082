//! App Root Component
//!
//! Main application component with routing, global providers, and the
//! two-pane layout (dashboard content + assistant chat).

use leptos::*;
use leptos_router::*;

use crate::components::{ChatPanel, Loading, Nav, Toast};
use crate::pages::{Dashboard, Settings};
use crate::state::chat::{provide_chat_session, run_handshake};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state and the chat session to all components
    provide_global_state();
    provide_chat_session();

    // Kick off the backend handshake; the loading gate opens when it
    // resolves, ready or offline
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    run_handshake(state.clone());

    view! {
        {move || {
            if state.loading.get() {
                view! { <Loading /> }.into_view()
            } else {
                view! { <AppShell /> }.into_view()
            }
        }}
    }
}

/// Main layout once the handshake has resolved
#[component]
fn AppShell() -> impl IntoView {
    view! {
        <Router>
            <div class="h-screen bg-gray-900 text-white flex">
                // Content column
                <div class="flex-1 flex flex-col min-w-0">
                    <Nav />

                    <main class="flex-1 overflow-y-auto container mx-auto px-4 py-8 pb-24">
                        <Routes>
                            <Route path="/" view=Dashboard />
                            <Route path="/settings" view=Settings />
                            <Route path="/*any" view=NotFound />
                        </Routes>
                    </main>

                    <Footer />
                </div>

                // Assistant chat pane
                <ChatPanel />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Footer component showing backend status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Backend status
                <div class="flex items-center space-x-2">
                    {move || {
                        if state.backend_ready.get() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                    <span>"Backend connected"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-red-400">
                                    <span class="w-2 h-2 bg-red-400 rounded-full" />
                                    <span>"Backend offline"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                // Last sync time
                <div class="text-gray-400">
                    {move || {
                        state.last_sync.get()
                            .and_then(|ts| chrono::DateTime::from_timestamp_millis(ts))
                            .map(|dt| format!("Last sync: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Not synced".to_string())
                    }}
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"\u{1f50d}"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}

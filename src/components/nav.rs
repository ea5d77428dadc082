//! Navigation Component
//!
//! Header bar: brand with a live backend-connection dot, the signed-in
//! user's name, and the page links.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let current_user = state.current_user;

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"\u{1fa7a}"</span>
                        <span class="text-xl font-bold text-white">"CareLoop"</span>
                        <ConnectionDot ready=state.backend_ready />
                    </A>

                    <div class="flex items-center space-x-4">
                        {move || current_user.get().map(|user| view! {
                            <span class="text-sm text-gray-400 hidden sm:inline">
                                {user.first_name}
                            </span>
                        })}
                        <div class="flex items-center space-x-1">
                            <NavLink href="/" label="Dashboard" />
                            <NavLink href="/settings" label="Settings" />
                        </div>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Small dot reflecting the backend handshake state.
#[component]
fn ConnectionDot(ready: RwSignal<bool>) -> impl IntoView {
    view! {
        <span
            class=move || {
                if ready.get() {
                    "w-2 h-2 rounded-full bg-green-400"
                } else {
                    "w-2 h-2 rounded-full bg-red-400 animate-pulse"
                }
            }
            title=move || if ready.get() { "Backend connected" } else { "Backend offline" }
        />
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}

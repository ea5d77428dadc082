//! Loading Component
//!
//! Loading spinners for the startup gate and inline waits.

use leptos::*;

/// Full-page loading spinner shown until the backend handshake resolves
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center h-screen bg-gray-900 text-center">
            <div class="loading-spinner w-12 h-12 mb-4" />
            <p class="text-gray-400">"Loading CareLoop..."</p>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}

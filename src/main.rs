//! CareLoop Dashboard
//!
//! Browser dashboard for AI-assisted health tracking, built with Leptos (WASM).
//!
//! # Features
//!
//! - CGM (glucose) history and mood-frequency charts
//! - Food and glucose logging forms
//! - Adaptive meal plan display
//! - Embedded assistant chat wired to a multi-agent backend
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All business logic lives in an external agent backend; this
//! crate owns only session-local UI state and the action contract through
//! which the backend drives the dashboard.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}

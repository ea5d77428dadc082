//! Logging Forms
//!
//! Forms for logging a meal description or a CGM reading. Validation is
//! local: a failed check is a silent no-op that keeps the form populated
//! and never touches the network. A successful submit goes through the
//! action dispatcher exactly once, and the input clears only on success.

use leptos::*;

use crate::state::actions::{dispatch_with_status, ActionInvocation};
use crate::state::global::{GlobalState, SubmitStatus};

/// Non-empty meal description after trimming, or `None`.
pub fn clean_description(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a glucose reading; only finite numbers are valid.
pub fn parse_reading(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// What a submit attempt does: dispatch exactly one action, or show a hint
/// and leave the form alone.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDecision {
    Dispatch(ActionInvocation),
    Hint(&'static str),
}

/// Decide a food form submit from the raw input.
pub fn decide_food_submit(raw: &str) -> SubmitDecision {
    match clean_description(raw) {
        Some(description) => SubmitDecision::Dispatch(ActionInvocation::LogFood { description }),
        None => SubmitDecision::Hint("Describe your meal first"),
    }
}

/// Decide a CGM form submit from the raw input.
pub fn decide_cgm_submit(raw: &str) -> SubmitDecision {
    match parse_reading(raw) {
        Some(reading) => SubmitDecision::Dispatch(ActionInvocation::LogCgm { reading }),
        None => SubmitDecision::Hint("Enter your reading as a number in mg/dL"),
    }
}

/// The input clears only once the submission actually succeeded.
pub fn clears_input(status: SubmitStatus) -> bool {
    status == SubmitStatus::Success
}

/// Food log form
#[component]
pub fn FoodLogForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (text, set_text) = create_signal(String::new());
    let (hint, set_hint) = create_signal(None::<String>);
    let status = create_rw_signal(SubmitStatus::Idle);

    create_effect(move |_| {
        if clears_input(status.get()) {
            set_text.set(String::new());
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        match decide_food_submit(&text.get()) {
            SubmitDecision::Hint(h) => set_hint.set(Some(h.to_string())),
            SubmitDecision::Dispatch(action) => {
                set_hint.set(None);
                if let Err(e) = dispatch_with_status(&state, action, Some(status)) {
                    set_hint.set(Some(e.to_string()));
                }
            }
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-3">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"What did you eat?"</label>
                <input
                    type="text"
                    placeholder="e.g., Oatmeal with berries and coffee"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            {move || hint.get().map(|h| view! {
                <p class="text-yellow-400 text-sm">{h}</p>
            })}

            <div class="flex items-center justify-between">
                <SubmitButton status=status label="Log Meal" />
                <StatusBadge status=status />
            </div>
        </form>
    }
}

/// CGM reading form
#[component]
pub fn CgmLogForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (text, set_text) = create_signal(String::new());
    let (hint, set_hint) = create_signal(None::<String>);
    let status = create_rw_signal(SubmitStatus::Idle);

    create_effect(move |_| {
        if clears_input(status.get()) {
            set_text.set(String::new());
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        match decide_cgm_submit(&text.get()) {
            SubmitDecision::Hint(h) => set_hint.set(Some(h.to_string())),
            SubmitDecision::Dispatch(action) => {
                set_hint.set(None);
                if let Err(e) = dispatch_with_status(&state, action, Some(status)) {
                    set_hint.set(Some(e.to_string()));
                }
            }
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-3">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Glucose reading (mg/dL)"</label>
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="e.g., 120"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            {move || hint.get().map(|h| view! {
                <p class="text-yellow-400 text-sm">{h}</p>
            })}

            <div class="flex items-center justify-between">
                <SubmitButton status=status label="Log Reading" />
                <StatusBadge status=status />
            </div>
        </form>
    }
}

#[component]
fn SubmitButton(status: RwSignal<SubmitStatus>, label: &'static str) -> impl IntoView {
    view! {
        <button
            type="submit"
            disabled=move || status.get() == SubmitStatus::Pending
            class="px-6 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                   disabled:cursor-not-allowed rounded-lg font-medium transition-colors"
        >
            {move || if status.get() == SubmitStatus::Pending { "Saving..." } else { label }}
        </button>
    }
}

/// Visible per-form submission status indicator
#[component]
fn StatusBadge(status: RwSignal<SubmitStatus>) -> impl IntoView {
    view! {
        {move || match status.get() {
            SubmitStatus::Idle => view! {}.into_view(),
            SubmitStatus::Pending => view! {
                <span class="text-sm text-gray-400 flex items-center space-x-2">
                    <span class="loading-spinner w-4 h-4" />
                    <span>"Sending..."</span>
                </span>
            }.into_view(),
            SubmitStatus::Success => view! {
                <span class="text-sm text-green-400">"\u{2713} Logged"</span>
            }.into_view(),
            SubmitStatus::Failed => view! {
                <span class="text-sm text-red-400">"\u{2715} Failed - try again"</span>
            }.into_view(),
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_description_rejects_whitespace() {
        assert_eq!(clean_description(""), None);
        assert_eq!(clean_description("   "), None);
        assert_eq!(clean_description("\t\n"), None);
    }

    #[test]
    fn test_clean_description_trims() {
        assert_eq!(
            clean_description("  Oatmeal with berries  "),
            Some("Oatmeal with berries".to_string())
        );
    }

    #[test]
    fn test_parse_reading_accepts_numbers() {
        assert_eq!(parse_reading("280"), Some(280.0));
        assert_eq!(parse_reading(" 95.5 "), Some(95.5));
    }

    #[test]
    fn test_parse_reading_rejects_garbage() {
        assert_eq!(parse_reading(""), None);
        assert_eq!(parse_reading("abc"), None);
        assert_eq!(parse_reading("12abc"), None);
        // "NaN" parses as f64 but is not a usable reading
        assert_eq!(parse_reading("NaN"), None);
        assert_eq!(parse_reading("inf"), None);
    }

    #[test]
    fn test_valid_meal_submit_dispatches_one_action() {
        assert_eq!(
            decide_food_submit("  Oatmeal with berries  "),
            SubmitDecision::Dispatch(ActionInvocation::LogFood {
                description: "Oatmeal with berries".to_string()
            })
        );
    }

    #[test]
    fn test_blank_meal_submit_hints_and_dispatches_nothing() {
        assert!(matches!(decide_food_submit("   "), SubmitDecision::Hint(_)));
    }

    #[test]
    fn test_valid_reading_submit_dispatches_one_action() {
        assert_eq!(
            decide_cgm_submit(" 142 "),
            SubmitDecision::Dispatch(ActionInvocation::LogCgm { reading: 142.0 })
        );
    }

    #[test]
    fn test_bad_reading_submit_hints_and_dispatches_nothing() {
        for raw in ["", "high", "NaN"] {
            assert!(matches!(decide_cgm_submit(raw), SubmitDecision::Hint(_)));
        }
    }

    #[test]
    fn test_input_clears_only_on_success() {
        assert!(clears_input(SubmitStatus::Success));
        assert!(!clears_input(SubmitStatus::Idle));
        assert!(!clears_input(SubmitStatus::Pending));
        assert!(!clears_input(SubmitStatus::Failed));
    }
}

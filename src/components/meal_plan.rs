//! Meal Plan Component
//!
//! Renders the current plan as slot cards, or a call-to-action prompt when
//! no plan exists yet. Pure rendering; the generate button only forwards to
//! the handler it was given.

use leptos::*;

use crate::state::global::MealPlanItem;

/// Meal plan display with generate affordance
#[component]
pub fn MealPlanDisplay(
    #[prop(into)] plan: Signal<Vec<MealPlanItem>>,
    #[prop(into)] pending: Signal<bool>,
    on_generate: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let on_generate_header = on_generate.clone();

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">"Meal Plan"</h2>
                <button
                    on:click=move |_| on_generate_header()
                    disabled=move || pending.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg text-sm font-medium transition-colors"
                >
                    {move || if pending.get() { "Generating..." } else { "Generate Plan" }}
                </button>
            </div>

            {move || {
                let items = plan.get();
                if items.is_empty() {
                    let on_generate_cta = on_generate.clone();
                    view! {
                        <div class="text-center py-10 bg-gray-800 rounded-xl border border-dashed border-gray-600">
                            <div class="text-4xl mb-3">"\u{1f37d}\u{fe0f}"</div>
                            <p class="text-gray-400 mb-4">
                                "No plan yet. Generate a personalized plan from your latest readings."
                            </p>
                            <button
                                on:click=move |_| on_generate_cta()
                                disabled=move || pending.get()
                                class="px-6 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                       rounded-lg font-medium transition-colors"
                            >
                                "Get My Plan"
                            </button>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid md:grid-cols-3 gap-4">
                            {items.into_iter().map(|item| view! {
                                <MealPlanCard item=item />
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

/// Single plan slot card
#[component]
fn MealPlanCard(item: MealPlanItem) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4 border border-gray-700">
            <div class="flex items-center space-x-2 mb-2">
                <span class="text-2xl">{slot_icon(&item.slot)}</span>
                <h3 class="font-semibold">{item.slot}</h3>
            </div>

            <p class="text-gray-300 text-sm">{item.description}</p>

            {item.macro_focus.map(|focus| view! {
                <span class="inline-block mt-3 bg-gray-700 text-xs text-gray-300 px-2 py-1 rounded-full">
                    {focus}
                </span>
            })}
        </div>
    }
}

/// Icon for a meal slot name
fn slot_icon(slot: &str) -> &'static str {
    match slot.to_ascii_lowercase().as_str() {
        "breakfast" => "\u{1f305}",
        "lunch" => "\u{2600}\u{fe0f}",
        "dinner" => "\u{1f319}",
        "snack" => "\u{1f34e}",
        _ => "\u{1f37d}\u{fe0f}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_icon_is_case_insensitive() {
        assert_eq!(slot_icon("Breakfast"), slot_icon("breakfast"));
        assert_eq!(slot_icon("DINNER"), slot_icon("dinner"));
    }

    #[test]
    fn test_unknown_slot_gets_generic_icon() {
        assert_eq!(slot_icon("Second Breakfast"), "\u{1f37d}\u{fe0f}");
    }
}

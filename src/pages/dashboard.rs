//! Dashboard Page
//!
//! Composition root. Owns no state of its own beyond wiring: all session
//! state lives in [`GlobalState`] and flows into the presentational
//! children as read-only signals.

use leptos::*;

use crate::components::{CgmLogForm, FoodLogForm, GlucoseChart, MealPlanDisplay, MoodChart};
use crate::state::actions::{dispatch, ActionError, ActionInvocation};
use crate::state::global::{mood_counts, GlobalState, UserProfile};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let glucose = state.glucose_series;
    let moods = Signal::derive(move || mood_counts(&state.mood_log.get()));
    let meal_plan = state.meal_plan;
    let plan_pending = state.plan_pending;
    let current_user = state.current_user;

    let state_for_plan = state.clone();
    let on_generate_plan = move || {
        match dispatch(&state_for_plan, ActionInvocation::RequestMealPlan) {
            // A second click while a request is in flight is ignored
            Ok(()) | Err(ActionError::PlanPending) => {}
            Err(e) => state_for_plan.show_error(&e.to_string()),
        }
    };

    view! {
        <div class="space-y-8">
            // Page header with user badge
            <div class="bg-gray-800 rounded-xl p-6 border-l-4 border-primary-600">
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-3xl font-bold">"\u{1f3e5} CareLoop Health Dashboard"</h1>
                        <p class="text-gray-400 mt-1">
                            "AI-powered personalized health tracking and meal planning"
                        </p>
                    </div>
                    {move || current_user.get().map(|user| view! {
                        <UserBadge user=user />
                    })}
                </div>
            </div>

            // Getting started card
            <GettingStarted />

            // Charts row
            <div class="grid lg:grid-cols-2 gap-6">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"CGM History (Past Week)"</h2>
                    <GlucoseChart series=glucose />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Mood Trend (Last Week)"</h2>
                    <MoodChart counts=moods />
                </section>
            </div>

            // Logging forms
            <div class="grid md:grid-cols-2 gap-6">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"\u{1f34e} Log a Meal"</h2>
                    <FoodLogForm />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"\u{1fa78} Log a Reading"</h2>
                    <CgmLogForm />
                </section>
            </div>

            // Recent food logs
            <RecentFoodLogs />

            // Meal plan
            <section class="bg-gray-800 rounded-xl p-6">
                <MealPlanDisplay
                    plan=meal_plan
                    pending=plan_pending
                    on_generate=on_generate_plan
                />
            </section>
        </div>
    }
}

/// Current user badge shown in the header once authenticated
#[component]
fn UserBadge(user: UserProfile) -> impl IntoView {
    let conditions = user.conditions.unwrap_or_else(|| "None".to_string());

    view! {
        <div class="bg-gray-700 rounded-lg p-4 text-right">
            <div class="font-semibold text-primary-400">
                {format!("{} {}", user.first_name, user.last_name)}
            </div>
            <div class="text-sm text-gray-400 mt-1">
                {format!("ID: {} | {}", user.id, user.city)}
            </div>
            <div class="text-xs text-gray-500 mt-1">
                {format!("{} \u{2022} {}", user.diet, conditions)}
            </div>
        </div>
    }
}

/// Instructions card
#[component]
fn GettingStarted() -> impl IntoView {
    view! {
        <div class="bg-gradient-to-r from-indigo-600 to-purple-700 text-white rounded-xl p-6">
            <h2 class="text-xl font-bold mb-3">"Getting Started"</h2>
            <div class="grid md:grid-cols-2 gap-4 text-sm">
                <div>
                    <p class="font-semibold mb-2">"Step 1: Authenticate"</p>
                    <p class="text-indigo-100">
                        "Enter your User ID (1-100) in the chat to begin"
                    </p>
                </div>
                <div>
                    <p class="font-semibold mb-2">"Available Actions"</p>
                    <ul class="text-indigo-100 space-y-1">
                        <li>"\u{2022} Log your mood"</li>
                        <li>"\u{2022} Record CGM readings"</li>
                        <li>"\u{2022} Track food intake"</li>
                        <li>"\u{2022} Generate meal plans"</li>
                    </ul>
                </div>
            </div>
        </div>
    }
}

/// Recent food log entries
#[component]
fn RecentFoodLogs() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Recent Food Logs"</h2>

            <div class="space-y-3">
                {move || {
                    let logs = state.food_logs.get();
                    if logs.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">
                                "No meals logged yet. Use the form above or ask the assistant."
                            </p>
                        }.into_view()
                    } else {
                        logs.into_iter().take(5).map(|log| view! {
                            <div class="bg-gray-700 rounded-lg p-4 border-l-4 border-green-500
                                        flex items-center justify-between">
                                <div>
                                    <div class="font-semibold">{log.description}</div>
                                    {log.nutrients.map(|n| view! {
                                        <div class="text-sm text-gray-400 mt-1">{n}</div>
                                    })}
                                </div>
                                {log.logged_at.map(|t| view! {
                                    <div class="text-sm text-gray-500">{t}</div>
                                })}
                            </div>
                        }).collect_view()
                    }
                }}
            </div>
        </section>
    }
}

//! Frontend Action Table
//!
//! The named, typed callbacks the backend (or the chat layer on its behalf)
//! can invoke on the dashboard. Represented as a tagged enum so the wire
//! envelope, the parameter schema, and the validation all live in one place.
//!
//! Contract per action: valid parameters perform the backend call and merge
//! the returned snapshot into owned state; invalid parameters fail fast
//! with an [`ActionError`] and mutate nothing.

use leptos::*;
use thiserror::Error;

use crate::api::{self, ApiError, DashboardSnapshot};
use crate::state::global::{GlobalState, SubmitStatus, UserProfile};

/// A backend-invokable action with its declared parameters.
///
/// Wire form: `{"name": "log_cgm", "params": {"reading": 142.0}}`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "name", content = "params", rename_all = "snake_case")]
pub enum ActionInvocation {
    /// Submit a free-text food log entry
    LogFood { description: String },
    /// Submit a glucose reading in mg/dL
    LogCgm { reading: f64 },
    /// Submit a mood entry
    LogMood { mood: String },
    /// Request generation of a new meal plan
    RequestMealPlan,
    /// Bind the session user after the backend validated their ID
    SetUser { profile: UserProfile },
}

/// Rejection reasons for an action. All are local and non-fatal.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("meal description is empty")]
    EmptyDescription,
    #[error("glucose reading must be a finite number, got {0}")]
    InvalidReading(f64),
    #[error("mood label is empty")]
    EmptyMood,
    #[error("user id {0} is outside the valid range 1-100")]
    UserIdOutOfRange(u32),
    #[error("no user is bound to this session yet")]
    NoUser,
    #[error("a meal plan request is already in flight")]
    PlanPending,
}

impl ActionInvocation {
    /// Wire name of this action.
    pub fn name(&self) -> &'static str {
        match self {
            ActionInvocation::LogFood { .. } => "log_food",
            ActionInvocation::LogCgm { .. } => "log_cgm",
            ActionInvocation::LogMood { .. } => "log_mood",
            ActionInvocation::RequestMealPlan => "request_meal_plan",
            ActionInvocation::SetUser { .. } => "set_user",
        }
    }

    /// Centralized parameter validation. Runs before any state mutation or
    /// network call, regardless of whether the invocation came from a form
    /// or from the backend.
    pub fn validate(&self) -> Result<(), ActionError> {
        match self {
            ActionInvocation::LogFood { description } if description.trim().is_empty() => {
                Err(ActionError::EmptyDescription)
            }
            ActionInvocation::LogCgm { reading } if !reading.is_finite() => {
                Err(ActionError::InvalidReading(*reading))
            }
            ActionInvocation::LogMood { mood } if mood.trim().is_empty() => {
                Err(ActionError::EmptyMood)
            }
            ActionInvocation::SetUser { profile } if !(1..=100).contains(&profile.id) => {
                Err(ActionError::UserIdOutOfRange(profile.id))
            }
            _ => Ok(()),
        }
    }
}

/// Dispatch an action with no form attached (chat-originated invocations).
pub fn dispatch(state: &GlobalState, action: ActionInvocation) -> Result<(), ActionError> {
    dispatch_with_status(state, action, None)
}

/// Dispatch an action, optionally reporting progress into a form's status
/// signal. This is the single point where a UI-local event becomes a
/// backend request.
pub fn dispatch_with_status(
    state: &GlobalState,
    action: ActionInvocation,
    status: Option<RwSignal<SubmitStatus>>,
) -> Result<(), ActionError> {
    action.validate()?;

    web_sys::console::log_1(&format!("dispatching action: {}", action.name()).into());

    match action {
        ActionInvocation::SetUser { profile } => {
            let user_id = profile.id;
            let first_name = profile.first_name.clone();
            state.current_user.set(Some(profile));
            state.show_success(&format!("Welcome, {}!", first_name));
            refresh_snapshot(state.clone(), user_id);
            Ok(())
        }

        ActionInvocation::LogFood { description } => {
            let user_id = require_user(state)?;
            let description = description.trim().to_string();
            spawn_submission(
                state.clone(),
                status,
                "Food intake logged".to_string(),
                async move { api::submit_food_log(user_id, &description).await },
            );
            Ok(())
        }

        ActionInvocation::LogCgm { reading } => {
            let user_id = require_user(state)?;
            spawn_submission(
                state.clone(),
                status,
                format!("CGM reading {:.0} mg/dL logged", reading),
                async move { api::submit_cgm_reading(user_id, reading).await },
            );
            Ok(())
        }

        ActionInvocation::LogMood { mood } => {
            let user_id = require_user(state)?;
            let mood = mood.trim().to_string();
            let message = format!("Mood '{}' logged", mood);
            spawn_submission(state.clone(), status, message, async move {
                api::submit_mood(user_id, &mood).await
            });
            Ok(())
        }

        ActionInvocation::RequestMealPlan => {
            let user_id = require_user(state)?;

            // De-duplication: a second request while one is pending is
            // ignored, not queued.
            if state.plan_pending.get_untracked() {
                return Err(ActionError::PlanPending);
            }
            state.plan_pending.set(true);

            let pending = state.plan_pending;
            let state = state.clone();
            spawn_local(async move {
                match api::request_meal_plan(user_id).await {
                    Ok(snapshot) => {
                        state.apply_snapshot(snapshot);
                        state.show_success("Meal plan updated");
                    }
                    Err(e) => {
                        state.show_error(&e.to_string());
                    }
                }
                pending.set(false);
            });
            Ok(())
        }
    }
}

/// Refresh the dashboard snapshot for a user (after authentication).
pub fn refresh_snapshot(state: GlobalState, user_id: u32) {
    spawn_local(async move {
        match api::fetch_snapshot(user_id).await {
            Ok(snapshot) => state.apply_snapshot(snapshot),
            Err(e) => {
                web_sys::console::error_1(
                    &format!("failed to fetch dashboard snapshot: {}", e).into(),
                );
            }
        }
    });
}

fn require_user(state: &GlobalState) -> Result<u32, ActionError> {
    state
        .current_user
        .get_untracked()
        .map(|user| user.id)
        .ok_or(ActionError::NoUser)
}

/// Run one logging submission: flip the form status, call the backend,
/// merge the snapshot on success, toast either way.
fn spawn_submission<Fut>(
    state: GlobalState,
    status: Option<RwSignal<SubmitStatus>>,
    success_message: String,
    fut: Fut,
) where
    Fut: std::future::Future<Output = Result<DashboardSnapshot, ApiError>> + 'static,
{
    if let Some(s) = status {
        s.set(SubmitStatus::Pending);
    }

    spawn_local(async move {
        match fut.await {
            Ok(snapshot) => {
                state.apply_snapshot(snapshot);
                state.show_success(&success_message);

                if let Some(s) = status {
                    s.set(SubmitStatus::Success);
                    // Let the success indicator settle back to idle
                    gloo_timers::callback::Timeout::new(2500, move || {
                        if s.get_untracked() == SubmitStatus::Success {
                            s.set(SubmitStatus::Idle);
                        }
                    })
                    .forget();
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("submission failed: {}", e).into());
                state.show_error(&e.to_string());

                if let Some(s) = status {
                    s.set(SubmitStatus::Failed);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u32) -> UserProfile {
        UserProfile {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            city: "London".to_string(),
            diet: "vegetarian".to_string(),
            conditions: None,
            limitations: None,
        }
    }

    #[test]
    fn test_blank_description_rejected() {
        let action = ActionInvocation::LogFood {
            description: "   ".to_string(),
        };
        assert_eq!(action.validate(), Err(ActionError::EmptyDescription));
    }

    #[test]
    fn test_valid_description_accepted() {
        let action = ActionInvocation::LogFood {
            description: "Oatmeal with berries".to_string(),
        };
        assert_eq!(action.validate(), Ok(()));
    }

    #[test]
    fn test_non_finite_reading_rejected() {
        for reading in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let action = ActionInvocation::LogCgm { reading };
            assert!(action.validate().is_err());
        }
    }

    #[test]
    fn test_finite_reading_accepted() {
        let action = ActionInvocation::LogCgm { reading: 280.0 };
        assert_eq!(action.validate(), Ok(()));
    }

    #[test]
    fn test_user_id_bounds() {
        assert_eq!(
            ActionInvocation::SetUser { profile: profile(0) }.validate(),
            Err(ActionError::UserIdOutOfRange(0))
        );
        assert_eq!(
            ActionInvocation::SetUser { profile: profile(101) }.validate(),
            Err(ActionError::UserIdOutOfRange(101))
        );
        assert_eq!(ActionInvocation::SetUser { profile: profile(1) }.validate(), Ok(()));
        assert_eq!(ActionInvocation::SetUser { profile: profile(100) }.validate(), Ok(()));
    }

    #[test]
    fn test_meal_plan_request_has_no_params() {
        assert_eq!(ActionInvocation::RequestMealPlan.validate(), Ok(()));
    }

    #[test]
    fn test_wire_envelope_deserializes() {
        let action: ActionInvocation = serde_json::from_str(
            r#"{"name": "log_food", "params": {"description": "Oatmeal with berries"}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            ActionInvocation::LogFood {
                description: "Oatmeal with berries".to_string()
            }
        );
        assert_eq!(action.name(), "log_food");
    }

    #[test]
    fn test_wire_envelope_without_params() {
        let action: ActionInvocation =
            serde_json::from_str(r#"{"name": "request_meal_plan"}"#).unwrap();
        assert_eq!(action, ActionInvocation::RequestMealPlan);
    }

    #[test]
    fn test_unknown_action_name_rejected() {
        let result: Result<ActionInvocation, _> =
            serde_json::from_str(r#"{"name": "drop_tables", "params": {}}"#);
        assert!(result.is_err());
    }
}

//! Global Application State
//!
//! Session-local dashboard state, owned by the composition root and exposed
//! to children as read-only signals. Reactive state management uses Leptos
//! signals; nothing here persists across a reload.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Authenticated user, bound once per session via the chat flow
    pub current_user: RwSignal<Option<UserProfile>>,
    /// Glucose readings for the chart, chronological order
    pub glucose_series: RwSignal<Vec<GlucosePoint>>,
    /// Raw mood log; the chart recomputes frequencies from this
    pub mood_log: RwSignal<Vec<String>>,
    /// Recent food log entries
    pub food_logs: RwSignal<Vec<FoodLogRecord>>,
    /// Current meal plan; empty means "no plan yet"
    pub meal_plan: RwSignal<Vec<MealPlanItem>>,
    /// Whether the backend handshake succeeded
    pub backend_ready: RwSignal<bool>,
    /// One-way loading gate: true until the handshake resolves
    pub loading: RwSignal<bool>,
    /// A meal plan request is in flight; further requests are ignored
    pub plan_pending: RwSignal<bool>,
    /// Last successful backend sync timestamp (ms)
    pub last_sync: RwSignal<Option<i64>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// User profile returned by the backend after ID validation
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UserProfile {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub diet: String,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub limitations: Option<String>,
}

/// A single glucose reading for charting. `value` is `None` when the
/// backend sent a malformed or missing reading; the chart skips it.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GlucosePoint {
    pub label: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub target: Option<f64>,
}

/// Aggregated mood frequency for the bar chart
#[derive(Clone, Debug, PartialEq)]
pub struct MoodCount {
    pub mood: String,
    pub count: u32,
}

/// One meal slot in the generated plan
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MealPlanItem {
    pub slot: String,
    pub description: String,
    #[serde(default)]
    pub macro_focus: Option<String>,
}

/// A logged meal with its nutrient estimate
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FoodLogRecord {
    pub description: String,
    #[serde(default)]
    pub nutrients: Option<String>,
    #[serde(default)]
    pub logged_at: Option<String>,
}

/// Per-form submission status, rendered as a visible indicator. Replaces
/// the old alert-based feedback with something testable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

impl GlucosePoint {
    /// Placeholder week of readings shown before the backend sends real
    /// data, mirroring the seeded demo series.
    pub fn sample_week() -> Vec<GlucosePoint> {
        const WEEK: [(&str, f64); 7] = [
            ("Mon", 120.0),
            ("Tue", 155.0),
            ("Wed", 280.0),
            ("Thu", 105.0),
            ("Fri", 90.0),
            ("Sat", 110.0),
            ("Sun", 135.0),
        ];

        WEEK.iter()
            .map(|(day, glucose)| GlucosePoint {
                label: day.to_string(),
                value: Some(*glucose),
                target: Some(100.0),
            })
            .collect()
    }
}

/// Placeholder mood log matching the sample week.
pub fn sample_mood_log() -> Vec<String> {
    ["Happy", "Happy", "Tired", "Happy", "Sad", "Tired", "Excited"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Recompute mood frequencies from the full log. Always a wholesale
/// recomputation, never an incremental update; ordering is first-seen.
pub fn mood_counts(log: &[String]) -> Vec<MoodCount> {
    let mut counts: Vec<MoodCount> = Vec::new();

    for mood in log {
        match counts.iter_mut().find(|c| &c.mood == mood) {
            Some(entry) => entry.count += 1,
            None => counts.push(MoodCount {
                mood: mood.clone(),
                count: 1,
            }),
        }
    }

    counts
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        current_user: create_rw_signal(None),
        // Seeded with sample data so the dashboard is readable before the
        // backend has anything for this session.
        glucose_series: create_rw_signal(GlucosePoint::sample_week()),
        mood_log: create_rw_signal(sample_mood_log()),
        food_logs: create_rw_signal(Vec::new()),
        meal_plan: create_rw_signal(Vec::new()),
        backend_ready: create_rw_signal(false),
        loading: create_rw_signal(true),
        plan_pending: create_rw_signal(false),
        last_sync: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Merge a backend snapshot into the owned state. Empty collections in
    /// the snapshot replace local data too: the backend is authoritative.
    pub fn apply_snapshot(&self, snapshot: crate::api::DashboardSnapshot) {
        self.glucose_series.set(snapshot.glucose);
        self.mood_log.set(snapshot.moods);
        self.food_logs.set(snapshot.food_logs);
        self.meal_plan.set(snapshot.meal_plan);
        self.last_sync.set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_week_has_seven_days() {
        let week = GlucosePoint::sample_week();
        assert_eq!(week.len(), 7);
        assert_eq!(week[2].label, "Wed");
        assert_eq!(week[2].value, Some(280.0));
        assert!(week.iter().all(|p| p.target == Some(100.0)));
    }

    #[test]
    fn test_mood_counts_recomputes_frequencies() {
        let log = sample_mood_log();
        let counts = mood_counts(&log);

        assert_eq!(counts.len(), 4);
        assert_eq!(counts[0], MoodCount { mood: "Happy".to_string(), count: 3 });
        assert_eq!(counts[1], MoodCount { mood: "Tired".to_string(), count: 2 });
        assert_eq!(counts[2], MoodCount { mood: "Sad".to_string(), count: 1 });
        assert_eq!(counts[3], MoodCount { mood: "Excited".to_string(), count: 1 });
    }

    #[test]
    fn test_mood_counts_empty_log() {
        assert!(mood_counts(&[]).is_empty());
    }

    #[test]
    fn test_mood_counts_order_is_first_seen() {
        let log = vec!["Calm".to_string(), "Anxious".to_string(), "Calm".to_string()];
        let counts = mood_counts(&log);
        assert_eq!(counts[0].mood, "Calm");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].mood, "Anxious");
    }
}

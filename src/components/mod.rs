//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chat_panel;
pub mod glucose_chart;
pub mod loading;
pub mod log_forms;
pub mod meal_plan;
pub mod mood_chart;
pub mod nav;
pub mod toast;

pub use chat_panel::ChatPanel;
pub use glucose_chart::GlucoseChart;
pub use loading::Loading;
pub use log_forms::{CgmLogForm, FoodLogForm};
pub use meal_plan::MealPlanDisplay;
pub use mood_chart::MoodChart;
pub use nav::Nav;
pub use toast::Toast;

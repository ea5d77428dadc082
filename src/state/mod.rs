//! State Management
//!
//! Global application state, the frontend action table, and the chat
//! session.

pub mod actions;
pub mod chat;
pub mod global;

pub use actions::{dispatch, ActionError, ActionInvocation};
pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use global::{provide_global_state, GlobalState, GlucosePoint, MealPlanItem, UserProfile};

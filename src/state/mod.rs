// State management module
// Holds the item store and stats cache shared across requests

pub mod app_state;

pub use app_state::AppState;

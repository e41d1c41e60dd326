pub mod app_controller;
pub mod directory;
pub mod feed_controller;
pub mod friends_controller;
pub mod profile_controller;
pub mod search;

// Re-export key types and functions
pub use app_controller::{start_app, App, View};

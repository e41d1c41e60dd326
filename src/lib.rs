pub mod cli;
pub mod controllers;
pub mod error;
pub mod models;
pub mod views;

// Re-exports for convenience
pub use controllers::{start_app, App, View};
pub use models::{Post, Session, User};

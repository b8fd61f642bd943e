//! Authentication plumbing shared by console pages

pub mod error_handler;

pub use error_handler::{clear_auth_error_callback, set_auth_error_callback, trigger_auth_error};

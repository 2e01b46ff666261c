//! Request middleware.

pub mod user_agent;

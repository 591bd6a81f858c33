//! Server Routes

pub mod health;
pub mod posts;

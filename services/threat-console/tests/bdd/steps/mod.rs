//! BDD step definitions for the threat console

pub mod polling_steps;
pub mod switching_steps;

//! Request handlers

pub mod evaluate;
pub mod explanations;

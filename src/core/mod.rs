// src/core/mod.rs — Session state, feature handlers and the arithmetic around them

pub mod history;
pub mod prompts;
pub mod quota;
pub mod report;
pub mod roi;
pub mod session;
pub mod toolkit;
pub mod types;

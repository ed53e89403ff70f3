pub mod answers;
pub mod client;
pub mod config;
pub mod deploy;
pub mod error;
pub mod layout;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod scheduler;
pub mod sizing;
pub mod wordle;
// cmd and reports belong to the `wordles` binary (see main.rs).

pub use crate::error::{WordleError, WordleResult};

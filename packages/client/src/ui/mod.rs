//! Client core, console input and the run loop.

pub mod chat_client;
mod console;
mod runner;

pub use chat_client::{ChatClient, ClientOutcome};
pub use runner::{ClientConfig, run, run_session};

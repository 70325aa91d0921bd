//! pageturn
//!
//! Pagination and gesture dispatch for a reflowable-book reader. Raw input
//! from the content iframe, the native shell and the host surface is
//! classified into navigation intents, which are turned into calls on a
//! [`renderer::Renderer`].
//!
//! The library is pure state machines plus a virtual-clock
//! [`scheduler::Scheduler`]; the binary replays recorded traces through it.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod renderer;
pub mod scheduler;
pub mod source;
pub mod state;

// Re-export main loop integration
pub mod integration;

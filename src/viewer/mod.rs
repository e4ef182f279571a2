//! Autoscroll viewer: line store, pagination, scroll state machine, event
//! sources, renderer, and the loop that ties them together.

pub mod engine;
pub mod events;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod store;

pub use runtime::run_viewer;

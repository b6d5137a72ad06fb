//! Listener and per-request dispatch.

pub mod dispatch;
pub mod listener;

pub use dispatch::Dispatcher;
pub use listener::Server;

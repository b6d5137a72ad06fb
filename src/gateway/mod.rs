//! Interpreter gateway
//!
//! Delegates `.php` resources to an external CGI-style interpreter and
//! relays its output.

pub mod interpreter;
pub mod output;

pub use interpreter::Interpreter;
pub use output::CgiOutput;

//! Filesystem side of request handling.
//!
//! Turns a decoded request path into something servable: a file with a known
//! content type, a redirect to the slash-terminated directory URL, or a
//! directory listing.

pub mod escape;
pub mod listing;
pub mod resolver;
pub mod transfer;

pub use resolver::{Resolution, ResolvedTarget, Resolver};

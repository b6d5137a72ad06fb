//! Lampwick - minimal HTTP/1.1 origin server
//!
//! Serves files from a root directory one connection at a time and hands
//! `.php` resources to an external CGI-style interpreter.

pub mod config;
pub mod error;
pub mod files;
pub mod gateway;
pub mod http;
pub mod server;

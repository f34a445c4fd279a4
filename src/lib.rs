// ABOUTME: Library crate for muxup exposing the session engine for testing and external use

#![allow(missing_docs)]

pub mod config;
pub mod editors;
pub mod error;
pub mod session;
pub mod testing;
pub mod tmux;

pub use error::{MuxError, Result, ShellError};

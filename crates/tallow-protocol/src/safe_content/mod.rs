//! Safe-content wrapper
//!
//! Scans bytes received from a peer for a fixed catalog of
//! prompt-injection patterns and produces a wrapped rendering that
//! marks the content as untrusted data for any downstream consumer.
//! The wrapper never mutates the raw bytes and never feeds its
//! findings back into anything inside the transfer core — it only
//! labels output for whoever reads it next.

pub mod scanner;
pub mod wrapper;

pub use scanner::{scan, Category, Finding};
pub use wrapper::{wrap, SafeContent};

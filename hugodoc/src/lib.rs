//! Internals of the hugodoc command line tool, exposed for integration tests.
//! The reusable processing lives in `hugodoc-html`.
pub mod cli;
pub mod config;
pub mod error;
pub mod utils;

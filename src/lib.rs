//! Command line front end for email2github.

pub mod app;
pub mod config;
pub mod console;
pub mod emails;
pub mod prompt;

//! Persistent studio settings.

pub mod settings;

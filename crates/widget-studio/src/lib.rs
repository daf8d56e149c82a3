//! widget-studio library crate.
//!
//! A command-line editor for chat widget configs.  It is the caller of
//! `widget-core`: where a browser editor would have form fields, a file
//! picker and a preview pane, the studio has subcommands.
//!
//! # Architecture
//!
//! ```text
//! main.rs          clap CLI, logging setup, command dispatch
//!   │
//! application/     EditSession (open → edit → save/export), preview HTML
//!   │  ports: ConfigDocument, ImageSource
//!   ▼
//! infrastructure/  JsonFile, FsImageSource, TOML settings
//! ```
//!
//! # Layer rules
//!
//! - `application` depends on `widget-core` and its own ports only.
//! - `infrastructure` implements the ports and owns all file-system access.

pub mod application;
pub mod infrastructure;

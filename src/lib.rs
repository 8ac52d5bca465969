//! # lockcheck Library
//!
//! Internal library for the lockcheck binary.
//!
//! This library exists to enable testing of the internals and to keep CLI
//! dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **State**: `state` owns the storage slot (`SlotStorage`, `TimestampStore`)
//!   and derives the `DisplayState`
//! - **Presenter**: `presenter` turns user actions into store writes and
//!   display/modal updates
//! - **Commands**: `commands` holds the CLI subcommands and the interactive screen
//! - **Configuration**: `config` for the optional TOML settings file
//! - **Infrastructure**: logging, time source, argument parsing, utilities

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod presenter;
pub mod state;
pub mod time_source;
pub mod utils;

pub use presenter::Presenter;

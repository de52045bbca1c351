//! Library crate root for the qutebrowser profile manager.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod config;
pub mod desktop;
pub mod launch;
pub mod menu;
pub mod profile;

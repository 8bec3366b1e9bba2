//! Navigation controller for multi-step "new project" / "add module" wizards.
//!
//! A wizard is an ordered set of steps, optionally grouped into modes chosen
//! on a root page. The [`controller`] moves between visible steps, validates
//! and commits them, and finishes or cancels the wizard.
//!
//! - **[`core`]**: Pure, deterministic logic (sequences, derived paths, SDK
//!   resolution, script invariants). No I/O.
//! - **[`io`]**: Config, script and scaffolding files.
//!
//! [`script`], [`scripted`] and [`run`] drive the controller from a TOML
//! script for the `wizard` binary.

pub mod context;
pub mod controller;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod mode;
pub mod run;
pub mod script;
pub mod scripted;
pub mod step;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod view;

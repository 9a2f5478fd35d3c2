//! cfctl: Cloud Application Platform Client
//!
//! Command-line client that tracks a target (controller endpoint, organization,
//! space) and runs verbs against the platform controller. Every verb passes
//! through the same pipeline: parse, requirement gating, execution.

pub mod api;
pub mod cli;
pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod net;
pub mod registry;
pub mod requirements;
pub mod runner;
pub mod terminal;
pub mod testhelpers;

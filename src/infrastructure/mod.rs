//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without
//! containing business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root wiring the catalog to its adapters
//! - [`clock`] - Wall-clock implementation of the clock port
//! - [`config`] - Configuration loading, validation and logging setup

pub mod bootstrap;
pub mod clock;
pub mod config;

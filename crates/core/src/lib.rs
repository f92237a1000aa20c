//! `platformd-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod platform;

pub use platform::{NewPlatform, Platform};

//! Shared utilities for the drive core.

pub mod tick_clock;

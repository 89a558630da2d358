//! # Seatplan Core
//!
//! Core types and utilities shared by the Seatplan crates.
//! Provides closed-interval math used by the geometry engine and the error
//! types returned at the editing boundary.

pub mod error;
pub mod math;

pub use error::{Error, InputError, Result};
pub use math::Interval;

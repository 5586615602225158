//! Core domain models for liftlog.
//!
//! This module contains the record types that make up a training plan and
//! its logged history, plus the progressive-overload suggestion rule. These
//! are pure domain models with no I/O dependencies.

pub mod id;
pub mod progression;
pub mod records;

pub use id::new_id;
pub use progression::{PROGRESSION_FACTOR, suggest, suggested_next_weight};
pub use records::{Day, Exercise, LastWeight, Program, Session, SetEntry, Week};

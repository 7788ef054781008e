//! Scoring rules for the match ledger.
//!
//! Pure functions over counters. Kept apart from state storage so the
//! reducer and the contract checks can share them.

pub mod overs;
pub mod result;

pub use overs::{balls_remaining, can_bowl, over_index};
pub use result::Chase;

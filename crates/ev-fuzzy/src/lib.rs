//! `ev-fuzzy` — fuzzy-logic risk scoring for road segments.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`membership`] | `Triangle`, `Universe`, `interp_membership`              |
//! | [`variable`]   | `LinguisticVariable` (LOW/MEDIUM/HIGH), `Grades`         |
//! | [`model`]      | `FuzzyCostModel`, `RuleOutputs`, rule ceilings           |
//!
//! # Output range
//!
//! The crisp cost is the maximum of three capped rule outputs, so it always
//! lies in `[0, 0.9]`, never the full unit interval.

pub mod membership;
pub mod model;
pub mod variable;

#[cfg(test)]
mod tests;

pub use membership::{interp_membership, Triangle, Universe};
pub use model::{
    FuzzyCostModel, RuleOutputs, HIGH_RISK_CEILING, LOW_RISK_CEILING, MEDIUM_RISK_CEILING,
};
pub use variable::{Grades, LinguisticVariable};

//! Deduces the hidden envelope of a Clue-style card game from the facts and
//! hints one player observes.

pub mod core;
pub mod deal;
pub mod deduce;
pub mod record;

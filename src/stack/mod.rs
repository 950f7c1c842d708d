// src/stack/mod.rs
// =============================================================================
// This module decides which languages make up the "tech stack".
//
// Submodules:
// - badges: The fixed language -> badge table and the skip list
// - tally: Sums bytes across repositories, filters by share, ranks
// =============================================================================

mod badges;
mod tally;

pub use badges::badge_for;
pub use tally::{aggregate, rank, LanguageShare, DEFAULT_MIN_PERCENT};

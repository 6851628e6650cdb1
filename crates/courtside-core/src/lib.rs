// Library root: fixture loading, the statistical derivation layer, and the
// play-by-play views built on top of it.

pub mod config;
pub mod fixtures;
pub mod pbp;
pub mod report;
pub mod roster;
pub mod stats;

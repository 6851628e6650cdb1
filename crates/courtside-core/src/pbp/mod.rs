// Play-by-play presentation data: periods, translated timeline and the shot
// chart.

pub mod period;
pub mod shots;
pub mod timeline;
pub mod translate;

pub use period::Period;
pub use shots::{extract_shots, Shot, ShotChart};
pub use timeline::{build_timeline, clock_seconds, EventSide, PeriodLog, TimelineEntry};
pub use translate::{translate_action, Substitution};

//! Cycle Projection Engine
//!
//! Derives phase, period status, fertility window and calendar tags from a
//! [`CycleProfile`] and a caller-supplied `today`.
//!
//! Key principles:
//! - One resolver: cycle `n` starts at `anchor + n * cycle_length`, and the
//!   cycle containing a date is found by floor division
//! - Pure functions of `(profile, today, [month])`, no clock, no caching
//! - Invalid profiles fail before any date is computed

mod calendar;
mod date_math;
mod error;
mod fertility;
mod month;
mod phase;
mod profile;
mod resolver;
mod status;

pub use calendar::{calendar_tags, day_tag, tag_range, CalendarHorizon, DayTag, TaggedDate, TaggedDay};
pub use date_math::DateSpan;
pub use error::{CycleError, ProfileIssue};
pub use fertility::{fertility_window, FertilityWindow};
pub use month::YearMonth;
pub use phase::{classify_phase, Phase, PhaseLabel};
pub use profile::{CycleProfile, ValidProfile};
pub use resolver::{resolve_cycle, CyclePosition};
pub use status::{is_in_period, next_period_date, period_status, PeriodStatus};

//! Calendar tagging: which days of a month are period or fertile days.
//!
//! Only cycles within a horizon around the anchor and `today` are
//! projected. Within that horizon, the cycles that can touch the requested
//! span are found in closed form, so cost depends on the span length only.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::date_math::{ceil_div, days_between, floor_div, shift_months, DateSpan};
use super::error::CycleError;
use super::month::YearMonth;
use super::profile::{CycleProfile, ValidProfile};
use super::resolver::{FERTILE_END_OFFSET_DAYS, FERTILE_START_OFFSET_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayTag {
    Period,
    Fertile,
    None,
}

/// A tagged day within a display month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDay {
    pub day: u32,
    pub tag: DayTag,
}

/// A tagged day within an arbitrary span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDate {
    pub date: NaiveDate,
    pub tag: DayTag,
}

// ---------------------------------------------------------------------------
/// Projection horizon
// ---------------------------------------------------------------------------

/// Bounds the projected cycles: those starting on or after
/// `anchor - months_before` and strictly before `today + months_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarHorizon {
    pub months_before: u32,
    pub months_after: u32,
}

impl Default for CalendarHorizon {
    fn default() -> Self {
        Self {
            months_before: 2,
            months_after: 6,
        }
    }
}

impl CalendarHorizon {
    pub fn new(months_before: u32, months_after: u32) -> Self {
        Self {
            months_before,
            months_after,
        }
    }

    /// Cycle indices whose start falls inside the horizon.
    fn index_bounds(
        &self,
        profile: &ValidProfile,
        today: NaiveDate,
    ) -> Result<RangeInclusive<i64>, CycleError> {
        let lower = shift_months(profile.anchor(), -month_offset(self.months_before))?;
        let upper = shift_months(today, month_offset(self.months_after))?;
        let cycle_length = profile.cycle_length();

        let first = ceil_div(days_between(profile.anchor(), lower), cycle_length);
        let last = ceil_div(days_between(profile.anchor(), upper), cycle_length) - 1;
        Ok(first..=last)
    }
}

fn month_offset(months: u32) -> i32 {
    i32::try_from(months).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
/// Tagging
// ---------------------------------------------------------------------------

/// Period and fertile days of `month`, ascending by day, one entry per day.
/// Days not listed are [`DayTag::None`].
pub fn calendar_tags(
    profile: &CycleProfile,
    month: YearMonth,
    today: NaiveDate,
    horizon: CalendarHorizon,
) -> Result<Vec<TaggedDay>, CycleError> {
    let valid = profile.validate()?;
    let tags = tag_valid_span(&valid, month.span(), today, horizon)?;
    Ok(tags
        .into_iter()
        .map(|(date, tag)| TaggedDay {
            day: date.day(),
            tag,
        })
        .collect())
}

/// Like [`calendar_tags`] over an inclusive date range that may cross months.
pub fn tag_range(
    profile: &CycleProfile,
    first: NaiveDate,
    last: NaiveDate,
    today: NaiveDate,
    horizon: CalendarHorizon,
) -> Result<Vec<TaggedDate>, CycleError> {
    let valid = profile.validate()?;
    let Some(span) = DateSpan::new(first, last) else {
        return Ok(Vec::new());
    };
    let tags = tag_valid_span(&valid, span, today, horizon)?;
    Ok(tags
        .into_iter()
        .map(|(date, tag)| TaggedDate { date, tag })
        .collect())
}

/// Tag of a single day.
pub fn day_tag(
    profile: &CycleProfile,
    date: NaiveDate,
    today: NaiveDate,
    horizon: CalendarHorizon,
) -> Result<DayTag, CycleError> {
    let tags = tag_range(profile, date, date, today, horizon)?;
    Ok(tags.first().map_or(DayTag::None, |tagged| tagged.tag))
}

fn tag_valid_span(
    profile: &ValidProfile,
    span: DateSpan,
    today: NaiveDate,
    horizon: CalendarHorizon,
) -> Result<BTreeMap<NaiveDate, DayTag>, CycleError> {
    let candidates = intersecting_indices(profile, span, horizon.index_bounds(profile, today)?);
    debug!(
        first = %span.first(),
        last = %span.last(),
        candidates = ?candidates,
        "tagging calendar span"
    );

    let mut tags = BTreeMap::new();
    for index in candidates {
        if let Some(fertile) = profile.fertile_span(index)?.clip(span) {
            for date in fertile.days() {
                tags.entry(date).or_insert(DayTag::Fertile);
            }
        }
        if let Some(period) = profile.period_span(index)?.clip(span) {
            for date in period.days() {
                // Period wins over a fertile band from a neighbouring cycle
                tags.insert(date, DayTag::Period);
            }
        }
    }
    Ok(tags)
}

/// Narrows `bounds` to the cycles whose period or fertile days can land in
/// `span`.
///
/// Relative to its own start, cycle `n` touches days from
/// `min(0, L - 16)` (fertile band of a short cycle reaching back) through
/// `max(P - 1, L - 12)`.
fn intersecting_indices(
    profile: &ValidProfile,
    span: DateSpan,
    bounds: RangeInclusive<i64>,
) -> RangeInclusive<i64> {
    let cycle_length = profile.cycle_length();
    let earliest = 0_i64.min(cycle_length - FERTILE_START_OFFSET_DAYS);
    let latest = (profile.period_length() - 1).max(cycle_length - FERTILE_END_OFFSET_DAYS);

    let from_anchor_first = days_between(profile.anchor(), span.first());
    let from_anchor_last = days_between(profile.anchor(), span.last());
    let first = ceil_div(from_anchor_first - latest, cycle_length);
    let last = floor_div(from_anchor_last - earliest, cycle_length);

    first.max(*bounds.start())..=last.min(*bounds.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn standard() -> CycleProfile {
        CycleProfile::new(date(2024, 1, 1), 5, 28)
    }

    fn days_with(tags: &[TaggedDay], tag: DayTag) -> Vec<u32> {
        tags.iter().filter(|t| t.tag == tag).map(|t| t.day).collect()
    }

    #[test]
    fn test_march_includes_boundary_tail_and_fertile_band() {
        let march = YearMonth::new(2024, 3).unwrap();
        let tags = calendar_tags(&standard(), march, date(2024, 1, 20), CalendarHorizon::default())
            .unwrap();

        // Period starting 2024-02-26 spills one day into March
        assert_eq!(days_with(&tags, DayTag::Period), vec![1, 25, 26, 27, 28, 29]);
        // Fertile band before the 2024-03-25 start
        assert_eq!(days_with(&tags, DayTag::Fertile), vec![9, 10, 11, 12, 13]);
    }

    #[test]
    fn test_january_from_anchor() {
        let jan = YearMonth::new(2024, 1).unwrap();
        let tags = calendar_tags(&standard(), jan, date(2024, 1, 20), CalendarHorizon::default())
            .unwrap();
        assert_eq!(days_with(&tags, DayTag::Period), vec![1, 2, 3, 4, 5, 29, 30, 31]);
        assert_eq!(days_with(&tags, DayTag::Fertile), vec![13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_output_is_sorted_and_unique() {
        let feb = YearMonth::new(2024, 2).unwrap();
        let tags = calendar_tags(&standard(), feb, date(2024, 1, 20), CalendarHorizon::default())
            .unwrap();
        let days: Vec<u32> = tags.iter().map(|t| t.day).collect();
        let mut sorted = days.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(days, sorted);
        // Jan 29 period spills to Feb 1-2, fertile before Feb 26, period Feb 26-29
        assert_eq!(days_with(&tags, DayTag::Period), vec![1, 2, 26, 27, 28, 29]);
        assert_eq!(days_with(&tags, DayTag::Fertile), vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_period_takes_precedence_over_fertile() {
        // L = 14: the fertile band of cycle n is [start(n) - 2, start(n) + 2],
        // overlapping the first three days of the next period.
        let profile = CycleProfile::new(date(2024, 1, 1), 5, 14);
        let jan = YearMonth::new(2024, 1).unwrap();
        let tags = calendar_tags(&profile, jan, date(2024, 1, 1), CalendarHorizon::default())
            .unwrap();

        let tag_of = |day: u32| tags.iter().find(|t| t.day == day).map(|t| t.tag);
        // Cycle 1 starts Jan 15
        assert_eq!(tag_of(13), Some(DayTag::Fertile));
        assert_eq!(tag_of(14), Some(DayTag::Fertile));
        assert_eq!(tag_of(15), Some(DayTag::Period));
        assert_eq!(tag_of(17), Some(DayTag::Period));
        assert_eq!(tag_of(19), Some(DayTag::Period));
        assert_eq!(tag_of(20), None);

        let fifteens = tags.iter().filter(|t| t.day == 15).count();
        assert_eq!(fifteens, 1);
    }

    #[test]
    fn test_period_boundary_day_tags() {
        let profile = standard();
        let horizon = CalendarHorizon::default();
        let today = date(2024, 1, 20);
        // day_in_cycle == period_length
        assert_eq!(day_tag(&profile, date(2024, 1, 5), today, horizon).unwrap(), DayTag::Period);
        // day_in_cycle == period_length + 1
        assert_eq!(day_tag(&profile, date(2024, 1, 6), today, horizon).unwrap(), DayTag::None);
    }

    #[test]
    fn test_horizon_limits_projection() {
        let profile = standard();
        let today = date(2024, 1, 20);
        // today + 6 months = 2024-07-20, last cycle start before it is 2024-07-15
        let july = YearMonth::new(2024, 7).unwrap();
        let tags = calendar_tags(&profile, july, today, CalendarHorizon::default()).unwrap();
        assert_eq!(days_with(&tags, DayTag::Period), vec![15, 16, 17, 18, 19]);
        assert_eq!(days_with(&tags, DayTag::Fertile), vec![1, 2, 3, 27, 28, 29, 30, 31]);

        // The 2024-08-12 cycle is past the horizon
        let aug = YearMonth::new(2024, 8).unwrap();
        let tags = calendar_tags(&profile, aug, today, CalendarHorizon::default()).unwrap();
        assert!(tags.is_empty());

        let wider = CalendarHorizon::new(2, 12);
        let tags = calendar_tags(&profile, aug, today, wider).unwrap();
        assert_eq!(days_with(&tags, DayTag::Period), vec![12, 13, 14, 15, 16]);
    }

    #[test]
    fn test_horizon_before_anchor() {
        let profile = standard();
        let today = date(2024, 1, 20);
        // anchor - 2 months = 2023-11-01; cycles start 2023-11-06, 2023-12-04
        let nov = YearMonth::new(2023, 11).unwrap();
        let tags = calendar_tags(&profile, nov, today, CalendarHorizon::default()).unwrap();
        assert_eq!(days_with(&tags, DayTag::Period), vec![6, 7, 8, 9, 10]);

        let oct = YearMonth::new(2023, 10).unwrap();
        let tags = calendar_tags(&profile, oct, today, CalendarHorizon::default()).unwrap();
        // 2023-10-09 starts before the horizon, so its period and fertile
        // days are dropped with it
        assert!(tags.is_empty());
    }

    #[test]
    fn test_month_far_outside_horizon_is_empty() {
        let tags = calendar_tags(
            &standard(),
            YearMonth::new(2030, 5).unwrap(),
            date(2024, 1, 20),
            CalendarHorizon::default(),
        )
        .unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_tag_range_matches_month_concatenation() {
        let profile = standard();
        let today = date(2024, 1, 20);
        let horizon = CalendarHorizon::default();

        let mut concatenated = Vec::new();
        let mut month = YearMonth::new(2023, 12).unwrap();
        while month <= YearMonth::new(2024, 5).unwrap() {
            for tagged in calendar_tags(&profile, month, today, horizon).unwrap() {
                concatenated.push(TaggedDate {
                    date: date(month.year(), month.month(), tagged.day),
                    tag: tagged.tag,
                });
            }
            month = month.succ().unwrap();
        }

        let whole = tag_range(&profile, date(2023, 12, 1), date(2024, 5, 31), today, horizon).unwrap();
        assert_eq!(concatenated, whole);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let tags = tag_range(
            &standard(),
            date(2024, 2, 1),
            date(2024, 1, 1),
            date(2024, 1, 20),
            CalendarHorizon::default(),
        )
        .unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_invalid_profile_checked_before_tagging() {
        let profile = CycleProfile::new(date(2024, 1, 1), 5, 0);
        let result = calendar_tags(
            &profile,
            YearMonth::new(2024, 3).unwrap(),
            date(2024, 1, 20),
            CalendarHorizon::default(),
        );
        assert!(matches!(result, Err(CycleError::InvalidProfile(_))));
    }

    #[test]
    fn test_serialized_tags() {
        let tagged = TaggedDay {
            day: 9,
            tag: DayTag::Fertile,
        };
        let json = serde_json::to_value(tagged).unwrap();
        assert_eq!(json["day"], 9);
        assert_eq!(json["tag"], "fertile");
    }
}

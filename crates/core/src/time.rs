// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time range sub-locators.
//!
//! A time dimension value is itself a small locator naming a reference date
//! and a comparison:
//!
//! ```text
//! 2020-01-10T00:00:00Z                        # after this instant
//! -1d                                         # after one day ago
//! condition:before,date:20200110T000000+0000  # before, compact form
//! date:2020-01-10,shift:-1d                   # after 2020-01-09T00:00:00Z
//! build:(id:42),includeInitial:true           # at or after build 42's time
//! ```
//!
//! Relative offsets are `+` or `-` followed by one or more `<integer><unit>`
//! groups with units `ms`, `s`, `m`, `h`, `d` and `w` (`-1d12h`).

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, SubsecRound, TimeDelta, Utc};

use crate::clock::{ClockSource, SystemClock};
use crate::error::{Error, Result};
use crate::filter::AndedFilter;
use crate::finder::Finder;
use crate::locator::{DimensionSet, Locator, SINGLE_VALUE_DIMENSION};

pub const DATE: &str = "date";
pub const BUILD: &str = "build";
pub const CONDITION: &str = "condition";
pub const INCLUDE_INITIAL: &str = "includeInitial";
pub const SHIFT: &str = "shift";

/// Comparison between a candidate date and the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateCondition {
    Equals,
    Before,
    #[default]
    After,
}

impl DateCondition {
    pub const ALL: [DateCondition; 3] = [
        DateCondition::Equals,
        DateCondition::Before,
        DateCondition::After,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateCondition::Equals => "equals",
            DateCondition::Before => "before",
            DateCondition::After => "after",
        }
    }

    /// Parses a lowercase condition name.
    pub fn parse(text: &str) -> Result<Self> {
        let wanted = text.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                Error::bad_value(
                    CONDITION,
                    text,
                    "supported conditions are: equals, before, after",
                )
            })
    }

    /// Compares `candidate` with `reference`.
    ///
    /// With no reference, `before` holds for every candidate while `equals`
    /// and `after` hold for none.
    pub fn matches(self, reference: Option<DateTime<Utc>>, candidate: DateTime<Utc>) -> bool {
        match (self, reference) {
            (DateCondition::Before, None) => true,
            (_, None) => false,
            (DateCondition::Equals, Some(reference)) => candidate == reference,
            (DateCondition::Before, Some(reference)) => candidate < reference,
            (DateCondition::After, Some(reference)) => candidate > reference,
        }
    }

    /// True when matching candidates are all at or after the reference.
    fn bounds_from_below(self) -> bool {
        matches!(self, DateCondition::Equals | DateCondition::After)
    }
}

impl fmt::Display for DateCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in time plus whether it was given with whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWithPrecision {
    pub time: DateTime<Utc>,
    pub seconds_precision: bool,
}

impl TimeWithPrecision {
    pub fn new(time: DateTime<Utc>, seconds_precision: bool) -> Self {
        TimeWithPrecision {
            time,
            seconds_precision,
        }
    }

    /// Parses an absolute time, or a relative offset from `now`.
    ///
    /// Absolute times without a fractional second are seconds-precision.
    pub fn parse(text: &str, now: DateTime<Utc>) -> Result<Self> {
        let text = text.trim();
        if text.starts_with(['+', '-']) {
            let offset = parse_offset(DATE, text)?;
            return shift_by(now, offset, DATE, text).map(|time| TimeWithPrecision::new(time, false));
        }

        let seconds_precision = !text.contains('.');
        if let Ok(time) = DateTime::parse_from_rfc3339(text) {
            return Ok(TimeWithPrecision::new(time.with_timezone(&Utc), seconds_precision));
        }
        if let Ok(time) = DateTime::parse_from_str(text, "%Y%m%dT%H%M%S%.f%z") {
            return Ok(TimeWithPrecision::new(time.with_timezone(&Utc), seconds_precision));
        }
        if let Some(time) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(TimeWithPrecision::new(time.and_utc(), true));
        }
        Err(Error::bad_value(
            DATE,
            text,
            "expected a time like 2020-01-10T00:00:00Z, 20200110T000000+0000, 2020-01-10 or a relative offset like -1d",
        ))
    }

    fn shifted(self, offset: TimeDelta, text: &str) -> Result<Self> {
        let time = shift_by(self.time, offset, SHIFT, text)?;
        Ok(TimeWithPrecision::new(time, self.seconds_precision))
    }
}

/// Parses a signed relative offset such as `-1d` or `+3h30m`.
///
/// # Errors
///
/// Returns [`Error::BadLocatorValue`] if the sign is missing, a group lacks
/// its number or unit, or a unit is unknown.
pub fn parse_relative_time(text: &str) -> Result<TimeDelta> {
    parse_offset(SHIFT, text)
}

fn parse_offset(dimension: &str, text: &str) -> Result<TimeDelta> {
    let trimmed = text.trim();
    let (negative, body) = if let Some(body) = trimmed.strip_prefix('-') {
        (true, body)
    } else if let Some(body) = trimmed.strip_prefix('+') {
        (false, body)
    } else {
        return Err(Error::bad_value(dimension, text, "should start with '+' or '-'"));
    };
    if body.is_empty() {
        return Err(Error::bad_value(dimension, text, "missing offset after the sign"));
    }

    let mut total = TimeDelta::zero();
    let mut rest = body;
    while !rest.is_empty() {
        let (number, unit, tail) = split_number_unit(rest)
            .ok_or_else(|| Error::bad_value(dimension, text, "each offset must start with a number"))?;
        let amount: i64 = number
            .parse()
            .map_err(|_| Error::bad_value(dimension, text, format!("invalid number '{number}'")))?;
        let delta = unit_delta(amount, unit)
            .ok_or_else(|| {
                Error::bad_value(
                    dimension,
                    text,
                    format!("unknown unit '{unit}', valid units: ms, s, m, h, d, w"),
                )
            })?;
        total = total
            .checked_add(&delta)
            .ok_or_else(|| Error::bad_value(dimension, text, "offset is out of range"))?;
        rest = tail;
    }
    Ok(if negative { -total } else { total })
}

/// Splits `12h30m` into `("12", "h", "30m")`.
fn split_number_unit(s: &str) -> Option<(&str, &str, &str)> {
    let num_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if num_end == 0 {
        return None;
    }
    let rest = &s[num_end..];
    let unit_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
    Some((&s[..num_end], &rest[..unit_end], &rest[unit_end..]))
}

fn unit_delta(amount: i64, unit: &str) -> Option<TimeDelta> {
    match unit {
        "ms" => TimeDelta::try_milliseconds(amount),
        "s" => TimeDelta::try_seconds(amount),
        "m" => TimeDelta::try_minutes(amount),
        "h" => TimeDelta::try_hours(amount),
        "d" => TimeDelta::try_days(amount),
        "w" => TimeDelta::try_weeks(amount),
        _ => None,
    }
}

fn shift_by(time: DateTime<Utc>, offset: TimeDelta, dimension: &str, text: &str) -> Result<DateTime<Utc>> {
    time.checked_add_signed(offset)
        .ok_or_else(|| Error::bad_value(dimension, text, "resulting time is out of range"))
}

/// A condition bound to its reference date, with the optional widenings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMatcher {
    pub condition: DateCondition,
    pub reference: Option<DateTime<Utc>>,
    /// Also accept candidates equal to the reference.
    pub include_initial: bool,
    /// Truncate candidates to whole seconds before comparing.
    pub seconds_precision: bool,
}

impl TimeMatcher {
    pub fn new(condition: DateCondition, reference: Option<DateTime<Utc>>) -> Self {
        TimeMatcher {
            condition,
            reference,
            include_initial: false,
            seconds_precision: false,
        }
    }

    pub fn with_include_initial(mut self, include_initial: bool) -> Self {
        self.include_initial = include_initial;
        self
    }

    pub fn with_seconds_precision(mut self, seconds_precision: bool) -> Self {
        self.seconds_precision = seconds_precision;
        self
    }

    pub fn matches(&self, candidate: DateTime<Utc>) -> bool {
        let candidate = if self.seconds_precision {
            candidate.trunc_subsecs(0)
        } else {
            candidate
        };
        self.condition.matches(self.reference, candidate)
            || (self.include_initial && self.reference == Some(candidate))
    }
}

/// A compiled time sub-locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimeCondition {
    limiting_date: Option<TimeWithPrecision>,
    limiting_since_date: Option<TimeWithPrecision>,
    matcher: TimeMatcher,
}

impl ParsedTimeCondition {
    pub fn matches(&self, candidate: DateTime<Utc>) -> bool {
        self.matcher.matches(candidate)
    }

    /// The resolved reference date, if any.
    pub fn limiting_date(&self) -> Option<DateTime<Utc>> {
        self.limiting_date.map(|d| d.time)
    }

    /// The reference date when every match is at or after it.
    ///
    /// A caller scanning candidates newest first may stop once candidate
    /// dates fall below this.
    pub fn limiting_since_date(&self) -> Option<DateTime<Utc>> {
        self.limiting_since_date.map(|d| d.time)
    }

    pub fn matcher(&self) -> &TimeMatcher {
        &self.matcher
    }
}

/// The ANDed time predicates of one dimension and their combined limiting date.
pub struct FilterAndLimitingDate<'a, T> {
    pub filter: AndedFilter<'a, T>,
    /// Latest of the individual limiting dates.
    pub limiting_date: Option<DateTime<Utc>>,
}

/// Resolves the `build` dimension of a time sub-locator to a date.
pub trait TimeReference {
    /// Finds the single entity named by `locator` and returns its date.
    fn resolve(&self, locator: &str) -> Result<Option<DateTime<Utc>>>;
}

/// A [`TimeReference`] looking entities up through a finder.
pub struct FinderTimeReference<'f, F: Finder> {
    finder: &'f F,
    extractor: fn(&F::Item) -> Option<DateTime<Utc>>,
}

impl<'f, F: Finder> FinderTimeReference<'f, F> {
    pub fn new(finder: &'f F, extractor: fn(&F::Item) -> Option<DateTime<Utc>>) -> Self {
        FinderTimeReference { finder, extractor }
    }
}

impl<F: Finder> TimeReference for FinderTimeReference<'_, F> {
    fn resolve(&self, locator: &str) -> Result<Option<DateTime<Utc>>> {
        let item = self.finder.get_item(locator)?;
        Ok((self.extractor)(&item))
    }
}

/// Parses time sub-locators against a clock.
#[derive(Clone)]
pub struct TimeCondition {
    clock: Arc<dyn ClockSource>,
}

impl Default for TimeCondition {
    fn default() -> Self {
        TimeCondition::new(Arc::new(SystemClock))
    }
}

impl fmt::Debug for TimeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeCondition").finish_non_exhaustive()
    }
}

impl TimeCondition {
    pub fn new(clock: Arc<dyn ClockSource>) -> Self {
        TimeCondition { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Parses a time sub-locator that may not reference entities.
    pub fn get_time_condition(&self, text: &str) -> Result<ParsedTimeCondition> {
        self.get_time_condition_with(text, None)
    }

    /// Parses a time sub-locator; `reference` enables the `build` dimension.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::BadLocatorValue`] for unparsable dates, offsets or
    /// conditions, when no reference date is named for `equals` or `after`,
    /// and when a referenced entity has no date. Unknown dimensions fail the
    /// usual way.
    pub fn get_time_condition_with(
        &self,
        text: &str,
        reference: Option<&dyn TimeReference>,
    ) -> Result<ParsedTimeCondition> {
        let text = text.trim();
        let mut declared = DimensionSet::new([DATE, CONDITION, INCLUDE_INITIAL, SINGLE_VALUE_DIMENSION])
            .with_hidden([SHIFT]);
        if reference.is_some() {
            declared = declared.with_supported(BUILD);
        }
        // Bare times contain colons, so they are taken whole rather than
        // split into dimensions.
        let mut locator = if text.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
            Locator::from_single_value(text)
        } else {
            Locator::parse(text, Some(&declared), None)?
        };

        let now = self.clock.now();
        let base = match locator.get_single_value() {
            Some(value) => Some(TimeWithPrecision::parse(&value, now)?),
            None => self.resolve_base(&mut locator, reference, now)?,
        };

        let condition = match locator.get_single_dimension_value(CONDITION)? {
            Some(name) => DateCondition::parse(&name)?,
            None => DateCondition::default(),
        };
        let include_initial = locator
            .get_single_dimension_value_as_bool(INCLUDE_INITIAL)?
            .unwrap_or(false);
        locator.check_locator_fully_processed()?;

        if base.is_none() && condition != DateCondition::Before {
            let expected = if reference.is_some() {
                "should contain 'date' or 'build' dimension, or be a relative offset starting with '-' or '+'"
            } else {
                "should contain 'date' dimension, or be a relative offset starting with '-' or '+'"
            };
            return Err(Error::bad_value(DATE, text, expected));
        }

        let matcher = TimeMatcher::new(condition, base.map(|b| b.time))
            .with_include_initial(include_initial)
            .with_seconds_precision(base.is_some_and(|b| b.seconds_precision));
        Ok(ParsedTimeCondition {
            limiting_date: base,
            limiting_since_date: base.filter(|_| condition.bounds_from_below()),
            matcher,
        })
    }

    fn resolve_base(
        &self,
        locator: &mut Locator,
        reference: Option<&dyn TimeReference>,
        now: DateTime<Utc>,
    ) -> Result<Option<TimeWithPrecision>> {
        let shift = locator.get_single_dimension_value(SHIFT)?;
        let base = if let Some(date) = locator.get_single_dimension_value(DATE)? {
            Some(TimeWithPrecision::parse(&date, now)?)
        } else if let Some(build) = locator.get_single_dimension_value(BUILD)? {
            let time = match reference {
                Some(reference) => reference.resolve(&build)?,
                None => None,
            };
            let time = time.ok_or_else(|| {
                Error::bad_value(BUILD, &build, "cannot determine time from the build found by this locator")
            })?;
            Some(TimeWithPrecision::new(time, false))
        } else if shift.is_some() {
            Some(TimeWithPrecision::new(now, false))
        } else {
            None
        };

        match (base, shift) {
            (Some(base), Some(shift)) => {
                let offset = parse_offset(SHIFT, &shift)?;
                Ok(Some(base.shifted(offset, &shift)?))
            }
            (base, _) => Ok(base),
        }
    }

    /// Compiles every sub-locator of a time dimension into one ANDed filter.
    ///
    /// Returns `Ok(None)` when the dimension is absent. Items whose extracted
    /// date is missing never match.
    ///
    /// # Errors
    ///
    /// Sub-locator errors are wrapped in [`Error::TimeCondition`] naming the
    /// dimension and the offending text.
    pub fn process_time_conditions<'a, T, E>(
        &self,
        dimension: &str,
        locator: &mut Locator,
        extractor: E,
        reference: Option<&dyn TimeReference>,
    ) -> Result<Option<FilterAndLimitingDate<'a, T>>>
    where
        T: 'a,
        E: Fn(&T) -> Option<DateTime<Utc>> + Clone + 'a,
    {
        let texts = locator.get_dimension_value(dimension);
        if texts.is_empty() {
            return Ok(None);
        }

        let mut filter = AndedFilter::new();
        let mut limiting_date = None;
        for text in texts {
            let parsed = self
                .get_time_condition_with(&text, reference)
                .map_err(|source| Error::TimeCondition {
                    dimension: dimension.to_string(),
                    locator: text.clone(),
                    source: Box::new(source),
                })?;
            limiting_date = max_date(limiting_date, parsed.limiting_since_date());
            let extractor = extractor.clone();
            filter.add(move |item: &T| extractor(item).is_some_and(|date| parsed.matches(date)));
        }

        tracing::debug!(
            dimension,
            conditions = filter.len(),
            limiting_date = ?limiting_date,
            "compiled time conditions"
        );
        Ok(Some(FilterAndLimitingDate {
            filter,
            limiting_date,
        }))
    }
}

/// The later of two optional dates.
pub fn max_date(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;

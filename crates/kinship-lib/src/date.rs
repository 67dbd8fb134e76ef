// ABOUTME: Calendar date triple used for births and deaths
// ABOUTME: Provides (year, month, day) ordering and the single-carry month shift

use crate::KinshipError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A day/month/year triple.
///
/// No calendar validation is done: `31/2/2000` is a legal value. A year of
/// zero marks an unrecorded date, which is how a living person's death is
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Date {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl Date {
    /// The `0 0 0` sentinel for "no recorded date"
    pub const UNRECORDED: Date = Date {
        day: 0,
        month: 0,
        year: 0,
    };

    pub const fn new(day: i32, month: i32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Whether this date carries a real year (year 0 means absent)
    pub fn is_recorded(&self) -> bool {
        self.year != 0
    }

    /// Compare as negative, zero, or positive, ordering by year, then month, then day
    pub fn compare(&self, other: &Date) -> i32 {
        self.cmp(other) as i32
    }

    /// Shift the month forward by `months`.
    ///
    /// The year carries at most once, so the result only stays within
    /// 1..=12 for `months <= 12` and a starting month inside 1..=12. The day
    /// is left as is. Out-of-range values saturate at the `i32` bounds.
    pub fn add_months(self, months: u32) -> Date {
        let months = i32::try_from(months).unwrap_or(i32::MAX);
        let mut shifted = self;
        shifted.month = shifted.month.saturating_add(months);
        if shifted.month > 12 {
            shifted.month -= 12;
            shifted.year = shifted.year.saturating_add(1);
        }
        shifted
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

/// Parses `"<day> <month> <year>"`, the layout used on `Birth:`/`Death:` lines
impl FromStr for Date {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split_whitespace()
            .map(|field| {
                field
                    .parse::<i32>()
                    .map_err(|_| KinshipError::InvalidDate(s.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match fields.as_slice() {
            [day, month, year] => Ok(Date::new(*day, *month, *year)),
            _ => Err(KinshipError::InvalidDate(s.trim().to_string())),
        }
    }
}

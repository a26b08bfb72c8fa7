//! Season type and current-season resolution.

use crate::error::{ExportError, Result};
use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for NFL season years.
///
/// A season is identified by the calendar year in which it kicks off, so the
/// 2024 season includes games played in January and February 2025.
///
/// # Examples
///
/// ```rust
/// use nflverse_sqlite::Season;
///
/// let season: Season = "2024".parse().unwrap();
/// assert_eq!(season.as_u16(), 2024);
/// assert_eq!(season.to_string(), "2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    /// Earliest season published by nflverse.
    pub const MIN: Season = Season(1999);

    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The season in progress (or most recently completed) as of today, UTC.
    pub fn current() -> Self {
        Self::current_as_of(Utc::now().date_naive())
    }

    /// The season in progress as of `today`.
    ///
    /// The NFL regular season kicks off on the Thursday after Labor Day
    /// (the first Monday of September). Before kickoff, the previous year's
    /// season is still the current one.
    pub fn current_as_of(today: NaiveDate) -> Self {
        let year = today.year();
        let kickoff = NaiveDate::from_weekday_of_month_opt(year, 9, Weekday::Mon, 1)
            .and_then(|labor_day| labor_day.checked_add_days(Days::new(3)));

        match kickoff {
            Some(kickoff) if today >= kickoff => Self(year as u16),
            Some(_) => Self((year - 1) as u16),
            None => Self(year as u16),
        }
    }

    /// Check that this season falls in `MIN..=current`.
    pub fn validate(self, current: Season) -> Result<Self> {
        if self < Self::MIN || self > current {
            return Err(ExportError::InvalidSeason {
                season: self.0,
                min: Self::MIN.0,
                max: current.0,
            });
        }
        Ok(self)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_parse() {
        assert_eq!("2024".parse::<Season>().unwrap(), Season::new(2024));
        assert_eq!(" 2023 ".parse::<Season>().unwrap(), Season::new(2023));
        assert!("twenty".parse::<Season>().is_err());
        assert!("-1".parse::<Season>().is_err());
    }

    #[test]
    fn test_current_season_after_kickoff() {
        // 2024: Labor Day Sep 2, kickoff Thursday Sep 5
        assert_eq!(Season::current_as_of(date(2024, 9, 5)), Season::new(2024));
        assert_eq!(Season::current_as_of(date(2024, 12, 31)), Season::new(2024));
    }

    #[test]
    fn test_current_season_before_kickoff() {
        assert_eq!(Season::current_as_of(date(2024, 9, 4)), Season::new(2023));
        assert_eq!(Season::current_as_of(date(2025, 2, 9)), Season::new(2024));
        // 2026: Labor Day Sep 7, kickoff Sep 10
        assert_eq!(Season::current_as_of(date(2026, 9, 9)), Season::new(2025));
        assert_eq!(Season::current_as_of(date(2026, 9, 10)), Season::new(2026));
    }

    #[test]
    fn test_current_season_when_september_starts_on_monday() {
        // 2025: Labor Day Sep 1, kickoff Sep 4
        assert_eq!(Season::current_as_of(date(2025, 9, 3)), Season::new(2024));
        assert_eq!(Season::current_as_of(date(2025, 9, 4)), Season::new(2025));
    }

    #[test]
    fn test_validate_bounds() {
        let current = Season::new(2025);
        assert!(Season::new(1999).validate(current).is_ok());
        assert!(Season::new(2025).validate(current).is_ok());

        match Season::new(1998).validate(current) {
            Err(ExportError::InvalidSeason { season, min, max }) => {
                assert_eq!(season, 1998);
                assert_eq!(min, 1999);
                assert_eq!(max, 2025);
            }
            other => panic!("Expected InvalidSeason, got {:?}", other),
        }
        assert!(Season::new(2026).validate(current).is_err());
    }

    #[test]
    fn test_season_ordering() {
        let mut seasons = vec![Season::new(2025), Season::new(2019), Season::new(2024)];
        seasons.sort();
        assert_eq!(
            seasons,
            vec![Season::new(2019), Season::new(2024), Season::new(2025)]
        );
    }
}

use time::{Date, Month};

/// Restrictions on which dates may be picked.
///
/// A date is selectable only if it satisfies every constraint at once.  "Past"
/// and "future" are judged against the `today` passed to each query, so the
/// boundary moves as the days go by.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct RestrictionPolicy {
    /// Earliest selectable date, inclusive
    pub min_date: Option<Date>,
    /// Latest selectable date, inclusive
    pub max_date: Option<Date>,
    /// Reject dates before today
    pub disable_past: bool,
    /// Reject dates after today
    pub disable_future: bool,
}

impl RestrictionPolicy {
    pub fn new() -> RestrictionPolicy {
        RestrictionPolicy::default()
    }

    pub fn min_date(mut self, date: Option<Date>) -> Self {
        self.min_date = date;
        self
    }

    pub fn max_date(mut self, date: Option<Date>) -> Self {
        self.max_date = date;
        self
    }

    pub fn disable_past(mut self, flag: bool) -> Self {
        self.disable_past = flag;
        self
    }

    pub fn disable_future(mut self, flag: bool) -> Self {
        self.disable_future = flag;
        self
    }

    pub fn is_selectable(&self, date: Date, today: Date) -> bool {
        !(self.disable_past && date < today || self.disable_future && date > today)
            && self.min_date.is_none_or(|min| date >= min)
            && self.max_date.is_none_or(|max| date <= max)
    }

    /// Year-level check used by the year grid: a year is selectable if any
    /// part of it could be, judged only by the years of the bounds.
    pub fn is_year_selectable(&self, year: i32, today: Date) -> bool {
        self.min_date.is_none_or(|min| year >= min.year())
            && self.max_date.is_none_or(|max| year <= max.year())
            && !(self.disable_past && year < today.year()
                || self.disable_future && year > today.year())
    }

    /// Whether the first day of the given month is selectable
    pub fn is_month_selectable(&self, year: i32, month: Month, today: Date) -> bool {
        Date::from_calendar_date(year, month, 1).is_ok_and(|d| self.is_selectable(d, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::successors;
    use time::macros::date;

    const TODAY: Date = date!(2025 - 06 - 15);

    fn days_around_today() -> impl Iterator<Item = Date> {
        successors(Some(date!(2025 - 01 - 01)), |d| d.next_day())
            .take_while(|&d| d <= date!(2025 - 12 - 31))
    }

    #[test]
    fn test_unrestricted() {
        let policy = RestrictionPolicy::new();
        assert!(days_around_today().all(|d| policy.is_selectable(d, TODAY)));
        assert!(policy.is_selectable(Date::MIN, TODAY));
        assert!(policy.is_selectable(Date::MAX, TODAY));
    }

    #[test]
    fn test_disable_past() {
        let policy = RestrictionPolicy::new().disable_past(true);
        for d in days_around_today() {
            assert_eq!(policy.is_selectable(d, TODAY), d >= TODAY, "{d}");
        }
    }

    #[test]
    fn test_disable_future() {
        let policy = RestrictionPolicy::new().disable_future(true);
        for d in days_around_today() {
            assert_eq!(policy.is_selectable(d, TODAY), d <= TODAY, "{d}");
        }
    }

    #[test]
    fn test_only_today_when_past_and_future_disabled() {
        let policy = RestrictionPolicy::new()
            .disable_past(true)
            .disable_future(true);
        for d in days_around_today() {
            assert_eq!(policy.is_selectable(d, TODAY), d == TODAY, "{d}");
        }
        assert!(!policy.is_year_selectable(2024, TODAY));
        assert!(policy.is_year_selectable(2025, TODAY));
        assert!(!policy.is_year_selectable(2026, TODAY));
    }

    #[test]
    fn test_min_max_inclusive() {
        let policy = RestrictionPolicy::new()
            .min_date(Some(date!(2025 - 03 - 10)))
            .max_date(Some(date!(2025 - 03 - 20)));
        assert!(!policy.is_selectable(date!(2025 - 03 - 09), TODAY));
        assert!(policy.is_selectable(date!(2025 - 03 - 10), TODAY));
        assert!(policy.is_selectable(date!(2025 - 03 - 20), TODAY));
        assert!(!policy.is_selectable(date!(2025 - 03 - 21), TODAY));
    }

    #[test]
    fn test_constraints_combine() {
        // min_date allows everything from March, but disable_past still
        // rejects the days before today
        let policy = RestrictionPolicy::new()
            .min_date(Some(date!(2025 - 03 - 01)))
            .disable_past(true);
        assert!(!policy.is_selectable(date!(2025 - 04 - 01), TODAY));
        assert!(policy.is_selectable(TODAY, TODAY));
        // An empty range rejects everything
        let policy = RestrictionPolicy::new()
            .min_date(Some(date!(2025 - 07 - 01)))
            .disable_future(true);
        assert!(days_around_today().all(|d| !policy.is_selectable(d, TODAY)));
    }

    #[test]
    fn test_tightening_is_monotonic() {
        let loose = RestrictionPolicy::new().min_date(Some(date!(2025 - 02 - 01)));
        let tighter = [
            loose.min_date(Some(date!(2025 - 05 - 01))),
            loose.max_date(Some(date!(2025 - 10 - 01))),
            loose.disable_past(true),
            loose.disable_future(true),
        ];
        for policy in tighter {
            for d in days_around_today() {
                if !loose.is_selectable(d, TODAY) {
                    assert!(!policy.is_selectable(d, TODAY), "{policy:?} accepted {d}");
                }
            }
        }
    }

    #[test]
    fn test_year_selectable() {
        let policy = RestrictionPolicy::new()
            .min_date(Some(date!(2020 - 12 - 31)))
            .max_date(Some(date!(2030 - 01 - 01)));
        assert!(!policy.is_year_selectable(2019, TODAY));
        assert!(policy.is_year_selectable(2020, TODAY));
        assert!(policy.is_year_selectable(2030, TODAY));
        assert!(!policy.is_year_selectable(2031, TODAY));
        let policy = RestrictionPolicy::new().disable_past(true);
        assert!(!policy.is_year_selectable(2024, TODAY));
        assert!(policy.is_year_selectable(2025, TODAY));
        let policy = RestrictionPolicy::new().disable_future(true);
        assert!(policy.is_year_selectable(2025, TODAY));
        assert!(!policy.is_year_selectable(2026, TODAY));
    }

    #[test]
    fn test_month_selectable_uses_first_day() {
        let policy = RestrictionPolicy::new().disable_past(true);
        // June 1st is before the 15th, so June itself is not selectable
        assert!(!policy.is_month_selectable(2025, Month::June, TODAY));
        assert!(policy.is_month_selectable(2025, Month::July, TODAY));
    }
}

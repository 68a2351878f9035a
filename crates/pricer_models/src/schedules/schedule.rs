//! PeriodicSchedule and its resolved form.

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::SchedulePeriod;
use pricer_core::reference_data::{ReferenceData, ReferenceDataError};
use pricer_core::types::time::{BusinessDayConvention, Date};
use pricer_core::types::BusinessDayAdjustment;

/// Contractual definition of a regular schedule.
///
/// Periods are stepped forward from the unadjusted start date by the
/// frequency; a remainder at the end becomes a short final stub. Every
/// boundary is then adjusted with the schedule's business-day adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodicSchedule {
    start_date: Date,
    end_date: Date,
    frequency: Frequency,
    adjustment: BusinessDayAdjustment,
}

impl PeriodicSchedule {
    /// Creates a schedule definition.
    ///
    /// # Errors
    ///
    /// `ScheduleError::InvalidDateRange` unless `start_date < end_date`.
    pub fn new(
        start_date: Date,
        end_date: Date,
        frequency: Frequency,
        adjustment: BusinessDayAdjustment,
    ) -> Result<Self, ScheduleError> {
        if start_date >= end_date {
            return Err(ScheduleError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            frequency,
            adjustment,
        })
    }

    /// Unadjusted start date.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Unadjusted end date.
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Period frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Business-day adjustment applied to every boundary.
    pub fn adjustment(&self) -> &BusinessDayAdjustment {
        &self.adjustment
    }

    /// Unadjusted period boundaries, including start and end.
    ///
    /// ```
    /// use pricer_core::types::{BusinessDayAdjustment, Date};
    /// use pricer_models::schedules::{Frequency, PeriodicSchedule};
    ///
    /// let schedule = PeriodicSchedule::new(
    ///     Date::from_ymd(2024, 1, 31).unwrap(),
    ///     Date::from_ymd(2024, 5, 15).unwrap(),
    ///     Frequency::Monthly,
    ///     BusinessDayAdjustment::none(),
    /// )
    /// .unwrap();
    ///
    /// let dates = schedule.unadjusted_dates();
    /// assert_eq!(dates[1], Date::from_ymd(2024, 2, 29).unwrap());
    /// assert_eq!(dates[2], Date::from_ymd(2024, 3, 31).unwrap());
    /// assert_eq!(*dates.last().unwrap(), Date::from_ymd(2024, 5, 15).unwrap());
    /// ```
    pub fn unadjusted_dates(&self) -> Vec<Date> {
        let step = self.frequency.months() as i32;
        let mut dates = vec![self.start_date];
        let mut i = 1;
        loop {
            let next = self.start_date.plus_months(step * i);
            if next >= self.end_date {
                break;
            }
            dates.push(next);
            i += 1;
        }
        dates.push(self.end_date);
        dates
    }

    /// Generates the adjusted periods.
    ///
    /// # Errors
    ///
    /// `ReferenceDataError::NotFound` if the adjustment calendar is unknown.
    pub fn resolve(&self, ref_data: &ReferenceData) -> Result<Schedule, ReferenceDataError> {
        let unadjusted = self.unadjusted_dates();
        let adjusted: Vec<Date> = if self.adjustment.convention == BusinessDayConvention::Unadjusted
        {
            unadjusted.clone()
        } else {
            let calendar = ref_data.get(&self.adjustment.calendar)?;
            unadjusted
                .iter()
                .map(|d| calendar.adjust(*d, self.adjustment.convention))
                .collect()
        };

        let periods = unadjusted
            .windows(2)
            .zip(adjusted.windows(2))
            .map(|(u, a)| SchedulePeriod::new(u[0], u[1], a[0], a[1]))
            .collect();

        Ok(Schedule {
            periods,
            frequency: self.frequency,
        })
    }
}

/// A resolved schedule: at least one period, in date order.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    periods: Vec<SchedulePeriod>,
    frequency: Frequency,
}

impl Schedule {
    /// Returns the periods in the schedule.
    #[inline]
    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// Returns the frequency the periods were generated at.
    #[inline]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns whether the schedule is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Adjusted start of the first period.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.periods[0].start()
    }

    /// Adjusted end of the last period.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end()
    }

    /// Groups consecutive periods into periods of a coarser frequency.
    ///
    /// The final group may be shorter when the schedule has a stub.
    ///
    /// # Errors
    ///
    /// `ScheduleError::IncompatibleFrequency` unless `coarser` is a whole
    /// multiple of this schedule's frequency.
    pub fn group_by(&self, coarser: Frequency) -> Result<Vec<&[SchedulePeriod]>, ScheduleError> {
        let size = coarser
            .multiple_of(self.frequency)
            .ok_or_else(|| ScheduleError::IncompatibleFrequency {
                coarse: coarser.to_string(),
                fine: self.frequency.to_string(),
            })?;
        Ok(self.periods.chunks(size as usize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::{DayCountConvention, HolidayCalendarId};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn usny_mf() -> BusinessDayAdjustment {
        BusinessDayAdjustment::new(
            BusinessDayConvention::ModifiedFollowing,
            HolidayCalendarId::new("USNY"),
        )
    }

    #[test]
    fn test_rejects_reversed_dates() {
        let err = PeriodicSchedule::new(
            date(2025, 1, 1),
            date(2024, 1, 1),
            Frequency::Annual,
            usny_mf(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidDateRange {
                start: date(2025, 1, 1),
                end: date(2024, 1, 1)
            }
        );
    }

    #[test]
    fn test_regular_quarterly_schedule() {
        let schedule = PeriodicSchedule::new(
            date(2015, 7, 17),
            date(2016, 7, 17),
            Frequency::Quarterly,
            usny_mf(),
        )
        .unwrap()
        .resolve(&ReferenceData::standard())
        .unwrap();

        assert_eq!(schedule.len(), 4);
        // 2015-10-17 is a Saturday; rolls to Monday
        assert_eq!(schedule.periods()[0].end(), date(2015, 10, 19));
        assert_eq!(schedule.periods()[0].unadjusted_end(), date(2015, 10, 17));
        assert_eq!(schedule.periods()[1].start(), date(2015, 10, 19));
        assert_eq!(schedule.start_date(), date(2015, 7, 17));
        assert_eq!(schedule.end_date(), date(2016, 7, 18));
    }

    #[test]
    fn test_short_final_stub() {
        let schedule = PeriodicSchedule::new(
            date(2015, 1, 15),
            date(2016, 3, 15),
            Frequency::SemiAnnual,
            BusinessDayAdjustment::none(),
        )
        .unwrap();
        let dates = schedule.unadjusted_dates();
        assert_eq!(
            dates,
            vec![
                date(2015, 1, 15),
                date(2015, 7, 15),
                date(2016, 1, 15),
                date(2016, 3, 15)
            ]
        );
    }

    #[test]
    fn test_year_fractions_sum_to_whole_term() {
        let schedule = PeriodicSchedule::new(
            date(2015, 1, 15),
            date(2017, 1, 15),
            Frequency::SemiAnnual,
            BusinessDayAdjustment::none(),
        )
        .unwrap()
        .resolve(&ReferenceData::empty())
        .unwrap();
        let total: f64 = schedule
            .periods()
            .iter()
            .map(|p| p.year_fraction(DayCountConvention::Thirty360))
            .sum();
        assert!((total - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_calendar_fails_resolution() {
        let schedule = PeriodicSchedule::new(
            date(2015, 1, 15),
            date(2016, 1, 15),
            Frequency::Annual,
            usny_mf(),
        )
        .unwrap();
        let err = schedule.resolve(&ReferenceData::empty()).unwrap_err();
        assert!(err.to_string().contains("USNY"));
    }

    #[test]
    fn test_group_by_payment_frequency() {
        let schedule = PeriodicSchedule::new(
            date(2015, 1, 15),
            date(2016, 1, 15),
            Frequency::Quarterly,
            BusinessDayAdjustment::none(),
        )
        .unwrap()
        .resolve(&ReferenceData::empty())
        .unwrap();

        let groups = schedule.group_by(Frequency::SemiAnnual).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert!(schedule.group_by(Frequency::Monthly).is_err());
    }
}

use chrono::{Datelike, DateTime, Days, Months, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use meetup_errors::MeetupError;

pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

pub fn parse_timezone(name: &str) -> Result<Tz, MeetupError> {
    name.parse::<Tz>()
        .map_err(|_| MeetupError::InvalidTimezone(name.to_string()))
}

/// An absolute `[start, end)` interval anchored in a local timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    /// `[midnight, next midnight)` of the given day.
    pub fn day(
        tz: Tz, day: u32, month: u32, year: i32,
    ) -> Result<Self, MeetupError> {
        let date = calendar_date(year, month, day)?;
        Self::spanning_days(tz, date, 1)
    }

    /// Seven calendar days starting at midnight of the given day.
    pub fn week(
        tz: Tz, day: u32, month: u32, year: i32,
    ) -> Result<Self, MeetupError> {
        let date = calendar_date(year, month, day)?;
        Self::spanning_days(tz, date, 7)
    }

    /// From midnight on the 1st to midnight on the 1st of the next month.
    pub fn month(tz: Tz, month: u32, year: i32) -> Result<Self, MeetupError> {
        let first = calendar_date(year, month, 1)?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| invalid_date(first))?;

        Ok(Self {
            start: local_midnight(tz, first)?,
            end: local_midnight(tz, next)?,
        })
    }

    fn spanning_days(
        tz: Tz, date: NaiveDate, days: u64,
    ) -> Result<Self, MeetupError> {
        let end = date
            .checked_add_days(Days::new(days))
            .ok_or_else(|| invalid_date(date))?;

        Ok(Self {
            start: local_midnight(tz, date)?,
            end: local_midnight(tz, end)?,
        })
    }

    pub fn start_millis(&self) -> i64 { self.start.timestamp_millis() }

    pub fn end_millis(&self) -> i64 { self.end.timestamp_millis() }

    pub fn contains(&self, millis: i64) -> bool {
        self.start_millis() <= millis && millis < self.end_millis()
    }

    /// The upstream `time` parameter: `"{start_ms},{end_ms}"`.
    pub fn to_upstream(&self) -> String {
        format!("{},{}", self.start_millis(), self.end_millis())
    }
}

fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, MeetupError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(MeetupError::InvalidDate {
        year,
        month,
        day,
    })
}

fn local_midnight(tz: Tz, date: NaiveDate) -> Result<DateTime<Tz>, MeetupError> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| invalid_date(date))
}

fn invalid_date(date: NaiveDate) -> MeetupError {
    MeetupError::InvalidDate {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
}

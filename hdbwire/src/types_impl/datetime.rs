use crate::{impl_err, protocol::Reader, HdbResult, HdbValue};
use time::{Date, PrimitiveDateTime, Time};

// Julian day number of 0001-01-01 in the proleptic Gregorian calendar.
const JULIAN_DAY_OF_YEAR_ONE: i64 = 1_721_426;

const LONGDATE_NULL: i64 = 3_155_380_704_000_000_001;
const SECONDDATE_NULL: i64 = 315_538_070_401;
const DAYDATE_NULL: i32 = 3_652_062;
const SECONDTIME_NULL: i32 = 86_402;

const TICKS_PER_SECOND: i64 = 10_000_000;
const SECONDS_PER_DAY: i64 = 86_400;
const TICKS_PER_DAY: i64 = TICKS_PER_SECOND * SECONDS_PER_DAY;

/// Implementation of HANA's `LongDate`: timestamps with 100ns precision.
///
/// The wire value counts 100ns ticks since 0001-01-01 00:00:00, plus one;
/// HANA maps the empty string to 0, which is treated like 1.
/// The type is agnostic of timezones.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct LongDate(i64);

impl LongDate {
    pub(crate) fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The value as it was sent by the server.
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Converts into a `time::PrimitiveDateTime`.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn to_primitive_date_time(&self) -> HdbResult<PrimitiveDateTime> {
        let ticks = self.0.saturating_sub(1).max(0);
        let date = date_from_days(ticks / TICKS_PER_DAY)?;
        let mut rest = ticks % TICKS_PER_DAY;
        let nanos = (rest % TICKS_PER_SECOND) * 100;
        rest /= TICKS_PER_SECOND;
        let time = time_from_seconds(rest, nanos as u32)?;
        Ok(PrimitiveDateTime::new(date, time))
    }
}

impl std::fmt::Display for LongDate {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Ok(ts) = self.to_primitive_date_time() else {
            return write!(fmt, "<LONGDATE raw={}>", self.0);
        };
        write!(
            fmt,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:07}",
            ts.year(),
            u8::from(ts.month()),
            ts.day(),
            ts.hour(),
            ts.minute(),
            ts.second(),
            ts.nanosecond() / 100
        )
    }
}

/// Implementation of HANA's `SecondDate`: timestamps with second precision.
///
/// The wire value counts seconds since 0001-01-01 00:00:00, plus one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SecondDate(i64);

impl SecondDate {
    pub(crate) fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The value as it was sent by the server.
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Converts into a `time::PrimitiveDateTime`.
    pub fn to_primitive_date_time(&self) -> HdbResult<PrimitiveDateTime> {
        let seconds = self.0.saturating_sub(1).max(0);
        let date = date_from_days(seconds / SECONDS_PER_DAY)?;
        let time = time_from_seconds(seconds % SECONDS_PER_DAY, 0)?;
        Ok(PrimitiveDateTime::new(date, time))
    }
}

impl std::fmt::Display for SecondDate {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Ok(ts) = self.to_primitive_date_time() else {
            return write!(fmt, "<SECONDDATE raw={}>", self.0);
        };
        write!(
            fmt,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            ts.year(),
            u8::from(ts.month()),
            ts.day(),
            ts.hour(),
            ts.minute(),
            ts.second(),
        )
    }
}

/// Implementation of HANA's `DayDate`: days since 0001-01-01, plus one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct DayDate(i32);

impl DayDate {
    pub(crate) fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The value as it was sent by the server.
    pub fn raw(&self) -> i32 {
        self.0
    }

    /// Converts into a `time::Date`.
    pub fn to_date(&self) -> HdbResult<Date> {
        date_from_days(i64::from(self.0.saturating_sub(1).max(0)))
    }
}

impl std::fmt::Display for DayDate {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Ok(date) = self.to_date() else {
            return write!(fmt, "<DAYDATE raw={}>", self.0);
        };
        write!(
            fmt,
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    }
}

/// Implementation of HANA's `SecondTime`.
///
/// Legal values are hours * 3600 + minutes * 60 + seconds + 1; 0 is read as midnight.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SecondTime(i32);

impl SecondTime {
    pub(crate) fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The value as it was sent by the server.
    pub fn raw(&self) -> i32 {
        self.0
    }

    /// Converts into a `time::Time`.
    pub fn to_time(&self) -> HdbResult<Time> {
        time_from_seconds(i64::from(self.0.saturating_sub(1).max(0)), 0)
    }
}

impl std::fmt::Display for SecondTime {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Ok(time) = self.to_time() else {
            return write!(fmt, "<SECONDTIME raw={}>", self.0);
        };
        write!(
            fmt,
            "{:02}:{:02}:{:02}",
            time.hour(),
            time.minute(),
            time.second()
        )
    }
}

fn date_from_days(days: i64) -> HdbResult<Date> {
    let julian_day = i32::try_from(days + JULIAN_DAY_OF_YEAR_ONE)
        .map_err(|_| impl_err!("day count {days} out of range"))?;
    Date::from_julian_day(julian_day).map_err(|e| impl_err!("invalid date: {e}"))
}

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn time_from_seconds(seconds: i64, nanos: u32) -> HdbResult<Time> {
    let hour = (seconds / 3600) as u8;
    let minute = ((seconds % 3600) / 60) as u8;
    let second = (seconds % 60) as u8;
    Time::from_hms_nano(hour, minute, second, nanos).map_err(|e| impl_err!("invalid time: {e}"))
}

pub(crate) fn parse_longdate(rdr: &mut Reader) -> HdbResult<HdbValue> {
    let i = rdr.read_i64_le()?;
    trace!("parse LONGDATE: {i}");
    Ok(if i == LONGDATE_NULL {
        HdbValue::NULL
    } else {
        HdbValue::LONGDATE(LongDate::new(i))
    })
}

pub(crate) fn parse_seconddate(rdr: &mut Reader) -> HdbResult<HdbValue> {
    let i = rdr.read_i64_le()?;
    trace!("parse SECONDDATE: {i}");
    Ok(if i == SECONDDATE_NULL {
        HdbValue::NULL
    } else {
        HdbValue::SECONDDATE(SecondDate::new(i))
    })
}

pub(crate) fn parse_daydate(rdr: &mut Reader) -> HdbResult<HdbValue> {
    let i = rdr.read_i32_le()?;
    trace!("parse DAYDATE: {i}");
    Ok(if i == DAYDATE_NULL {
        HdbValue::NULL
    } else {
        HdbValue::DAYDATE(DayDate::new(i))
    })
}

pub(crate) fn parse_secondtime(rdr: &mut Reader) -> HdbResult<HdbValue> {
    let i = rdr.read_i32_le()?;
    trace!("parse SECONDTIME: {i}");
    Ok(if i == SECONDTIME_NULL {
        HdbValue::NULL
    } else {
        HdbValue::SECONDTIME(SecondTime::new(i))
    })
}

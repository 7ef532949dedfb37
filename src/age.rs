use chrono::{Datelike, NaiveDate};

use crate::error::{ExportError, Result};

/// Whole months elapsed from `birthday` (ISO `YYYY-MM-DD`) to `today`:
/// the year difference times twelve plus the month difference, with the day
/// of month ignored. A birth date in the future yields a negative value;
/// callers decide what to do with it.
pub fn age_in_months(birthday: &str, today: NaiveDate) -> Result<i32> {
    let birth = NaiveDate::parse_from_str(birthday.trim(), "%Y-%m-%d")
        .map_err(|_| ExportError::InvalidDate(birthday.to_string()))?;
    Ok((today.year() - birth.year()) * 12 + today.month() as i32 - birth.month() as i32)
}

use chrono::NaiveDate;
use netbox_export::ExportError;
use netbox_export::age::age_in_months;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn whole_months_ignore_day_of_month() {
    assert_eq!(age_in_months("2020-01-15", date(2020, 3, 1)).unwrap(), 2);
    assert_eq!(age_in_months("2020-01-31", date(2020, 2, 1)).unwrap(), 1);
}

#[test]
fn five_year_old_device_is_sixty_months() {
    assert_eq!(age_in_months("2019-06-01", date(2024, 6, 15)).unwrap(), 60);
}

#[test]
fn same_month_is_zero() {
    assert_eq!(age_in_months("2024-06-01", date(2024, 6, 30)).unwrap(), 0);
}

#[test]
fn future_birth_date_goes_negative_without_correction() {
    assert_eq!(age_in_months("2025-01-01", date(2024, 6, 15)).unwrap(), -7);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert_eq!(age_in_months(" 2020-01-15 ", date(2020, 3, 1)).unwrap(), 2);
}

#[test]
fn malformed_dates_are_rejected() {
    for bad in ["01-06-2019", "2019/06/01", "yesterday", ""] {
        let error = age_in_months(bad, date(2024, 6, 15)).unwrap_err();
        assert!(matches!(error, ExportError::InvalidDate(_)), "input {bad:?}");
    }
}

//! Deserialization helpers for optional HTML form fields.
//!
//! Browsers submit an optional field the user left blank as an empty string
//! (e.g. `deadline=`), which serde would otherwise try to parse as the inner
//! type and reject.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de};
use time::{Date, macros::format_description};

/// Deserialize an optional form field, mapping an empty string to `None`.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;

    match value.filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Deserialize an optional date input, mapping an empty string to `None`.
///
/// `Date` has no `FromStr` impl, so this parses the `YYYY-MM-DD` format that
/// `<input type="date">` submits.
pub fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    match value.filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => Date::parse(&text, &format_description!("[year]-[month]-[day]"))
            .map(Some)
            .map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod form_field_tests {
    use serde::Deserialize;
    use time::{Date, macros::date};

    use super::{empty_date_as_none, empty_string_as_none};

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestForm {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "empty_date_as_none")]
        date: Option<Date>,
    }

    #[test]
    fn empty_fields_become_none() {
        let form: TestForm = serde_html_form::from_str("amount=&date=").unwrap();

        assert_eq!(form.amount, None);
        assert_eq!(form.date, None);
    }

    #[test]
    fn missing_fields_become_none() {
        let form: TestForm = serde_html_form::from_str("").unwrap();

        assert_eq!(form.amount, None);
        assert_eq!(form.date, None);
    }

    #[test]
    fn filled_fields_parse() {
        let form: TestForm = serde_html_form::from_str("amount=12.5&date=2025-12-31").unwrap();

        assert_eq!(form.amount, Some(12.5));
        assert_eq!(form.date, Some(date!(2025 - 12 - 31)));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let result: Result<TestForm, _> = serde_html_form::from_str("date=31%2F12%2F2025");

        assert!(result.is_err());
    }
}

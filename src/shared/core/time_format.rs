// Display helpers for fractional hour values.
//
// Hours travel through the system as decimals (1.5 = one hour thirty). Values typed into
// a form arrive as strings, values computed from timer intervals carry floating point
// noise. Both are normalised here before they are stored or rendered.

use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

const ONE_MINUTE_IN_HOURS: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoursInput<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for HoursInput<'_> {
    fn from(value: f64) -> Self {
        HoursInput::Number(value)
    }
}

impl<'a> From<&'a str> for HoursInput<'a> {
    fn from(value: &'a str) -> Self {
        HoursInput::Text(value)
    }
}

impl<'a> From<&'a Json> for HoursInput<'a> {
    fn from(value: &'a Json) -> Self {
        match value {
            Json::Number(number) => HoursInput::Number(number.as_f64().unwrap_or(f64::NAN)),
            Json::String(text) => HoursInput::Text(text),
            _ => HoursInput::Number(f64::NAN),
        }
    }
}

/// Coerce a number or numeric string to hours rounded to two decimals.
///
/// Rounds to four decimals first so that artifacts such as `1.00499999` do not flip the
/// final digit. Anything that is not a finite number becomes `0.0`.
pub fn format_decimal_hours<'a>(value: impl Into<HoursInput<'a>>) -> f64 {
    let number = match value.into() {
        HoursInput::Number(number) => number,
        HoursInput::Text(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
    };
    if !number.is_finite() {
        return 0.0;
    }
    let four_places = (number * 10_000.0).round() / 10_000.0;
    let two_places = (four_places * 100.0).round() / 100.0;
    // avoid rendering "-0"
    if two_places == 0.0 { 0.0 } else { two_places }
}

/// Render decimal hours as `H:MM`.
pub fn format_simple_time(hours: f64) -> String {
    if !hours.is_finite() || hours < ONE_MINUTE_IN_HOURS {
        return "0:00".to_string();
    }
    let whole_hours = hours.trunc();
    let minutes = ((hours - whole_hours) * 60.0).round().min(59.0);
    format!("{}:{:02}", whole_hours as u64, minutes as u64)
}

/// Serde adapter for request bodies that may carry hours as a number or a string.
pub fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Json::deserialize(deserializer)?;
    Ok(format_decimal_hours(&raw))
}

/// Same as [`deserialize_hours`] for optional fields.
pub fn deserialize_optional_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Json>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(|value| format_decimal_hours(value)))
}

#[cfg(test)]
mod time_format_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(1.5, 1.5)]
    #[case(0.1 + 0.2, 0.3)]
    #[case(7.999999, 8.0)]
    #[case(0.333333, 0.33)]
    #[case(-1.25, -1.25)]
    fn it_should_round_numbers_to_two_decimals(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(format_decimal_hours(input), expected);
    }

    #[rstest]
    #[case("1.5", 1.5)]
    #[case(" 3.456 ", 3.46)]
    #[case("abc", 0.0)]
    #[case("", 0.0)]
    fn it_should_coerce_strings(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(format_decimal_hours(input), expected);
    }

    #[rstest]
    fn it_should_return_zero_for_non_finite_and_non_numeric_json() {
        assert_eq!(format_decimal_hours(f64::NAN), 0.0);
        assert_eq!(format_decimal_hours(f64::INFINITY), 0.0);
        assert_eq!(format_decimal_hours(&json!(null)), 0.0);
        assert_eq!(format_decimal_hours(&json!(true)), 0.0);
        assert_eq!(format_decimal_hours(&json!("2.25")), 2.25);
        assert_eq!(format_decimal_hours(&json!(4)), 4.0);
    }

    #[rstest]
    fn it_should_stay_within_a_hundredth_of_the_input() {
        let mut value = -50.0;
        while value < 50.0 {
            let formatted = format_decimal_hours(value);
            assert!((formatted - value).abs() < 0.01, "{value} -> {formatted}");
            let scaled = formatted * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6, "{formatted} has more than two decimals");
            value += 0.0137;
        }
    }

    #[rstest]
    #[case(0.0, "0:00")]
    #[case(0.0083, "0:00")]
    #[case(1.5, "1:30")]
    #[case(0.25, "0:15")]
    #[case(2.0, "2:00")]
    #[case(1.999, "1:59")]
    #[case(8.3333, "8:20")]
    #[case(-3.0, "0:00")]
    fn it_should_format_simple_time(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(format_simple_time(input), expected);
    }

    #[rstest]
    fn it_should_never_render_more_than_59_minutes() {
        let mut value = 0.0;
        while value < 24.0 {
            let rendered = format_simple_time(value);
            let minutes: u32 = rendered.split(':').nth(1).unwrap().parse().unwrap();
            assert!(minutes <= 59, "{value} -> {rendered}");
            value += 0.0011;
        }
    }

    #[rstest]
    fn it_should_deserialize_hours_from_numbers_and_strings() {
        #[derive(serde::Deserialize)]
        struct Body {
            #[serde(deserialize_with = "deserialize_hours")]
            hours: f64,
            #[serde(default, deserialize_with = "deserialize_optional_hours")]
            extra: Option<f64>,
        }
        let body: Body = serde_json::from_value(json!({ "hours": "1.2561", "extra": 2 })).unwrap();
        assert_eq!(body.hours, 1.26);
        assert_eq!(body.extra, Some(2.0));
        let body: Body = serde_json::from_value(json!({ "hours": 0.75 })).unwrap();
        assert_eq!(body.hours, 0.75);
        assert_eq!(body.extra, None);
    }
}

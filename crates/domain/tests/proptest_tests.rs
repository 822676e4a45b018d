//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use std::collections::HashSet;

use chrono::NaiveDate;
use domain::formatting::{fahrenheit_to_celsius, format_iso_date, parse_iso_date};
use domain::value_objects::{CloudCoverRange, ForecastDays, GeoLocation};
use domain::{ConditionOption, ConditionOptions};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn path_segment_parses_back(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon).unwrap();
            let segment = loc.path_segment();
            let (lat_s, lon_s) = segment.split_once(',').unwrap();
            prop_assert_eq!(lat_s.parse::<f64>().unwrap(), lat);
            prop_assert_eq!(lon_s.parse::<f64>().unwrap(), lon);
        }
    }
}

// ============================================================================
// CloudCoverRange Property Tests
// ============================================================================

mod cloud_cover_tests {
    use super::*;

    proptest! {
        #[test]
        fn ordered_bounds_accepted(a in 0u8..=100, b in 0u8..=100) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let range = CloudCoverRange::new(low, high).unwrap();
            prop_assert!(range.contains(f64::from(low)));
            prop_assert!(range.contains(f64::from(high)));
        }

        #[test]
        fn inverted_bounds_rejected(low in 1u8..=100, delta in 1u8..=100) {
            let high = low.saturating_sub(delta);
            prop_assume!(high < low);
            prop_assert!(CloudCoverRange::new(low, high).is_err());
        }

        #[test]
        fn snapped_bounds_are_multiples_of_step(a in 0u8..=100, b in 0u8..=100) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let range = CloudCoverRange::snapped(low, high).unwrap();
            prop_assert_eq!(range.low() % CloudCoverRange::STEP, 0);
            prop_assert_eq!(range.high() % CloudCoverRange::STEP, 0);
        }
    }
}

// ============================================================================
// ForecastDays Property Tests
// ============================================================================

mod forecast_days_tests {
    use super::*;

    proptest! {
        #[test]
        fn clamped_always_in_window(value in any::<u8>()) {
            let days = ForecastDays::clamped(value);
            prop_assert!((ForecastDays::MIN..=ForecastDays::MAX).contains(&days.value()));
        }
    }
}

// ============================================================================
// Formatting Property Tests
// ============================================================================

mod formatting_tests {
    use super::*;

    proptest! {
        #[test]
        fn celsius_has_at_most_one_decimal(f in -100.0f64..=150.0f64) {
            let c = fahrenheit_to_celsius(f);
            prop_assert!(((c * 10.0).round() - c * 10.0).abs() < 1e-6);
        }

        #[test]
        fn celsius_is_monotonic(a in -100.0f64..=150.0f64, b in -100.0f64..=150.0f64) {
            if a <= b {
                prop_assert!(fahrenheit_to_celsius(a) <= fahrenheit_to_celsius(b));
            }
        }

        #[test]
        fn iso_dates_round_trip(days in 0i64..20_000) {
            let base = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
            let date = base + chrono::Duration::days(days);
            prop_assert_eq!(parse_iso_date(&format_iso_date(date)).unwrap(), date);
        }
    }
}

// ============================================================================
// ConditionOptions Property Tests
// ============================================================================

mod condition_option_tests {
    use super::*;

    fn condition() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Rain".to_string()),
            Just("Snow".to_string()),
            Just("Overcast".to_string()),
            Just("Clear".to_string()),
            Just("Partially cloudy".to_string()),
            Just("Show All".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn sentinel_first_and_texts_unique(
            days in prop::collection::vec(prop::collection::vec(condition(), 1..4), 0..10)
        ) {
            let joined: Vec<String> = days.iter().map(|d| d.join(", ")).collect();
            let options = ConditionOptions::from_joined(joined.iter().map(String::as_str));

            prop_assert_eq!(&options.as_slice()[0], &ConditionOption::show_all());

            let mut seen = HashSet::new();
            for (index, option) in options.iter().enumerate() {
                prop_assert!(seen.insert(option.text.clone()));
                prop_assert_eq!(option.key as usize, index);
            }
        }

        #[test]
        fn options_follow_first_seen_order(
            days in prop::collection::vec(prop::collection::vec(condition(), 1..4), 1..10)
        ) {
            let joined: Vec<String> = days.iter().map(|d| d.join(", ")).collect();
            let options = ConditionOptions::from_joined(joined.iter().map(String::as_str));

            let mut expected = vec!["Show All".to_string()];
            for value in days.iter().flatten() {
                if !expected.contains(value) {
                    expected.push(value.clone());
                }
            }
            let actual: Vec<String> = options.iter().map(|o| o.text.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}

use calendar_engine::hebrew::LEAP_YEARS_IN_CYCLE;
use calendar_engine::{
    CalendarDate, CalendarInterval, DateDefinition, GregorianDate, HebrewDate, HebrewMonth,
    HebrewYear, RelativeDate, YearLength,
};
use proptest::prelude::*;

fn any_month() -> impl Strategy<Value = HebrewMonth> {
    prop::sample::select(HebrewMonth::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_hebrew_round_trip(
        year in 1i64..=12_000,
        month in any_month(),
        day in 1u8..=30,
        hour in 0u8..=23,
        part in 0u16..=1079,
    ) {
        let date = HebrewDate::from_fields(year, month, day, hour, part).unwrap();
        let back = HebrewDate::from_instant(date.interval_since_epoch()).unwrap();
        prop_assert_eq!(back, date);
    }

    #[test]
    fn prop_legal_fields_survive_unchanged(
        year in -5_000i64..=12_000,
        month_index in 0usize..13,
        day_fraction in 0.0f64..1.0,
        hour in 0u8..=23,
        part in 0u16..=1079,
    ) {
        let year = HebrewYear::new(year);
        let months = year.months();
        let month = months[month_index % months.len()];
        let day = 1 + (day_fraction * f64::from(month.number_of_days(year))) as u8;
        let date = HebrewDate::from_fields(year.get(), month, day, hour, part).unwrap();
        let back = HebrewDate::from_instant(date.interval_since_epoch()).unwrap();
        prop_assert_eq!(
            (back.year(), back.month(), back.day().get(), back.hour().get(), back.part().get()),
            (year, month, day, hour, part)
        );
    }

    #[test]
    fn prop_leap_year_rule(year in -1_000_000_000i64..1_000_000_000) {
        let expected = LEAP_YEARS_IN_CYCLE.contains(&year.rem_euclid(19));
        prop_assert_eq!(HebrewYear::new(year).is_leap_year(), expected);
    }

    #[test]
    fn prop_year_lengths_are_legal(year in -20_000i64..200_000) {
        let year = HebrewYear::new(year);
        let days = year.number_of_days();
        let leap = year.is_leap_year();
        let legal: &[u16] = if leap { &[383, 384, 385] } else { &[353, 354, 355] };
        prop_assert!(legal.contains(&days), "{} has {} days", year, days);
        let length = YearLength::from_number_of_days(days).unwrap();
        prop_assert_eq!(length.number_of_days(leap), days);
        prop_assert_eq!(year.length(), length);
    }

    #[test]
    fn prop_relative_addition_is_associative_and_flat(
        start_days in -100_000i64..100_000,
        v1 in -1_000_000_000i64..1_000_000_000,
        v2 in -1_000_000_000i64..1_000_000_000,
    ) {
        let date = CalendarDate::epoch() + CalendarInterval::from_days(start_days as f64);
        let base = date.definition::<RelativeDate>().unwrap().base().clone();
        let v1 = CalendarInterval::from_units(v1 as f64);
        let v2 = CalendarInterval::from_units(v2 as f64);

        let stepwise = (&date + v1) + v2;
        let combined = &date + (v1 + v2);
        prop_assert_eq!(&stepwise, &combined);

        let relative = stepwise.definition::<RelativeDate>().unwrap();
        prop_assert_eq!(relative.base(), &base);
        prop_assert!(relative.base().definition::<RelativeDate>().is_none());
    }

    #[test]
    fn prop_civil_instants_match_hebrew(
        days in -40_000i64..40_000,
        hour in 0u32..24,
        minute in 0u32..60,
        tens_of_seconds in 0u32..6,
    ) {
        let reference = GregorianDate::new(1997, 10, 2, hour, minute, tens_of_seconds * 10).unwrap();
        let civil = CalendarDate::new(GregorianDate::from_datetime(
            reference.datetime() + chrono::TimeDelta::days(days),
        ));
        let hebrew = CalendarDate::new(civil.hebrew_date().unwrap());
        prop_assert_eq!(&hebrew, &civil);
        prop_assert!((&hebrew - &civil).is_zero());
        prop_assert_eq!(hebrew.gregorian_date().unwrap(), civil.gregorian_date().unwrap());
    }

    #[test]
    fn prop_unit_exactness(days in -1_000_000i64..1_000_000) {
        let interval = CalendarInterval::from_days(days as f64);
        prop_assert_eq!(interval.hebrew_parts(), days as f64 * 25_920.0);
        prop_assert_eq!(interval.seconds(), days as f64 * 86_400.0);
        prop_assert_eq!(interval.units(), days as f64 * 129_600.0);
    }
}

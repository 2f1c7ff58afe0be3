use calendar_engine::{
    registry, CalendarDate, CalendarError, CalendarInterval, DateDefinition, HebrewMonth,
    RelativeDate, UnknownDate,
};

// ---------------------------------------------------------------------------
// A minimal custom calendar: whole days since the epoch.
// ---------------------------------------------------------------------------

macro_rules! day_count_calendar {
    ($name:ident, $identifier:literal) => {
        #[derive(Debug, Clone, PartialEq)]
        struct $name(i64);

        impl DateDefinition for $name {
            const IDENTIFIER: &'static str = $identifier;

            fn reference_date() -> CalendarDate {
                CalendarDate::epoch()
            }

            fn from_interval_since_reference(interval: CalendarInterval) -> calendar_engine::Result<Self> {
                Ok(Self(interval.days().floor() as i64))
            }

            fn interval_since_reference(&self) -> CalendarInterval {
                CalendarInterval::from_days(self.0 as f64)
            }

            fn encode_payload(&self) -> calendar_engine::Result<String> {
                Ok(self.0.to_string())
            }

            fn decode_payload(payload: &str) -> calendar_engine::Result<Self> {
                payload
                    .parse()
                    .map(Self)
                    .map_err(|e| CalendarError::InvalidPayload {
                        identifier: $identifier.to_string(),
                        reason: format!("{e}"),
                    })
            }
        }
    };
}

day_count_calendar!(NeverRegistered, "tests-never-registered");
day_count_calendar!(Registered, "tests-registered");

// ---------------------------------------------------------------------------
// Built-in definitions
// ---------------------------------------------------------------------------

#[test]
fn builtins_round_trip_through_json() {
    let dates = [
        CalendarDate::hebrew(5784, HebrewMonth::AdarI, 30, 23, 1079).unwrap(),
        CalendarDate::gregorian(1969, 7, 20, 20, 17, 40).unwrap(),
        CalendarDate::now(),
        CalendarDate::epoch() + CalendarInterval::from_weeks(3.0),
    ];
    for date in dates {
        let json = serde_json::to_string(&date).unwrap();
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date, "{json}");
        assert_eq!(back.identifier(), date.identifier());
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
    }
}

#[test]
fn relative_payload_keeps_its_base() {
    let base = CalendarDate::gregorian(2024, 1, 1, 0, 0, 0).unwrap();
    let date = &base + CalendarInterval::from_days(10.0);
    let json = serde_json::to_string(&date).unwrap();
    let back: CalendarDate = serde_json::from_str(&json).unwrap();
    let relative = back.definition::<RelativeDate>().unwrap();
    assert_eq!(relative.base().identifier(), "gregorian");
    assert_eq!(relative.offset(), CalendarInterval::from_days(10.0));
}

#[test]
fn serialized_tuple_carries_instant() {
    let date = CalendarDate::gregorian(1997, 10, 2, 0, 0, 0).unwrap();
    let value: serde_json::Value = serde_json::to_value(&date).unwrap();
    assert_eq!(value[0], "gregorian");
    assert!(value[1].is_string());
    assert_eq!(value[2], serde_json::json!([32400.0, 129600]));
}

#[test]
fn malformed_payload_for_registered_identifier_is_an_error() {
    let json = r#"["gregorian","{\"year\":2024}",[0.0,129600]]"#;
    let err = serde_json::from_str::<CalendarDate>(json).unwrap_err();
    assert!(err.to_string().contains("gregorian"), "{err}");
}

// ---------------------------------------------------------------------------
// Custom definitions
// ---------------------------------------------------------------------------

#[test]
fn unregistered_definition_round_trips_as_unknown() {
    let original = CalendarDate::new(NeverRegistered(12_345));
    let json = serde_json::to_string(&original).unwrap();
    assert_eq!(json, r#"["tests-never-registered","12345",[1599912000.0,129600]]"#);

    let decoded: CalendarDate = serde_json::from_str(&json).unwrap();
    let unknown = decoded.definition::<UnknownDate>().expect("falls back to UnknownDate");
    assert_eq!(unknown.payload(), "12345");
    assert_eq!(decoded.identifier(), "tests-never-registered");
    assert_eq!(decoded, original);
    assert_eq!(decoded.interval_since_epoch(), original.interval_since_epoch());

    // Fields of known calendars can still be derived from the stored instant.
    assert_eq!(decoded.hebrew_year().unwrap(), original.hebrew_year().unwrap());

    assert_eq!(serde_json::to_string(&decoded).unwrap(), json);
}

#[test]
fn registered_definition_decodes_to_itself() {
    registry::register::<Registered>();
    assert!(registry::is_registered("tests-registered"));

    let original = CalendarDate::new(Registered(-7));
    let json = serde_json::to_string(&original).unwrap();
    let decoded: CalendarDate = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.definition::<Registered>(), Some(&Registered(-7)));
    assert_eq!(decoded, CalendarDate::epoch() - CalendarInterval::from_weeks(1.0));
}

#[test]
fn custom_definition_converts_from_other_calendars() {
    let date = CalendarDate::hebrew(5758, HebrewMonth::Cheshvan, 1, 12, 0).unwrap();
    let days: NeverRegistered = date.convert().unwrap();
    assert_eq!(days, NeverRegistered(30));
}

//! Range-checked day, hour and part newtypes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{HebrewMonth, HebrewYear, MAX_DAYS_IN_MONTH};
use crate::error::{CalendarError, Result};

macro_rules! bounded_field {
    ($(#[$meta:meta])* $name:ident($repr:ty), $label:literal, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($repr);

        impl $name {
            pub const MIN: $repr = $min;
            pub const MAX: $repr = $max;

            /// # Errors
            ///
            #[doc = concat!("Returns [`CalendarError::OutOfRange`] if `value` is outside `", stringify!($min), "..=", stringify!($max), "`.")]
            pub fn new(value: $repr) -> Result<Self> {
                if !(Self::MIN..=Self::MAX).contains(&value) {
                    return Err(CalendarError::OutOfRange {
                        field: $label,
                        value: i64::from(value),
                        min: i64::from(Self::MIN),
                        max: i64::from(Self::MAX),
                    });
                }
                Ok(Self(value))
            }

            pub fn get(self) -> $repr {
                self.0
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = CalendarError;

            fn try_from(value: $repr) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> $repr {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = <$repr>::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

bounded_field!(
    /// Day of a Hebrew month, 1..=30.
    ///
    /// A day is only checked against the longest possible month; use
    /// [`HebrewDay::correct`] to carry an overflowing day into the next month.
    HebrewDay(u8),
    "Hebrew day",
    1,
    MAX_DAYS_IN_MONTH
);

bounded_field!(
    /// Hour of a Hebrew day, 0..=23, counted from 18:00 of the previous civil day.
    HebrewHour(u8),
    "Hebrew hour",
    0,
    23
);

bounded_field!(
    /// Part (chelek) of a Hebrew hour, 0..=1079.
    HebrewPart(u16),
    "Hebrew part",
    0,
    1079
);

impl HebrewDay {
    pub const FIRST: HebrewDay = HebrewDay(1);

    /// Carry the day forward while it exceeds the length of `month` in `year`.
    ///
    /// Each carry subtracts the month's length from the day and advances to
    /// the next month, moving into the next year after Elul. The month is
    /// corrected for the year first.
    pub fn correct(
        self,
        month: HebrewMonth,
        year: HebrewYear,
    ) -> (HebrewDay, HebrewMonth, HebrewYear) {
        let mut day = self.0;
        let mut year = year;
        let mut month = month.corrected(year);
        loop {
            let length = month.number_of_days(year);
            if day <= length {
                return (HebrewDay(day), month, year);
            }
            day -= length;
            (month, year) = month.next(year);
        }
    }
}

impl HebrewHour {
    pub const FIRST: HebrewHour = HebrewHour(0);
}

impl HebrewPart {
    pub const ZERO: HebrewPart = HebrewPart(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(HebrewDay::new(0).is_err());
        assert_eq!(HebrewDay::new(30).unwrap().get(), 30);
        assert!(HebrewDay::new(31).is_err());
        assert!(HebrewHour::new(23).is_ok());
        assert!(HebrewHour::new(24).is_err());
        assert!(HebrewPart::new(1079).is_ok());
        assert_eq!(
            HebrewPart::new(1080),
            Err(CalendarError::OutOfRange {
                field: "Hebrew part",
                value: 1080,
                min: 0,
                max: 1079,
            })
        );
    }

    #[test]
    fn test_try_from_and_into() {
        let hour = HebrewHour::try_from(6u8).unwrap();
        assert_eq!(u8::from(hour), 6);
        assert!(HebrewPart::try_from(2000u16).is_err());
    }

    #[test]
    fn test_day_thirty_of_29_day_month_carries() {
        // Tevet always has 29 days.
        let year = HebrewYear::new(5785);
        let (day, month, carried_year) = HebrewDay::new(30)
            .unwrap()
            .correct(HebrewMonth::Tevet, year);
        assert_eq!(day.get(), 1);
        assert_eq!(month, HebrewMonth::Shevat);
        assert_eq!(carried_year, year);
    }

    #[test]
    fn test_day_thirty_of_elul_carries_into_next_year() {
        let year = HebrewYear::new(5785);
        let (day, month, carried_year) = HebrewDay::new(30)
            .unwrap()
            .correct(HebrewMonth::Elul, year);
        assert_eq!(day.get(), 1);
        assert_eq!(month, HebrewMonth::Tishrei);
        assert_eq!(carried_year, HebrewYear::new(5786));
    }

    #[test]
    fn test_correct_is_identity_for_legal_day() {
        let year = HebrewYear::new(5785);
        let (day, month, same_year) = HebrewDay::new(30)
            .unwrap()
            .correct(HebrewMonth::Cheshvan, year);
        assert_eq!((day.get(), month, same_year), (30, HebrewMonth::Cheshvan, year));
    }

    #[test]
    fn test_correct_also_corrects_adar() {
        let year = HebrewYear::new(5784);
        let (day, month, _) = HebrewDay::new(14).unwrap().correct(HebrewMonth::Adar, year);
        assert_eq!((day.get(), month), (14, HebrewMonth::AdarII));
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<HebrewHour>("24").is_err());
        assert_eq!(serde_json::from_str::<HebrewDay>("29").unwrap().get(), 29);
        assert_eq!(serde_json::to_string(&HebrewPart::new(793).unwrap()).unwrap(), "793");
    }
}

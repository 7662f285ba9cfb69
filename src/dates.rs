//! Calendar dates on the wire, written as `YYYY-MM-DD`.

use serde::{de, ser, Deserialize, Deserializer, Serializer};
use time::macros::format_description;
use time::Date;

/// Parses a `YYYY-MM-DD` date.
///
/// ```
/// use caredesk::dates::parse_date;
/// assert!(parse_date("2023-06-01").is_ok());
/// assert!(parse_date("01/06/2023").is_err());
/// ```
pub fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where S: Serializer {
    let text = format_date(*date).map_err(ser::Error::custom)?;
    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where D: Deserializer<'de> {
    let text = String::deserialize(deserializer)?;
    parse_date(&text).map_err(de::Error::custom)
}

/// The same as the parent module, for optional dates. Empty strings
/// count as absent, which is what an untouched date input submits.
pub mod option {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        match date {
            Some(date) => super::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where D: Deserializer<'de> {
        let text: Option<String> = Deserialize::deserialize(deserializer)?;

        match text {
            Some(text) if !text.trim().is_empty() => super::parse_date(&text)
                .map(Some)
                .map_err(de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::macros::date;
    use time::Date;

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct Holder {
        #[serde(with = "crate::dates")]
        on: Date,

        #[serde(default, with = "crate::dates::option")]
        until: Option<Date>,
    }

    #[test]
    fn dates_use_iso_format() {
        let holder = Holder {
            on: date!(2023 - 06 - 01),
            until: None,
        };

        let json = serde_json::to_string(&holder).expect("serialize holder");
        assert_eq!(json, r#"{"on":"2023-06-01","until":null}"#);
    }

    #[test]
    fn blank_optional_dates_are_absent() {
        let holder: Holder =
            serde_json::from_str(r#"{"on":"2023-06-05","until":""}"#).expect("parse holder");

        assert_eq!(holder.on, date!(2023 - 06 - 05));
        assert_eq!(holder.until, None);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let result = serde_json::from_str::<Holder>(r#"{"on":"June 1st"}"#);

        assert!(result.is_err());
    }
}

// Canonical date handling for request payloads.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A date field normalized to canonical ISO-8601 form.
///
/// Accepts date-only input (`2020-01-01`) or a full date-time (RFC 3339 or
/// `YYYY-MM-DDTHH:MM:SS`), and always serializes as the date-only
/// `YYYY-MM-DD` string before rows reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoDate(pub NaiveDate);

impl IsoDate {
    pub fn parse(input: &str) -> Option<Self> {
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Some(IsoDate(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(IsoDate(dt.date_naive()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
            return Some(IsoDate(dt.date()));
        }
        None
    }
}

impl std::fmt::Display for IsoDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for IsoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        IsoDate::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {:?}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_only_input_round_trips() {
        let date: IsoDate = serde_json::from_value(json!("2020-01-01")).unwrap();
        assert_eq!(serde_json::to_value(date).unwrap(), json!("2020-01-01"));
    }

    #[test]
    fn date_time_input_normalizes_to_date() {
        let date: IsoDate = serde_json::from_value(json!("2020-01-01T15:30:00Z")).unwrap();
        assert_eq!(serde_json::to_value(date).unwrap(), json!("2020-01-01"));

        let date: IsoDate = serde_json::from_value(json!("2020-01-01T15:30:00")).unwrap();
        assert_eq!(date.to_string(), "2020-01-01");
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(serde_json::from_value::<IsoDate>(json!("last tuesday")).is_err());
        assert!(serde_json::from_value::<IsoDate>(json!(20200101)).is_err());
    }
}

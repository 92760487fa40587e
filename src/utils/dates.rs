/// Calendar dates as `YYYY-MM-DD`.
///
/// Reading also accepts full RFC 3339 timestamps (`2026-01-05T00:00:00.000Z`),
/// which is how browser exports serialize dates; the UTC calendar day is kept.
pub mod calendar_day {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(day) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(day);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.naive_utc().date())
    }
}

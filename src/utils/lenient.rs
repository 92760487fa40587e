use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

// Largest magnitude below which every integer is an exact f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Accepts `"3"`, `3` or `3.0` and yields a string. Numbers must be whole
/// and exactly representable.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) => Ok(s),
        StringOrNumber::Int(i) => Ok(i.to_string()),
        StringOrNumber::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => {
            Ok(format!("{}", f as i64))
        }
        StringOrNumber::Float(f) => Err(D::Error::custom(format!(
            "expected a string or a whole number, got {f}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Link {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    fn parse(json: &str) -> Result<String, serde_json::Error> {
        serde_json::from_str::<Link>(json).map(|l| l.id)
    }

    #[test]
    fn accepts_strings_and_whole_numbers() {
        assert_eq!(parse(r#"{"id": "std"}"#).unwrap(), "std");
        assert_eq!(parse(r#"{"id": 2}"#).unwrap(), "2");
        assert_eq!(parse(r#"{"id": 2.0}"#).unwrap(), "2");
    }

    #[test]
    fn rejects_fractions_and_out_of_range_numbers() {
        assert!(parse(r#"{"id": 1.5}"#).is_err());
        assert!(parse(r#"{"id": 1e300}"#).is_err());
        assert!(parse(r#"{"id": 18446744073709551615}"#).is_err());
    }
}

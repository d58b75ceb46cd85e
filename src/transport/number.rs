use serde::Deserialize;
use serde::de::Error as DeError;

/// Amount returned by the gateway as either a JSON number or a JSON string.
///
/// Numbers are parsed from the raw token. Numeric strings are trimmed and parsed;
/// an empty string means "absent". Any other string is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportNumber(Option<f64>);

impl TransportNumber {
    pub fn into_f64(self) -> Option<f64> {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                let trimmed = parsed.trim();
                if trimmed.is_empty() {
                    return Ok(Self(None));
                }
                parse_finite(trimmed).map(|value| Self(Some(value))).ok_or_else(|| {
                    D::Error::custom(format!("expected numeric string, got {parsed:?}"))
                })
            }
            Some(b'-' | b'0'..=b'9') => parse_finite(token)
                .map(|value| Self(Some(value)))
                .ok_or_else(|| D::Error::custom(format!("number out of range: {token}"))),
            Some(b'n') if token == "null" => Ok(Self(None)),
            _ => Err(D::Error::custom(
                "expected amount field to be JSON string or number",
            )),
        }
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

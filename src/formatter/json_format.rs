use serde_json::Value;

use super::epoch::{EpochOptions, DATESTAMP_SUFFIX};
use super::Error;
use crate::jwt::ClaimSet;

/// Copies `claims`, adding a `<key>_datestamp` entry next to every
/// convertible timestamp claim. The source set is left untouched.
pub fn normalized_claims(claims: &ClaimSet, epoch: &EpochOptions) -> ClaimSet {
    let mut extended = claims.clone();
    for (key, value) in claims {
        if let Some(datestamp) = epoch.datestamp(key, value) {
            extended.insert(format!("{key}{DATESTAMP_SUFFIX}"), Value::String(datestamp));
        }
    }
    extended
}

/// Pretty-printed JSON with two-space indentation.
pub fn render(claims: &ClaimSet, epoch: &EpochOptions) -> Result<Vec<u8>, Error> {
    let bytes = if epoch.convert {
        serde_json::to_vec_pretty(&normalized_claims(claims, epoch))
    } else {
        serde_json::to_vec_pretty(claims)
    };
    bytes.map_err(Error::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::epoch::EpochUnit;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn claims(value: Value) -> ClaimSet {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test claims must be an object"),
        }
    }

    #[test]
    fn scalar_claims_round_trip() {
        let input = claims(json!({
            "sub": "alice",
            "admin": true,
            "iat": 1700000000,
            "score": 0.25,
        }));

        let out = render(&input, &EpochOptions::default()).unwrap();
        let parsed: ClaimSet = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, input);
    }

    #[test]
    fn uses_two_space_indent() {
        let out = render(&claims(json!({"sub": "alice"})), &EpochOptions::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"sub\": \"alice\"\n}");
    }

    #[test]
    fn adds_datestamp_companions() {
        let input = claims(json!({"iat": 1700000000, "exp": "never", "sub": "alice"}));
        let epoch = EpochOptions::new(true, EpochUnit::Seconds);

        let out = render(&input, &epoch).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(parsed["iat"], json!(1700000000));
        assert_eq!(parsed["iat_datestamp"], json!("2023-11-14 22:13:20 UTC"));
        assert_eq!(parsed.get("exp_datestamp"), None);
        assert_eq!(parsed.get("sub_datestamp"), None);
    }

    #[test]
    fn companion_overwrites_colliding_claim() {
        let input = claims(json!({"iat": 1700000000, "iat_datestamp": "original"}));
        let extended = normalized_claims(&input, &EpochOptions::new(true, EpochUnit::Seconds));

        assert_eq!(extended["iat_datestamp"], json!("2023-11-14 22:13:20 UTC"));
        assert_eq!(input["iat_datestamp"], json!("original"));
    }

    #[test]
    fn no_companions_when_disabled() {
        let input = claims(json!({"iat": 1700000000}));
        let out = render(&input, &EpochOptions::new(false, EpochUnit::Seconds)).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("datestamp"));
    }
}

//! Serde helpers for `f64` values that may be infinite or NaN.
//!
//! JSON has no representation for non-finite numbers and `serde_json` writes
//! them as `null`. These helpers write them as the strings `"inf"`, `"-inf"`
//! and `"NaN"` instead and accept the same strings (plus plain numbers) on
//! input. Use with `#[serde(with = "krill_core::nonfinite")]` on an `f64`
//! field or `#[serde(with = "krill_core::nonfinite::vec")]` on a `Vec<f64>`.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

const INF: &str = "inf";
const NEG_INF: &str = "-inf";
const NAN: &str = "NaN";

/// `f64` wrapper carrying the tagged representation
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tagged(f64);

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Tag(String),
}

impl Serialize for Tagged {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() {
            serializer.serialize_f64(v)
        } else if v.is_nan() {
            serializer.serialize_str(NAN)
        } else if v > 0.0 {
            serializer.serialize_str(INF)
        } else {
            serializer.serialize_str(NEG_INF)
        }
    }
}

impl<'de> Deserialize<'de> for Tagged {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Tagged(v)),
            Repr::Tag(tag) => match tag.as_str() {
                INF => Ok(Tagged(f64::INFINITY)),
                NEG_INF => Ok(Tagged(f64::NEG_INFINITY)),
                NAN => Ok(Tagged(f64::NAN)),
                other => Err(de::Error::custom(format!(
                    "expected a number, \"inf\", \"-inf\" or \"NaN\", got {:?}",
                    other
                ))),
            },
        }
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Tagged(*value).serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Tagged::deserialize(deserializer)?.0)
}

pub mod vec {
    use super::Tagged;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|&v| Tagged(v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let tagged = Vec::<Tagged>::deserialize(deserializer)?;
        Ok(tagged.into_iter().map(|t| t.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "crate::nonfinite")]
        value: f64,
        #[serde(with = "crate::nonfinite::vec")]
        series: Vec<f64>,
    }

    #[test]
    fn test_non_finite_written_as_tags() {
        let sample = Sample {
            value: f64::NAN,
            series: vec![1.5, f64::INFINITY, f64::NEG_INFINITY, f64::NAN],
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"value":"NaN","series":[1.5,"inf","-inf","NaN"]}"#);
    }

    #[test]
    fn test_tags_and_numbers_read_back() {
        let json = r#"{"value":3,"series":[0.25,"inf","-inf","NaN",-2]}"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.value, 3.0);
        assert_eq!(sample.series[0], 0.25);
        assert_eq!(sample.series[1], f64::INFINITY);
        assert_eq!(sample.series[2], f64::NEG_INFINITY);
        assert!(sample.series[3].is_nan());
        assert_eq!(sample.series[4], -2.0);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let json = r#"{"value":"infinity","series":[]}"#;
        assert!(serde_json::from_str::<Sample>(json).is_err());

        let null = r#"{"value":null,"series":[]}"#;
        assert!(serde_json::from_str::<Sample>(null).is_err());
    }
}

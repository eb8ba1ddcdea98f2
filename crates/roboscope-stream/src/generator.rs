//! Synthetic reading generator.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Serialize, Serializer};

use crate::registry::Topic;

/// One timestamped set of field values produced for a topic.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    /// Generation time, serialized with millisecond precision.
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: DateTime<Utc>,
    /// Field name to value, matching the topic's declared shape.
    pub values: BTreeMap<String, f64>,
}

fn serialize_millis<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Produce one randomized reading for a topic's value shape.
///
/// Each field is drawn independently and uniformly from its declared range,
/// rounded to 3 decimal places. No state persists between calls.
pub fn generate(topic: &Topic) -> Reading {
    let mut rng = rand::thread_rng();
    let values = topic
        .fields
        .iter()
        .map(|f| (f.name.clone(), round3(rng.gen_range(f.min..=f.max))))
        .collect();

    Reading {
        timestamp: Utc::now(),
        values,
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

//! Static topic registry.
//!
//! Topics are compiled in and immutable for the process lifetime, so the
//! registry is read-only after construction and safe to share without
//! synchronization.

use crate::StreamError;

/// One numeric field of a topic, with the fixed range synthetic values are
/// drawn from.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl FieldSpec {
    fn new(name: &str, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            min,
            max,
        }
    }
}

/// A named, statically configured data source with a fixed set of numeric
/// fields.
#[derive(Debug, Clone)]
pub struct Topic {
    /// Unique identifier (e.g. `/robot/position`).
    pub id: String,
    /// Human-readable label (the simulated message type).
    pub label: String,
    /// Ordered value shape.
    pub fields: Vec<FieldSpec>,
}

impl Topic {
    /// The ordered field names of this topic's value shape.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// The static mapping from topic id to topic definition.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
}

impl TopicRegistry {
    /// Build the registry of built-in simulated topics.
    pub fn builtin() -> Self {
        let topics = vec![
            Topic {
                id: "/robot/position".to_string(),
                label: "geometry_msgs/Point".to_string(),
                fields: vec![
                    FieldSpec::new("x", -100.0, 100.0),
                    FieldSpec::new("y", -100.0, 100.0),
                    FieldSpec::new("z", 0.0, 50.0),
                ],
            },
            Topic {
                id: "/robot/velocity".to_string(),
                label: "geometry_msgs/Twist".to_string(),
                fields: vec![
                    FieldSpec::new("linear_x", -5.0, 5.0),
                    FieldSpec::new("linear_y", -5.0, 5.0),
                    FieldSpec::new("linear_z", -2.0, 2.0),
                    FieldSpec::new("angular_x", -1.0, 1.0),
                    FieldSpec::new("angular_y", -1.0, 1.0),
                    FieldSpec::new("angular_z", -1.0, 1.0),
                ],
            },
            Topic {
                id: "/sensor/gps".to_string(),
                label: "sensor_msgs/NavSatFix".to_string(),
                fields: vec![
                    FieldSpec::new("latitude", -90.0, 90.0),
                    FieldSpec::new("longitude", -180.0, 180.0),
                ],
            },
        ];

        Self { topics }
    }

    /// All topics, in registration order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Look up a topic by id.
    pub fn get(&self, id: &str) -> Result<&Topic, StreamError> {
        self.topics
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StreamError::TopicNotFound(id.to_string()))
    }
}

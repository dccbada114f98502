//! Serialization and deserialization for carving design documents.
//!
//! Documents are JSON with a strict schema. Only version "2.0" is
//! accepted; any other value, unknown field, or invalid shape record
//! rejects the whole load. There is no partial or best-effort recovery.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use carvekit_core::error::DesignFileError;
use carvekit_core::geometry::Point;

use crate::shapes::{Leaf, Shape, TriArc};

/// The one design document schema version this build reads and writes.
pub const DESIGN_SCHEMA_VERSION: &str = "2.0";

/// Complete design document structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignDocument {
    pub version: String,
    pub metadata: DesignMetadata,
    pub shapes: Vec<ShapeData>,
}

/// Design metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

/// Serialized shape record.
///
/// A leaf carries `radius`, a tri-arc carries `curvatures`; the other
/// field must be absent. Kept as one flat struct so unknown fields can be
/// rejected strictly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeData {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub vertices: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curvatures: Option<Vec<f64>>,
}

impl ShapeData {
    /// Converts a live shape into its serialized record.
    pub fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Leaf(leaf) => Self {
                shape_type: "LEAF".to_string(),
                vertices: leaf.vertices.to_vec(),
                radius: Some(leaf.radius),
                curvatures: None,
            },
            Shape::TriArc(tri) => Self {
                shape_type: "TRI_ARC".to_string(),
                vertices: tri.vertices.to_vec(),
                radius: None,
                curvatures: Some(tri.curvatures.to_vec()),
            },
        }
    }

    /// Validates this record and builds the live shape.
    pub fn to_shape(&self) -> Result<Shape, DesignFileError> {
        for (i, v) in self.vertices.iter().enumerate() {
            if !v.is_finite() {
                return Err(invalid(format!("vertex {i} is not finite")));
            }
        }
        match self.shape_type.as_str() {
            "LEAF" => {
                if self.vertices.len() != 2 {
                    return Err(invalid(format!(
                        "LEAF requires 2 vertices, found {}",
                        self.vertices.len()
                    )));
                }
                if self.curvatures.is_some() {
                    return Err(invalid("LEAF must not carry curvatures"));
                }
                let radius = self
                    .radius
                    .ok_or_else(|| invalid("LEAF requires a radius"))?;
                if !radius.is_finite() {
                    return Err(invalid("LEAF radius is not finite"));
                }
                let leaf = Leaf::new(self.vertices[0], self.vertices[1], radius)
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(Shape::Leaf(leaf))
            }
            "TRI_ARC" => {
                if self.vertices.len() != 3 {
                    return Err(invalid(format!(
                        "TRI_ARC requires 3 vertices, found {}",
                        self.vertices.len()
                    )));
                }
                if self.radius.is_some() {
                    return Err(invalid("TRI_ARC must not carry a radius"));
                }
                let curvatures = self
                    .curvatures
                    .as_ref()
                    .ok_or_else(|| invalid("TRI_ARC requires curvatures"))?;
                if curvatures.len() != 3 {
                    return Err(invalid(format!(
                        "TRI_ARC requires 3 curvatures, found {}",
                        curvatures.len()
                    )));
                }
                for (i, b) in curvatures.iter().enumerate() {
                    if !b.is_finite() {
                        return Err(invalid(format!("curvature {i} is not finite")));
                    }
                    if *b >= 0.0 {
                        return Err(invalid(format!(
                            "curvature {i} is {b}; only concave (negative) bulges are valid"
                        )));
                    }
                }
                Ok(Shape::TriArc(TriArc::with_curvatures(
                    [self.vertices[0], self.vertices[1], self.vertices[2]],
                    [curvatures[0], curvatures[1], curvatures[2]],
                )))
            }
            other => Err(invalid(format!("unknown shape type {other:?}"))),
        }
    }
}

fn invalid(reason: impl Into<String>) -> DesignFileError {
    DesignFileError::InvalidShape {
        reason: reason.into(),
    }
}

impl DesignDocument {
    /// Creates an empty document with the current timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: DESIGN_SCHEMA_VERSION.to_string(),
            metadata: DesignMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            shapes: Vec::new(),
        }
    }

    /// Creates a document holding the given shapes.
    pub fn from_shapes(name: impl Into<String>, shapes: Vec<Shape>) -> Self {
        let mut doc = Self::new(name);
        doc.shapes = shapes.iter().map(ShapeData::from_shape).collect();
        doc
    }

    /// Parses and validates a document from JSON. Any schema violation
    /// rejects the whole document.
    pub fn parse(json: &str) -> Result<Self, DesignFileError> {
        let document: DesignDocument = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Validates the schema version and every shape record.
    pub fn validate(&self) -> Result<(), DesignFileError> {
        if self.version != DESIGN_SCHEMA_VERSION {
            return Err(DesignFileError::UnsupportedVersion {
                found: self.version.clone(),
                expected: DESIGN_SCHEMA_VERSION.to_string(),
            });
        }
        for data in &self.shapes {
            data.to_shape()?;
        }
        Ok(())
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String, DesignFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Saves the document to a file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json().context("Failed to serialize design")?;
        std::fs::write(path.as_ref(), json).context("Failed to write design file")?;
        Ok(())
    }

    /// Loads and validates a document from a file, refreshing the
    /// modified timestamp.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read design file")?;
        let mut document = Self::parse(&content).context("Failed to parse design file")?;
        document.metadata.modified = Utc::now();
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shapes() -> Vec<Shape> {
        vec![
            Shape::Leaf(Leaf::from_placement(Point::new(0.0, 0.0), Point::new(10.0, 0.0))),
            Shape::TriArc(TriArc::with_curvatures(
                [
                    Point::new(0.0, 0.0),
                    Point::new(100.0, 0.0),
                    Point::new(50.0, 100.0),
                ],
                [-0.25, -0.4, -0.1],
            )),
        ]
    }

    #[test]
    fn shapes_round_trip_exactly() {
        for shape in sample_shapes() {
            let restored = ShapeData::from_shape(&shape).to_shape().unwrap();
            assert_eq!(shape, restored);
        }
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = DesignDocument::from_shapes("test", sample_shapes());
        let json = doc.to_json().unwrap();
        let parsed = DesignDocument::parse(&json).unwrap();
        assert_eq!(parsed.shapes.len(), 2);
        let restored: Vec<Shape> = parsed
            .shapes
            .iter()
            .map(|d| d.to_shape().unwrap())
            .collect();
        assert_eq!(restored, sample_shapes());
    }

    #[test]
    fn wire_format_matches_schema() {
        let doc = DesignDocument::from_shapes("test", sample_shapes());
        let json = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "2.0");
        assert_eq!(value["shapes"][0]["type"], "LEAF");
        assert_eq!(value["shapes"][0]["radius"], 6.5);
        assert!(value["shapes"][0].get("curvatures").is_none());
        assert_eq!(value["shapes"][1]["type"], "TRI_ARC");
        assert_eq!(value["shapes"][1]["curvatures"][1], -0.4);
    }

    #[test]
    fn wrong_version_is_rejected() {
        let mut doc = DesignDocument::from_shapes("test", sample_shapes());
        doc.version = "1.0".to_string();
        let err = DesignDocument::parse(&doc.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, DesignFileError::UnsupportedVersion { .. }));
    }

    #[test]
    fn unknown_document_fields_are_rejected() {
        let doc = DesignDocument::new("test");
        let mut value: serde_json::Value =
            serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        value["extra"] = serde_json::json!(true);
        assert!(DesignDocument::parse(&value.to_string()).is_err());
    }

    #[test]
    fn unknown_shape_type_rejects_the_load() {
        let data = ShapeData {
            shape_type: "PENTAGON".to_string(),
            vertices: vec![Point::new(0.0, 0.0)],
            radius: None,
            curvatures: None,
        };
        assert!(data.to_shape().is_err());
    }

    #[test]
    fn convex_curvature_is_rejected() {
        let data = ShapeData {
            shape_type: "TRI_ARC".to_string(),
            vertices: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 10.0),
            ],
            radius: None,
            curvatures: Some(vec![-0.25, 0.25, -0.25]),
        };
        assert!(data.to_shape().is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let data = ShapeData {
            shape_type: "LEAF".to_string(),
            vertices: vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 0.0)],
            radius: Some(6.5),
            curvatures: None,
        };
        assert!(data.to_shape().is_err());
    }

    #[test]
    fn leaf_radius_below_reach_is_rejected() {
        let data = ShapeData {
            shape_type: "LEAF".to_string(),
            vertices: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            radius: Some(3.0),
            curvatures: None,
        };
        assert!(data.to_shape().is_err());
    }
}

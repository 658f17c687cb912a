/// Scale identifiers and validated window size sets.
use crate::error::{RasterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of scale identifiers. Unknown scale names are rejected when a
/// window size set is built, not at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Small,
    Medium,
    Large,
}

impl Scale {
    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Small => "small",
            Scale::Medium => "medium",
            Scale::Large => "large",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Scale::Small),
            "medium" => Ok(Scale::Medium),
            "large" => Ok(Scale::Large),
            _ => Err(RasterError::UnknownScale(name.to_string())),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named scale paired with its window size in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    pub scale: Scale,
    pub size: f64,
}

/// Ordered collection of window specs. Iteration order is insertion order;
/// sizes are positive and finite and every scale appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSizeSet {
    specs: Vec<WindowSpec>,
}

impl WindowSizeSet {
    pub fn new(specs: Vec<WindowSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(RasterError::EmptyWindowSizes);
        }
        for (i, spec) in specs.iter().enumerate() {
            if !spec.size.is_finite() || spec.size <= 0.0 {
                return Err(RasterError::InvalidWindowSize(spec.size));
            }
            if specs[..i].iter().any(|other| other.scale == spec.scale) {
                return Err(RasterError::DuplicateScale(spec.scale.to_string()));
            }
        }
        Ok(Self { specs })
    }

    /// Build from configuration-level (name, size) pairs.
    pub fn from_named(pairs: &[(String, f64)]) -> Result<Self> {
        let specs = pairs
            .iter()
            .map(|(name, size)| {
                Ok(WindowSpec {
                    scale: Scale::parse(name)?,
                    size: *size,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(specs)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, scale: Scale) -> Option<f64> {
        self.specs
            .iter()
            .find(|spec| spec.scale == scale)
            .map(|spec| spec.size)
    }

    /// The largest window size in the set. Masking validity is decided
    /// against this size alone: a window that fits at the largest scale fits
    /// at every smaller one.
    pub fn largest(&self) -> f64 {
        self.specs.iter().fold(0.0, |acc, spec| acc.max(spec.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn parses_known_scale_names() {
        assert_eq!(Scale::parse("small").unwrap(), Scale::Small);
        assert_eq!(Scale::parse("MEDIUM").unwrap(), Scale::Medium);
        assert_eq!(Scale::parse(" large ").unwrap(), Scale::Large);
    }

    #[test]
    fn rejects_unknown_scale_name() {
        assert!(matches!(
            Scale::parse("huge"),
            Err(RasterError::UnknownScale(_))
        ));
    }

    #[test]
    fn builds_ordered_set_from_named_pairs() {
        let set =
            WindowSizeSet::from_named(&named(&[("small", 2.5), ("medium", 5.0), ("large", 10.0)]))
                .unwrap();
        let order: Vec<Scale> = set.iter().map(|spec| spec.scale).collect();
        assert_eq!(order, vec![Scale::Small, Scale::Medium, Scale::Large]);
        assert_eq!(set.largest(), 10.0);
        assert_eq!(set.get(Scale::Medium), Some(5.0));
    }

    #[test]
    fn rejects_empty_set() {
        assert!(matches!(
            WindowSizeSet::new(Vec::new()),
            Err(RasterError::EmptyWindowSizes)
        ));
    }

    #[test]
    fn rejects_non_positive_window_size() {
        assert!(matches!(
            WindowSizeSet::from_named(&named(&[("small", 0.0)])),
            Err(RasterError::InvalidWindowSize(_))
        ));
        assert!(matches!(
            WindowSizeSet::from_named(&named(&[("small", f64::NAN)])),
            Err(RasterError::InvalidWindowSize(_))
        ));
    }

    #[test]
    fn rejects_duplicate_scale() {
        assert!(matches!(
            WindowSizeSet::from_named(&named(&[("small", 1.0), ("small", 2.0)])),
            Err(RasterError::DuplicateScale(_))
        ));
    }

    #[test]
    fn largest_ignores_ordering() {
        let set =
            WindowSizeSet::from_named(&named(&[("large", 12.0), ("small", 4.0)])).unwrap();
        assert_eq!(set.largest(), 12.0);
    }
}

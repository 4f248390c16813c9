//! Input rules checked before estates, trees or plans reach the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EstateBounds, GridCell};

/// Limits applied to incoming estate and tree data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstateRules {
    /// Largest accepted estate length or width
    pub max_dimension: u32,
    /// Tallest accepted tree height
    pub max_tree_height: u32,
}

impl Default for EstateRules {
    fn default() -> Self {
        Self {
            max_dimension: 50_000,
            max_tree_height: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("index out of bound")]
    OutOfBounds,

    #[error("invalid max distance")]
    InvalidMaxDistance,

    #[error("invalid estate id: {0}")]
    InvalidId(String),
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}

impl EstateRules {
    /// Check requested estate extents and narrow them to grid sizes.
    pub fn validate_dimensions(&self, length: i64, width: i64) -> Result<EstateBounds, ValidationError> {
        let max = i64::from(self.max_dimension);
        check_range("length", length, 1, max)?;
        check_range("width", width, 1, max)?;
        Ok(EstateBounds::new(length as u32, width as u32))
    }

    /// Check the fields of a tree request on their own.
    pub fn validate_tree_fields(&self, x: i64, y: i64, height: i64) -> Result<(GridCell, u32), ValidationError> {
        check_range("x", x, 1, i64::from(self.max_dimension))?;
        check_range("y", y, 1, i64::from(self.max_dimension))?;
        check_range("height", height, 0, i64::from(self.max_tree_height))?;
        Ok((GridCell::new(x as u32, y as u32), height as u32))
    }
}

/// A tree must be planted inside the estate it belongs to.
pub fn validate_placement(bounds: EstateBounds, cell: GridCell) -> Result<(), ValidationError> {
    if bounds.contains(cell) {
        Ok(())
    } else {
        Err(ValidationError::OutOfBounds)
    }
}

/// A sweep budget, when given, must allow at least one unit of travel.
pub fn validate_max_distance(max_distance: Option<i64>) -> Result<Option<u64>, ValidationError> {
    match max_distance {
        None => Ok(None),
        Some(value) if value >= 1 => Ok(Some(value as u64)),
        Some(_) => Err(ValidationError::InvalidMaxDistance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_must_be_positive_and_bounded() {
        let rules = EstateRules::default();
        assert_eq!(rules.validate_dimensions(20, 10), Ok(EstateBounds::new(20, 10)));
        assert!(matches!(
            rules.validate_dimensions(20, -1),
            Err(ValidationError::OutOfRange { field: "width", .. })
        ));
        assert!(matches!(
            rules.validate_dimensions(0, 5),
            Err(ValidationError::OutOfRange { field: "length", .. })
        ));
        assert!(rules.validate_dimensions(50_001, 1).is_err());
    }

    #[test]
    fn tree_outside_estate_is_out_of_bound() {
        let bounds = EstateBounds::new(4, 1);
        assert_eq!(
            validate_placement(bounds, GridCell::new(5, 1)),
            Err(ValidationError::OutOfBounds)
        );
        assert_eq!(
            validate_placement(bounds, GridCell::new(5, 1)).unwrap_err().to_string(),
            "index out of bound"
        );
        assert_eq!(validate_placement(bounds, GridCell::new(4, 1)), Ok(()));
    }

    #[test]
    fn tree_fields_are_range_checked() {
        let rules = EstateRules::default();
        assert_eq!(
            rules.validate_tree_fields(5, 1, 10),
            Ok((GridCell::new(5, 1), 10))
        );
        assert!(matches!(
            rules.validate_tree_fields(5, 1, -1),
            Err(ValidationError::OutOfRange { field: "height", .. })
        ));
        assert!(matches!(
            rules.validate_tree_fields(0, 1, 1),
            Err(ValidationError::OutOfRange { field: "x", .. })
        ));
        assert!(rules.validate_tree_fields(1, 1, 31).is_err());
        assert!(rules.validate_tree_fields(1, 1, 0).is_ok());
    }

    #[test]
    fn max_distance_rejects_non_positive_values() {
        assert_eq!(validate_max_distance(None), Ok(None));
        assert_eq!(validate_max_distance(Some(40)), Ok(Some(40)));
        assert_eq!(
            validate_max_distance(Some(0)),
            Err(ValidationError::InvalidMaxDistance)
        );
        assert_eq!(
            validate_max_distance(Some(-1)).unwrap_err().to_string(),
            "invalid max distance"
        );
    }
}

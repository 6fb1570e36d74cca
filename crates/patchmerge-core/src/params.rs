//! Parsing of text form fields into validated parameters.
//!
//! The front end collects coordinates, radius and resize dimensions as text.
//! Everything here trims surrounding whitespace and rejects anything that is
//! not a plain integer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composite::CompositeOptions;
use crate::decode::{resize, DecodeError, FilterType, RasterImage};
use crate::geometry::Position;

/// Errors for user-supplied numeric fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid value for {field}: '{value}' is not an integer")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Value for {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

fn parse_integer(field: &'static str, text: &str) -> Result<i64, InputError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| InputError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

/// Parse a width or height. Must be a positive integer that fits in `u32`.
pub fn parse_dimension(field: &'static str, text: &str) -> Result<u32, InputError> {
    let value = parse_integer(field, text)?;
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(InputError::OutOfRange { field, value }),
    }
}

/// Parse a patch-center coordinate. Negative values are allowed.
pub fn parse_coordinate(field: &'static str, text: &str) -> Result<i32, InputError> {
    let value = parse_integer(field, text)?;
    i32::try_from(value).map_err(|_| InputError::OutOfRange { field, value })
}

/// Parse a hole radius. Negative input means "no hole" and becomes 0.
pub fn parse_radius(text: &str) -> Result<i32, InputError> {
    let value = parse_integer("radius", text)?;
    let value = value.max(0);
    i32::try_from(value).map_err(|_| InputError::OutOfRange {
        field: "radius",
        value,
    })
}

impl CompositeOptions {
    /// Build options from the raw x / y / radius fields and the transparency
    /// checkbox. The composite mode is left at its default.
    pub fn from_form(
        x: &str,
        y: &str,
        radius: &str,
        transparent: bool,
    ) -> Result<Self, InputError> {
        Ok(Self {
            position: Position::new(parse_coordinate("x", x)?, parse_coordinate("y", y)?),
            radius: parse_radius(radius)?,
            transparent,
            ..Self::default()
        })
    }
}

/// A validated request to resize an image to exact dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub filter: FilterType,
}

impl ResizeRequest {
    pub fn from_form(width: &str, height: &str) -> Result<Self, InputError> {
        Ok(Self {
            width: parse_dimension("width", width)?,
            height: parse_dimension("height", height)?,
            filter: FilterType::default(),
        })
    }

    pub fn apply(&self, image: &RasterImage) -> Result<RasterImage, DecodeError> {
        resize(image, self.width, self.height, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::CompositeMode;
    use crate::decode::PixelLayout;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("x", "120"), Ok(120));
        assert_eq!(parse_coordinate("x", "  -15 "), Ok(-15));
        assert_eq!(
            parse_coordinate("x", "12.5"),
            Err(InputError::InvalidNumber {
                field: "x",
                value: "12.5".to_string()
            })
        );
        assert!(matches!(
            parse_coordinate("y", "99999999999"),
            Err(InputError::OutOfRange { field: "y", .. })
        ));
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("width", "640"), Ok(640));
        assert_eq!(
            parse_dimension("width", "0"),
            Err(InputError::OutOfRange {
                field: "width",
                value: 0
            })
        );
        assert!(matches!(
            parse_dimension("height", "-3"),
            Err(InputError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_dimension("height", ""),
            Err(InputError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_radius_clamps_negative() {
        assert_eq!(parse_radius("50"), Ok(50));
        assert_eq!(parse_radius("-7"), Ok(0));
        assert!(matches!(
            parse_radius("abc"),
            Err(InputError::InvalidNumber { field: "radius", .. })
        ));
    }

    #[test]
    fn test_composite_options_from_form() {
        let opts = CompositeOptions::from_form("100", "80", "25", false).unwrap();
        assert_eq!(opts.position, Position::new(100, 80));
        assert_eq!(opts.radius, 25);
        assert!(!opts.transparent);
        assert_eq!(opts.mode, CompositeMode::HoleAware);

        assert!(CompositeOptions::from_form("x", "80", "25", true).is_err());
    }

    #[test]
    fn test_resize_request() {
        let req = ResizeRequest::from_form("4", " 2").unwrap();
        assert_eq!(req.filter, FilterType::Bilinear);

        let img = RasterImage::filled(8, 8, PixelLayout::Rgb, [10, 20, 30, 255]);
        let out = req.apply(&img).unwrap();
        assert_eq!(out.dimensions(), (4, 2));

        assert!(ResizeRequest::from_form("0", "2").is_err());
    }
}

//! Parsing of the `(lon,lat lon,lat ...)` strings found in the geometry column.

use geo::{Coord, LineString};

use crate::error::CoordinateError;

/// How to treat a longitude or latitude that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Fail on the first bad token.
    #[default]
    Strict,
    /// Substitute `0.0` for the bad value and log it.
    ZeroFill,
}

/// Parses one `lon,lat` token.
///
/// # Errors
///
/// Returns [`CoordinateError::MissingComponent`] when there is no comma and
/// [`CoordinateError::InvalidNumber`] when either side is not a float.
pub fn parse_point(token: &str) -> Result<Coord<f64>, CoordinateError> {
    let (lon, lat) = token
        .split_once(',')
        .ok_or_else(|| CoordinateError::MissingComponent {
            token: token.to_owned(),
        })?;

    Ok(Coord {
        x: parse_number(token, lon)?,
        y: parse_number(token, lat)?,
    })
}

fn parse_number(token: &str, value: &str) -> Result<f64, CoordinateError> {
    value
        .parse::<f64>()
        .map_err(|source| CoordinateError::InvalidNumber {
            token: token.to_owned(),
            value: value.to_owned(),
            source,
        })
}

/// Like [`parse_point`], but every component that fails becomes `0.0`.
/// Only the first two comma separated parts are read.
fn parse_point_zero_filled(token: &str) -> Coord<f64> {
    let mut parts = token.split(',');
    let lon = parts.next().unwrap_or_default();
    let lat = parts.next().unwrap_or_default();
    let fill = |value: &str| {
        value.parse::<f64>().unwrap_or_else(|_| {
            log::warn!("Unparsable value {value:?} in point {token:?}, using 0.0");
            0.0
        })
    };

    Coord {
        x: fill(lon),
        y: fill(lat),
    }
}

/// Parses a parenthesised, space separated list of `lon,lat` pairs into a
/// single ring, returned wrapped in the ring list a polygon expects.
///
/// Points keep their input order. The ring is not closed or deduplicated.
///
/// # Errors
///
/// Fails when the string is not wrapped in `(`/`)`, has no points, or (in
/// [`NumericPolicy::Strict`]) contains a point that does not parse.
pub fn parse_ring(raw: &str, policy: NumericPolicy) -> Result<Vec<LineString<f64>>, CoordinateError> {
    let inner = raw
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| CoordinateError::MissingDelimiters {
            raw: raw.to_owned(),
        })?;

    let tokens = inner.split_whitespace();
    let coords = match policy {
        NumericPolicy::Strict => tokens.map(parse_point).collect::<Result<Vec<_>, _>>()?,
        NumericPolicy::ZeroFill => tokens.map(parse_point_zero_filled).collect(),
    };

    if coords.is_empty() {
        return Err(CoordinateError::Empty);
    }

    Ok(vec![LineString::new(coords)])
}

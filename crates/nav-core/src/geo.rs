//! Geographic coordinate type.
//!
//! `Coordinate` uses `f64` longitude/latitude.  Route geometries are decoded
//! from precision-6 polylines, so snapping error is on the order of
//! centimetres; `f32` cannot resolve that at continental longitudes.

/// A WGS-84 geographic coordinate, `(longitude, latitude)` in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `true` when both components are finite.
    ///
    /// Spherical projections can produce NaN/infinite components at the poles
    /// or the antimeridian; callers substitute a fallback vertex when this
    /// returns `false` rather than propagating the invalid value.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// `true` when latitude is within ±90° and longitude within ±180°.
    #[inline]
    pub fn in_range(self) -> bool {
        self.lat.abs() <= 90.0 && self.lon.abs() <= 180.0
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

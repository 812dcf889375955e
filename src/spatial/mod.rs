//! Spatial model - geographic points, bounding boxes and the prediction grid

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lon - self.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn centroid(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.north + self.south) / 2.0,
            lon: (self.east + self.west) / 2.0,
        }
    }

    /// Linear subdivision into `size × size` cells anchored at the south-west
    /// corner. A degenerate box yields zero steps, so every cell collapses
    /// onto the same point.
    pub fn grid(&self, size: u32, elevation: f64) -> Grid {
        let divisions = size.max(1) as f64;
        Grid {
            origin: GeoPoint::new(self.south, self.west),
            lat_step: (self.north - self.south) / divisions,
            lon_step: (self.east - self.west) / divisions,
            size: size as usize,
            elevation,
            index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub lat: f64,
    pub lon: f64,
    /// feet
    pub elevation: f64,
}

impl GridCell {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Row-major iterator over grid cells: rows step north, columns step east.
#[derive(Debug, Clone)]
pub struct Grid {
    origin: GeoPoint,
    lat_step: f64,
    lon_step: f64,
    size: usize,
    elevation: f64,
    index: usize,
}

impl Grid {
    /// Saturates instead of wrapping for sizes whose square does not fit.
    pub fn cell_count(&self) -> usize {
        self.size.checked_mul(self.size).unwrap_or(usize::MAX)
    }
}

impl Iterator for Grid {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.index >= self.cell_count() {
            return None;
        }
        let row = self.index / self.size;
        let col = self.index % self.size;
        self.index += 1;
        Some(GridCell {
            lat: self.origin.lat + row as f64 * self.lat_step,
            lon: self.origin.lon + col as f64 * self.lon_step,
            elevation: self.elevation,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cell_count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Grid {}

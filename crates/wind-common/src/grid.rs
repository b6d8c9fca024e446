//! Coarse spatial grid used to thin out clustered turbine locations.
//!
//! Each point maps to a `GridKey` of `(round(lat / size), round(lon / size))`.
//! Only the first point seen in a cell is kept, so the output order and the
//! chosen representatives depend on input order alone.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, WindMapError, WindMapResult};

/// Integer cell coordinates on a grid of `grid_size` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridKey {
    pub row: i64,
    pub col: i64,
}

impl GridKey {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Cell containing `point`.
    ///
    /// Ties round half to even, so 0.5 lands in cell 0 and 1.5 in cell 2.
    /// `grid_size` must already be validated.
    pub fn for_point(point: &GeoPoint, grid_size: f64) -> Self {
        Self {
            row: (point.lat / grid_size).round_ties_even() as i64,
            col: (point.lon / grid_size).round_ties_even() as i64,
        }
    }
}

/// Reject grid sizes that would divide by zero or produce meaningless keys.
pub fn validate_grid_size(grid_size: f64) -> WindMapResult<()> {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return Err(WindMapError::InvalidConfiguration(format!(
            "grid size must be a positive number of degrees, got {}",
            grid_size
        )));
    }
    // Keys of in-range coordinates must fit in an i64 without saturating.
    if 180.0 / grid_size >= i64::MAX as f64 {
        return Err(WindMapError::InvalidConfiguration(format!(
            "grid size {} is too small to index coordinates",
            grid_size
        )));
    }
    Ok(())
}

/// Insertion-ordered map from grid cell to its representative point.
#[derive(Debug, Clone)]
pub struct GridBuckets {
    grid_size: f64,
    index: HashMap<GridKey, usize>,
    representatives: Vec<(GridKey, GeoPoint)>,
}

impl GridBuckets {
    pub fn new(grid_size: f64) -> WindMapResult<Self> {
        validate_grid_size(grid_size)?;
        Ok(Self {
            grid_size,
            index: HashMap::new(),
            representatives: Vec::new(),
        })
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Offer a point; returns `true` if it became its cell's representative.
    pub fn insert(&mut self, point: GeoPoint) -> bool {
        let key = GridKey::for_point(&point, self.grid_size);
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.representatives.len());
        self.representatives.push((key, point));
        true
    }

    /// Representative for a cell, if one was recorded.
    pub fn get(&self, key: &GridKey) -> Option<&GeoPoint> {
        self.index
            .get(key)
            .map(|&idx| &self.representatives[idx].1)
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// Cells and their representatives in first-seen order.
    pub fn representatives(&self) -> &[(GridKey, GeoPoint)] {
        &self.representatives
    }

    pub fn keys(&self) -> impl Iterator<Item = GridKey> + '_ {
        self.representatives.iter().map(|(key, _)| *key)
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.representatives.into_iter().map(|(_, p)| p).collect()
    }
}

impl Extend<GeoPoint> for GridBuckets {
    fn extend<T: IntoIterator<Item = GeoPoint>>(&mut self, iter: T) {
        for point in iter {
            self.insert(point);
        }
    }
}

/// Keep the first point of every grid cell, preserving input order.
pub fn bucket(points: &[GeoPoint], grid_size: f64) -> WindMapResult<Vec<GeoPoint>> {
    let mut buckets = GridBuckets::new(grid_size)?;
    buckets.extend(points.iter().copied());
    Ok(buckets.into_points())
}

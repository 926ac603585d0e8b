//! Dataset: the immutable point set a session renders.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// A single projected record: two coordinates plus a categorical label.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub category: String,
}

impl Point {
    pub fn new<S: Into<String>>(x: f64, y: f64, category: S) -> Self {
        Self {
            x,
            y,
            category: category.into(),
        }
    }

    /// Both coordinates are finite and can be projected.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// What to do with a record whose coordinates are not usable numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidRecordPolicy {
    /// Keep the record (coordinate stored as NaN) and log a warning.
    /// Layout later excludes it without disturbing the extent of the rest.
    #[default]
    WarnAndKeep,
    /// Drop the record with a logged warning.
    Drop,
    /// Reject the whole load with [`DataError::NonNumeric`].
    Reject,
}

/// Ordered, immutable sequence of points owned by one session.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    points: Vec<Point>,
    categories: Vec<String>,
}

impl Dataset {
    /// Build a dataset from already-parsed points, keeping them all.
    pub fn new(points: Vec<Point>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for p in &points {
            if !categories.iter().any(|c| c == &p.category) {
                categories.push(p.category.clone());
            }
        }
        Self { points, categories }
    }

    /// Build a dataset, applying `policy` to points with non-finite coordinates.
    pub fn with_policy(points: Vec<Point>, policy: InvalidRecordPolicy) -> Result<Self, DataError> {
        let mut kept = Vec::with_capacity(points.len());
        for (i, p) in points.into_iter().enumerate() {
            if p.is_finite() {
                kept.push(p);
                continue;
            }
            match policy {
                InvalidRecordPolicy::WarnAndKeep => {
                    log::warn!(
                        "record {i} has non-finite coordinates ({}, {}); kept but will not be drawn",
                        p.x,
                        p.y
                    );
                    kept.push(p);
                }
                InvalidRecordPolicy::Drop => {
                    log::warn!(
                        "record {i} has non-finite coordinates ({}, {}); dropped",
                        p.x,
                        p.y
                    );
                }
                InvalidRecordPolicy::Reject => {
                    let (column, value) = if p.x.is_finite() {
                        ("y", p.y)
                    } else {
                        ("x", p.x)
                    };
                    return Err(DataError::NonNumeric {
                        line: i + 1,
                        column: column.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(Self::new(kept))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of records per category.
    pub fn category_counts(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for p in &self.points {
            *counts.entry(p.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of records whose coordinates cannot be projected.
    pub fn non_finite_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_finite()).count()
    }
}

impl FromIterator<Point> for Dataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_keep_first_seen_order() {
        let ds = Dataset::new(vec![
            Point::new(0.0, 0.0, "paid_full"),
            Point::new(1.0, 0.0, "unresolved"),
            Point::new(2.0, 0.0, "paid_full"),
            Point::new(3.0, 0.0, "dismissed"),
        ]);
        assert_eq!(ds.categories(), &["paid_full", "unresolved", "dismissed"]);
        assert_eq!(ds.category_counts()["paid_full"], 2);
    }

    #[test]
    fn reject_policy_reports_offending_column() {
        let err = Dataset::with_policy(
            vec![Point::new(0.0, 0.0, "a"), Point::new(1.0, f64::NAN, "a")],
            InvalidRecordPolicy::Reject,
        )
        .unwrap_err();
        match err {
            DataError::NonNumeric { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, "y");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

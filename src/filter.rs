use crate::{
    columns::PUBLISH_YEAR,
    error::{DashboardError, Result},
    table,
};
use arrow::{
    array::BooleanArray,
    compute::{self, filter_record_batch},
    record_batch::RecordBatch,
};
use serde::Serialize;
use std::fmt;

/// Inclusive publication-year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(DashboardError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn single(year: i32) -> Self {
        Self {
            min: year,
            max: year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn overlaps(&self, other: YearRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Pull both ends inside `bounds`, or `None` when the two ranges share
    /// no year.
    pub fn clamp_to(self, bounds: YearRange) -> Option<Self> {
        if !self.overlaps(bounds) {
            return None;
        }
        Some(Self {
            min: self.min.max(bounds.min),
            max: self.max.min(bounds.max),
        })
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Smallest and largest `publish_year` in the table, or `None` when it has no rows.
pub fn year_bounds(cleaned: &RecordBatch) -> Result<Option<YearRange>> {
    if cleaned.num_rows() == 0 {
        return Ok(None);
    }
    let years = table::int32_column(cleaned, PUBLISH_YEAR)?;
    Ok(compute::min(years)
        .zip(compute::max(years))
        .map(|(min, max)| YearRange { min, max }))
}

/// Rows whose `publish_year` lies in `range`, in their original order.
pub fn filter_by_year(cleaned: &RecordBatch, range: YearRange) -> Result<RecordBatch> {
    if cleaned.num_rows() == 0 {
        return Ok(cleaned.clone());
    }
    let years = table::int32_column(cleaned, PUBLISH_YEAR)?;
    let mask: BooleanArray = years
        .iter()
        .map(|year| Some(year.is_some_and(|y| range.contains(y))))
        .collect();
    Ok(filter_record_batch(cleaned, &mask)?)
}

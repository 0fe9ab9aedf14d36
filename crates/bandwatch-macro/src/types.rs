//! Inflation data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// CPI rates for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationRecord {
    /// First day of the month.
    pub date: NaiveDate,
    /// Month-on-month CPI rate, in percent.
    pub one_month: f64,
    /// Year-on-year CPI rate, in percent.
    pub twelve_month: f64,
}

/// Monthly CPI rates in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InflationSeries {
    records: Vec<InflationRecord>,
}

impl InflationSeries {
    /// Create a series, sorting the records by date.
    #[must_use]
    pub fn new(mut records: Vec<InflationRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// Records oldest first.
    pub fn records(&self) -> &[InflationRecord] {
        &self.records
    }

    /// Records newest first, the order tables are shown in.
    pub fn newest_first(&self) -> impl Iterator<Item = &InflationRecord> {
        self.records.iter().rev()
    }

    /// The most recent month.
    #[must_use]
    pub fn latest(&self) -> Option<&InflationRecord> {
        self.records.last()
    }

    /// Number of months.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

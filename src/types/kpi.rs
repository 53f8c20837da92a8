//! KPI summary rows and their totals.

use serde::{Deserialize, Serialize};

/// Aggregated maintenance KPIs for one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Machine identifier (unique key)
    pub machine: String,
    /// Total maintenance cost (EUR)
    pub cost_total_eur: f64,
    /// Total downtime (hours)
    pub downtime_total_h: f64,
    /// Total scrapped units
    pub scrap_total: f64,
}

/// Column sums over a set of KPI rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiTotals {
    pub machines: usize,
    pub cost_total_eur: f64,
    pub downtime_total_h: f64,
    pub scrap_total: f64,
}

impl KpiTotals {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a KpiSummary>) -> Self {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            acc.machines += 1;
            acc.cost_total_eur += row.cost_total_eur;
            acc.downtime_total_h += row.downtime_total_h;
            acc.scrap_total += row.scrap_total;
            acc
        })
    }
}

//! KPI bar charts (one bar per machine).

use serde::Serialize;

use crate::types::KpiSummary;

/// Which KPI column a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiMetric {
    Cost,
    Downtime,
    Scrap,
}

impl KpiMetric {
    pub const ALL: [KpiMetric; 3] = [KpiMetric::Cost, KpiMetric::Downtime, KpiMetric::Scrap];

    pub fn value(self, row: &KpiSummary) -> f64 {
        match self {
            KpiMetric::Cost => row.cost_total_eur,
            KpiMetric::Downtime => row.downtime_total_h,
            KpiMetric::Scrap => row.scrap_total,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            KpiMetric::Cost => "Total maintenance cost per machine",
            KpiMetric::Downtime => "Total downtime per machine (hours)",
            KpiMetric::Scrap => "Total scrap per machine",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            KpiMetric::Cost => "EUR",
            KpiMetric::Downtime => "h",
            KpiMetric::Scrap => "units",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            KpiMetric::Cost => "steelblue",
            KpiMetric::Downtime => "orange",
            KpiMetric::Scrap => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub machine: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiBarChart {
    pub metric: KpiMetric,
    pub title: &'static str,
    pub unit: &'static str,
    pub color: &'static str,
    pub bars: Vec<Bar>,
}

/// Cost, downtime and scrap charts over `rows`, in that order.
pub fn kpi_charts(rows: &[KpiSummary]) -> Vec<KpiBarChart> {
    KpiMetric::ALL
        .into_iter()
        .map(|metric| KpiBarChart {
            metric,
            title: metric.title(),
            unit: metric.unit(),
            color: metric.color(),
            bars: rows
                .iter()
                .map(|row| Bar {
                    machine: row.machine.clone(),
                    value: metric.value(row),
                })
                .collect(),
        })
        .collect()
}

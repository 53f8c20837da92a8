//! Table loading and the immutable [`Dataset`] handle.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use super::csv::{csv_split, parse_quantity, parse_text, parse_timestamp, Header};
use super::LoadError;
use crate::types::{KpiSummary, MachineFilter, MaintenanceEvent};

// KPI summary columns
const COL_MACHINE: &str = "machine";
const COL_COST_TOTAL: &str = "Cost_total_eur";
const COL_DOWNTIME_TOTAL: &str = "Downtime_total_h";
const COL_SCRAP_TOTAL: &str = "Scrap_total";

// Event history columns
const COL_FAILURE_DATE: &str = "failure_date";
const COL_DOWNTIME: &str = "downtime_h";
const COL_COST: &str = "cost_eur";
const COL_SCRAP: &str = "scrap_units";

/// Read a headed CSV file, resolving `columns` to indices and handing each data row to `parse_row`.
///
/// Blank lines are skipped. The first row error aborts the load.
fn read_table<T, const N: usize>(
    path: &Path,
    columns: [&'static str; N],
    mut parse_row: impl FnMut(&[String], &[usize; N]) -> Result<T, String>,
) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = BufReader::new(file).lines();

    let header_line = lines
        .next()
        .ok_or_else(|| LoadError::Empty {
            path: path.to_path_buf(),
        })?
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let header = Header::parse(&header_line);
    let mut indices = [0usize; N];
    for (slot, column) in indices.iter_mut().zip(columns) {
        *slot = header.index_of(column).ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })?;
    }
    debug!(file = %path.display(), columns = header.len(), "Header resolved");

    let mut rows = Vec::new();
    for (i, line_result) in lines.enumerate() {
        // Header is line 1
        let line_num = i + 2;
        let line = line_result.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = csv_split(&line);
        let row = parse_row(fields.as_slice(), &indices).map_err(|message| LoadError::Row {
            path: path.to_path_buf(),
            line: line_num,
            message,
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load the per-machine KPI summary.
pub fn load_kpis(path: impl AsRef<Path>) -> Result<Vec<KpiSummary>, LoadError> {
    let path = path.as_ref();
    let rows = read_table(
        path,
        [COL_MACHINE, COL_COST_TOTAL, COL_DOWNTIME_TOTAL, COL_SCRAP_TOTAL],
        |fields, idx| {
            Ok(KpiSummary {
                machine: parse_text(fields, idx[0], COL_MACHINE)?,
                cost_total_eur: parse_quantity(fields, idx[1], COL_COST_TOTAL)?,
                downtime_total_h: parse_quantity(fields, idx[2], COL_DOWNTIME_TOTAL)?,
                scrap_total: parse_quantity(fields, idx[3], COL_SCRAP_TOTAL)?,
            })
        },
    )?;
    info!(file = %path.display(), rows = rows.len(), "KPI summary loaded");
    Ok(rows)
}

/// Load the failure event history.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<MaintenanceEvent>, LoadError> {
    let path = path.as_ref();
    let rows = read_table(
        path,
        [COL_MACHINE, COL_FAILURE_DATE, COL_DOWNTIME, COL_COST, COL_SCRAP],
        |fields, idx| {
            Ok(MaintenanceEvent {
                machine: parse_text(fields, idx[0], COL_MACHINE)?,
                failure_date: parse_timestamp(fields, idx[1], COL_FAILURE_DATE)?,
                downtime_h: parse_quantity(fields, idx[2], COL_DOWNTIME)?,
                cost_eur: parse_quantity(fields, idx[3], COL_COST)?,
                scrap_units: parse_quantity(fields, idx[4], COL_SCRAP)?,
            })
        },
    )?;
    info!(file = %path.display(), rows = rows.len(), "Event history loaded");
    Ok(rows)
}

/// Both workshop tables, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    kpis: Vec<KpiSummary>,
    /// Sorted by `failure_date` (stable)
    events: Vec<MaintenanceEvent>,
}

impl Dataset {
    pub fn new(kpis: Vec<KpiSummary>, mut events: Vec<MaintenanceEvent>) -> Self {
        events.sort_by_key(|e| e.failure_date);
        Self { kpis, events }
    }

    /// Load both tables from disk.
    pub fn load(kpi_path: impl AsRef<Path>, events_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let kpis = load_kpis(kpi_path)?;
        let events = load_events(events_path)?;
        Ok(Self::new(kpis, events))
    }

    pub fn kpis(&self) -> &[KpiSummary] {
        &self.kpis
    }

    pub fn events(&self) -> &[MaintenanceEvent] {
        &self.events
    }

    /// Distinct machine ids, in first-appearance order of the KPI table.
    pub fn machines(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.kpis.len());
        for row in &self.kpis {
            if !seen.contains(&row.machine.as_str()) {
                seen.push(&row.machine);
            }
        }
        seen
    }

    /// Whether either table mentions `machine`.
    pub fn has_machine(&self, machine: &str) -> bool {
        self.kpis.iter().any(|k| k.machine == machine)
            || self.events.iter().any(|e| e.machine == machine)
    }

    pub fn kpis_for(&self, filter: &MachineFilter) -> Vec<&KpiSummary> {
        self.kpis.iter().filter(|k| filter.matches(&k.machine)).collect()
    }

    /// Events for the selection, oldest first.
    pub fn events_for(&self, filter: &MachineFilter) -> Vec<&MaintenanceEvent> {
        self.events.iter().filter(|e| filter.matches(&e.machine)).collect()
    }
}

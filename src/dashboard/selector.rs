//! Machine selector options.

use crate::data::Dataset;
use crate::types::ALL_MACHINES;

/// Options for the table/chart filter: "All" followed by every machine.
pub fn machine_options(dataset: &Dataset) -> Vec<String> {
    std::iter::once(ALL_MACHINES)
        .chain(dataset.machines())
        .map(str::to_string)
        .collect()
}

/// Options for the prediction selector. "All" is not a valid prediction target.
pub fn prediction_options(dataset: &Dataset) -> Vec<String> {
    dataset.machines().into_iter().map(str::to_string).collect()
}

//! Test helpers for building app state over synthetic data.

use std::path::PathBuf;
use std::sync::Arc;

use inflalens_core::data::{generate_sample, SampleOptions};
use inflalens_core::{Dataset, RiskThresholds};

use crate::app::AppState;

pub fn sample_dataset() -> Arc<Dataset> {
    let (price, income) = generate_sample(&SampleOptions::default());
    Arc::new(Dataset::new(price, income))
}

pub fn sample_app() -> AppState {
    AppState::new(
        sample_dataset(),
        RiskThresholds::default(),
        PathBuf::from("."),
    )
}

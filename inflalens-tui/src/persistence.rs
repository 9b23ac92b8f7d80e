//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::{AppState, ErrorCategory, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Selected symbols in pick order.
    pub selected_symbols: Vec<String>,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
    /// Fingerprint of the dataset the selection was made against.
    pub dataset_fingerprint: Option<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selected_symbols: Vec::new(),
            active_panel: Panel::Symbols,
            welcome_dismissed: false,
            dataset_fingerprint: None,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring corrupt state file");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        selected_symbols: app.symbols.selected.clone(),
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
        dataset_fingerprint: Some(app.dataset.fingerprint.clone()),
    }
}

/// Apply persisted state to AppState.
///
/// Symbols no longer present in the dataset are dropped and reported in
/// the error history.
pub fn apply(app: &mut AppState, state: PersistedState) {
    let mut dropped = Vec::new();
    for symbol in state.selected_symbols {
        if !app.symbols.all.contains(&symbol) {
            dropped.push(symbol);
        } else if !app.symbols.is_selected(&symbol) {
            app.symbols.selected.push(symbol);
        }
    }
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
    app.recompute();

    if !dropped.is_empty() {
        app.push_error(
            ErrorCategory::Data,
            format!("{} saved symbol(s) not in the dataset", dropped.len()),
            dropped.join(", "),
        );
    } else if state.dataset_fingerprint.as_deref() != Some(app.dataset.fingerprint.as_str())
        && !app.symbols.selected.is_empty()
    {
        app.set_warning("Dataset changed since last session");
    }
}

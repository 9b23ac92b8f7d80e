//! Application state — single-owner, main-thread only.
//!
//! The loaded dataset is shared read-only; everything derived from the
//! current selection is rebuilt by [`AppState::recompute`].

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use inflalens_core::export::write_report;
use inflalens_core::{
    plot_inflation_trends, plot_risk_pie_chart, Category, CorrelationAggregator,
    CorrelationRecord, Dataset, PieChart, Report, RiskThresholds, TrendChart,
};

/// Shown instead of the analysis when nothing is selected.
pub const EMPTY_SELECTION_PROMPT: &str = "Please select at least one stock to analyze.";

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Symbols,
    Risk,
    Trends,
    Summary,
    Help,
}

impl Panel {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            Panel::Symbols => 0,
            Panel::Risk => 1,
            Panel::Trends => 2,
            Panel::Summary => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Symbols),
            1 => Some(Panel::Risk),
            2 => Some(Panel::Trends),
            3 => Some(Panel::Summary),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Symbols => "Symbols",
            Panel::Risk => "Risk",
            Panel::Trends => "Trends",
            Panel::Summary => "Summary",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Symbols)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Symbols)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Where an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Export,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Data => "DATA",
            ErrorCategory::Export => "EXPORT",
        }
    }
}

/// An entry in the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Symbol list with a multi-selection kept in pick order.
#[derive(Debug)]
pub struct SymbolsPanelState {
    pub all: Vec<String>,
    pub selected: Vec<String>,
    pub cursor: usize,
    /// Case-insensitive substring filter on the list.
    pub filter: String,
}

impl SymbolsPanelState {
    pub fn new(all: Vec<String>) -> Self {
        Self {
            all,
            selected: Vec::new(),
            cursor: 0,
            filter: String::new(),
        }
    }

    /// Symbols passing the filter, in dataset order.
    pub fn visible(&self) -> Vec<&str> {
        let needle = self.filter.to_ascii_lowercase();
        self.all
            .iter()
            .map(String::as_str)
            .filter(|s| needle.is_empty() || s.to_ascii_lowercase().contains(&needle))
            .collect()
    }

    pub fn cursor_symbol(&self) -> Option<String> {
        self.visible().get(self.cursor).map(|s| s.to_string())
    }

    pub fn is_selected(&self, symbol: &str) -> bool {
        self.selected.iter().any(|s| s == symbol)
    }

    /// Toggle `symbol`; returns true if it is now selected.
    pub fn toggle(&mut self, symbol: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == symbol) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(symbol.to_string());
            true
        }
    }

    pub fn clamp_cursor(&mut self) {
        let n = self.visible().len();
        if n == 0 {
            self.cursor = 0;
        } else if self.cursor >= n {
            self.cursor = n - 1;
        }
    }
}

/// Everything derived from the current selection.
#[derive(Debug, Default)]
pub struct AnalysisState {
    pub records: Vec<CorrelationRecord>,
    /// One pie per [`Category`], in `Category::ALL` order.
    pub pies: Vec<PieChart>,
    /// One trend chart per selected symbol, in selection order.
    pub trends: Vec<TrendChart>,
    /// Which selected symbol the Trends and Summary panels show.
    pub focus: usize,
    pub summary_scroll: usize,
}

impl AnalysisState {
    pub fn is_empty(&self) -> bool {
        self.pies.is_empty() && self.trends.is_empty()
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    DataInfo,
    ErrorHistory,
    Search,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data
    pub dataset: Arc<Dataset>,
    pub thresholds: RiskThresholds,

    // Panel states
    pub symbols: SymbolsPanelState,
    pub analysis: AnalysisState,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub search_input: String,

    /// Reports are written under this directory.
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, thresholds: RiskThresholds, export_dir: PathBuf) -> Self {
        let all = dataset.symbols().into_iter().map(String::from).collect();
        Self {
            active_panel: Panel::Symbols,
            running: true,
            dataset,
            thresholds,
            symbols: SymbolsPanelState::new(all),
            analysis: AnalysisState::default(),
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            search_input: String::new(),
            export_dir,
        }
    }

    /// Rebuild records, pies and trend charts for the current selection.
    ///
    /// With an empty selection the core is not invoked at all.
    pub fn recompute(&mut self) {
        let selected = &self.symbols.selected;
        if selected.is_empty() {
            self.analysis = AnalysisState::default();
            return;
        }

        let records = CorrelationAggregator::from_dataset(&self.dataset, self.thresholds)
            .calculate_inflation_correlation(selected);
        let pies = Category::ALL
            .iter()
            .map(|c| plot_risk_pie_chart(&records, *c))
            .collect();
        let trends = selected
            .iter()
            .map(|s| plot_inflation_trends(&self.dataset.trends, s))
            .collect();

        debug!(
            selected = selected.len(),
            records = records.len(),
            "recomputed analysis"
        );

        let focus = self.analysis.focus.min(selected.len() - 1);
        self.analysis = AnalysisState {
            records,
            pies,
            trends,
            focus,
            summary_scroll: 0,
        };
    }

    /// The selected symbol shown by the Trends and Summary panels.
    pub fn focused_symbol(&self) -> Option<&str> {
        self.symbols
            .selected
            .get(self.analysis.focus)
            .map(String::as_str)
    }

    /// Rows in the focused symbol's summary table.
    pub fn focused_record_count(&self) -> usize {
        self.focused_symbol().map_or(0, |symbol| {
            self.analysis
                .records
                .iter()
                .filter(|r| r.symbol == symbol)
                .count()
        })
    }

    pub fn focus_next(&mut self) {
        let n = self.symbols.selected.len();
        if n > 0 {
            self.analysis.focus = (self.analysis.focus + 1) % n;
            self.analysis.summary_scroll = 0;
        }
    }

    pub fn focus_prev(&mut self) {
        let n = self.symbols.selected.len();
        if n > 0 {
            self.analysis.focus = (self.analysis.focus + n - 1) % n;
            self.analysis.summary_scroll = 0;
        }
    }

    /// Toggle a symbol and recompute.
    pub fn toggle_symbol(&mut self, symbol: &str) {
        let now_selected = self.symbols.toggle(symbol);
        self.recompute();
        if now_selected {
            self.set_status(format!("Selected {symbol}"));
        } else {
            self.set_status(format!("Deselected {symbol}"));
        }
    }

    pub fn select_all(&mut self) {
        let visible: Vec<String> = self
            .symbols
            .visible()
            .into_iter()
            .map(String::from)
            .collect();
        for symbol in visible {
            if !self.symbols.is_selected(&symbol) {
                self.symbols.selected.push(symbol);
            }
        }
        self.recompute();
        self.set_status(format!("{} symbols selected", self.symbols.selected.len()));
    }

    pub fn clear_selection(&mut self) {
        self.symbols.selected.clear();
        self.analysis.focus = 0;
        self.recompute();
        self.set_status("Selection cleared");
    }

    /// Write a report for the current selection under `export_dir`.
    pub fn export_report(&mut self) {
        if self.symbols.selected.is_empty() {
            self.set_warning(EMPTY_SELECTION_PROMPT);
            return;
        }
        let report = Report::build(&self.dataset, self.thresholds, &self.symbols.selected);
        let dir = self.export_dir.clone();
        match write_report(&report, &dir) {
            Ok(out) => self.set_status(format!("Report written to {}", out.display())),
            Err(e) => {
                warn!(error = %e, "report export failed");
                self.push_error(ErrorCategory::Export, e.to_string(), dir.display().to_string());
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

//! Property tests for classification and aggregation invariants.
//!
//! Uses proptest to verify:
//! 1. Bucket boundaries — every value lands in exactly the documented bucket
//! 2. Color totality — every level and any label maps to a color
//! 3. Record count — output length equals matching rows across both tables
//! 4. Idempotence — identical input gives identical output

use proptest::prelude::*;
use inflalens_core::risk::risk_color_for_label;
use inflalens_core::{
    categorize_risk, get_risk_color, CorrelationAggregator, MetricRow, MetricTable, RiskColor,
    RiskLevel, RiskThresholds,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_symbol() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["AAA", "BBB", "CCC", "DDD"]).prop_map(String::from)
}

fn arb_row() -> impl Strategy<Value = MetricRow> {
    (
        arb_symbol(),
        prop::option::of("[A-Z][a-z]{2,8}"),
        prop::option::of(-1.0..1.0_f64),
    )
        .prop_map(|(symbol, parameter, correlation)| MetricRow {
            symbol,
            parameter,
            correlation,
            date: None,
            value: None,
        })
}

fn arb_table(name: &'static str) -> impl Strategy<Value = MetricTable> {
    prop::collection::vec(arb_row(), 0..40).prop_map(move |rows| MetricTable::new(name, vec![], rows))
}

// ── 1. Bucket boundaries ─────────────────────────────────────────────

proptest! {
    #[test]
    fn below_low_is_high(v in -1.0e6..-0.5_f64) {
        prop_assume!(v < -0.5);
        prop_assert_eq!(categorize_risk(v, RiskThresholds::default()), RiskLevel::High);
    }

    #[test]
    fn inside_band_is_moderate(v in -0.5..=0.5_f64) {
        prop_assert_eq!(categorize_risk(v, RiskThresholds::default()), RiskLevel::Moderate);
    }

    #[test]
    fn above_high_is_low(v in 0.5..1.0e6_f64) {
        prop_assume!(v > 0.5);
        prop_assert_eq!(categorize_risk(v, RiskThresholds::default()), RiskLevel::Low);
    }

    /// Any valid threshold pair puts its own boundaries in Moderate.
    #[test]
    fn custom_boundaries_are_moderate(a in -10.0..10.0_f64, b in -10.0..10.0_f64) {
        let t = RiskThresholds::new(a.min(b), a.max(b)).unwrap();
        prop_assert_eq!(categorize_risk(t.low, t), RiskLevel::Moderate);
        prop_assert_eq!(categorize_risk(t.high, t), RiskLevel::Moderate);
    }
}

// ── 2. Color totality ────────────────────────────────────────────────

proptest! {
    #[test]
    fn arbitrary_labels_never_panic(label in ".{0,20}") {
        let color = risk_color_for_label(&label);
        if RiskLevel::from_label(&label).is_none() {
            prop_assert_eq!(color, RiskColor::Gray);
        }
    }

    #[test]
    fn color_follows_level(v in -2.0..2.0_f64) {
        let level = categorize_risk(v, RiskThresholds::default());
        let expected = match level {
            RiskLevel::High => RiskColor::Red,
            RiskLevel::Moderate => RiskColor::Orange,
            RiskLevel::Low => RiskColor::Green,
        };
        prop_assert_eq!(get_risk_color(level), expected);
    }
}

// ── 3 & 4. Aggregation ───────────────────────────────────────────────

proptest! {
    #[test]
    fn record_count_matches_rows(
        price in arb_table("price_index"),
        income in arb_table("income_statement"),
        selection in prop::collection::vec(arb_symbol(), 0..5),
    ) {
        let agg = CorrelationAggregator::new(&price, &income, RiskThresholds::default());
        let records = agg.calculate_inflation_correlation(&selection);
        let expected: usize = selection
            .iter()
            .map(|s| price.rows_for(s).count() + income.rows_for(s).count())
            .sum();
        prop_assert_eq!(records.len(), expected);
        for r in &records {
            prop_assert_eq!(r.risk_level, categorize_risk(r.value, RiskThresholds::default()));
            prop_assert_eq!(r.color, get_risk_color(r.risk_level));
        }
    }

    #[test]
    fn aggregation_is_idempotent(
        price in arb_table("price_index"),
        income in arb_table("income_statement"),
        selection in prop::collection::vec(arb_symbol(), 0..5),
    ) {
        let agg = CorrelationAggregator::new(&price, &income, RiskThresholds::default());
        prop_assert_eq!(
            agg.calculate_inflation_correlation(&selection),
            agg.calculate_inflation_correlation(&selection)
        );
    }
}

//! Adaptive selectivity behavior observed across repeated queries

use facetdb::{Engine, EngineConfig};
use serde_json::json;

fn make_engine() -> Engine {
    let mut engine = Engine::new();
    for (word, len) in [("A", 1), ("B", 1), ("AA", 2)] {
        engine.new_document(json!({ "word": word })).int32_key("len", len);
    }
    engine
}

#[test]
fn test_range_driver_folds_observed_sample() {
    let mut engine = make_engine();
    assert_eq!(engine.index_stats("len").unwrap().avg_selectivity, 0.0);

    // 2 of 3 entries match; default smoothing rate is 0.01
    let result = engine.query().int32_range_filter("len", 1, 2).exec();
    assert_eq!(result.len(), 2);

    let avg = engine.index_stats("len").unwrap().avg_selectivity;
    let expected = 0.01 * (2.0 / 3.0);
    assert!((avg - expected).abs() < 1e-6, "avg was {avg}");
}

#[test]
fn test_custom_smoothing_rate() {
    let config = EngineConfig::default().with_smoothing_rate(0.5);
    let mut engine = Engine::with_config(config);
    for (word, len) in [("A", 1), ("B", 1), ("AA", 2)] {
        engine.new_document(json!({ "word": word })).int32_key("len", len);
    }

    engine.query().int32_range_filter("len", 1, 2).exec();
    let avg = engine.index_stats("len").unwrap().avg_selectivity;
    assert!((avg - 0.5 * (2.0 / 3.0)).abs() < 1e-6, "avg was {avg}");

    // A second identical observation moves halfway again
    engine.query().int32_range_filter("len", 1, 2).exec();
    let avg = engine.index_stats("len").unwrap().avg_selectivity;
    let expected = 0.5 * (2.0 / 3.0) * 0.5 + 0.5 * (2.0 / 3.0);
    assert!((avg - expected).abs() < 1e-6, "avg was {avg}");
}

#[test]
fn test_set_driver_leaves_statistics_untouched() {
    let mut engine = make_engine();

    let result = engine.query().int32_in_filter("len", [1]).exec();
    assert_eq!(result.len(), 2);

    // Set conditions estimate exactly and never refresh
    assert_eq!(engine.index_stats("len").unwrap().avg_selectivity, 0.0);
}

#[test]
fn test_driver_flips_after_observation() {
    let mut engine = Engine::new();
    for n in 0..10 {
        engine
            .new_document(json!({ "n": n }))
            .int32_key("x", n)
            .int32_key("y", n);
    }

    // Both ranges are unobserved and estimate zero; the tie keeps the
    // first condition, so "x" drives and records its sample
    let first = engine
        .query()
        .int32_range_filter("x", 0, 5)
        .int32_range_filter("y", 0, 10)
        .exec();
    assert_eq!(first.len(), 5);
    assert!(engine.index_stats("x").unwrap().avg_selectivity > 0.0);
    assert_eq!(engine.index_stats("y").unwrap().avg_selectivity, 0.0);

    // "x" now carries a 0.5 observation while "y" still estimates
    // zero, so "y" drives the rerun and the result is unchanged
    let second = engine
        .query()
        .int32_range_filter("x", 0, 5)
        .int32_range_filter("y", 0, 10)
        .exec();
    assert_eq!(second.ids(), first.ids());
    assert_eq!(second.scanned_count(), 10);
    assert!(engine.index_stats("y").unwrap().avg_selectivity > 0.0);
}

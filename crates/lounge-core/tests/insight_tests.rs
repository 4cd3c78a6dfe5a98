// Insight catalog selection and synthesis timing.

use lounge_core::insight::{synthesize, SynthesisTimer, INSIGHT_CATALOG};
use lounge_core::ui::{synthesis_updates, UiField, UiUpdate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Duration;

#[test]
fn thousand_triggers_cover_the_whole_catalog() {
    let mut rng = StdRng::seed_from_u64(0x1ee7);
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        let s = synthesize(&INSIGHT_CATALOG, 20, &mut rng).expect("catalog is not empty");
        assert!(s.pair.0 < 20 && s.pair.1 < 20);
        seen.insert(s.record.result);
    }
    assert_eq!(seen.len(), INSIGHT_CATALOG.len());
}

#[test]
fn pairs_may_repeat_a_node() {
    let mut rng = StdRng::seed_from_u64(9);
    let self_pairs = (0..1000)
        .filter_map(|_| synthesize(&INSIGHT_CATALOG, 3, &mut rng))
        .filter(|s| s.pair.0 == s.pair.1)
        .count();
    assert!(self_pairs > 0);
}

#[test]
fn nothing_to_synthesize_without_nodes_or_records() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(synthesize(&INSIGHT_CATALOG, 0, &mut rng).is_none());
    assert!(synthesize(&[], 20, &mut rng).is_none());
}

#[test]
fn synthesis_writes_the_literal_triple() {
    let record = INSIGHT_CATALOG[1];
    let mut ui = Vec::new();
    synthesis_updates(&record, &mut ui);
    assert_eq!(
        ui,
        vec![
            UiUpdate::text(UiField::NodeA, "MYCOLOGY"),
            UiUpdate::text(UiField::NodeB, "DATA ROUTING"),
            UiUpdate::text(UiField::NodeResult, "MYCELIAL NETWORK TOPOLOGY"),
            UiUpdate::text(
                UiField::CurrentInsight,
                "SYNTHESIZING: MYCELIAL NETWORK TOPOLOGY"
            ),
        ]
    );
}

#[test]
fn timer_fires_immediately_then_after_the_interval() {
    let mut timer = SynthesisTimer::new(Duration::from_secs(8), Duration::from_millis(1500));
    let step = Duration::from_millis(100);
    assert_eq!(timer.advance(step), 1);

    let mut fired = 0;
    for _ in 0..80 {
        fired += timer.advance(step);
    }
    // exactly 8s is not "more than" 8s
    assert_eq!(fired, 0);
    assert_eq!(timer.advance(step), 1);
}

#[test]
fn each_query_schedules_its_own_firing() {
    let mut timer = SynthesisTimer::new(Duration::from_secs(8), Duration::from_millis(1500));
    timer.advance(Duration::ZERO);
    timer.submit();
    timer.submit();
    assert_eq!(timer.pending(), 2);

    let step = Duration::from_millis(500);
    assert_eq!(timer.advance(step), 0);
    assert_eq!(timer.advance(step), 0);
    assert_eq!(timer.advance(step), 2);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn query_firings_leave_the_auto_timer_alone() {
    let mut timer = SynthesisTimer::new(Duration::from_secs(8), Duration::from_millis(1500));
    timer.advance(Duration::ZERO);
    for _ in 0..7 {
        assert_eq!(timer.advance(Duration::from_secs(1)), 0);
    }
    timer.submit();
    // 7s elapsed: query due at 8.5s, auto due once past 8s
    assert_eq!(timer.advance(Duration::from_millis(1100)), 1);
    assert_eq!(timer.advance(Duration::from_millis(400)), 1);
}

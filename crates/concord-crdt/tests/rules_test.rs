//! Rule catalog semantics: concurrent resolution and tie-breaks.

use std::collections::{HashMap, HashSet};

use chrono::{TimeZone, Utc};

use concord_crdt::rules::*;
use concord_crdt::VectorClock;

/// Helper: build a clock from (node, count) pairs.
fn clock(entries: &[(&str, u64)]) -> VectorClock {
    let mut c = VectorClock::new();
    for &(node, count) in entries {
        for _ in 0..count {
            c.increment(node);
        }
    }
    c
}

/// Two concurrent clocks used by rules that ignore clock contents.
fn concurrent_pair() -> (VectorClock, VectorClock) {
    (clock(&[("a", 1)]), clock(&[("b", 1)]))
}

// =============================================================================
// Last-write-wins and preference rules
// =============================================================================

#[test]
fn lww_follows_the_causal_order() {
    let older = clock(&[("a", 1)]);
    let newer = clock(&[("a", 2)]);

    assert_eq!(LastWriteWins.merge(&1, &2, &older, &newer), 2);
    assert_eq!(LastWriteWins.merge(&1, &2, &newer, &older), 1);
}

#[test]
fn lww_resolves_equal_and_concurrent_to_remote() {
    let c = clock(&[("x", 1)]);
    assert_eq!(LastWriteWins.merge(&1, &2, &c, &c.clone()), 2);

    let (lc, rc) = concurrent_pair();
    assert_eq!(LastWriteWins.merge(&1, &2, &lc, &rc), 2);
}

#[test]
fn prefer_rules_are_constant() {
    let (lc, rc) = concurrent_pair();
    assert_eq!(PreferLocal.merge(&"l".to_string(), &"r".to_string(), &lc, &rc), "l");
    assert_eq!(PreferRemote.merge(&"l".to_string(), &"r".to_string(), &lc, &rc), "r");
}

#[test]
fn random_choice_picks_one_of_the_sides() {
    let (lc, rc) = concurrent_pair();
    let picked = RandomChoice.merge(&10, &20, &lc, &rc);
    assert!(picked == 10 || picked == 20);
}

// =============================================================================
// Boolean rules
// =============================================================================

#[test]
fn bool_or_is_sticky() {
    let (lc, rc) = concurrent_pair();
    assert!(BoolOr.merge(&true, &false, &lc, &rc));
    assert!(BoolOr.merge(&false, &true, &lc, &rc));
    assert!(!BoolOr.merge(&false, &false, &lc, &rc));
}

#[test]
fn bool_and_requires_both() {
    let (lc, rc) = concurrent_pair();
    assert!(BoolAnd.merge(&true, &true, &lc, &rc));
    assert!(!BoolAnd.merge(&true, &false, &lc, &rc));
}

// =============================================================================
// Numeric rules
// =============================================================================

#[test]
fn int_rules_combine_both_sides() {
    let (lc, rc) = concurrent_pair();
    assert_eq!(IntSum.merge(&3, &4, &lc, &rc), 7);
    assert_eq!(IntMax.merge(&3, &4, &lc, &rc), 4);
    assert_eq!(IntMin.merge(&3, &4, &lc, &rc), 3);
}

#[test]
fn float_rules_combine_both_sides() {
    let (lc, rc) = concurrent_pair();
    assert_eq!(FloatMax.merge(&1.5, &2.5, &lc, &rc), 2.5);
    assert_eq!(FloatMin.merge(&1.5, &2.5, &lc, &rc), 1.5);
    assert_eq!(FloatAverage.merge(&1.0, &3.0, &lc, &rc), 2.0);
}

#[test]
fn float_blend_weights_the_remote_side() {
    let (lc, rc) = concurrent_pair();
    assert_eq!(FloatBlend::new(0.0).merge(&10.0, &20.0, &lc, &rc), 10.0);
    assert_eq!(FloatBlend::new(1.0).merge(&10.0, &20.0, &lc, &rc), 20.0);
    assert_eq!(FloatBlend::new(0.25).merge(&10.0, &20.0, &lc, &rc), 12.5);
}

// =============================================================================
// String rules
// =============================================================================

#[test]
fn string_rules_resolve_by_length_with_local_ties() {
    let (lc, rc) = concurrent_pair();
    let short = "ab".to_string();
    let long = "abcd".to_string();
    let other = "xy".to_string();

    assert_eq!(LongestString.merge(&short, &long, &lc, &rc), "abcd");
    assert_eq!(ShortestString.merge(&short, &long, &lc, &rc), "ab");

    // Equal lengths keep local.
    assert_eq!(LongestString.merge(&short, &other, &lc, &rc), "ab");
    assert_eq!(ShortestString.merge(&short, &other, &lc, &rc), "ab");
}

// =============================================================================
// Collection rules
// =============================================================================

#[test]
fn set_union_is_idempotent_and_commutative() {
    let (lc, rc) = concurrent_pair();
    let a: HashSet<String> = ["x", "y"].map(String::from).into();
    let b: HashSet<String> = ["y", "z"].map(String::from).into();

    let ab = SetUnion.merge(&a, &b, &lc, &rc);
    let ba = SetUnion.merge(&b, &a, &rc, &lc);
    assert_eq!(ab, ba);
    assert_eq!(ab.len(), 3);
    assert_eq!(SetUnion.merge(&a, &a, &lc, &lc), a);
}

#[test]
fn list_append_concatenates_in_order() {
    let (lc, rc) = concurrent_pair();
    let l = vec![1, 2];
    let r = vec![3, 2];
    assert_eq!(ListAppend.merge(&l, &r, &lc, &rc), vec![1, 2, 3, 2]);
}

#[test]
fn unique_append_skips_items_already_present() {
    let (lc, rc) = concurrent_pair();
    let l = vec!["a", "b"];
    let r = vec!["b", "c", "a", "d"];
    assert_eq!(UniqueAppend.merge(&l, &r, &lc, &rc), vec!["a", "b", "c", "d"]);
}

#[test]
fn map_merge_inserts_and_delegates_collisions() {
    let (lc, rc) = concurrent_pair();
    let l = HashMap::from([("hits".to_string(), 3_i64), ("errs".to_string(), 1)]);
    let r = HashMap::from([("hits".to_string(), 5), ("lag".to_string(), 9)]);

    let merged = MapMerge::new(IntMax).merge(&l, &r, &lc, &rc);
    assert_eq!(merged["hits"], 5);
    assert_eq!(merged["errs"], 1);
    assert_eq!(merged["lag"], 9);
}

#[test]
fn map_merge_inner_rule_sees_the_replica_clocks() {
    // LWW inside a map resolves per-key by the replica-level clocks.
    let older = clock(&[("a", 1)]);
    let newer = clock(&[("a", 2)]);
    let l = HashMap::from([("mode".to_string(), "manual".to_string())]);
    let r = HashMap::from([("mode".to_string(), "auto".to_string())]);

    let merged = MapMerge::new(LastWriteWins).merge(&l, &r, &newer, &older);
    assert_eq!(merged["mode"], "manual");
}

// =============================================================================
// Tagged registers
// =============================================================================

#[test]
fn timestamp_wins_takes_the_later_instant() {
    let (lc, rc) = concurrent_pair();
    let early = Stamped::new("early", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let late = Stamped::new("late", Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

    assert_eq!(TimestampWins.merge(&early, &late, &lc, &rc).value, "late");
    assert_eq!(TimestampWins.merge(&late, &early, &lc, &rc).value, "late");
}

#[test]
fn timestamp_tie_keeps_local() {
    let (lc, rc) = concurrent_pair();
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let l = Stamped::new("l", at);
    let r = Stamped::new("r", at);
    assert_eq!(TimestampWins.merge(&l, &r, &lc, &rc).value, "l");
}

#[test]
fn priority_wins_takes_the_higher_priority() {
    let (lc, rc) = concurrent_pair();
    let low = Prioritized::new("low", 1);
    let high = Prioritized::new("high", 9);

    assert_eq!(PriorityWins.merge(&low, &high, &lc, &rc).value, "high");
    assert_eq!(PriorityWins.merge(&high, &low, &lc, &rc).value, "high");

    let tied = Prioritized::new("other", 1);
    assert_eq!(PriorityWins.merge(&low, &tied, &lc, &rc).value, "low");
}

// =============================================================================
// Clock-weighted deciders
// =============================================================================

#[test]
fn node_wins_follows_the_designated_node() {
    let lc = clock(&[("judge", 2), ("x", 9)]);
    let rc = clock(&[("judge", 3)]);

    let rule = NodeWins::new("judge");
    assert_eq!(rule.merge(&1, &2, &lc, &rc), 2);
    assert_eq!(rule.merge(&1, &2, &rc, &lc), 1);

    // Tie on the designated node keeps local.
    let tied = clock(&[("judge", 3), ("y", 1)]);
    assert_eq!(rule.merge(&1, &2, &tied, &rc), 1);
}

#[test]
fn most_updates_wins_compares_totals() {
    let lc = clock(&[("a", 1), ("b", 1)]);
    let rc = clock(&[("c", 3)]);
    assert_eq!(MostUpdatesWins.merge(&1, &2, &lc, &rc), 2);
    assert_eq!(MostUpdatesWins.merge(&1, &2, &rc, &lc), 1);

    // Equal totals keep local.
    let same = clock(&[("d", 3)]);
    assert_eq!(MostUpdatesWins.merge(&1, &2, &rc, &same), 1);
}

#[test]
fn highest_contribution_wins_compares_peaks() {
    let lc = clock(&[("a", 5), ("b", 1)]);
    let rc = clock(&[("c", 4), ("d", 4)]);
    assert_eq!(HighestContributionWins.merge(&1, &2, &lc, &rc), 1);
    assert_eq!(HighestContributionWins.merge(&1, &2, &rc, &lc), 2);
}

#[test]
fn trust_weighted_scores_with_default_weight_one() {
    let lc = clock(&[("trusted", 2)]);
    let rc = clock(&[("sketchy", 5)]);

    let weights = HashMap::from([("trusted".to_string(), 10.0), ("sketchy".to_string(), 0.1)]);
    let rule = TrustWeighted::new(weights);
    // 2×10 = 20 vs 5×0.1 = 0.5: local wins despite fewer updates.
    assert_eq!(rule.merge(&1, &2, &lc, &rc), 1);

    // Unlisted nodes weigh 1.0.
    let unlisted = TrustWeighted::new(HashMap::new());
    assert_eq!(unlisted.merge(&1, &2, &lc, &rc), 2);
}

#[test]
fn majority_vote_counts_nodes_not_updates() {
    let lc = clock(&[("a", 9)]);
    let rc = clock(&[("b", 1), ("c", 1)]);
    assert_eq!(MajorityVote.merge(&1, &2, &lc, &rc), 2);
    assert_eq!(MajorityVote.merge(&1, &2, &rc, &lc), 1);
}

#[test]
fn lexicographic_node_wins_compares_smallest_ids() {
    let lc = clock(&[("m", 1)]);
    let rc = clock(&[("b", 1), ("z", 1)]);
    assert_eq!(LexicographicNodeWins.merge(&1, &2, &lc, &rc), 2);
    assert_eq!(LexicographicNodeWins.merge(&1, &2, &rc, &lc), 1);

    // An empty clock loses to any non-empty one; two empties keep local.
    let empty = VectorClock::new();
    assert_eq!(LexicographicNodeWins.merge(&1, &2, &empty, &rc), 2);
    assert_eq!(LexicographicNodeWins.merge(&1, &2, &empty, &empty.clone()), 1);
}

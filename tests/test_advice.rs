use gto_pulse::advice::*;
use gto_pulse::cards::{all_hands, normalize, Hand};
use gto_pulse::config::{Position, RangeContext, RangeDatabase};

fn hand(s: &str) -> Hand {
    normalize(s).unwrap()
}

fn advise_raw(raw: &str, position: Position, stack: u32, vs_open: bool) -> Advice {
    let db = RangeDatabase::builtin();
    let state = PlayerState::new(Some(hand(raw)), position, stack, vs_open);
    advise(db, &state).unwrap()
}

#[test]
fn test_aces_utg_open() {
    let a = advise_raw("AA", Position::UTG, 100, false);
    assert_eq!(a.action, Action::Open);
    assert_eq!(a.strength, Strength::Premium);
    assert_eq!(a.equity, 85);
    assert_eq!(a.insight, RangeDatabase::builtin().insights().premium_raise);
    assert_eq!(a.color_class, "bg-custom-green");
}

#[test]
fn test_trash_bb_vs_open_folds() {
    let a = advise_raw("72o", Position::BB, 100, true);
    assert_eq!(a.action, Action::Fold);
    assert_eq!(a.strength, Strength::Weak);
    assert_eq!(a.equity, 40);
    assert_eq!(a.color_class, "bg-custom-red");
}

#[test]
fn test_no_hand_no_advice() {
    let db = RangeDatabase::builtin();
    let state = PlayerState::new(None, Position::BTN, 100, false);
    assert!(advise(db, &state).is_none());

    let state = PlayerState::from_raw("XX", Position::BTN, 100, false);
    assert!(state.hand.is_none());
    assert!(advise(db, &state).is_none());

    let state = PlayerState::from_raw("kqs", Position::BTN, 100, false);
    assert_eq!(state.hand, Some(hand("KQs")));
}

#[test]
fn test_bb_vs_open_three_bet_before_call() {
    assert_eq!(advise_raw("99", Position::BB, 100, true).action, Action::ThreeBet);
    assert_eq!(advise_raw("A4s", Position::BB, 100, true).action, Action::ThreeBet);
    assert_eq!(advise_raw("AKo", Position::BB, 100, true).action, Action::ThreeBet);
    // 88 sits only in the call list.
    assert_eq!(advise_raw("88", Position::BB, 100, true).action, Action::Call);
    assert_eq!(advise_raw("A2s", Position::BB, 100, true).action, Action::Call);
    assert_eq!(advise_raw("KTo", Position::BB, 100, true).action, Action::Call);
}

#[test]
fn test_bb_call_insight_and_color() {
    let a = advise_raw("55", Position::BB, 100, true);
    assert_eq!(a.action, Action::Call);
    assert_eq!(a.insight, RangeDatabase::builtin().insights().defense_call);
    assert_eq!(a.color_class, "bg-custom-yellow");
}

#[test]
fn test_non_bb_vs_open_three_bets_or_folds() {
    assert_eq!(advise_raw("AKo", Position::UTG, 100, true).action, Action::ThreeBet);
    assert_eq!(advise_raw("AKs", Position::UTG, 100, true).action, Action::ThreeBet);
    assert_eq!(advise_raw("AQo", Position::UTG, 100, true).action, Action::Fold);
    // In the UTG open range, but there is no flat call outside the big blind.
    assert_eq!(advise_raw("77", Position::UTG, 100, true).action, Action::Fold);
    assert_eq!(advise_raw("A3s", Position::SB, 100, true).action, Action::ThreeBet);

    let a = advise_raw("QQ", Position::HJ, 100, true);
    assert_eq!(a.action, Action::ThreeBet);
    assert_eq!(a.color_class, "bg-custom-blue");
}

#[test]
fn test_open_beats_three_bet_when_first_in() {
    // AA is in both the UTG open and 3-bet lists.
    let db = RangeDatabase::builtin();
    let aa = hand("AA");
    assert!(db.range(Position::UTG, RangeContext::Open).contains(&aa));
    assert!(db.range(Position::UTG, RangeContext::ThreeBet).contains(&aa));
    assert_eq!(decide(db, &aa, Position::UTG, false), Action::Open);
    assert_eq!(decide(db, &aa, Position::UTG, true), Action::ThreeBet);
}

#[test]
fn test_open_insight_by_strength() {
    let db = RangeDatabase::builtin();
    let a = advise_raw("T9s", Position::UTG, 100, false);
    assert_eq!(a.action, Action::Open);
    assert_eq!(a.strength, Strength::Weak);
    assert_eq!(a.insight, db.insights().nut_advantage);

    let f = advise_raw("72o", Position::UTG, 100, false);
    assert_eq!(f.action, Action::Fold);
    assert_eq!(f.insight, db.insights().out_of_range_fold);
}

#[test]
fn test_first_in_follows_open_range_only() {
    let db = RangeDatabase::builtin();
    for pos in Position::ALL {
        let open = db.range(pos, RangeContext::Open);
        for h in all_hands() {
            let action = decide(db, &h, pos, false);
            if open.contains(&h) {
                assert_eq!(action, Action::Open, "{} {}", pos, h);
            } else {
                assert_eq!(action, Action::Fold, "{} {}", pos, h);
            }
        }
    }
}

#[test]
fn test_hands_outside_every_range_fold() {
    let db = RangeDatabase::builtin();
    for pos in Position::ALL {
        let ranges = db.ranges(pos);
        for h in all_hands() {
            if ranges.open.contains(&h) || ranges.three_bet.contains(&h) || ranges.call.contains(&h) {
                continue;
            }
            assert_eq!(decide(db, &h, pos, false), Action::Fold, "{} {}", pos, h);
            assert_eq!(decide(db, &h, pos, true), Action::Fold, "{} {}", pos, h);
        }
    }
}

#[test]
fn test_bb_first_in_has_no_open_range() {
    assert_eq!(advise_raw("AA", Position::BB, 100, false).action, Action::Fold);
}

#[test]
fn test_strength_tiers() {
    let db = RangeDatabase::builtin();
    assert_eq!(classify_strength(db, &hand("AKo")), Strength::Premium);
    assert_eq!(classify_strength(db, &hand("AQs")), Strength::Premium);
    assert_eq!(classify_strength(db, &hand("JTs")), Strength::Strong);
    assert_eq!(classify_strength(db, &hand("99")), Strength::Strong);
    assert_eq!(classify_strength(db, &hand("AQo")), Strength::Weak);
    assert_eq!(classify_strength(db, &hand("72o")), Strength::Weak);
}

#[test]
fn test_equity_lookup_order() {
    let db = RangeDatabase::builtin();
    assert_eq!(equity_for(db, &hand("AKs")), 68);
    assert_eq!(equity_for(db, &hand("AKo")), 65);
    assert_eq!(equity_for(db, &hand("TT")), 75);
    assert_eq!(equity_for(db, &hand("A5s")), 40);

    let custom = RangeDatabase::from_json_str(
        r#"{ "equity_map": { "KQ": 55, "KQs": 58, "default": 30 }, "preflop_ranges": {} }"#,
    )
    .unwrap();
    assert_eq!(equity_for(&custom, &hand("KQs")), 58);
    assert_eq!(equity_for(&custom, &hand("KQo")), 55);
    assert_eq!(equity_for(&custom, &hand("32o")), 30);
}

#[test]
fn test_stack_bucket_boundaries() {
    assert_eq!(StackBucket::from_depth(1), StackBucket::PushFold);
    assert_eq!(StackBucket::from_depth(29), StackBucket::PushFold);
    assert_eq!(StackBucket::from_depth(30), StackBucket::Shallow);
    assert_eq!(StackBucket::from_depth(50), StackBucket::Shallow);
    assert_eq!(StackBucket::from_depth(51), StackBucket::Standard);
    assert_eq!(StackBucket::from_depth(70), StackBucket::Standard);
    assert_eq!(StackBucket::from_depth(71), StackBucket::Deep);
    assert_eq!(StackBucket::from_depth(250), StackBucket::Deep);
}

#[test]
fn test_stack_note_appended() {
    let texts = RangeDatabase::builtin().stack_insights();
    let shallow = advise_raw("AA", Position::CO, 30, false);
    assert_eq!(shallow.stack_bucket, StackBucket::Shallow);
    assert_eq!(shallow.stack_note, texts.between_30_and_50);

    let standard = advise_raw("AA", Position::CO, 70, false);
    assert_eq!(standard.stack_note, texts.between_50_and_70);

    let short = advise_raw("72o", Position::CO, 12, false);
    assert_eq!(short.stack_note, texts.less_than_30);
    assert_eq!(
        short.full_insight(),
        format!("{} {}", short.insight, texts.less_than_30)
    );
}

#[test]
fn test_stack_does_not_change_action() {
    for stack in [10, 30, 50, 70, 200] {
        assert_eq!(advise_raw("KQo", Position::UTG, stack, false).action, Action::Open);
        assert_eq!(advise_raw("KQo", Position::UTG, stack, true).action, Action::Fold);
    }
}

#[test]
fn test_action_priority_order() {
    assert!(Action::ThreeBet > Action::Open);
    assert!(Action::Open > Action::Call);
    assert!(Action::Call > Action::Fold);
}

#[test]
fn test_chart_matches_single_advice() {
    let db = RangeDatabase::builtin();
    let chart = chart(db, Position::SB, 40, true);
    let hands = all_hands();
    assert_eq!(chart.len(), hands.len());
    for (advice, h) in chart.iter().zip(&hands) {
        assert_eq!(advice.hand, *h);
        let single = advise(db, &PlayerState::new(Some(*h), Position::SB, 40, true)).unwrap();
        assert_eq!(*advice, single);
    }
}

#[test]
fn test_advice_serializes() {
    let a = advise_raw("AKs", Position::BTN, 100, true);
    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["hand"], "AKs");
    assert_eq!(json["position"], "BTN");
    assert_eq!(json["action"], "3-bet");
    assert_eq!(json["strength"], "premium");
    assert_eq!(json["equity"], 68);
    assert_eq!(json["stack_bucket"], "deep");
}

#[test]
fn test_player_state_deserializes() {
    let state: PlayerState = serde_json::from_str(
        r#"{ "hand": "2As", "position": "SB", "stack_depth_bb": 45, "is_facing_open": false }"#,
    )
    .unwrap();
    assert_eq!(state.hand, Some(hand("A2s")));
    assert_eq!(state.position, Position::SB);
    let a = advise(RangeDatabase::builtin(), &state).unwrap();
    assert_eq!(a.action, Action::Open);
}

#[test]
fn test_player_state_unreadable_hand_deserializes_empty() {
    let state: PlayerState = serde_json::from_str(
        r#"{ "hand": "XX", "position": "SB", "stack_depth_bb": 45, "is_facing_open": false }"#,
    )
    .unwrap();
    assert!(state.hand.is_none());
    assert_eq!(state.position, Position::SB);
    assert!(advise(RangeDatabase::builtin(), &state).is_none());

    let state: PlayerState = serde_json::from_str(
        r#"{ "hand": null, "position": "BB", "stack_depth_bb": 100, "is_facing_open": true }"#,
    )
    .unwrap();
    assert!(state.hand.is_none());

    let state: PlayerState = serde_json::from_str(
        r#"{ "position": "BB", "stack_depth_bb": 100, "is_facing_open": true }"#,
    )
    .unwrap();
    assert!(state.hand.is_none());
}

use gto_pulse::cards::*;
use gto_pulse::ranges::*;

fn hand(s: &str) -> Hand {
    normalize(s).unwrap()
}

#[test]
fn test_exact_hand() {
    assert!(matches(&hand("AKs"), "AKs"));
    assert!(matches(&hand("AKs"), "aks"));
    assert!(!matches(&hand("AKo"), "AKs"));
    assert!(matches(&hand("QQ"), "QQ"));
    assert!(matches(&hand("72o"), "72o"));
}

#[test]
fn test_bare_two_rank_token_matches_both() {
    assert!(matches(&hand("AKs"), "AK"));
    assert!(matches(&hand("AKo"), "AK"));
    assert!(!matches(&hand("AQs"), "AK"));
}

#[test]
fn test_pair_plus() {
    assert!(matches(&hand("JJ"), "77+"));
    assert!(matches(&hand("77"), "77+"));
    assert!(matches(&hand("AA"), "77+"));
    assert!(!matches(&hand("66"), "77+"));
    assert!(!matches(&hand("A7s"), "77+"));
}

#[test]
fn test_non_pair_plus_fixed_top() {
    assert!(matches(&hand("AJs"), "AJs+"));
    assert!(matches(&hand("AQs"), "AJs+"));
    assert!(matches(&hand("AKs"), "AJs+"));
    assert!(!matches(&hand("ATs"), "AJs+"));
    assert!(!matches(&hand("AJo"), "AJs+"));
}

#[test]
fn test_non_pair_plus_higher_top() {
    // Higher top card is included while the kicker is at least the base kicker.
    assert!(matches(&hand("AJo"), "KJo+"));
    assert!(matches(&hand("AKo"), "KJo+"));
    assert!(!matches(&hand("ATo"), "KJo+"));
    assert!(!matches(&hand("A2o"), "KJo+"));
    assert!(matches(&hand("A7s"), "K7s+"));
    assert!(!matches(&hand("A6s"), "K7s+"));
    assert!(!matches(&hand("AJs"), "KJo+"));
    assert!(!matches(&hand("QJo"), "KJo+"));
}

#[test]
fn test_non_pair_plus_without_suffix() {
    assert!(matches(&hand("AJs"), "AJ+"));
    assert!(matches(&hand("AQo"), "AJ+"));
    assert!(!matches(&hand("ATo"), "AJ+"));
    assert!(!matches(&hand("JJ"), "AJ+"));
}

#[test]
fn test_dash_pairs() {
    assert!(matches(&hand("88"), "88-22"));
    assert!(matches(&hand("55"), "88-22"));
    assert!(matches(&hand("22"), "88-22"));
    assert!(!matches(&hand("99"), "88-22"));
    assert!(matches(&hand("55"), "22-88"));
    assert!(!matches(&hand("82o"), "88-22"));
}

#[test]
fn test_dash_non_pair() {
    assert!(matches(&hand("A5s"), "A5s-A2s"));
    assert!(matches(&hand("A3s"), "A5s-A2s"));
    assert!(matches(&hand("A2s"), "A5s-A2s"));
    assert!(!matches(&hand("A6s"), "A5s-A2s"));
    assert!(!matches(&hand("A4o"), "A5s-A2s"));
    assert!(!matches(&hand("K4s"), "A5s-A2s"));
    assert!(matches(&hand("A8o"), "AJo-A2o"));
}

#[test]
fn test_descriptive_tokens() {
    assert!(matches(&hand("22"), "pocket pairs"));
    assert!(!matches(&hand("AKs"), "pocket pairs"));
    assert!(matches(&hand("KTs"), "suited broadway"));
    assert!(matches(&hand("AKs"), "Suited Broadway"));
    assert!(!matches(&hand("KTo"), "suited broadway"));
    assert!(!matches(&hand("K9s"), "suited broadway"));
    assert!(!matches(&hand("TT"), "suited broadway"));
}

#[test]
fn test_malformed_never_matches() {
    for expr in ["ZZ+", "A1s", "AK-KQ", "A5s-K2s", "??", "", "77s+", "AKx"] {
        for h in all_hands() {
            assert!(!matches(&h, expr), "{} matched '{}'", h, expr);
        }
    }
}

#[test]
fn test_is_in_any_range() {
    let ranges = ["QQ+", "AK", "AQs"];
    assert!(is_in_any_range(&hand("KK"), &ranges));
    assert!(is_in_any_range(&hand("AKo"), &ranges));
    assert!(is_in_any_range(&hand("AQs"), &ranges));
    assert!(!is_in_any_range(&hand("AQo"), &ranges));
    assert!(!is_in_any_range(&hand("JJ"), &ranges));
    let empty: [&str; 0] = [];
    assert!(!is_in_any_range(&hand("AA"), &empty));
}

#[test]
fn test_is_in_any_range_order_independent() {
    let forward = ["A5s-A2s", "77+", "KQs"];
    let backward = ["KQs", "77+", "A5s-A2s"];
    for h in all_hands() {
        assert_eq!(is_in_any_range(&h, &forward), is_in_any_range(&h, &backward));
    }
}

#[test]
fn test_compiled_range_matches_string_form() {
    let exprs = ["88-22", "AJo-A2o", "KTo+", "A9s-A2s", "pocket pairs", "suited broadway"];
    let compiled = CompiledRange::compile(&exprs);
    for h in all_hands() {
        assert_eq!(compiled.contains(&h), is_in_any_range(&h, &exprs), "{}", h);
    }
}

#[test]
fn test_compiled_range_parse_list() {
    let range = CompiledRange::parse("QQ+, AK, A5s-A2s,,");
    assert_eq!(range.exprs().len(), 3);
    assert_eq!(range.matching_expr(&hand("A3s")), Some("A5s-A2s"));
    assert_eq!(range.matching_expr(&hand("AKs")), Some("AK"));
    assert_eq!(range.matching_expr(&hand("72o")), None);
}

#[test]
fn test_range_hands_expansion() {
    let hands = CompiledRange::parse("TT+").hands();
    let names: Vec<String> = hands.iter().map(|h| h.canonical()).collect();
    assert_eq!(names, vec!["AA", "KK", "QQ", "JJ", "TT"]);

    let suited = CompiledRange::parse("ATs+").hands();
    assert_eq!(suited.len(), 4);
}

#[test]
fn test_combo_count() {
    assert_eq!(combo_count(&hand("AA")), 6);
    assert_eq!(combo_count(&hand("AKs")), 4);
    assert_eq!(combo_count(&hand("AKo")), 12);
}

#[test]
fn test_total_combos_and_pct() {
    let pairs = CompiledRange::parse("pocket pairs").hands();
    assert_eq!(total_combos(&pairs), 78);
    assert!((range_pct(&pairs) - (78.0 / 1326.0 * 100.0)).abs() < 1e-9);

    let everything = all_hands();
    assert_eq!(total_combos(&everything), 1326);
    assert!((range_pct(&everything) - 100.0).abs() < 1e-9);
}

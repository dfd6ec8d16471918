//! Property-based tests for view-state, resolver and classifier invariants.
//!
//! Tests validate:
//! 1. Large screens always show filters
//! 2. Small screens hide results exactly when filters or a preview are up
//! 3. Open then close clears the document; on medium it restores filters
//! 4. toggle_filters is an involution that clears the document when turning on
//! 5. Resolver returns the override exactly when it is non-empty
//! 6. Click classification on links, plain spans and untargeted events
//! 7. All four predicates come from one screen reading

use proptest::prelude::*;
use serde_json::{json, Value};
use serp_view::config::{AppData, ConfigCategory, ConfigResolver, DefaultConfig};
use serp_view::model::{
    DocumentRef, ElementNode, EventKind, FixedScreen, ScreenSizeCategory, ScreenSizeOracle,
    TargetElement, UiEvent,
};
use serp_view::state::{ClickClassifier, ViewStateMachine};
use std::cell::Cell;

// ===== Strategies =====

fn any_screen() -> impl Strategy<Value = ScreenSizeCategory> {
    prop::sample::select(ScreenSizeCategory::ALL.to_vec())
}

fn large_screen() -> impl Strategy<Value = ScreenSizeCategory> {
    prop::sample::select(vec![ScreenSizeCategory::Lg, ScreenSizeCategory::Xl])
}

fn small_screen() -> impl Strategy<Value = ScreenSizeCategory> {
    prop::sample::select(vec![ScreenSizeCategory::Xs, ScreenSizeCategory::Sm])
}

#[derive(Debug, Clone)]
enum Op {
    Open(String),
    Close,
    ToggleFilters,
    ToggleMenu,
    NewResults,
    Resize(ScreenSizeCategory),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Op::Open),
        Just(Op::Close),
        Just(Op::ToggleFilters),
        Just(Op::ToggleMenu),
        Just(Op::NewResults),
        any_screen().prop_map(Op::Resize),
    ]
}

fn apply(vsm: &mut ViewStateMachine<&FixedScreen>, screen: &FixedScreen, op: &Op) {
    match op {
        Op::Open(id) => vsm.open_document(DocumentRef::new(id).expect("non-empty id")),
        Op::Close => {
            vsm.close_document();
        }
        Op::ToggleFilters => vsm.toggle_filters(),
        Op::ToggleMenu => vsm.toggle_menu(),
        Op::NewResults => vsm.on_new_results(),
        Op::Resize(category) => screen.resize(*category),
    }
}

/// Drive a machine through `ops` starting on `initial`.
fn run_ops<'a>(
    screen: &'a FixedScreen,
    initial: ScreenSizeCategory,
    ops: &[Op],
) -> ViewStateMachine<&'a FixedScreen> {
    screen.resize(initial);
    let mut vsm = ViewStateMachine::new(screen);
    for op in ops {
        apply(&mut vsm, screen, op);
    }
    vsm
}

fn json_list() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec("[a-z]{1,6}".prop_map(Value::from), 0..4)
}

// ===== Property 1: Large screens always show filters =====

proptest! {
    #[test]
    fn large_screen_always_shows_filters(
        initial in any_screen(),
        ops in prop::collection::vec(any_op(), 0..24),
        large in large_screen(),
    ) {
        let screen = FixedScreen::new(initial);
        let vsm = run_ops(&screen, initial, &ops);
        screen.resize(large);

        prop_assert!(vsm.show_filters());
    }
}

// ===== Property 2: Small-screen results =====

proptest! {
    #[test]
    fn small_screen_results_follow_filters_and_document(
        initial in any_screen(),
        ops in prop::collection::vec(any_op(), 0..24),
        small in small_screen(),
    ) {
        let screen = FixedScreen::new(initial);
        let vsm = run_ops(&screen, initial, &ops);
        screen.resize(small);

        let has_doc = vsm.state().opened_document().is_some();
        if has_doc {
            prop_assert!(!vsm.show_results());
        }
        if !vsm.show_filters() && !has_doc {
            prop_assert!(vsm.show_results());
        }
    }
}

// ===== Property 3: Open then close =====

proptest! {
    #[test]
    fn open_then_close_clears_document(
        initial in any_screen(),
        ops in prop::collection::vec(any_op(), 0..16),
        close_on in any_screen(),
        id in "[a-z0-9]{1,10}",
    ) {
        let screen = FixedScreen::new(initial);
        let mut vsm = run_ops(&screen, initial, &ops);

        vsm.open_document(DocumentRef::new(&id).expect("non-empty id"));
        screen.resize(close_on);
        let filters_before = vsm.state().filters_toggled();
        prop_assert!(vsm.close_document());

        prop_assert!(vsm.state().opened_document().is_none());
        if close_on == ScreenSizeCategory::Md {
            prop_assert!(vsm.state().filters_toggled());
        } else {
            prop_assert_eq!(vsm.state().filters_toggled(), filters_before);
        }
    }
}

// ===== Property 4: toggle_filters involution =====

proptest! {
    #[test]
    fn toggle_filters_twice_restores_flag(
        initial in any_screen(),
        ops in prop::collection::vec(any_op(), 0..16),
    ) {
        let screen = FixedScreen::new(initial);
        let mut vsm = run_ops(&screen, initial, &ops);
        let before = vsm.state().clone();

        vsm.toggle_filters();
        prop_assert_eq!(vsm.state().filters_toggled(), !before.filters_toggled());
        if vsm.state().filters_toggled() {
            prop_assert!(vsm.state().opened_document().is_none());
        }

        vsm.toggle_filters();
        prop_assert_eq!(vsm.state().filters_toggled(), before.filters_toggled());
        prop_assert_eq!(vsm.state().menu_toggled(), before.menu_toggled());
        // One of the two flips always turns filters on, which drops any preview
        prop_assert!(vsm.state().opened_document().is_none());
    }
}

// ===== Property 5: Resolver override =====

proptest! {
    #[test]
    fn resolver_returns_override_exactly_when_non_empty(
        facets in prop::option::of(json_list()),
        features in prop::option::of(json_list()),
        present in any::<bool>(),
    ) {
        let defaults = DefaultConfig::default();
        let app_data = present.then(|| AppData {
            facets: facets.clone(),
            features: features.clone(),
            metadata: None,
        });
        let resolver = ConfigResolver::new(app_data);

        let expected_facets = match (&facets, present) {
            (Some(list), true) if !list.is_empty() => list.as_slice(),
            _ => defaults.facets.as_slice(),
        };
        let expected_features = match (&features, present) {
            (Some(list), true) if !list.is_empty() => list.as_slice(),
            _ => defaults.features.as_slice(),
        };

        prop_assert_eq!(resolver.resolve(ConfigCategory::Facets), expected_facets);
        prop_assert_eq!(resolver.resolve(ConfigCategory::Features), expected_features);
        prop_assert_eq!(resolver.resolve(ConfigCategory::Metadata), defaults.metadata.as_slice());
    }
}

// ===== Property 6: Click classification =====

fn plain_ancestors() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 0..6)
}

proptest! {
    #[test]
    fn anchor_target_is_always_action(classes in plain_ancestors()) {
        let mut target = TargetElement::new("a");
        for class in &classes {
            target = target.within(ElementNode::new("div", [class.clone()]));
        }
        prop_assert!(ClickClassifier::default().is_action_click(&UiEvent::click(target)));
    }

    #[test]
    fn plain_span_outside_regions_is_not_action(classes in plain_ancestors()) {
        let mut target = TargetElement::new("span");
        for class in &classes {
            target = target.within(ElementNode::new("div", [class.clone()]));
        }
        prop_assert!(!ClickClassifier::default().is_action_click(&UiEvent::click(target)));
    }

    #[test]
    fn untargeted_event_is_action_iff_not_primary(kind in "[a-z]{1,12}") {
        let kind: EventKind = serde_json::from_value(json!(kind)).expect("any string is a kind");
        let expected = !kind.is_primary();
        prop_assert_eq!(
            ClickClassifier::default().is_action_click(&UiEvent::untargeted(kind)),
            expected
        );
    }
}

// ===== Property 7: One screen reading per snapshot =====

/// Oracle that changes category after every read.
struct DriftingScreen(Cell<usize>);

impl ScreenSizeOracle for DriftingScreen {
    fn current(&self) -> ScreenSizeCategory {
        let i = self.0.get();
        self.0.set(i + 1);
        ScreenSizeCategory::ALL[i % ScreenSizeCategory::ALL.len()]
    }
}

proptest! {
    #[test]
    fn visibility_snapshot_is_consistent(start in 0usize..5, toggles in 0usize..4) {
        let mut vsm = ViewStateMachine::new(DriftingScreen(Cell::new(start)));
        for _ in 0..toggles {
            vsm.toggle_filters();
        }

        let v = vsm.visibility();
        let expected = serp_view::state::Visibility::compute(v.screen, vsm.state());
        prop_assert_eq!(v, expected);
    }
}

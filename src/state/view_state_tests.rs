//! Tests for the responsive visibility state machine.

use super::*;
use crate::model::FixedScreen;
use crate::model::ScreenSizeCategory::{Lg, Md, Sm, Xl, Xs};

// ===== Test Helpers =====

fn doc(id: &str) -> DocumentRef {
    DocumentRef::new(id).expect("valid document ref")
}

fn machine(screen: &FixedScreen) -> ViewStateMachine<&FixedScreen> {
    ViewStateMachine::new(screen)
}

// ===== Initial state =====

#[test]
fn filters_start_toggled_only_on_medium() {
    for category in ScreenSizeCategory::ALL {
        let screen = FixedScreen::new(category);
        let vsm = machine(&screen);
        assert_eq!(
            vsm.state().filters_toggled(),
            category == Md,
            "initial filters_toggled on {}",
            category
        );
        assert!(!vsm.state().menu_toggled());
        assert!(vsm.state().opened_document().is_none());
    }
}

#[test]
fn visibility_table_for_untouched_state() {
    let screen = FixedScreen::new(Xs);
    let vsm = machine(&screen);

    let table = ScreenSizeCategory::ALL
        .iter()
        .map(|&category| {
            screen.resize(category);
            let v = vsm.visibility();
            format!(
                "{} filters={} menu={} results={} form={}",
                v.screen, v.filters, v.menu, v.results, v.form
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(table, @r"
    xs filters=false menu=false results=true form=false
    sm filters=false menu=true results=true form=true
    md filters=false menu=true results=true form=true
    lg filters=true menu=true results=true form=true
    xl filters=true menu=true results=true form=true
    ");
}

// ===== Derived predicates =====

#[test]
fn filters_always_shown_on_large_screens() {
    for category in [Lg, Xl] {
        let screen = FixedScreen::new(category);
        let mut vsm = machine(&screen);
        assert!(!vsm.state().filters_toggled());
        assert!(vsm.show_filters(), "untoggled filters on {}", category);

        vsm.toggle_filters();
        assert!(vsm.show_filters(), "toggled filters on {}", category);
    }
}

#[test]
fn menu_on_extra_small_requires_toggle_without_filters() {
    let screen = FixedScreen::new(Xs);
    let mut vsm = machine(&screen);
    assert!(!vsm.show_menu());

    vsm.toggle_menu();
    assert!(vsm.show_menu());

    // Filters win over the menu on extra small screens
    vsm.toggle_filters();
    assert!(!vsm.show_menu());
}

#[test]
fn form_on_extra_small_follows_filters() {
    let screen = FixedScreen::new(Xs);
    let mut vsm = machine(&screen);
    assert!(!vsm.show_form());

    vsm.toggle_filters();
    assert!(vsm.show_form());
}

#[test]
fn results_hidden_on_small_when_document_open() {
    let screen = FixedScreen::new(Sm);
    let mut vsm = machine(&screen);

    vsm.open_document(doc("d1"));

    assert!(!vsm.show_results());
    assert_eq!(vsm.primary_pane(), Pane::Preview);
}

#[test]
fn results_always_shown_from_medium_up() {
    for category in [Md, Lg, Xl] {
        let screen = FixedScreen::new(category);
        let mut vsm = machine(&screen);
        vsm.open_document(doc("d1"));
        assert!(vsm.show_results(), "results with document on {}", category);
        assert_eq!(vsm.primary_pane(), Pane::Results);
    }
}

#[test]
fn small_screen_filters_scenario() {
    // GIVEN a small screen with filters toggled and no document
    let screen = FixedScreen::new(Sm);
    let mut vsm = machine(&screen);
    vsm.toggle_filters();
    assert!(vsm.state().filters_toggled());
    assert!(vsm.state().opened_document().is_none());

    // THEN results are hidden and the form is shown
    assert!(!vsm.show_results());
    assert!(vsm.show_form());
    assert_eq!(vsm.primary_pane(), Pane::Filters);

    // WHEN filters are toggled off
    vsm.toggle_filters();

    // THEN results come back
    assert!(!vsm.state().filters_toggled());
    assert!(vsm.show_results());
    assert_eq!(vsm.primary_pane(), Pane::Results);
}

#[test]
fn predicates_follow_resize_without_transition() {
    let screen = FixedScreen::new(Lg);
    let vsm = machine(&screen);
    assert!(vsm.show_filters());

    screen.resize(Sm);

    assert!(!vsm.show_filters());
    assert_eq!(vsm.visibility().screen, Sm);
}

// ===== open_document =====

#[test]
fn open_document_collapses_filters_up_to_medium() {
    for category in [Xs, Sm, Md] {
        let screen = FixedScreen::new(category);
        let mut vsm = machine(&screen);
        if !vsm.state().filters_toggled() {
            vsm.toggle_filters();
        }

        vsm.open_document(doc("d1"));

        assert!(!vsm.state().filters_toggled(), "filters after open on {}", category);
        assert_eq!(vsm.state().opened_document(), Some(&doc("d1")));
    }
}

#[test]
fn open_document_keeps_filters_on_large() {
    let screen = FixedScreen::new(Lg);
    let mut vsm = machine(&screen);
    vsm.toggle_filters();

    vsm.open_document(doc("d1"));

    assert!(vsm.state().filters_toggled());
}

#[test]
fn open_document_leaves_menu_alone() {
    let screen = FixedScreen::new(Xs);
    let mut vsm = machine(&screen);
    vsm.toggle_menu();

    vsm.open_document(doc("d1"));

    assert!(vsm.state().menu_toggled());
}

#[test]
fn open_record_rejects_empty_id_and_keeps_state() {
    let screen = FixedScreen::new(Md);
    let mut vsm = machine(&screen);
    let before = vsm.state().clone();

    let result = vsm.open_record(&Record::new(""));

    assert!(matches!(result, Err(ViewError::InvalidArgument { .. })));
    assert_eq!(vsm.state(), &before);
}

#[test]
fn open_record_opens_document_by_id() {
    let screen = FixedScreen::new(Xl);
    let mut vsm = machine(&screen);

    vsm.open_record(&Record::new("r-7")).unwrap();

    assert_eq!(vsm.state().opened_document().map(DocumentRef::as_str), Some("r-7"));
}

// ===== close_document =====

#[test]
fn close_document_on_medium_restores_filters() {
    let screen = FixedScreen::new(Md);
    let mut vsm = machine(&screen);
    vsm.open_document(doc("d1"));
    assert!(!vsm.state().filters_toggled());

    assert!(vsm.close_document());

    assert!(vsm.state().opened_document().is_none());
    assert!(vsm.state().filters_toggled());
}

#[test]
fn close_document_after_resize_to_medium_restores_filters() {
    let screen = FixedScreen::new(Xs);
    let mut vsm = machine(&screen);
    vsm.open_document(doc("d1"));

    screen.resize(Md);
    vsm.close_document();

    assert!(vsm.state().filters_toggled());
}

#[test]
fn close_document_elsewhere_leaves_filters() {
    for category in [Xs, Sm, Lg, Xl] {
        let screen = FixedScreen::new(category);
        let mut vsm = machine(&screen);
        vsm.open_document(doc("d1"));
        let filters_before = vsm.state().filters_toggled();

        vsm.close_document();

        assert_eq!(vsm.state().filters_toggled(), filters_before, "on {}", category);
        assert!(vsm.state().opened_document().is_none());
    }
}

#[test]
fn close_document_without_document_is_noop() {
    let screen = FixedScreen::new(Md);
    let mut vsm = machine(&screen);
    vsm.toggle_filters();
    assert!(!vsm.state().filters_toggled());

    assert!(!vsm.close_document());

    assert!(!vsm.state().filters_toggled(), "no-op close must not restore filters");
}

// ===== toggle_filters =====

#[test]
fn toggle_filters_on_closes_document() {
    let screen = FixedScreen::new(Xl);
    let mut vsm = machine(&screen);
    vsm.open_document(doc("d1"));

    vsm.toggle_filters();

    assert!(vsm.state().filters_toggled());
    assert!(vsm.state().opened_document().is_none());
}

#[test]
fn toggle_filters_off_keeps_document() {
    let screen = FixedScreen::new(Lg);
    let mut vsm = machine(&screen);
    vsm.toggle_filters();
    vsm.open_document(doc("d1"));
    assert!(vsm.state().filters_toggled());

    vsm.toggle_filters();

    assert!(!vsm.state().filters_toggled());
    assert_eq!(vsm.state().opened_document(), Some(&doc("d1")));
}

#[test]
fn toggle_menu_has_no_side_effects() {
    let screen = FixedScreen::new(Md);
    let mut vsm = machine(&screen);
    vsm.open_document(doc("d1"));
    let filters = vsm.state().filters_toggled();

    vsm.toggle_menu();
    vsm.toggle_menu();
    vsm.toggle_menu();

    assert!(vsm.state().menu_toggled());
    assert_eq!(vsm.state().filters_toggled(), filters);
    assert!(vsm.state().opened_document().is_some());
}

// ===== on_new_results =====

#[test]
fn new_results_on_small_with_preview_returns_to_list() {
    // GIVEN a small screen with a document open
    let screen = FixedScreen::new(Sm);
    let mut vsm = machine(&screen);
    vsm.open_document(doc("d1"));
    assert!(!vsm.show_results());

    // WHEN a new result set arrives
    vsm.on_new_results();

    // THEN the preview is gone and filters are off
    assert!(vsm.state().opened_document().is_none());
    assert!(!vsm.state().filters_toggled());
    assert!(vsm.show_results());
}

#[test]
fn new_results_on_extra_small_with_filters_hides_filters() {
    let screen = FixedScreen::new(Xs);
    let mut vsm = machine(&screen);
    vsm.toggle_filters();

    vsm.on_new_results();

    assert!(!vsm.state().filters_toggled());
}

#[test]
fn new_results_while_results_visible_changes_nothing() {
    let screen = FixedScreen::new(Md);
    let mut vsm = machine(&screen);
    vsm.open_document(doc("d1"));
    vsm.toggle_menu();
    let before = vsm.state().clone();

    vsm.on_new_results();

    assert_eq!(vsm.state(), &before);
}

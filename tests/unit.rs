//! Unit tests for the type taxonomy and handle resolution.
mod common;
use flowsketch::prelude::*;

#[test]
fn test_exit_id_display() {
    assert_eq!(format!("{}", ExitId::Default), "default");
    assert_eq!(format!("{}", ExitId::NoAnswer), "no_answer");
    assert_eq!(format!("{}", ExitId::WorkingHours), "workingHours");
    assert_eq!(format!("{}", ExitId::Branch("gold".to_string())), "gold");
}

#[test]
fn test_exit_id_canonical_round_trip() {
    for exit in [
        ExitId::Default,
        ExitId::Error,
        ExitId::Timeout,
        ExitId::Busy,
        ExitId::NoAnswer,
        ExitId::Invalid,
        ExitId::InsufficientData,
        ExitId::False,
        ExitId::True,
        ExitId::WorkingHours,
        ExitId::Holiday,
        ExitId::Override,
        ExitId::Branch("2".to_string()),
    ] {
        assert_eq!(ExitId::from_canonical(exit.as_str()), exit);
    }
}

#[test]
fn test_taxonomy_is_total() {
    // Never fails, whatever the input looks like.
    for raw in ["", "???", "MenuActivity", "なにこれ", "x".repeat(512).as_str()] {
        let info = resolve(raw);
        assert!(!info.label.is_empty());
        let again = resolve(raw);
        assert_eq!(info.category, again.category);
        assert_eq!(info.extra_exits, again.extra_exits);
    }
}

#[test]
fn test_taxonomy_unknown_type_falls_back_to_generic() {
    let info = resolve("FrobnicateActivity");
    assert_eq!(info.category, NodeCategory::Generic);
    assert_eq!(info.extra_exits, &[ExitId::Error]);
}

#[test]
fn test_taxonomy_compound_rule_wins_over_generic() {
    // A type containing both "queue" and "lookup" must hit the more
    // specific rule before the bare "queue" rule.
    assert_eq!(
        resolve("ExtQueueStatusLookup").category,
        NodeCategory::QueueLookup
    );
    assert_eq!(resolve("QueueActivity").category, NodeCategory::Queue);
    assert_eq!(resolve("DbLookupActivity").category, NodeCategory::Integration);
}

#[test]
fn test_taxonomy_matching_is_case_insensitive() {
    assert_eq!(resolve("MENUACTIVITY").category, NodeCategory::Menu);
    assert_eq!(resolve("businesshoursCheck").category, NodeCategory::BusinessHours);
}

#[test]
fn test_taxonomy_exit_sets() {
    assert_eq!(
        resolve("MenuActivity").extra_exits,
        &[ExitId::Timeout, ExitId::Invalid, ExitId::Error]
    );
    assert_eq!(
        resolve("TransferActivity").extra_exits,
        &[
            ExitId::Busy,
            ExitId::NoAnswer,
            ExitId::Invalid,
            ExitId::Error
        ]
    );
    assert!(resolve("DisconnectActivity").extra_exits.is_empty());
}

#[test]
fn test_info_for_matches_resolved_categories() {
    use flowsketch::taxonomy::info_for;

    let resolved = resolve("MenuActivity");
    let looked_up = info_for(NodeCategory::Menu);
    assert_eq!(looked_up.category, resolved.category);
    assert_eq!(looked_up.extra_exits, resolved.extra_exits);

    // Synthetic categories have no rule and fall back to the generic info.
    assert_eq!(
        info_for(NodeCategory::EventHeader).category,
        NodeCategory::EventHeader
    );
    assert_eq!(info_for(NodeCategory::EventHeader).extra_exits, &[ExitId::Error]);
}

#[test]
fn test_handle_error_family_beats_timeout() {
    // A condition carrying both an error token and "timeout" always
    // resolves to the error family.
    let resolved = resolve_handle(Some("error_after_timeout"), NodeCategory::Queue);
    assert_eq!(resolved.exit, ExitId::Error);
    assert!(resolved.is_error_path);
    assert!(!resolved.is_timeout);
}

#[test]
fn test_handle_specific_error_token_beats_generic() {
    let resolved = resolve_handle(Some("Transfer failure: busy"), NodeCategory::Transfer);
    assert_eq!(resolved.exit, ExitId::Busy);
    assert!(resolved.is_error_path);

    let resolved = resolve_handle(Some("no answer"), NodeCategory::Transfer);
    assert_eq!(resolved.exit, ExitId::NoAnswer);
}

#[test]
fn test_handle_timeout() {
    let resolved = resolve_handle(Some("On Timeout"), NodeCategory::Prompt);
    assert_eq!(resolved.exit, ExitId::Timeout);
    assert!(resolved.is_timeout);
    assert!(!resolved.is_error_path);
}

#[test]
fn test_handle_menu_branch_is_verbatim() {
    let resolved = resolve_handle(Some("1"), NodeCategory::Menu);
    assert_eq!(resolved.exit, ExitId::Branch("1".to_string()));
    assert!(!resolved.is_error_path);

    let resolved = resolve_handle(Some("gold"), NodeCategory::Case);
    assert_eq!(resolved.exit, ExitId::Branch("gold".to_string()));
}

#[test]
fn test_handle_condition_normalizes() {
    assert_eq!(
        resolve_handle(Some("True"), NodeCategory::Condition).exit,
        ExitId::True
    );
    // "false" is an error-family token: the unhappy branch of a condition
    // node is styled like an error path.
    let resolved = resolve_handle(Some("false"), NodeCategory::Condition);
    assert_eq!(resolved.exit, ExitId::False);
    assert!(resolved.is_error_path);

    assert_eq!(
        resolve_handle(Some("whatever"), NodeCategory::Condition).exit,
        ExitId::Default
    );
}

#[test]
fn test_handle_business_hours_mapping() {
    assert_eq!(
        resolve_handle(Some("workingHours"), NodeCategory::BusinessHours).exit,
        ExitId::WorkingHours
    );
    assert_eq!(
        resolve_handle(Some("office open"), NodeCategory::BusinessHours).exit,
        ExitId::WorkingHours
    );
    assert_eq!(
        resolve_handle(Some("holiday"), NodeCategory::BusinessHours).exit,
        ExitId::Holiday
    );
    assert_eq!(
        resolve_handle(Some("forced closed"), NodeCategory::BusinessHours).exit,
        ExitId::Override
    );
    assert_eq!(
        resolve_handle(Some("anything else"), NodeCategory::BusinessHours).exit,
        ExitId::Default
    );
}

#[test]
fn test_handle_missing_condition_is_default() {
    for category in [
        NodeCategory::Menu,
        NodeCategory::Case,
        NodeCategory::Condition,
        NodeCategory::Generic,
    ] {
        let resolved = resolve_handle(None, category);
        assert_eq!(resolved.exit, ExitId::Default);
        assert!(!resolved.is_error_path);
        assert!(!resolved.is_timeout);
    }
    // Whitespace-only conditions count as absent.
    assert_eq!(
        resolve_handle(Some("   "), NodeCategory::Menu).exit,
        ExitId::Default
    );
}

#[test]
fn test_error_display() {
    let err = DocumentError::JsonParse("unexpected end of input".to_string());
    assert!(err.to_string().contains("unexpected end of input"));
}

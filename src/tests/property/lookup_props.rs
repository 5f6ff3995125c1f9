//! Property-based tests for the catalog lookup contract
//!
//! Tests invariants:
//! - Lookups never fail and return the sentinel for unknown keys
//! - Persisted catalogs answer exactly like the built ones
//! - Display names follow the fixed fallback order

use std::collections::HashSet;

use proptest::prelude::*;

use crate::catalog::{Catalog, CatalogEntry, NameSource, NameSources, UNKNOWN};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_identifier() -> impl Strategy<Value = String> {
    "[a-f0-9]{32}"
}

fn arb_entry() -> impl Strategy<Value = CatalogEntry> {
    (
        "[A-Za-z_][A-Za-z0-9_]{0,15}",
        proptest::option::of(arb_identifier()),
        proptest::option::of("(item|email|npc)_[0-9]{1,4}"),
        proptest::option::of("[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?"),
    )
        .prop_map(|(file_reference, identifier, semantic_key, display_name)| {
            let mut entry = CatalogEntry::new(file_reference);
            entry.identifier = identifier;
            entry.semantic_key = semantic_key;
            if let Some(name) = display_name {
                entry.display_name = name;
            }
            entry
        })
}

/// Entries with unique keys on every axis, so each key maps to one entry.
fn arb_unique_entries() -> impl Strategy<Value = Vec<CatalogEntry>> {
    proptest::collection::vec(arb_entry(), 0..24).prop_map(|entries| {
        let mut identifiers = HashSet::new();
        let mut keys = HashSet::new();
        let mut files = HashSet::new();
        entries
            .into_iter()
            .filter(|e| files.insert(e.file_reference.clone()))
            .map(|mut e| {
                if let Some(id) = &e.identifier {
                    if !identifiers.insert(id.clone()) {
                        e.identifier = None;
                    }
                }
                if let Some(key) = &e.semantic_key {
                    if !keys.insert(key.clone()) {
                        e.semantic_key = None;
                    }
                }
                e
            })
            .collect()
    })
}

fn all_answers(catalog: &Catalog, key: &str) -> [String; 7] {
    [
        catalog.resolve_name(key).to_string(),
        catalog.resolve_file_reference(key).to_string(),
        catalog.resolve_semantic_key(key).to_string(),
        catalog.resolve_name_by_semantic_key(key).to_string(),
        catalog.resolve_file_reference_by_semantic_key(key).to_string(),
        catalog.resolve_name_by_file_reference(key).to_string(),
        catalog.resolve_identifier_by_file_reference(key).to_string(),
    ]
}

// ============================================================================
// Lookup Properties
// ============================================================================

proptest! {
    /// Keys that are not in the catalog resolve to the sentinel on every axis
    #[test]
    fn unknown_keys_resolve_to_sentinel(
        entries in arb_unique_entries(),
        probe in "[g-z]{1,40}",
    ) {
        // probes use letters outside hex, digits and underscores
        let catalog = Catalog::from_entries(entries);
        prop_assume!(catalog.entry_by_file_reference(&probe).is_none());

        for answer in all_answers(&catalog, &probe) {
            prop_assert_eq!(answer, UNKNOWN);
        }
    }

    /// Every stored key resolves to the entry it came from
    #[test]
    fn known_keys_resolve_to_their_entry(entries in arb_unique_entries()) {
        let catalog = Catalog::from_entries(entries.clone());

        for entry in &entries {
            prop_assert_eq!(
                catalog.resolve_name_by_file_reference(&entry.file_reference),
                entry.display_name.as_str()
            );
            if let Some(id) = &entry.identifier {
                prop_assert_eq!(catalog.resolve_file_reference(id), entry.file_reference.as_str());
                prop_assert_eq!(catalog.resolve_name(id), entry.display_name.as_str());
            }
            if let Some(key) = &entry.semantic_key {
                prop_assert_eq!(
                    catalog.resolve_file_reference_by_semantic_key(key),
                    entry.file_reference.as_str()
                );
            }
        }
    }

    /// A JSON round trip answers every lookup identically
    #[test]
    fn json_round_trip_preserves_answers(entries in arb_unique_entries(), probe in arb_identifier()) {
        let catalog = Catalog::from_entries(entries);
        let reloaded = Catalog::from_json(&catalog.to_json().unwrap()).unwrap();

        prop_assert_eq!(reloaded.entries(), catalog.entries());

        let mut keys: Vec<String> = vec![probe];
        for entry in catalog.entries() {
            keys.push(entry.file_reference.clone());
            keys.extend(entry.identifier.clone());
            keys.extend(entry.semantic_key.clone());
        }
        for key in &keys {
            prop_assert_eq!(all_answers(&reloaded, key), all_answers(&catalog, key));
        }
    }
}

// ============================================================================
// Fallback Chain Properties
// ============================================================================

fn arb_name() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z][A-Za-z ]{0,12}",
    ])
}

proptest! {
    /// The chosen name is the first non-blank candidate in priority order
    #[test]
    fn fallback_picks_first_usable_source(
        localized in arb_name(),
        item_name in arb_name(),
        object_name in arb_name(),
        file_reference in "[a-z_]{0,10}",
    ) {
        let sources = NameSources {
            localized: localized.as_deref(),
            item_name: item_name.as_deref(),
            object_name: object_name.as_deref(),
            file_reference: &file_reference,
        };
        let (name, source) = sources.resolve();

        let usable = |candidate: &Option<String>| {
            candidate.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
        };
        let expected = usable(&localized)
            .map(|n| (n, NameSource::Localized))
            .or_else(|| usable(&item_name).map(|n| (n, NameSource::ItemName)))
            .or_else(|| usable(&object_name).map(|n| (n, NameSource::ObjectName)))
            .or_else(|| usable(&Some(file_reference.clone())).map(|n| (n, NameSource::FileReference)))
            .unwrap_or_else(|| (UNKNOWN.to_string(), NameSource::Sentinel));

        prop_assert_eq!((name, source), expected);
    }

    /// A non-blank localized name always wins
    #[test]
    fn localized_name_always_wins(
        localized in "[A-Za-z]{1,12}",
        item_name in arb_name(),
        object_name in arb_name(),
    ) {
        let sources = NameSources {
            localized: Some(localized.as_str()),
            item_name: item_name.as_deref(),
            object_name: object_name.as_deref(),
            file_reference: "asset",
        };
        prop_assert_eq!(sources.resolve(), (localized.clone(), NameSource::Localized));
    }
}

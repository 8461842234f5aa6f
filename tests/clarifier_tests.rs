//! Clarification integration tests.
//!
//! Covers the duplicate-row scenario, full row-and-column clarification,
//! label and description-path passthrough, and concept preservation.

use fca_core::{
    Analysis, AnalysisConfig, Clarifier, ClarifierConfig, ConceptStore, IndexSet, RelationTable,
    Strategy, TableBuilder,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn duplicate_rows_table() -> RelationTable {
    RelationTable::from_matrix(vec![
        vec![1.0, 1.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0, 1.0],
        vec![0.0, 1.0, 1.0, 1.0],
        vec![0.0, 1.0, 1.0, 1.0],
        vec![1.0, 0.0, 0.0, 0.0],
    ])
    .unwrap()
}

fn set(v: &[usize]) -> IndexSet {
    v.iter().copied().collect()
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn test_duplicate_rows_collapse() {
    let result = Clarifier::default().clarify_rows(&duplicate_rows_table());
    assert_eq!(
        result.table.to_matrix(),
        vec![
            vec![1.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0, 1.0],
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ]
    );
    assert_eq!(result.removed_rows, set(&[3]));
    assert_eq!(result.row_classes[2], set(&[2, 3]));
    assert!(result.removed_columns.is_empty());
}

#[test]
fn test_full_clarify_also_merges_identical_columns() {
    let result = Clarifier::default().clarify(&duplicate_rows_table());
    assert_eq!(
        result.table.to_matrix(),
        vec![
            vec![1.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ]
    );
    assert_eq!(result.removed_columns, set(&[3]));
    assert_eq!(result.table.attribute_names(), ["y1", "y2", "y3"]);
    assert_eq!(result.table.object_names(), ["x1", "x2", "x3", "x5"]);
}

#[test]
fn test_clarify_columns_only() {
    let result = Clarifier::default().clarify_columns(&duplicate_rows_table());
    assert_eq!(result.table.object_count(), 5);
    assert_eq!(result.table.attribute_count(), 3);
    assert_eq!(result.column_classes[2], set(&[2, 3]));
}

#[test]
fn test_clarify_is_idempotent() {
    let once = duplicate_rows_table().clarify();
    assert_eq!(once.clarify(), once);
}

#[test]
fn test_clarify_is_idempotent_with_cells_inside_tolerance() {
    let table = RelationTable::from_matrix(vec![vec![0.0, 0.0], vec![1e-7, -1e-7]]).unwrap();
    let once = table.clarify();
    assert_eq!(once.to_matrix(), vec![vec![0.0]]);
    assert_eq!(once.attribute_names(), &["y1"]);
    assert_eq!(once.clarify(), once);
}

#[test]
fn test_exact_epsilon_separates_close_values() {
    let table = RelationTable::from_matrix(vec![vec![0.5, 0.5], vec![0.50001, 0.5]]).unwrap();
    let exact = Clarifier::new(ClarifierConfig { epsilon: 0.0 }).unwrap();
    assert_eq!(exact.clarify(&table).table.object_count(), 2);
    let loose = Clarifier::new(ClarifierConfig { epsilon: 1e-3 }).unwrap();
    assert_eq!(loose.clarify(&table).table.object_count(), 1);
}

#[test]
fn test_description_paths_pass_through() {
    let table = TableBuilder::from_matrix(vec![vec![1.0, 1.0], vec![1.0, 1.0]])
        .description_paths(vec![vec![0, 1], vec![2]])
        .build()
        .unwrap();
    let clarified = table.clarify();
    assert_eq!(clarified.object_count(), 1);
    assert_eq!(clarified.description_paths(), table.description_paths());
}

// ── Concept preservation ─────────────────────────────────────────────────────

#[test]
fn test_clarification_preserves_concept_count() {
    let table = duplicate_rows_table();
    let mut original = ConceptStore::new(table.clone());
    original.generate(&Strategy::InClose, 0.0).unwrap();

    let config = AnalysisConfig {
        clarify: true,
        ..AnalysisConfig::default()
    };
    let outcome = Analysis::run(&table, &config).unwrap();
    assert_eq!(outcome.store.formal_concepts().len(), original.formal_concepts().len());

    let clarification = outcome.clarification.unwrap();
    for concept in outcome.store.formal_concepts() {
        let extent = clarification.expand_extent(concept.extent()).unwrap();
        let intent = clarification.expand_intent(concept.intent()).unwrap();
        let matching = original
            .concept_with_extent(&extent, fca_core::ConceptKind::Formal)
            .unwrap();
        assert_eq!(matching.intent(), &intent);
    }
}

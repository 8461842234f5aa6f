//! # Concept lattice of a small animal context
//!
//! Builds a named table, enumerates its formal concepts with In-Close, and
//! cross-checks the result against the other three strategies. Each concept
//! is printed with object and attribute names instead of indices.
//!
//! ```bash
//! cargo run --example lattice
//! ```

use fca_core::{
    Concept, ConceptKind, ConceptStore, FcaError, RelationTable, Strategy, TableBuilder,
};

// ── Context ──────────────────────────────────────────────────────────────────

fn animals() -> Result<RelationTable, FcaError> {
    TableBuilder::from_matrix(vec![
        //    flies  swims  barks  lays_eggs  mammal
        vec![1.0, 1.0, 0.0, 1.0, 0.0], // duck
        vec![0.0, 1.0, 1.0, 0.0, 1.0], // dog
        vec![1.0, 0.0, 0.0, 1.0, 0.0], // sparrow
        vec![0.0, 1.0, 0.0, 1.0, 0.0], // penguin
        vec![0.0, 1.0, 0.0, 0.0, 1.0], // otter
        vec![1.0, 0.0, 0.0, 0.0, 1.0], // bat
    ])
    .object_names(["duck", "dog", "sparrow", "penguin", "otter", "bat"])
    .attribute_names(["flies", "swims", "barks", "lays_eggs", "mammal"])
    .build()
}

fn describe(table: &RelationTable, concept: &Concept) -> String {
    let objects: Vec<&str> = concept
        .extent()
        .iter()
        .map(|g| table.object_names()[g].as_str())
        .collect();
    let attributes: Vec<&str> = concept
        .intent()
        .iter()
        .map(|m| table.attribute_names()[m].as_str())
        .collect();
    let marker = if concept.tag().is_some() { "  (top)" } else { "" };
    format!("{{{}}} × {{{}}}{marker}", objects.join(", "), attributes.join(", "))
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> Result<(), FcaError> {
    let table = animals()?;
    println!(
        "Context: {} objects × {} attributes\n",
        table.object_count(),
        table.attribute_count()
    );

    let mut store = ConceptStore::new(table);
    store.generate(&Strategy::InClose, 0.0)?;

    let mut concepts = store.formal_concepts().to_vec();
    concepts.sort_by(|a, b| b.extent().len().cmp(&a.extent().len()).then(a.extent().cmp(b.extent())));

    println!("In-Close found {} formal concepts:", concepts.len());
    for concept in &concepts {
        println!("  {}", describe(store.table(), concept));
    }

    println!("\nCross-check:");
    for strategy in Strategy::ALL {
        let mut other = ConceptStore::new(store.table().clone());
        other.generate(&strategy, 0.0)?;
        let agrees = other.formal_concepts().len() == concepts.len()
            && concepts
                .iter()
                .all(|c| other.has_extent(c.extent(), ConceptKind::Formal));
        println!(
            "  {:<24} formal={:<3} semi={:<3} {}",
            strategy.as_str(),
            other.formal_concepts().len(),
            other.concepts_of(ConceptKind::Semi).len(),
            if agrees { "agrees" } else { "DISAGREES" }
        );
    }
    Ok(())
}

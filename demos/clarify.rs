//! # Clarification walkthrough
//!
//! Shows how duplicate rows and columns are collapsed, what the partition
//! views report, and that the clarified table has the same concepts once
//! they are expanded back to the original indices.
//!
//! ```bash
//! cargo run --example clarify
//! ```

use fca_core::{Analysis, AnalysisConfig, Clarifier, FcaError, RelationTable};

fn print_table(title: &str, table: &RelationTable) {
    println!("{title}");
    println!("      {}", table.header().join("  "));
    for (name, row) in table.object_names().iter().zip(table.rows()) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>2}")).collect();
        println!("  {name:<3} {}", cells.join("  "));
    }
    println!();
}

fn main() -> Result<(), FcaError> {
    let table = RelationTable::from_matrix(vec![
        vec![1.0, 1.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0, 1.0],
        vec![0.0, 1.0, 1.0, 1.0],
        vec![0.0, 1.0, 1.0, 1.0],
        vec![1.0, 0.0, 0.0, 0.0],
    ])?;
    print_table("Original", &table);

    let clarifier = Clarifier::default();
    let rows_only = clarifier.clarify_rows(&table);
    print_table("Rows clarified", &rows_only.table);

    let full = clarifier.clarify(&table);
    print_table("Rows and columns clarified", &full.table);
    println!("removed rows:    {}", full.removed_rows);
    println!("removed columns: {}", full.removed_columns);
    println!("row classes:     {:?}", full.row_classes);
    println!("column classes:  {:?}\n", full.column_classes);

    let config = AnalysisConfig {
        clarify: true,
        ..AnalysisConfig::default()
    };
    let outcome = Analysis::run(&table, &config)?;
    let Some(clarification) = outcome.clarification.as_ref() else {
        return Ok(());
    };

    println!("Concepts of the clarified table, expanded:");
    for concept in outcome.store.formal_concepts() {
        println!(
            "  {} × {}   →   {} × {}",
            concept.extent(),
            concept.intent(),
            clarification.expand_extent(concept.extent())?,
            clarification.expand_intent(concept.intent())?,
        );
    }
    Ok(())
}

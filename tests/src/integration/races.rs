//! # Index Write Races
//!
//! Index read-modify-write has no compare-and-swap by default: two writers
//! can both read the same index version, mutate independently, and publish
//! divergent successors. The resolution policy picks a survivor; the other
//! mutation is lost. These flows demonstrate the race as documented
//! behavior and exercise the opt-in checked write that detects it.

#[cfg(test)]
mod tests {
    use crate::init_tracing;
    use crate::support::{chain_table, record};
    use std::sync::Arc;
    use vl_01_bundle_store::InMemoryLedger;
    use vl_02_data_table::{IndexedTable, TableError};

    #[tokio::test]
    async fn test_lost_update_race_under_last_writer_wins() {
        init_tracing();
        let ledger = Arc::new(InMemoryLedger::new());
        let writer_one = chain_table(&ledger);
        let writer_two = chain_table(&ledger);

        // Common ancestor: one entry, one index version.
        let base = writer_one.store(&record("base", 0), None).await.unwrap();

        // Both writers read the same index snapshot...
        let (snapshot_one, _) = writer_one.get_index().await.unwrap().unwrap();
        let (snapshot_two, _) = writer_two.get_index().await.unwrap().unwrap();
        assert_eq!(snapshot_one, snapshot_two);

        // ...and each publishes its own successor.
        let mut first = snapshot_one;
        first.bundles.push("WRITER9ONE9ENTRY".to_string());
        writer_one.set_index(&first).await.unwrap();

        let mut second = snapshot_two;
        second.bundles.push("WRITER9TWO9ENTRY".to_string());
        writer_two.set_index(&second).await.unwrap();

        // The newest valid version wins; writer one's mutation is lost.
        let (surviving, _) = writer_one.get_index().await.unwrap().unwrap();
        assert!(surviving.bundles.contains(&base.to_string()));
        assert!(surviving.bundles.contains(&"WRITER9TWO9ENTRY".to_string()));
        assert!(!surviving.bundles.contains(&"WRITER9ONE9ENTRY".to_string()));
    }

    #[tokio::test]
    async fn test_checked_write_detects_the_interleaving() {
        init_tracing();
        let ledger = Arc::new(InMemoryLedger::new());
        let writer_one = chain_table(&ledger);
        let writer_two = chain_table(&ledger);

        let base = writer_one.store(&record("base", 0), None).await.unwrap();

        // Both writers snapshot the same version.
        let (snapshot_one, source_one) = writer_one.get_index().await.unwrap().unwrap();
        let (snapshot_two, source_two) = writer_two.get_index().await.unwrap().unwrap();

        // Writer one publishes first, unchecked.
        let mut first = snapshot_one;
        first.bundles.push("WRITER9ONE9ENTRY".to_string());
        writer_one
            .set_index_checked(&first, Some(&source_one))
            .await
            .unwrap();

        // Writer two's checked publish against the stale snapshot fails
        // instead of silently clobbering writer one.
        let mut second = snapshot_two;
        second.bundles.push("WRITER9TWO9ENTRY".to_string());
        let result = writer_two.set_index_checked(&second, Some(&source_two)).await;

        assert!(matches!(result, Err(TableError::IndexConflict { .. })));

        // Writer one's mutation survives.
        let (surviving, _) = writer_one.get_index().await.unwrap().unwrap();
        assert!(surviving.bundles.contains(&base.to_string()));
        assert!(surviving.bundles.contains(&"WRITER9ONE9ENTRY".to_string()));
        assert!(!surviving.bundles.contains(&"WRITER9TWO9ENTRY".to_string()));
    }

    #[tokio::test]
    async fn test_conflict_error_reports_expected_and_found() {
        init_tracing();
        let ledger = Arc::new(InMemoryLedger::new());
        let writer_one = chain_table(&ledger);
        let writer_two = chain_table(&ledger);

        writer_one.store(&record("base", 0), None).await.unwrap();
        let (snapshot, stale_source) = writer_two.get_index().await.unwrap().unwrap();

        writer_one.store(&record("interloper", 1), None).await.unwrap();
        let (_, current_source) = writer_one.get_index().await.unwrap().unwrap();

        let result = writer_two.set_index_checked(&snapshot, Some(&stale_source)).await;

        match result {
            Err(TableError::IndexConflict { expected, found }) => {
                assert_eq!(expected, Some(stale_source.to_string()));
                assert_eq!(found, Some(current_source.to_string()));
            }
            other => panic!("expected IndexConflict, got {other:?}"),
        }
    }
}

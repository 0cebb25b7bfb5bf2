//! # Index Resolution Under Divergent Versions
//!
//! The ledger never overwrites, so several confirmed index versions can
//! coexist at one address. These flows stage that situation and check which
//! version readers end up trusting.

#[cfg(test)]
mod tests {
    use crate::init_tracing;
    use crate::support::{chain_table, chain_table_with_key, record, FORGED_KEY};
    use std::sync::Arc;
    use vl_01_bundle_store::InMemoryLedger;
    use vl_02_data_table::{ChainIndex, IndexedTable};

    #[tokio::test]
    async fn test_reverse_scan_skips_newer_invalid_candidates() {
        init_tracing();
        let ledger = Arc::new(InMemoryLedger::new());
        let table = chain_table(&ledger);
        let forger = chain_table_with_key(&ledger, FORGED_KEY);

        // Oldest candidate: valid.
        let id = table.store(&record("genuine", 1), None).await.unwrap();
        let (_, valid_source) = table.get_index().await.unwrap().unwrap();

        // Two newer candidates with signatures the verifier rejects.
        forger
            .set_index(&ChainIndex {
                bundles: vec!["FORGED9ONE".to_string()],
                last_idx: None,
            })
            .await
            .unwrap();
        forger
            .set_index(&ChainIndex {
                bundles: vec!["FORGED9TWO".to_string()],
                last_idx: None,
            })
            .await
            .unwrap();

        // The reverse scan walks newest-first but lands on the oldest,
        // valid version.
        let (index, source) = table.get_index().await.unwrap().unwrap();
        assert_eq!(source, valid_source);
        assert_eq!(index.bundles, vec![id.to_string()]);

        assert_eq!(table.retrieve_all().await.unwrap(), vec![record("genuine", 1)]);
    }

    #[tokio::test]
    async fn test_no_valid_candidate_means_empty_table() {
        init_tracing();
        let ledger = Arc::new(InMemoryLedger::new());
        let table = chain_table(&ledger);
        let forger = chain_table_with_key(&ledger, FORGED_KEY);

        forger
            .set_index(&ChainIndex {
                bundles: vec!["FORGED9ONLY".to_string()],
                last_idx: None,
            })
            .await
            .unwrap();

        // Invalid-only candidates resolve to "no index" — valid empty
        // state, not an error.
        assert!(table.get_index().await.unwrap().is_none());
        assert!(table.retrieve_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_newest_valid_wins_over_older_valid() {
        init_tracing();
        let ledger = Arc::new(InMemoryLedger::new());
        let table = chain_table(&ledger);

        table.store(&record("first", 1), None).await.unwrap();
        table.store(&record("second", 2), None).await.unwrap();

        // Both index versions are valid; the newer one is the truth.
        let (index, _) = table.get_index().await.unwrap().unwrap();
        assert_eq!(index.bundles.len(), 2);
    }

    #[tokio::test]
    async fn test_stale_index_envelope_is_rejected_by_replay_window() {
        init_tracing();
        let ledger = Arc::new(InMemoryLedger::new());
        let table = chain_table(&ledger);

        table.store(&record("fresh", 1), None).await.unwrap();

        // Replaying the captured index bytes later than the replay window
        // allows must not resurrect it: age the ledger clock past the
        // window and re-submit the same signed index document.
        let (index, source) = table.get_index().await.unwrap().unwrap();
        let capture_time = ledger.now_ms();
        ledger.advance_clock(10 * 60 * 1000);

        // A forger cannot re-sign, so it replays the stale envelope by
        // writing an index wrapped at the original, now-expired timestamp.
        let replayed = ChainIndex {
            bundles: index.bundles.clone(),
            last_idx: Some(source.to_string()),
        };
        // Wrap with a clock pinned to the stale original time.
        struct PinnedClock(shared_types::Timestamp);
        impl vl_01_bundle_store::TimeSource for PinnedClock {
            fn now_ms(&self) -> shared_types::Timestamp {
                self.0
            }
        }
        let stale_wrap = vl_02_data_table::codec::wrap(
            &replayed,
            &vl_02_data_table::HmacSigner::new(crate::support::SHARED_KEY),
            &PinnedClock(capture_time),
        )
        .unwrap();
        let json = serde_json::to_string(&stale_wrap).unwrap();
        use vl_01_bundle_store::BundleStoreApi;
        let store = vl_01_bundle_store::BundleStoreService::new(ledger.clone());
        store
            .save(
                &shared_types::Address::new(crate::support::INDEX_ADDRESS).unwrap(),
                &json,
                &shared_types::Tag::new(vl_02_data_table::INDEX_TAG).unwrap(),
            )
            .await
            .unwrap();

        // The replayed candidate is newest by attachment time but fails the
        // window check; resolution falls back to the original version.
        let (_, picked_source) = table.get_index().await.unwrap().unwrap();
        assert_eq!(picked_source, source);
    }
}

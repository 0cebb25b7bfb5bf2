//! # Shared Test Fixtures
//!
//! Builders for fully wired tables over one shared in-memory ledger, so
//! flows can stage multiple writers against the same addresses.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp};
use std::sync::Arc;
use vl_01_bundle_store::{BundleStoreService, InMemoryLedger, TimeSource};
use vl_02_data_table::{
    ChainDataTable, ChainTableConfig, HmacSigner, HmacVerifier, InMemoryConfigProvider,
    NewestValidResolution, SignedDataTable, SignedTableConfig, TableConfigRecord,
};

/// Shared signing secret for legitimately wired tables.
pub const SHARED_KEY: &[u8] = b"vl-integration-shared-secret";

/// A secret no verifier in the tests trusts.
pub const FORGED_KEY: &[u8] = b"vl-integration-forged-secret";

pub const DATA_ADDRESS: &str = "FLOW9DATA9ADDRESS";
pub const INDEX_ADDRESS: &str = "FLOW9INDEX9ADDRESS";
pub const SIGNED_TABLE: &str = "accounts";

/// The payload type exercised by the flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub balance: u64,
}

pub fn record(name: &str, balance: u64) -> Record {
    Record {
        name: name.to_string(),
        balance,
    }
}

/// Clock that follows the shared ledger's confirmation clock, keeping
/// envelope timestamps inside the replay window.
pub struct LedgerClock(pub Arc<InMemoryLedger>);

impl TimeSource for LedgerClock {
    fn now_ms(&self) -> Timestamp {
        self.0.now_ms()
    }
}

pub type TestChainTable = ChainDataTable<
    Record,
    BundleStoreService<Arc<InMemoryLedger>>,
    HmacSigner,
    HmacVerifier,
    NewestValidResolution,
    LedgerClock,
>;

pub type TestSignedTable = SignedDataTable<
    Record,
    BundleStoreService<Arc<InMemoryLedger>>,
    HmacSigner,
    HmacVerifier,
    Arc<InMemoryConfigProvider>,
    LedgerClock,
>;

/// A chain table wired with the shared key over the given ledger.
///
/// Multiple calls against one ledger model independent writers on the same
/// logical table.
pub fn chain_table(ledger: &Arc<InMemoryLedger>) -> TestChainTable {
    chain_table_with_key(ledger, SHARED_KEY)
}

/// A chain table whose envelopes are signed with `key` but verified against
/// the shared key; pass [`FORGED_KEY`] to stage invalid index versions.
pub fn chain_table_with_key(ledger: &Arc<InMemoryLedger>, key: &[u8]) -> TestChainTable {
    ChainDataTable::new(
        BundleStoreService::new(ledger.clone()),
        HmacSigner::new(key),
        HmacVerifier::new(SHARED_KEY),
        NewestValidResolution,
        LedgerClock(ledger.clone()),
        ChainTableConfig::new(
            Address::new(DATA_ADDRESS).unwrap(),
            Address::new(INDEX_ADDRESS).unwrap(),
        ),
    )
}

/// A config provider pre-seeded for [`SIGNED_TABLE`].
pub fn seeded_provider() -> Arc<InMemoryConfigProvider> {
    let provider = Arc::new(InMemoryConfigProvider::new());
    provider.seed(
        SIGNED_TABLE,
        TableConfigRecord {
            data_address: Some("SIGNED9DATA9ADDRESS".to_string()),
            index_address: Some("SIGNED9INDEX9ADDRESS".to_string()),
            index_bundle_hash: None,
        },
    );
    provider
}

/// A signed table wired with the shared key over the given collaborators.
pub fn signed_table(
    ledger: &Arc<InMemoryLedger>,
    provider: &Arc<InMemoryConfigProvider>,
) -> TestSignedTable {
    SignedDataTable::new(
        BundleStoreService::new(ledger.clone()),
        HmacSigner::new(SHARED_KEY),
        HmacVerifier::new(SHARED_KEY),
        provider.clone(),
        LedgerClock(ledger.clone()),
        SignedTableConfig::new(SIGNED_TABLE),
    )
}

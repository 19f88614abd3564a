//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use cradle_ledger::Ledger;
use cradle_ledger_core::{Bytes32, ChildId, NftId, Nonce, StorageLink, WrappedKey};
use cradle_ledger_store::MemoryStore;
use rand::rngs::OsRng;
use rand::RngCore;

/// A test fixture: an initialized ledger over an in-memory store.
pub struct TestLedger {
    pub ledger: Ledger<MemoryStore>,
    pub nonce_seed: [u8; 32],
}

impl TestLedger {
    /// Create a new fixture with a random genesis nonce.
    pub async fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self::with_seed(seed).await
    }

    /// Create with a deterministic genesis nonce from seed.
    pub async fn with_seed(seed: [u8; 32]) -> Self {
        let ledger = Ledger::init(MemoryStore::new(), Nonce::from_bytes(seed))
            .await
            .expect("fresh memory store initializes");
        Self {
            ledger,
            nonce_seed: seed,
        }
    }

    /// Current round, panicking on store failure.
    pub async fn round(&self) -> u64 {
        self.ledger.round().await.expect("round cell readable")
    }

    /// Generate an NFT id for a fixed sample guardian and issue a
    /// guardian credential under it. Advances the round twice.
    pub async fn issue_sample_credential(&self) -> NftId {
        let nft_id = self
            .ledger
            .generate_nft_id(
                &text("Ada"),
                &text("Lovelace"),
                &text("ada@example.org"),
            )
            .await
            .expect("nft id generation");
        self.ledger
            .issue_role_credential(nft_id, text("guardian"), text("2030-01-01"))
            .await
            .expect("credential issuance");
        nft_id
    }

    /// Derive a child id for a fixed sample child and bind a patterned
    /// record under it. Advances the round twice.
    pub async fn bind_sample_record(&self) -> ChildId {
        let child_id = self
            .ledger
            .derive_child_id(&text("Baby"), &text("2024-01-01"), &text("female"))
            .await
            .expect("child id derivation");
        self.ledger
            .bind_record(child_id, patterned_link(0xA5), patterned_key(0x5A))
            .await
            .expect("record binding");
        child_id
    }
}

/// Build a text operand, panicking if the text exceeds the field width.
pub fn text(s: &str) -> Bytes32 {
    Bytes32::from_text(s).expect("fixture text fits in 32 bytes")
}

/// A storage link with every byte set to `byte`.
pub fn patterned_link(byte: u8) -> StorageLink {
    StorageLink::from_bytes([byte; 128])
}

/// A wrapped key with every byte set to `byte`.
pub fn patterned_key(byte: u8) -> WrappedKey {
    WrappedKey::from_bytes([byte; 128])
}

/// Create multiple fixtures with distinct deterministic seeds.
pub async fn seeded_ledgers(count: usize) -> Vec<TestLedger> {
    let mut ledgers = Vec::with_capacity(count);
    for i in 0..count {
        let mut seed = [0u8; 32];
        seed[0] = i as u8;
        ledgers.push(TestLedger::with_seed(seed).await);
    }
    ledgers
}

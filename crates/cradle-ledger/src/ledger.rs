//! The Ledger: unified API for the Cradle registry.
//!
//! The Ledger brings together the hash engine and the state store into a
//! cohesive interface: eight state-transition operations over committed
//! cells and maps, plus genesis/open lifecycle and snapshot export.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use cradle_ledger_core::{
    hash, Bytes32, Cell, ChildId, EncryptedRecord, LedgerSnapshot, MapId, NftId, Nonce,
    RoleCredential, StorageLink, WrappedKey,
};
use cradle_ledger_store::{StateStore, WriteBatch};

use crate::error::{LedgerError, Result};
use crate::op::{OpOutput, Operation};

/// The main Ledger struct.
///
/// One logical sequential state machine over a shared store:
/// - Creation operations advance the round counter by exactly 1
/// - Reads run lock-free against committed state
/// - Revocations remove entries without touching the round
///
/// Mutating operations serialize on an internal write lock, so at most
/// one is in flight; child-id derivation reads the exact (nonce, round)
/// pair that existed immediately before its own increment.
pub struct Ledger<S: StateStore> {
    /// The storage backend.
    store: Arc<S>,
    /// Serialization point for mutating operations.
    write_lock: Mutex<()>,
}

impl<S: StateStore> std::fmt::Debug for Ledger<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger").finish_non_exhaustive()
    }
}

impl<S: StateStore> Ledger<S> {
    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Initialize a fresh ledger in the given store.
    ///
    /// Writes genesis state in one batch: round 0, the caller-supplied
    /// nonce seed, a zero reserved slot, and empty maps. Fails with
    /// [`LedgerError::AlreadyInitialized`] if the store already holds
    /// ledger state.
    pub async fn init(store: S, nonce_seed: Nonce) -> Result<Self> {
        if store.cell_get(Cell::Round).await?.is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }

        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, 0u64.to_le_bytes().to_vec());
        batch.set_cell(Cell::Nonce, nonce_seed.as_bytes().to_vec());
        batch.set_cell(Cell::Reserved, 0u64.to_le_bytes().to_vec());
        store.apply(batch).await?;

        tracing::debug!("initialized ledger at round 0");

        Ok(Self {
            store: Arc::new(store),
            write_lock: Mutex::new(()),
        })
    }

    /// Open a ledger over a store that already holds genesis state.
    ///
    /// Fails with [`LedgerError::NotInitialized`] if the store is empty.
    pub async fn open(store: S) -> Result<Self> {
        let ledger = Self {
            store: Arc::new(store),
            write_lock: Mutex::new(()),
        };

        // Both cells must be present and well-formed before any
        // operation is accepted.
        let round = ledger.round().await?;
        ledger.nonce().await?;

        tracing::debug!("opened ledger at round {}", round);
        Ok(ledger)
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Derive the NFT id for a parent identity and meter the creation.
    ///
    /// The id is a pure function of the three fields; equal inputs give
    /// the same id on any ledger instance. The round counter advances as
    /// with every creation operation.
    pub async fn generate_nft_id(
        &self,
        firstname: &Bytes32,
        lastname: &Bytes32,
        email: &Bytes32,
    ) -> Result<NftId> {
        let _guard = self.write_lock.lock().await;

        let round = self.round().await?;
        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, (round + 1).to_le_bytes().to_vec());
        self.store.apply(batch).await?;

        Ok(hash::derive_nft_id(firstname, lastname, email))
    }

    /// Derive a child id, evolving the ledger nonce.
    ///
    /// Unlike [`Ledger::generate_nft_id`] the result depends on internal
    /// state: the nonce evolves under this operation's own round value,
    /// and the returned id commits to the evolved nonce. Repeat calls
    /// with identical fields therefore yield distinct, unlinkable ids.
    pub async fn derive_child_id(
        &self,
        name: &Bytes32,
        birth_date: &Bytes32,
        gender: &Bytes32,
    ) -> Result<ChildId> {
        let _guard = self.write_lock.lock().await;

        let round = self.round().await? + 1;
        let nonce = hash::evolve_nonce(&self.nonce().await?, round);

        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, round.to_le_bytes().to_vec());
        batch.set_cell(Cell::Nonce, nonce.as_bytes().to_vec());
        self.store.apply(batch).await?;

        Ok(hash::derive_child_id(name, birth_date, gender, &nonce))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Credential Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Bind a role credential to an NFT id.
    ///
    /// Overwrite semantics: issuing against an existing id replaces the
    /// prior credential (last writer wins).
    pub async fn issue_role_credential(
        &self,
        nft_id: NftId,
        role: Bytes32,
        valid_until: Bytes32,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let round = self.round().await?;
        let credential = RoleCredential::new(role, valid_until);

        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, (round + 1).to_le_bytes().to_vec());
        batch.map_insert(
            MapId::Credentials,
            *nft_id.as_bytes(),
            credential.to_bytes().to_vec(),
        );
        self.store.apply(batch).await?;

        Ok(())
    }

    /// Read the role credential bound to an NFT id.
    ///
    /// Absence is the recoverable [`LedgerError::CredentialNotFound`],
    /// not a fault. No state changes.
    pub async fn read_role_credential(&self, nft_id: NftId) -> Result<RoleCredential> {
        let bytes = self
            .store
            .map_get(MapId::Credentials, nft_id.as_bytes())
            .await?
            .ok_or(LedgerError::CredentialNotFound(nft_id))?;

        RoleCredential::from_bytes(&bytes).map_err(|e| LedgerError::Corrupt(e.to_string()))
    }

    /// Remove the role credential bound to an NFT id.
    ///
    /// Idempotent: revoking an absent credential succeeds, and the key
    /// is fully removed rather than tombstoned. The round counter does
    /// not advance.
    pub async fn revoke_role_credential(&self, nft_id: NftId) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut batch = WriteBatch::new();
        batch.map_remove(MapId::Credentials, *nft_id.as_bytes());
        self.store.apply(batch).await?;

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Bind an encrypted record pointer to a child id.
    ///
    /// The ledger stores only the content address and the wrapped key;
    /// blob content and key wrapping live outside. Overwrite semantics
    /// as with credential issuance.
    pub async fn bind_record(
        &self,
        child_id: ChildId,
        storage_link: StorageLink,
        wrapped_key: WrappedKey,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let round = self.round().await?;
        let record = EncryptedRecord::new(child_id, storage_link, wrapped_key);

        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, (round + 1).to_le_bytes().to_vec());
        batch.map_insert(
            MapId::Records,
            *child_id.as_bytes(),
            record.to_bytes().to_vec(),
        );
        self.store.apply(batch).await?;

        Ok(())
    }

    /// Read the encrypted record bound to a child id.
    ///
    /// Absence is the recoverable [`LedgerError::RecordNotFound`].
    /// No state changes.
    pub async fn read_record(&self, child_id: ChildId) -> Result<EncryptedRecord> {
        let bytes = self
            .store
            .map_get(MapId::Records, child_id.as_bytes())
            .await?
            .ok_or(LedgerError::RecordNotFound(child_id))?;

        EncryptedRecord::from_bytes(&bytes).map_err(|e| LedgerError::Corrupt(e.to_string()))
    }

    /// Remove the record bound to a child id.
    ///
    /// Idempotent; round unchanged.
    pub async fn revoke_record(&self, child_id: ChildId) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut batch = WriteBatch::new();
        batch.map_remove(MapId::Records, *child_id.as_bytes());
        self.store.apply(batch).await?;

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operation Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Execute one operation given as data.
    ///
    /// Semantically identical to calling the corresponding method; the
    /// enum form exists for callers that queue, replay, or log operations.
    pub async fn execute(&self, op: Operation) -> Result<OpOutput> {
        tracing::debug!("executing {}", op.name());

        match op {
            Operation::GenerateNftId {
                firstname,
                lastname,
                email,
            } => Ok(OpOutput::NftId(
                self.generate_nft_id(&firstname, &lastname, &email).await?,
            )),
            Operation::IssueRoleCredential {
                nft_id,
                role,
                valid_until,
            } => {
                self.issue_role_credential(nft_id, role, valid_until)
                    .await?;
                Ok(OpOutput::None)
            }
            Operation::ReadRoleCredential { nft_id } => Ok(OpOutput::Credential(
                self.read_role_credential(nft_id).await?,
            )),
            Operation::DeriveChildId {
                name,
                birth_date,
                gender,
            } => Ok(OpOutput::ChildId(
                self.derive_child_id(&name, &birth_date, &gender).await?,
            )),
            Operation::BindRecord {
                child_id,
                storage_link,
                wrapped_key,
            } => {
                self.bind_record(child_id, storage_link, wrapped_key)
                    .await?;
                Ok(OpOutput::None)
            }
            Operation::ReadRecord { child_id } => {
                Ok(OpOutput::Record(self.read_record(child_id).await?))
            }
            Operation::RevokeRoleCredential { nft_id } => {
                self.revoke_role_credential(nft_id).await?;
                Ok(OpOutput::None)
            }
            Operation::RevokeRecord { child_id } => {
                self.revoke_record(child_id).await?;
                Ok(OpOutput::None)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State Inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// The current round counter.
    pub async fn round(&self) -> Result<u64> {
        let bytes = self
            .store
            .cell_get(Cell::Round)
            .await?
            .ok_or(LedgerError::NotInitialized)?;
        decode_u64(Cell::Round, &bytes)
    }

    /// Export a full copy of committed state.
    ///
    /// Takes the write lock so the copy is never torn across a mutation.
    pub async fn snapshot(&self) -> Result<LedgerSnapshot> {
        let _guard = self.write_lock.lock().await;

        let round = self.round().await?;
        let nonce = self.nonce().await?;
        let reserved_bytes = self
            .store
            .cell_get(Cell::Reserved)
            .await?
            .ok_or(LedgerError::NotInitialized)?;
        let reserved = decode_u64(Cell::Reserved, &reserved_bytes)?;

        let mut credentials = BTreeMap::new();
        for (key, value) in self.store.map_entries(MapId::Credentials).await? {
            let credential = RoleCredential::from_bytes(&value)
                .map_err(|e| LedgerError::Corrupt(e.to_string()))?;
            credentials.insert(NftId::from_bytes(key), credential);
        }

        let mut records = BTreeMap::new();
        for (key, value) in self.store.map_entries(MapId::Records).await? {
            let record = EncryptedRecord::from_bytes(&value)
                .map_err(|e| LedgerError::Corrupt(e.to_string()))?;
            records.insert(ChildId::from_bytes(key), record);
        }

        Ok(LedgerSnapshot {
            round,
            nonce,
            reserved,
            credentials,
            records,
        })
    }

    /// The committed nonce cell.
    async fn nonce(&self) -> Result<Nonce> {
        let bytes = self
            .store
            .cell_get(Cell::Nonce)
            .await?
            .ok_or(LedgerError::NotInitialized)?;

        Nonce::try_from(bytes.as_slice()).map_err(|e| LedgerError::Corrupt(e.to_string()))
    }
}

/// Decode an 8-byte little-endian cell value.
fn decode_u64(cell: Cell, bytes: &[u8]) -> Result<u64> {
    let arr: [u8; 8] = bytes.try_into().map_err(|_| {
        LedgerError::Corrupt(format!(
            "{} cell holds {} bytes, expected 8",
            cell.name(),
            bytes.len()
        ))
    })?;
    Ok(u64::from_le_bytes(arr))
}

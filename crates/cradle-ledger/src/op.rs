//! Ledger operations as plain data.
//!
//! [`Operation`] mirrors the eight [`Ledger`](crate::Ledger) methods so
//! callers can queue or replay transitions; [`Ledger::execute`]
//! dispatches a value to the matching method.
//!
//! [`Ledger::execute`]: crate::Ledger::execute

use cradle_ledger_core::{
    Bytes32, ChildId, EncryptedRecord, NftId, RoleCredential, StorageLink, WrappedKey,
};

/// One ledger operation with its typed operands.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Derive a parent NFT id from identity fields.
    GenerateNftId {
        firstname: Bytes32,
        lastname: Bytes32,
        email: Bytes32,
    },
    /// Bind a role credential to an NFT id (overwrite semantics).
    IssueRoleCredential {
        nft_id: NftId,
        role: Bytes32,
        valid_until: Bytes32,
    },
    /// Look up the credential bound to an NFT id.
    ReadRoleCredential { nft_id: NftId },
    /// Derive a child id, evolving the ledger nonce.
    DeriveChildId {
        name: Bytes32,
        birth_date: Bytes32,
        gender: Bytes32,
    },
    /// Bind an encrypted record pointer to a child id.
    BindRecord {
        child_id: ChildId,
        storage_link: StorageLink,
        wrapped_key: WrappedKey,
    },
    /// Look up the record bound to a child id.
    ReadRecord { child_id: ChildId },
    /// Remove a credential; idempotent.
    RevokeRoleCredential { nft_id: NftId },
    /// Remove a record; idempotent.
    RevokeRecord { child_id: ChildId },
}

impl Operation {
    /// Stable operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GenerateNftId { .. } => "generate_nft_id",
            Operation::IssueRoleCredential { .. } => "issue_role_credential",
            Operation::ReadRoleCredential { .. } => "read_role_credential",
            Operation::DeriveChildId { .. } => "derive_child_id",
            Operation::BindRecord { .. } => "bind_record",
            Operation::ReadRecord { .. } => "read_record",
            Operation::RevokeRoleCredential { .. } => "revoke_role_credential",
            Operation::RevokeRecord { .. } => "revoke_record",
        }
    }

    /// Whether this operation advances the round counter.
    pub fn is_creation(&self) -> bool {
        matches!(
            self,
            Operation::GenerateNftId { .. }
                | Operation::IssueRoleCredential { .. }
                | Operation::DeriveChildId { .. }
                | Operation::BindRecord { .. }
        )
    }
}

/// The result of executing an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutput {
    /// A derived NFT id.
    NftId(NftId),
    /// A derived child id.
    ChildId(ChildId),
    /// A credential read back from the ledger.
    Credential(RoleCredential),
    /// A record read back from the ledger.
    Record(EncryptedRecord),
    /// The operation produces no value.
    None,
}

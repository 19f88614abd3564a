//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cradle_ledger::Operation;
use cradle_ledger_core::{
    hash, Bytes32, ChildId, EncryptedRecord, NftId, Nonce, RoleCredential, StorageLink,
    WrappedKey,
};

/// Generate a random 32-byte operand.
pub fn bytes32() -> impl Strategy<Value = Bytes32> {
    any::<[u8; 32]>().prop_map(Bytes32::from_bytes)
}

/// Generate a text operand: 1-32 ASCII characters, zero padded into the field.
pub fn text_operand() -> impl Strategy<Value = Bytes32> {
    "[a-z][a-z0-9 .@-]{0,31}".prop_map(|s| Bytes32::from_text(&s).expect("pattern fits field"))
}

/// Generate a random nonce.
pub fn nonce() -> impl Strategy<Value = Nonce> {
    any::<[u8; 32]>().prop_map(Nonce::from_bytes)
}

/// Generate a random NftId.
pub fn nft_id() -> impl Strategy<Value = NftId> {
    any::<[u8; 32]>().prop_map(NftId::from_bytes)
}

/// Generate a random ChildId.
pub fn child_id() -> impl Strategy<Value = ChildId> {
    any::<[u8; 32]>().prop_map(ChildId::from_bytes)
}

/// Generate a random storage link.
pub fn storage_link() -> impl Strategy<Value = StorageLink> {
    any::<[u8; 128]>().prop_map(StorageLink::from_bytes)
}

/// Generate a random wrapped key.
pub fn wrapped_key() -> impl Strategy<Value = WrappedKey> {
    any::<[u8; 128]>().prop_map(WrappedKey::from_bytes)
}

/// Generate a role credential with text fields.
pub fn credential() -> impl Strategy<Value = RoleCredential> {
    (text_operand(), text_operand())
        .prop_map(|(role, valid_until)| RoleCredential::new(role, valid_until))
}

/// Generate an encrypted record envelope.
pub fn record() -> impl Strategy<Value = EncryptedRecord> {
    (child_id(), storage_link(), wrapped_key())
        .prop_map(|(id, link, key)| EncryptedRecord::new(id, link, key))
}

/// Generate any of the eight ledger operations.
pub fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (text_operand(), text_operand(), text_operand()).prop_map(
            |(firstname, lastname, email)| Operation::GenerateNftId {
                firstname,
                lastname,
                email,
            }
        ),
        (nft_id(), text_operand(), text_operand()).prop_map(|(nft_id, role, valid_until)| {
            Operation::IssueRoleCredential {
                nft_id,
                role,
                valid_until,
            }
        }),
        nft_id().prop_map(|nft_id| Operation::ReadRoleCredential { nft_id }),
        (text_operand(), text_operand(), text_operand()).prop_map(
            |(name, birth_date, gender)| Operation::DeriveChildId {
                name,
                birth_date,
                gender,
            }
        ),
        (child_id(), storage_link(), wrapped_key()).prop_map(
            |(child_id, storage_link, wrapped_key)| Operation::BindRecord {
                child_id,
                storage_link,
                wrapped_key,
            }
        ),
        child_id().prop_map(|child_id| Operation::ReadRecord { child_id }),
        nft_id().prop_map(|nft_id| Operation::RevokeRoleCredential { nft_id }),
        child_id().prop_map(|child_id| Operation::RevokeRecord { child_id }),
    ]
}

/// Parameters for deriving a child id outside a ledger.
#[derive(Debug, Clone)]
pub struct ChildIdParams {
    pub nonce_seed: [u8; 32],
    pub round: u64,
    pub name: Bytes32,
    pub birth_date: Bytes32,
    pub gender: Bytes32,
}

impl Arbitrary for ChildIdParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // nonce seed
            1u64..=1000u64,    // round
            text_operand(),
            text_operand(),
            text_operand(),
        )
            .prop_map(|(seed, round, name, birth_date, gender)| ChildIdParams {
                nonce_seed: seed,
                round,
                name,
                birth_date,
                gender,
            })
            .boxed()
    }
}

/// Derive a child id from parameters: evolve the seed under the round,
/// then commit the public fields together with the evolved nonce.
pub fn child_id_from_params(params: &ChildIdParams) -> ChildId {
    let evolved = hash::evolve_nonce(&Nonce::from_bytes(params.nonce_seed), params.round);
    hash::derive_child_id(&params.name, &params.birth_date, &params.gender, &evolved)
}

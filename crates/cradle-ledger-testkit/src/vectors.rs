//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the derivation pipeline so independent
//! implementations can check their digests against this one.

use cradle_ledger_core::{hash, Bytes32, ChildId, NftId, Nonce};
use serde::Serialize;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Genesis nonce seed.
    pub seed: [u8; 32],
    /// Identity fields: firstname, lastname, email.
    pub identity: [&'static str; 3],
    /// Child fields: name, birth date, gender.
    pub child: [&'static str; 3],
    /// Round the child derivation runs under.
    pub round: u64,
    /// Expected NFT id (hex).
    pub expected_nft_id: &'static str,
    /// Expected child id (hex).
    pub expected_child_id: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let mut unit_seed = [0u8; 32];
    unit_seed[31] = 1;

    vec![
        GoldenVector {
            name: "Unit seed, sample family",
            seed: unit_seed,
            identity: ["Ada", "Lovelace", "ada@example.org"],
            child: ["Baby", "2024-01-01", "female"],
            round: 1,
            // Digests get pinned here once a reference run is published.
            expected_nft_id: "",
            expected_child_id: "",
        },
        GoldenVector {
            name: "Zero seed, empty fields",
            seed: [0x00; 32],
            identity: ["", "", ""],
            child: ["", "", ""],
            round: 1,
            expected_nft_id: "",
            expected_child_id: "",
        },
        GoldenVector {
            name: "Saturated seed, max-width fields",
            seed: [0xFF; 32],
            identity: [
                "abcdefghijklmnopqrstuvwxyz012345",
                "ABCDEFGHIJKLMNOPQRSTUVWXYZ543210",
                "0123456789abcdefghij0123456789ab",
            ],
            child: [
                "zyxwvutsrqponmlkjihgfedcba543210",
                "9999-12-31",
                "unspecified",
            ],
            round: 1000,
            expected_nft_id: "",
            expected_child_id: "",
        },
    ]
}

fn field(s: &str) -> Bytes32 {
    Bytes32::from_text(s).expect("vector fields fit the operand width")
}

/// Compute the NFT id for a vector's identity fields.
///
/// NFT ids depend only on the fields, never on the seed or round.
pub fn nft_id_from_vector(vector: &GoldenVector) -> NftId {
    hash::derive_nft_id(
        &field(vector.identity[0]),
        &field(vector.identity[1]),
        &field(vector.identity[2]),
    )
}

/// Compute the child id for a vector: evolve the seed under the vector's
/// round, then commit the child fields together with the evolved nonce.
pub fn child_id_from_vector(vector: &GoldenVector) -> ChildId {
    let evolved = hash::evolve_nonce(&Nonce::from_bytes(vector.seed), vector.round);
    hash::derive_child_id(
        &field(vector.child[0]),
        &field(vector.child[1]),
        &field(vector.child[2]),
        &evolved,
    )
}

/// Outcome of checking one vector.
#[derive(Debug, Clone, Serialize)]
pub struct VectorReport {
    pub name: String,
    pub matches: bool,
    pub nft_id: String,
    pub child_id: String,
}

/// Verify all golden vectors produce consistent ids.
///
/// An empty expected digest reports what was computed without failing.
pub fn verify_all_vectors() -> Vec<VectorReport> {
    all_vectors()
        .iter()
        .map(|v| {
            let nft_hex = hex::encode(nft_id_from_vector(v).as_bytes());
            let child_hex = hex::encode(child_id_from_vector(v).as_bytes());

            let nft_ok = v.expected_nft_id.is_empty() || nft_hex == v.expected_nft_id;
            let child_ok = v.expected_child_id.is_empty() || child_hex == v.expected_child_id;

            VectorReport {
                name: v.name.to_string(),
                matches: nft_ok && child_ok,
                nft_id: nft_hex,
                child_id: child_hex,
            }
        })
        .collect()
}

/// Render the vector reports as pretty JSON, for pinning digests in
/// other implementations.
pub fn vectors_to_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&verify_all_vectors())
}

//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the Cradle Ledger must produce identical:
//! - domain tag blocks
//! - NFT ids
//! - nonce evolution chains
//! - child ids
//!
//! Vectors are generated from the pure derivation functions and then
//! replayed through a live ledger; `print_golden_vectors_json` emits
//! them for pinning by other implementations.

use cradle_ledger::core::hash::{self, HashDomain, TAG_BLOCK_LEN};
use cradle_ledger::store::MemoryStore;
use cradle_ledger::{Bytes32, Ledger, LedgerError, Nonce};
use serde::{Deserialize, Serialize};

/// A single golden test vector.
///
/// Child ids assume child-id derivation is the first and second creation
/// operation on the ledger (rounds 1 and 2).
#[derive(Debug, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs (hex)
    pub nonce_seed: String,   // 32 bytes
    pub identity: [String; 3], // firstname, lastname, email (32 bytes each)
    pub child: [String; 3],    // name, birth_date, gender (32 bytes each)

    // Derived outputs (hex)
    pub nft_id: String,
    pub nonce_round_1: String,
    pub child_id_round_1: String,
    pub nonce_round_2: String,
    pub child_id_round_2: String,
}

fn text(s: &str) -> Bytes32 {
    Bytes32::from_text(s).unwrap()
}

/// Generate a golden vector from inputs.
fn generate_vector(
    name: &str,
    description: &str,
    seed: [u8; 32],
    identity: [Bytes32; 3],
    child: [Bytes32; 3],
) -> GoldenVector {
    let nft_id = hash::derive_nft_id(&identity[0], &identity[1], &identity[2]);

    let nonce_1 = hash::evolve_nonce(&Nonce::from_bytes(seed), 1);
    let child_1 = hash::derive_child_id(&child[0], &child[1], &child[2], &nonce_1);

    let nonce_2 = hash::evolve_nonce(&nonce_1, 2);
    let child_2 = hash::derive_child_id(&child[0], &child[1], &child[2], &nonce_2);

    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        nonce_seed: hex::encode(seed),
        identity: identity.map(|b| b.to_hex()),
        child: child.map(|b| b.to_hex()),
        nft_id: nft_id.to_hex(),
        nonce_round_1: hex::encode(nonce_1.as_bytes()),
        child_id_round_1: child_1.to_hex(),
        nonce_round_2: hex::encode(nonce_2.as_bytes()),
        child_id_round_2: child_2.to_hex(),
    }
}

/// Generate all golden vectors.
pub fn generate_all_vectors() -> Vec<GoldenVector> {
    let mut unit_seed = [0u8; 32];
    unit_seed[31] = 1;

    vec![
        // Vector 1: the canonical walkthrough scenario
        generate_vector(
            "unit_seed_walkthrough",
            "Seed 0x00..01, ASCII fields; matches the end-to-end scenario",
            unit_seed,
            [text("Ada"), text("Lovelace"), text("ada@example.org")],
            [text("Baby"), text("2024-01-01"), text("female")],
        ),
        // Vector 2: everything zero
        generate_vector(
            "zero_seed_zero_fields",
            "All-zero seed and operands; padding-only preimages",
            [0u8; 32],
            [Bytes32::ZERO; 3],
            [Bytes32::ZERO; 3],
        ),
        // Vector 3: operands at full width
        generate_vector(
            "max_width_fields",
            "Text operands exactly 32 bytes long (no padding)",
            [0x11; 32],
            [
                text("abcdefghijklmnopqrstuvwxyz012345"),
                text("ABCDEFGHIJKLMNOPQRSTUVWXYZ543210"),
                text("0123456789abcdef0123456789abcdef"),
            ],
            [
                text("ZYXWVUTSRQPONMLKJIHGFEDCBA098765"),
                text("2024-01-01T00:00:00.000000+00:0"),
                text("nonbinary-full-width-operand-xyz"),
            ],
        ),
        // Vector 4: non-ASCII operand bytes
        generate_vector(
            "binary_operands",
            "Operands outside the ASCII range",
            [0xFF; 32],
            [
                Bytes32::from_bytes([0x80; 32]),
                Bytes32::from_bytes([0xC3; 32]),
                Bytes32::from_bytes([0xFE; 32]),
            ],
            [
                Bytes32::from_bytes([0x01; 32]),
                Bytes32::from_bytes([0x7F; 32]),
                Bytes32::from_bytes([0xAA; 32]),
            ],
        ),
        // Vector 5: same field bytes under both persistent domains
        generate_vector(
            "shared_fields_across_domains",
            "Identity and child operands identical; ids still differ by domain",
            [0x42; 32],
            [text("same"), text("same"), text("same")],
            [text("same"), text("same"), text("same")],
        ),
    ]
}

#[test]
fn test_generate_vectors() {
    let vectors = generate_all_vectors();
    assert_eq!(vectors.len(), 5);

    // Print vectors for inspection
    for v in &vectors {
        println!("=== {} ===", v.name);
        println!("  description: {}", v.description);
        println!("  nft_id: {}", v.nft_id);
        println!("  child_id_round_1: {}", v.child_id_round_1);
        println!("  child_id_round_2: {}", v.child_id_round_2);
        println!();
    }
}

#[test]
fn test_vectors_deterministic() {
    // Generate twice, must be identical
    let v1 = generate_all_vectors();
    let v2 = generate_all_vectors();

    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_eq!(a.nft_id, b.nft_id, "nft_id mismatch for {}", a.name);
        assert_eq!(
            a.nonce_round_1, b.nonce_round_1,
            "nonce_round_1 mismatch for {}",
            a.name
        );
        assert_eq!(
            a.child_id_round_1, b.child_id_round_1,
            "child_id_round_1 mismatch for {}",
            a.name
        );
        assert_eq!(
            a.child_id_round_2, b.child_id_round_2,
            "child_id_round_2 mismatch for {}",
            a.name
        );
    }
}

#[test]
fn test_vectors_internally_distinct() {
    for v in generate_all_vectors() {
        // The two derivations never collide, and neither collides with
        // the NFT id even when every operand byte matches.
        assert_ne!(v.child_id_round_1, v.child_id_round_2, "{}", v.name);
        assert_ne!(v.nft_id, v.child_id_round_1, "{}", v.name);
        assert_ne!(v.nonce_round_1, v.nonce_round_2, "{}", v.name);
        assert_ne!(v.nonce_seed, v.nonce_round_1, "{}", v.name);
    }
}

#[tokio::test]
async fn test_vectors_replay_through_ledger() {
    // A live ledger must reproduce every vector exactly: derives first
    // (rounds 1 and 2), then the round-independent NFT id.
    for v in generate_all_vectors() {
        let seed: [u8; 32] = hex::decode(&v.nonce_seed).unwrap().try_into().unwrap();
        let ledger = Ledger::init(MemoryStore::new(), Nonce::from_bytes(seed))
            .await
            .unwrap();

        let child: Vec<Bytes32> = v
            .child
            .iter()
            .map(|h| Bytes32::from_hex(h).unwrap())
            .collect();
        let identity: Vec<Bytes32> = v
            .identity
            .iter()
            .map(|h| Bytes32::from_hex(h).unwrap())
            .collect();

        let first = ledger
            .derive_child_id(&child[0], &child[1], &child[2])
            .await
            .unwrap();
        assert_eq!(first.to_hex(), v.child_id_round_1, "round 1 for {}", v.name);

        let second = ledger
            .derive_child_id(&child[0], &child[1], &child[2])
            .await
            .unwrap();
        assert_eq!(second.to_hex(), v.child_id_round_2, "round 2 for {}", v.name);

        let nft_id = ledger
            .generate_nft_id(&identity[0], &identity[1], &identity[2])
            .await
            .unwrap();
        assert_eq!(nft_id.to_hex(), v.nft_id, "nft id for {}", v.name);

        let snapshot = ledger.snapshot().await.unwrap();
        assert_eq!(snapshot.round, 3);
        assert_eq!(
            hex::encode(snapshot.nonce.as_bytes()),
            v.nonce_round_2,
            "committed nonce for {}",
            v.name
        );
    }
}

#[test]
fn print_golden_vectors_json() {
    let vectors = generate_all_vectors();

    #[derive(Serialize)]
    struct VectorFile {
        version: String,
        description: String,
        domain_nft: String,
        domain_child: String,
        domain_nonce_evolve: String,
        vectors: Vec<GoldenVector>,
    }

    let file = VectorFile {
        version: "0.1.0".to_string(),
        description: "Golden test vectors for the Cradle Ledger. Every implementation must produce identical outputs.".to_string(),
        domain_nft: String::from_utf8_lossy(HashDomain::NftId.tag()).to_string(),
        domain_child: String::from_utf8_lossy(HashDomain::ChildId.tag()).to_string(),
        domain_nonce_evolve: String::from_utf8_lossy(HashDomain::NonceEvolve.tag()).to_string(),
        vectors,
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    println!("{}", json);
}

// =============================================================================
// REJECTION TEST VECTORS
// These test that invalid inputs are properly rejected.
// =============================================================================

#[test]
fn test_reject_wrong_width_operand() {
    let err = Bytes32::try_from(&[0u8; 31][..]).unwrap_err();
    let err = LedgerError::from(err);
    assert!(
        matches!(err, LedgerError::InvalidArgument(_)),
        "short operand must map to InvalidArgument"
    );
    assert!(!err.is_not_found());

    assert!(Bytes32::try_from(&[0u8; 33][..]).is_err());
    assert!(Bytes32::try_from(&[][..]).is_err());
}

#[test]
fn test_reject_oversized_text() {
    let long = "x".repeat(33);
    let err = LedgerError::from(Bytes32::from_text(&long).unwrap_err());
    assert!(matches!(err, LedgerError::InvalidArgument(_)));
}

#[test]
fn test_reject_malformed_hex() {
    assert!(Bytes32::from_hex("zz").is_err());
    assert!(Bytes32::from_hex(&"ab".repeat(31)).is_err());
}

#[test]
fn test_domain_tags_exact_bytes() {
    // Verify domain tags are exactly as specified
    assert_eq!(HashDomain::NftId.tag(), b"baby:nft:");
    assert_eq!(HashDomain::NftId.tag().len(), 9);

    assert_eq!(HashDomain::ChildId.tag(), b"baby:child:id:");
    assert_eq!(HashDomain::ChildId.tag().len(), 14);

    // The transient tag is an opaque constant; only stability, length,
    // and distinctness are load-bearing.
    assert!(HashDomain::NonceEvolve.tag().len() >= 28);
    assert!(HashDomain::NonceEvolve.tag().len() <= TAG_BLOCK_LEN);
    assert_ne!(HashDomain::NonceEvolve.tag(), HashDomain::NftId.tag());
    assert_ne!(HashDomain::NonceEvolve.tag(), HashDomain::ChildId.tag());

    // Tag blocks are left-justified ASCII, zero-padded to 32 bytes
    for domain in [
        HashDomain::NftId,
        HashDomain::ChildId,
        HashDomain::NonceEvolve,
    ] {
        let tag = domain.tag();
        let block = domain.tag_block();
        assert!(tag.iter().all(|&b| b != 0 && b.is_ascii()));
        assert_eq!(&block[..tag.len()], tag);
        assert!(block[tag.len()..].iter().all(|&b| b == 0));
    }
}

//! Sample witnesses for every circuit.
//!
//! The values are the classic demo inputs (age 25 against a minimum of 20, message
//! 980522 under generator 5, ten `0x7fffffff` leaf words, notes with value 118).
//! Public values such as roots and keys are derived natively, so each sample is
//! consistent and satisfies its circuit unless it is deliberately tampered with.

use once_cell::sync::Lazy;

use crate::circuit::age::{AgeCircuit, AgeWitness};
use crate::circuit::elgamal::{ElGamalCircuit, ElGamalWitness};
use crate::circuit::gadgets::CheckMode;
use crate::circuit::membership::{MembershipWitness, MerkleMembershipCircuit};
use crate::circuit::note_init::{NoteInitCircuit, NoteInitWitness, NoteParams};
use crate::circuit::pour::{PourCircuit, PourStatement, PourWitness};
use crate::config::{ExponentShape, MerkleShape, DEFAULT_MEMBERSHIP_HEIGHT, DEFAULT_POUR_HEIGHT};
use crate::elgamal::{EncryptionRandomness, KeyPair};
use crate::error::Result;
use crate::merkle::{self, MerklePath, MerkleTree};
use crate::note::{Note, SpendingKey};
use crate::sha256::NativeDigest;
use crate::FieldElement;

/// Minimum age of the sample age check.
pub const SAMPLE_MIN_AGE: u64 = 20;

/// Sample age.
pub const SAMPLE_AGE: u32 = 25;

/// SHA-256 of the ASCII string "25" as digest words.
pub const SAMPLE_AGE_DIGEST: NativeDigest = [
    3_081_070_707,
    3_447_136_044,
    1_148_008_091,
    1_687_433_398,
    1_517_644_706,
    2_030_016_492,
    2_176_544_597,
    3_001_496_937,
];

pub const SAMPLE_MESSAGE: u64 = 980_522;
pub const SAMPLE_GENERATOR: u64 = 5;
pub const SAMPLE_SECRET_KEY: u64 = 65_537;

/// Sample ElGamal key pair, `y = 5^65537`.
pub static SAMPLE_KEYS: Lazy<KeyPair<FieldElement>> = Lazy::new(|| {
    KeyPair::from_secret(
        FieldElement::from(SAMPLE_GENERATOR),
        FieldElement::from(SAMPLE_SECRET_KEY),
    )
});

/// Leaf word of the sample membership leaf (ten copies).
pub const SAMPLE_LEAF_WORD: u64 = 2_147_483_647;

/// Sibling digests of the sample membership path, leaf level first.
pub const SAMPLE_SIBLINGS: [NativeDigest; 2] = [[1_234_567_890; 8], [987_654_321; 8]];

/// Packed direction bits of the sample membership path.
pub const SAMPLE_SELECTOR: u64 = 3;

pub const SAMPLE_OLD_KEY: SpendingKey = [97_111_112; 8];
pub const SAMPLE_NEW_KEY: SpendingKey = [97_110_112; 8];

pub const SAMPLE_NOTE_PARAMS: NoteParams = NoteParams {
    value: 118,
    rho: 112,
    r: 114,
    s: 115,
};

/// Value moved out of the shielded pool by the sample pour.
pub const SAMPLE_PUBLIC_VALUE: u32 = 18;

/// Sample age circuit; `age` replaces the witness age and its digits.
pub fn age_circuit(age: u32, mode: CheckMode) -> AgeCircuit {
    let witness = AgeWitness::new(age);
    AgeCircuit::new(
        SAMPLE_MIN_AGE,
        witness.digits.len(),
        mode,
        Some(SAMPLE_AGE_DIGEST),
        Some(witness),
    )
}

/// Sample ElGamal circuit with caller-supplied randomness.
pub fn elgamal_circuit(
    message: FieldElement,
    randomness: EncryptionRandomness<FieldElement>,
    mode: CheckMode,
) -> ElGamalCircuit<FieldElement> {
    let keys = *SAMPLE_KEYS;
    ElGamalCircuit::new(
        ExponentShape::default(),
        mode,
        Some(keys.generator),
        Some(keys.public),
        Some(ElGamalWitness {
            message,
            secret_key: keys.secret,
            randomness,
        }),
    )
}

/// Sample leaf preimage.
pub fn sample_leaf() -> Vec<u64> {
    vec![SAMPLE_LEAF_WORD; crate::config::MEMBERSHIP_LEAF_WORDS]
}

/// Sample membership circuit of height 2; `tamper` flips one bit of the first sibling.
pub fn membership_circuit(mode: CheckMode, tamper: bool) -> Result<MerkleMembershipCircuit> {
    let shape = MerkleShape::membership(DEFAULT_MEMBERSHIP_HEIGHT)?;
    let leaf = sample_leaf();
    let path = MerklePath::from_selector(SAMPLE_SIBLINGS.to_vec(), SAMPLE_SELECTOR)?;
    let root = merkle::compute_root(&leaf, shape.leaf.word_bits, &path)?;

    let mut witness_path = path;
    if tamper {
        witness_path.siblings[0][0] ^= 1;
    }
    Ok(MerkleMembershipCircuit::new(
        shape,
        mode,
        Some(root),
        Some(MembershipWitness {
            leaf_words: leaf,
            path: witness_path,
        }),
    ))
}

/// Sample note initialization circuit.
pub fn note_init_circuit() -> NoteInitCircuit {
    NoteInitCircuit::new(
        Some(SAMPLE_NOTE_PARAMS),
        Some(NoteInitWitness {
            old_key: SAMPLE_OLD_KEY,
            new_key: SAMPLE_NEW_KEY,
        }),
    )
}

/// Ways to corrupt the sample pour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PourTamper {
    None,
    /// Flip a bit of a path sibling
    Path,
    /// Publish a serial number for a different nonce
    SerialNumber,
    /// Publish the commitment of a different new note
    NewCommitment,
    /// Move one unit more than the old note holds
    Balance,
}

/// Sample pour of height 3: the old note (value 118) is leaf 0 of a tree with three
/// commitments and is split into a new note of 100 and a public value of 18.
pub fn pour_circuit(mode: CheckMode, tamper: PourTamper) -> Result<PourCircuit> {
    let p = SAMPLE_NOTE_PARAMS;
    let old_note = Note::for_owner(&SAMPLE_OLD_KEY, p.value, p.rho, p.r, p.s);
    let new_value = p.value - SAMPLE_PUBLIC_VALUE;
    let new_note = Note::for_owner(&SAMPLE_NEW_KEY, new_value, p.rho + 1, p.r + 1, p.s + 1);

    let fillers = [
        Note::for_owner(&SAMPLE_NEW_KEY, 7, 1, 2, 3).leaf_digest(),
        Note::for_owner(&SAMPLE_OLD_KEY, 9, 4, 5, 6).leaf_digest(),
    ];
    let mut leaves = vec![old_note.leaf_digest()];
    leaves.extend_from_slice(&fillers);
    let tree = MerkleTree::from_leaf_digests(leaves, DEFAULT_POUR_HEIGHT)?;
    let mut path = tree.path(0)?;

    let mut statement = PourStatement {
        root: tree.root(),
        old_serial_number: old_note.serial_number(&SAMPLE_OLD_KEY),
        new_commitment: new_note.commitment(),
        public_value: SAMPLE_PUBLIC_VALUE,
    };
    match tamper {
        PourTamper::None => {}
        PourTamper::Path => path.siblings[0][3] ^= 1 << 7,
        PourTamper::SerialNumber => {
            statement.old_serial_number = crate::note::serial_number(&SAMPLE_OLD_KEY, p.rho + 1)
        }
        PourTamper::NewCommitment => {
            let mut other = new_note;
            other.value += 1;
            statement.new_commitment = other.commitment();
        }
        PourTamper::Balance => statement.public_value += 1,
    }

    PourCircuit::new(
        DEFAULT_POUR_HEIGHT,
        mode,
        Some(statement),
        Some(PourWitness {
            old_key: SAMPLE_OLD_KEY,
            old_note,
            path,
            new_note,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha256::hash_bytes;

    #[test]
    fn test_age_digest_is_hash_of_digits() {
        assert_eq!(hash_bytes(b"25"), SAMPLE_AGE_DIGEST);
    }

    #[test]
    fn test_sample_keys() {
        assert_eq!(
            SAMPLE_KEYS.public,
            crate::utils::pow_native(&SAMPLE_KEYS.generator, &SAMPLE_KEYS.secret)
        );
    }

    #[test]
    fn test_pour_path_starts_at_leaf_zero() {
        let circuit = pour_circuit(CheckMode::Enforce, PourTamper::None).unwrap();
        let witness = circuit.witness.unwrap();
        assert_eq!(witness.path.selector(), 0b111);
        assert_eq!(circuit.shape.height, DEFAULT_POUR_HEIGHT);
    }

    #[test]
    fn test_pour_root_covers_hashed_commitment() {
        let circuit = pour_circuit(CheckMode::Enforce, PourTamper::None).unwrap();
        let witness = circuit.witness.unwrap();
        let root = witness
            .path
            .root_from_digest(&witness.old_note.leaf_digest())
            .unwrap();
        assert_eq!(circuit.statement.unwrap().root, root);
    }
}

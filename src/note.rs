//! Native shielded-note values: address keys, serial numbers and note commitments.
//!
//! Every scalar note field is a 32-bit word and every key or digest is eight such
//! words, so the layouts below are exactly the hash inputs the commitment gadgets
//! build in-circuit:
//!
//! - `a_pk = H(a_sk)`
//! - `sn = H(a_sk ++ rho)`
//! - `cm = H(s ++ H(r ++ a_pk ++ rho) ++ v)`
//!
//! Commitment trees store `H(cm)` as the leaf digest.

use serde::{Deserialize, Serialize};

use crate::config::DIGEST_WORDS;
use crate::sha256::{hash_u32_words, NativeDigest};

/// Secret address key, eight 32-bit words.
pub type SpendingKey = [u32; DIGEST_WORDS];

/// Derives the public address key `a_pk = H(a_sk)`.
pub fn public_key(a_sk: &SpendingKey) -> NativeDigest {
    hash_u32_words(a_sk)
}

/// Derives the serial number `sn = H(a_sk ++ rho)` that reveals a spend.
pub fn serial_number(a_sk: &SpendingKey, rho: u32) -> NativeDigest {
    let mut words = a_sk.to_vec();
    words.push(rho);
    hash_u32_words(&words)
}

/// Inner commitment `k = H(r ++ a_pk ++ rho)`.
pub fn inner_commitment(a_pk: &NativeDigest, rho: u32, r: u32) -> NativeDigest {
    let mut words = Vec::with_capacity(DIGEST_WORDS + 2);
    words.push(r);
    words.extend_from_slice(a_pk);
    words.push(rho);
    hash_u32_words(&words)
}

/// Outer commitment `cm = H(s ++ k ++ v)`.
pub fn outer_commitment(inner: &NativeDigest, value: u32, s: u32) -> NativeDigest {
    let mut words = Vec::with_capacity(DIGEST_WORDS + 2);
    words.push(s);
    words.extend_from_slice(inner);
    words.push(value);
    hash_u32_words(&words)
}

/// A shielded note: owner key, value, nonce and the two commitment salts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Owner's public address key
    pub a_pk: NativeDigest,
    /// Value carried by the note
    pub value: u32,
    /// Nonce binding the serial number
    pub rho: u32,
    /// Salt of the inner commitment
    pub r: u32,
    /// Salt of the outer commitment
    pub s: u32,
}

impl Note {
    /// Note owned by the holder of `a_sk`.
    pub fn for_owner(a_sk: &SpendingKey, value: u32, rho: u32, r: u32, s: u32) -> Self {
        Self {
            a_pk: public_key(a_sk),
            value,
            rho,
            r,
            s,
        }
    }

    /// The note commitment `cm`.
    pub fn commitment(&self) -> NativeDigest {
        outer_commitment(&inner_commitment(&self.a_pk, self.rho, self.r), self.value, self.s)
    }

    /// Leaf digest `H(cm)` of this note in a commitment tree.
    pub fn leaf_digest(&self) -> NativeDigest {
        hash_u32_words(&self.commitment())
    }

    /// The serial number revealed when the owner spends this note.
    pub fn serial_number(&self, a_sk: &SpendingKey) -> NativeDigest {
        serial_number(a_sk, self.rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SK: SpendingKey = [97_111_112; 8];

    #[test]
    fn test_commitment_layers() {
        let note = Note::for_owner(&SK, 118, 112, 114, 115);
        let inner = inner_commitment(&note.a_pk, 112, 114);
        assert_eq!(note.commitment(), outer_commitment(&inner, 118, 115));
    }

    #[test]
    fn test_fields_change_commitment() {
        let note = Note::for_owner(&SK, 118, 112, 114, 115);
        let mut other = note;
        other.value = 119;
        assert_ne!(note.commitment(), other.commitment());
        other = note;
        other.r = 0;
        assert_ne!(note.commitment(), other.commitment());
    }

    #[test]
    fn test_leaf_digest_hashes_commitment() {
        let note = Note::for_owner(&SK, 118, 112, 114, 115);
        assert_eq!(note.leaf_digest(), hash_u32_words(&note.commitment()));
        assert_ne!(note.leaf_digest(), note.commitment());
    }

    #[test]
    fn test_serial_number_depends_on_key_and_nonce() {
        let note = Note::for_owner(&SK, 1, 2, 3, 4);
        assert_eq!(note.serial_number(&SK), serial_number(&SK, 2));
        assert_ne!(serial_number(&SK, 2), serial_number(&SK, 3));
        assert_ne!(serial_number(&SK, 2), serial_number(&[97_110_112; 8], 2));
        assert_ne!(public_key(&SK), serial_number(&SK, 0));
    }
}

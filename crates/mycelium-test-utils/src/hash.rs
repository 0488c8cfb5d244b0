//! FNV-1a hashing for determinism checks.
//!
//! Not cryptographically secure; used for fast equality checks between
//! two runs that should be bit-identical.

use mycelium_arena::FieldStore;
use mycelium_core::FIELD_DEFS;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash an arbitrary byte string.
pub fn fnv1a_bytes(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |h, &b| fnv1a_byte(h, b))
}

/// Hash every grid in the store, bit for bit.
///
/// The grid index is folded in at each boundary so grid order matters.
pub fn store_hash(store: &FieldStore) -> u64 {
    let mut hash = FNV_OFFSET;
    for def in &FIELD_DEFS {
        hash = fnv1a_u32(hash, def.id.0);
        for &v in store.field(def.id) {
            hash = fnv1a_u32(hash, v.to_bits());
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycelium_core::VEIN;

    #[test]
    fn empty_bytes_hash_to_offset() {
        assert_eq!(fnv1a_bytes(&[]), FNV_OFFSET);
        assert_ne!(fnv1a_bytes(b"a"), fnv1a_bytes(b"b"));
    }

    #[test]
    fn store_hash_sees_single_cell_change() {
        let mut store = FieldStore::new();
        store.resize(4, 4);
        let before = store_hash(&store);
        store.set(VEIN, 3, 3, 0.01);
        assert_ne!(before, store_hash(&store));
    }
}

use arena_gameplay::MultiActionRecord;
use sha3::Digest;
use sha3::Keccak256;

pub const ZERO_HASH: [u8; 32] = [0u8; 32];

fn keccak(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// `|`-joins a hand's canonical action records and hashes the result,
/// per §4.9/§6's leaf serialisation.
pub fn leaf_hash(records: &[MultiActionRecord]) -> [u8; 32] {
    let joined = records
        .iter()
        .map(MultiActionRecord::canonical_string)
        .collect::<Vec<_>>()
        .join("|");
    keccak(joined.as_bytes())
}

fn pair_hash(a: [u8; 32], b: [u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut bytes = Vec::with_capacity(64);
    bytes.extend_from_slice(&lo);
    bytes.extend_from_slice(&hi);
    keccak(&bytes)
}

/// Binary Merkle root over non-empty leaves: sorted-pair hashing at
/// each layer, odd leaves promote unchanged, single-leaf root is the
/// leaf itself, empty input root is the zero hash.
pub fn merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    if leaves.is_empty() {
        return ZERO_HASH;
    }
    let mut layer = leaves.to_vec();
    while layer.len() > 1 {
        let mut next = Vec::with_capacity((layer.len() + 1) / 2);
        let mut iter = layer.chunks(2);
        while let Some(pair) = iter.next() {
            next.push(match pair {
                [a, b] => pair_hash(*a, *b),
                [a] => *a,
                _ => unreachable!(),
            });
        }
        layer = next;
    }
    layer[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_gameplay::Action;
    use arena_gameplay::ArenaGamePhase;

    fn record(player_id: &str, ts: u64) -> MultiActionRecord {
        MultiActionRecord {
            player_id: player_id.into(),
            player_name: "p".into(),
            action: Action::Check,
            amount: 0,
            phase: ArenaGamePhase::Preflop,
            seat_index: 0,
            timestamp_ms: ts,
        }
    }

    #[test]
    fn empty_root_is_zero_hash() {
        assert_eq!(merkle_root(&[]), ZERO_HASH);
    }

    #[test]
    fn single_leaf_root_equals_the_leaf() {
        let leaf = leaf_hash(&[record("p1", 1)]);
        assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn swapping_a_pair_at_the_same_layer_leaves_the_root_unchanged() {
        let a = leaf_hash(&[record("p1", 1)]);
        let b = leaf_hash(&[record("p2", 2)]);
        let c = leaf_hash(&[record("p3", 3)]);
        let d = leaf_hash(&[record("p4", 4)]);
        let root1 = merkle_root(&[a, b, c, d]);
        let root2 = merkle_root(&[b, a, d, c]);
        assert_eq!(root1, root2);
    }

    #[test]
    fn odd_leaf_count_promotes_the_last_leaf_unchanged() {
        let a = leaf_hash(&[record("p1", 1)]);
        let b = leaf_hash(&[record("p2", 2)]);
        let c = leaf_hash(&[record("p3", 3)]);
        let root = merkle_root(&[a, b, c]);
        let expected = pair_hash(pair_hash(a, b), c);
        assert_eq!(root, expected);
    }

    #[test]
    fn different_logs_produce_different_leaves() {
        let a = leaf_hash(&[record("p1", 1)]);
        let b = leaf_hash(&[record("p2", 1)]);
        assert_ne!(a, b);
    }
}

/// Persisted settlement record per §6, one per flushed batch. Explicitly
/// out of scope: the chain RPC client that actually writes this record;
/// `LedgerClient` is the narrow collaborator interface this crate calls.
#[derive(Debug, Clone)]
pub struct SettlementSubmission {
    pub session_id: [u8; 32],
    pub hand_numbers: Vec<u64>,
    pub winners_per_hand: Vec<Vec<String>>,
    pub amounts_per_hand: Vec<Vec<i64>>,
    pub action_log_hashes: Vec<[u8; 32]>,
    pub players: Vec<String>,
    pub chip_deltas: Vec<i64>,
    pub merkle_root: [u8; 32],
}

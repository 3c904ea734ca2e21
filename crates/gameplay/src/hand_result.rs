use serde::Deserialize;
use serde::Serialize;

use crate::action_record::MultiActionRecord;
use crate::showdown::WinnerShare;

/// The complete outcome of one played hand, as forwarded from the
/// Table up through the Arena to the batch settler and dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandResult {
    pub table_id: String,
    pub hand_number: u64,
    pub winners: Vec<WinnerShare>,
    pub action_log: Vec<MultiActionRecord>,
}

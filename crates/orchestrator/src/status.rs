use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStatus {
    pub table_id: String,
    pub hands_played: u64,
    pub seated_players: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaStatus {
    pub running: bool,
    pub tables: Vec<TableStatus>,
    pub total_hands_played: u64,
}

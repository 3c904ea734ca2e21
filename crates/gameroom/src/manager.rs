use std::collections::HashMap;

use arena_core::ArenaError;
use arena_core::ArenaResult;
use arena_gameplay::TableConfig;

use crate::table::Table;

/// Maintains `tableId -> Table`, per §4.10. Refuses duplicate IDs;
/// `createPracticeTable` auto-increments IDs for callers that don't
/// supply one.
pub struct TableManager {
    tables: HashMap<String, Table>,
    next_practice_id: u64,
}

impl TableManager {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            next_practice_id: 1,
        }
    }

    pub fn create_table(&mut self, config: TableConfig) -> ArenaResult<()> {
        if self.tables.contains_key(&config.table_id) {
            return Err(ArenaError::validation(format!(
                "duplicate table id {}",
                config.table_id
            )));
        }
        config
            .validate()
            .map_err(ArenaError::validation)?;
        self.tables.insert(config.table_id.clone(), Table::new(config));
        Ok(())
    }

    /// Creates a table with an auto-incremented practice ID, returning
    /// the assigned ID.
    pub fn create_practice_table(&mut self, mut config: TableConfig) -> ArenaResult<String> {
        let id = format!("practice-{}", self.next_practice_id);
        self.next_practice_id += 1;
        config.table_id = id.clone();
        self.create_table(config)?;
        Ok(id)
    }

    pub fn get_table(&self, table_id: &str) -> Option<&Table> {
        self.tables.get(table_id)
    }

    pub fn get_table_mut(&mut self, table_id: &str) -> Option<&mut Table> {
        self.tables.get_mut(table_id)
    }

    pub fn list_tables(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Destroys the table and, with it, any timer it had armed.
    pub fn remove_table(&mut self, table_id: &str) -> ArenaResult<()> {
        self.tables
            .remove(table_id)
            .map(|_| ())
            .ok_or_else(|| ArenaError::validation(format!("unknown table {table_id}")))
    }

    pub fn remove_all_tables(&mut self) {
        self.tables.clear();
    }
}

impl Default for TableManager {
    fn default() -> Self {
        Self::new()
    }
}

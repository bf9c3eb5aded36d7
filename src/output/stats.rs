//! Statistics generation from the match store
//!
//! This module provides functionality for extracting and displaying
//! store statistics from the storage layer.

use crate::storage::{Gateway, Table};
use crate::Result;

/// Row counts of the match store
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    /// Row count per table, in schema order
    pub rows: Vec<(Table, u64)>,

    /// Most recently stored match id
    pub latest_match_id: Option<String>,
}

impl StoreStatistics {
    /// Row count of one table
    pub fn count(&self, table: Table) -> u64 {
        self.rows
            .iter()
            .find(|(t, _)| *t == table)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(HarvestError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn Gateway) -> Result<StoreStatistics> {
    let mut rows = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        rows.push((table, storage.count_rows(table)?));
    }

    Ok(StoreStatistics {
        rows,
        latest_match_id: storage.latest_match_id()?,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Match Store Statistics ===\n");

    println!("Overview:");
    println!("  Matches stored: {}", stats.count(Table::Matches));
    println!("  Participants: {}", stats.count(Table::Participants));
    println!("  Events: {}", stats.count(Table::Events));
    println!("  Challenges: {}", stats.count(Table::Challenges));
    match &stats.latest_match_id {
        Some(id) => println!("  Latest match: {}", id),
        None => println!("  Latest match: (none)"),
    }
    println!();

    println!("Rows by Table:");
    for (table, count) in &stats.rows {
        println!("  {}: {}", table.table_name(), count);
    }
}

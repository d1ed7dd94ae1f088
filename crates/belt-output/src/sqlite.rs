//! SQLite output backend (feature `sqlite`).
//!
//! One `output.db` in the output directory with tables `item_snapshots`
//! and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ItemSnapshotRow, OutputResult, TickSummaryRow};

pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and create the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS item_snapshots (
                 tick     INTEGER NOT NULL,
                 belt     INTEGER NOT NULL,
                 item_id  INTEGER NOT NULL,
                 progress REAL    NOT NULL,
                 x        REAL    NOT NULL,
                 y        REAL    NOT NULL,
                 z        REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick             INTEGER PRIMARY KEY,
                 active_belts     INTEGER NOT NULL,
                 items_in_transit INTEGER NOT NULL,
                 extracted        INTEGER NOT NULL,
                 inserted         INTEGER NOT NULL,
                 dropped          INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[ItemSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO item_snapshots (tick, belt, item_id, progress, x, y, z) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.belt,
                    row.item_id,
                    row.progress as f64,
                    row.x,
                    row.y,
                    row.z,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, active_belts, items_in_transit, extracted, inserted, dropped) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.active_belts as i64,
                row.items_in_transit as i64,
                row.extracted as i64,
                row.inserted as i64,
                row.dropped as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

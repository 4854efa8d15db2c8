use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::database::Database;
use crate::error::Result;
use crate::models::ActivityLog;
use crate::record::{parse_ts, parse_uuid, Record};

impl Record for ActivityLog {
    const TABLE: &'static str = "activity_log";

    fn label(&self) -> String {
        self.action_type.clone()
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO activity_log (id, user_id, action_type, action_details, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.id.to_string(),
                self.user_id.to_string(),
                self.action_type,
                self.action_details,
                self.created_at.to_rfc3339(),
            ],
        )
    }
}

impl Database {
    /// Most recent activity entries for a user, newest first.
    pub fn recent_activity(&self, user_id: Uuid, limit: u32) -> Result<Vec<ActivityLog>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, user_id, action_type, action_details, created_at
             FROM activity_log
             WHERE user_id = ?1
             ORDER BY created_at DESC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![user_id.to_string(), limit], |row| {
            let id_str: String = row.get(0)?;
            let user_str: String = row.get(1)?;
            let details: Option<String> = row.get(3)?;
            let ts_str: String = row.get(4)?;

            Ok(ActivityLog {
                id: parse_uuid(0, &id_str)?,
                user_id: parse_uuid(1, &user_str)?,
                action_type: row.get(2)?,
                action_details: details.unwrap_or_default(),
                created_at: parse_ts(4, &ts_str)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

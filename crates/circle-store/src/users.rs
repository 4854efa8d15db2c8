//! Users and the friendship tables hanging off them.

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{Friend, FriendContext, FriendLike, FriendStatus, User};
use crate::record::{parse_ts, parse_uuid, Record};

impl Record for User {
    const TABLE: &'static str = "users";

    fn label(&self) -> String {
        self.username.clone()
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO users (id, email, username, first_name, last_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                self.id.to_string(),
                self.email,
                self.username,
                self.first_name,
                self.last_name,
                self.created_at.to_rfc3339(),
                self.updated_at.to_rfc3339(),
            ],
        )
    }
}

impl Record for Friend {
    const TABLE: &'static str = "friends";

    fn label(&self) -> String {
        format!("{} -> {} ({})", self.user_id, self.friend_id, self.status.as_str())
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO friends (id, user_id, friend_id, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.id.to_string(),
                self.user_id.to_string(),
                self.friend_id.to_string(),
                self.status.as_str(),
                self.created_at.to_rfc3339(),
                self.updated_at.to_rfc3339(),
            ],
        )
    }
}

impl Record for FriendContext {
    const TABLE: &'static str = "friend_contexts";

    fn label(&self) -> String {
        self.context.clone()
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO friend_contexts (id, user_id, friend_id, context, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.id.to_string(),
                self.user_id.to_string(),
                self.friend_id.to_string(),
                self.context,
                self.created_at.to_rfc3339(),
            ],
        )
    }
}

impl Record for FriendLike {
    const TABLE: &'static str = "friend_likes";

    fn label(&self) -> String {
        format!("{} likes {}", self.user_id, self.friend_id)
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO friend_likes (id, user_id, friend_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                self.id.to_string(),
                self.user_id.to_string(),
                self.friend_id.to_string(),
                self.created_at.to_rfc3339(),
            ],
        )
    }
}

impl Database {
    /// Fetch a single user by UUID.
    pub fn get_user(&self, id: Uuid) -> Result<User> {
        self.conn()
            .query_row(
                "SELECT id, email, username, first_name, last_name, created_at, updated_at
                 FROM users
                 WHERE id = ?1",
                params![id.to_string()],
                row_to_user,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// List all users, ordered by username.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, email, username, first_name, last_name, created_at, updated_at
             FROM users
             ORDER BY username ASC",
        )?;
        let rows = stmt.query_map([], row_to_user)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Friendship edges touching `user_id` in either direction.
    pub fn list_friends_of(&self, user_id: Uuid) -> Result<Vec<Friend>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, user_id, friend_id, status, created_at, updated_at
             FROM friends
             WHERE user_id = ?1 OR friend_id = ?1
             ORDER BY created_at ASC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], row_to_friend)?;

        let mut friends = Vec::new();
        for row in rows {
            friends.push(row?);
        }
        Ok(friends)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id_str: String = row.get(0)?;
    let created_str: String = row.get(5)?;
    let updated_str: String = row.get(6)?;

    Ok(User {
        id: parse_uuid(0, &id_str)?,
        email: row.get(1)?,
        username: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        created_at: parse_ts(5, &created_str)?,
        updated_at: parse_ts(6, &updated_str)?,
    })
}

fn row_to_friend(row: &rusqlite::Row<'_>) -> rusqlite::Result<Friend> {
    let id_str: String = row.get(0)?;
    let user_str: String = row.get(1)?;
    let friend_str: String = row.get(2)?;
    let status_str: String = row.get(3)?;
    let created_str: String = row.get(4)?;
    let updated_str: String = row.get(5)?;

    let status = FriendStatus::parse(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown friend status: {status_str}").into(),
        )
    })?;

    Ok(Friend {
        id: parse_uuid(0, &id_str)?,
        user_id: parse_uuid(1, &user_str)?,
        friend_id: parse_uuid(2, &friend_str)?,
        status,
        created_at: parse_ts(4, &created_str)?,
        updated_at: parse_ts(5, &updated_str)?,
    })
}

//! Collections, folders, files, categories and sharing.

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{Collection, File, FileCategory, FileCategoryAssociation, Folder, SharedFile};
use crate::record::{parse_opt_uuid, parse_ts, parse_uuid, Record};

impl Record for Collection {
    const TABLE: &'static str = "collections";

    fn label(&self) -> String {
        self.name.clone()
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO collections (id, user_id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.id.to_string(),
                self.user_id.to_string(),
                self.name,
                self.description,
                self.created_at.to_rfc3339(),
                self.updated_at.to_rfc3339(),
            ],
        )
    }
}

impl Record for Folder {
    const TABLE: &'static str = "folders";

    fn label(&self) -> String {
        self.name.clone()
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO folders (id, user_id, name, description, parent_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                self.id.to_string(),
                self.user_id.to_string(),
                self.name,
                self.description,
                self.parent_id.map(|p| p.to_string()),
                self.created_at.to_rfc3339(),
                self.updated_at.to_rfc3339(),
            ],
        )
    }
}

impl Record for File {
    const TABLE: &'static str = "files";

    fn label(&self) -> String {
        self.name.clone()
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO files (id, user_id, folder_id, collection_id, key, name, content_type,
                                size, uploaded_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                self.id.to_string(),
                self.user_id.to_string(),
                self.folder_id.map(|f| f.to_string()),
                self.collection_id.map(|c| c.to_string()),
                self.key,
                self.name,
                self.content_type,
                self.size,
                self.uploaded_at.to_rfc3339(),
                self.created_at.to_rfc3339(),
                self.updated_at.to_rfc3339(),
            ],
        )
    }
}

impl Record for FileCategory {
    const TABLE: &'static str = "file_categories";

    fn label(&self) -> String {
        self.name.clone()
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO file_categories (id, name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                self.id.to_string(),
                self.name,
                self.created_at.to_rfc3339(),
                self.updated_at.to_rfc3339(),
            ],
        )
    }
}

impl Record for FileCategoryAssociation {
    const TABLE: &'static str = "file_category_associations";

    fn label(&self) -> String {
        format!("{} in {}", self.file_id, self.category_id)
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO file_category_associations (file_id, category_id) VALUES (?1, ?2)",
            params![self.file_id.to_string(), self.category_id.to_string()],
        )
    }
}

impl Record for SharedFile {
    const TABLE: &'static str = "shared_files";

    fn label(&self) -> String {
        format!("{} shared with {}", self.file_id, self.shared_with)
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO shared_files (id, file_id, shared_by, shared_with, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.id.to_string(),
                self.file_id.to_string(),
                self.shared_by.to_string(),
                self.shared_with.to_string(),
                self.created_at.to_rfc3339(),
            ],
        )
    }
}

const FILE_COLUMNS: &str = "id, user_id, folder_id, collection_id, key, name, content_type, \
                            size, uploaded_at, created_at, updated_at";

impl Database {
    pub fn get_file(&self, id: Uuid) -> Result<File> {
        self.conn()
            .query_row(
                &format!("SELECT {FILE_COLUMNS} FROM files WHERE id = ?1"),
                params![id.to_string()],
                row_to_file,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Files owned by a user, newest upload first.
    pub fn list_files_for_user(&self, user_id: Uuid) -> Result<Vec<File>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE user_id = ?1 ORDER BY uploaded_at DESC"
        ))?;
        let rows = stmt.query_map(params![user_id.to_string()], row_to_file)?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row?);
        }
        Ok(files)
    }

    /// Names of the categories a file is filed under, alphabetically.
    pub fn categories_for_file(&self, file_id: Uuid) -> Result<Vec<String>> {
        let mut stmt = self.conn().prepare(
            "SELECT c.name
             FROM file_categories c
             JOIN file_category_associations a ON a.category_id = c.id
             WHERE a.file_id = ?1
             ORDER BY c.name ASC",
        )?;
        let rows = stmt.query_map(params![file_id.to_string()], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Files other users shared with `user_id`.
    pub fn files_shared_with(&self, user_id: Uuid) -> Result<Vec<File>> {
        let mut stmt = self.conn().prepare(
            "SELECT f.id, f.user_id, f.folder_id, f.collection_id, f.key, f.name, f.content_type,
                    f.size, f.uploaded_at, f.created_at, f.updated_at
             FROM files f
             JOIN shared_files s ON s.file_id = f.id
             WHERE s.shared_with = ?1
             ORDER BY s.created_at ASC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], row_to_file)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }
}

fn row_to_file(row: &rusqlite::Row<'_>) -> rusqlite::Result<File> {
    let id_str: String = row.get(0)?;
    let user_str: String = row.get(1)?;
    let uploaded_str: String = row.get(8)?;
    let created_str: String = row.get(9)?;
    let updated_str: String = row.get(10)?;

    Ok(File {
        id: parse_uuid(0, &id_str)?,
        user_id: parse_uuid(1, &user_str)?,
        folder_id: parse_opt_uuid(2, row.get(2)?)?,
        collection_id: parse_opt_uuid(3, row.get(3)?)?,
        key: row.get(4)?,
        name: row.get(5)?,
        content_type: row.get(6)?,
        size: row.get(7)?,
        uploaded_at: parse_ts(8, &uploaded_str)?,
        created_at: parse_ts(9, &created_str)?,
        updated_at: parse_ts(10, &updated_str)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::User;

    fn db_with_user() -> (Database, User) {
        let db = Database::open_in_memory().unwrap();
        db.ensure_schema(None).unwrap();
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "jane@example.com".into(),
            username: "janedoe".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            created_at: now,
            updated_at: now,
        };
        db.insert(&user).unwrap();
        (db, user)
    }

    #[test]
    fn file_with_folder_and_category() {
        let (db, user) = db_with_user();
        let now = Utc::now();

        let folder = Folder {
            id: Uuid::new_v4(),
            user_id: user.id,
            name: "Photos".into(),
            description: None,
            parent_id: None,
            created_at: now,
            updated_at: now,
        };
        let file = File {
            id: Uuid::new_v4(),
            user_id: user.id,
            folder_id: Some(folder.id),
            collection_id: None,
            key: "uploads/rome.jpg".into(),
            name: "Rome Colosseum.jpg".into(),
            content_type: "image/jpeg".into(),
            size: 2_048_000,
            uploaded_at: now,
            created_at: now,
            updated_at: now,
        };
        let category = FileCategory {
            id: Uuid::new_v4(),
            name: "Images".into(),
            created_at: now,
            updated_at: now,
        };

        db.insert(&folder).unwrap();
        db.insert(&file).unwrap();
        db.insert(&category).unwrap();
        db.insert(&FileCategoryAssociation {
            file_id: file.id,
            category_id: category.id,
        })
        .unwrap();

        let loaded = db.get_file(file.id).unwrap();
        assert_eq!(loaded.folder_id, Some(folder.id));
        assert_eq!(loaded.collection_id, None);
        assert_eq!(loaded.size, 2_048_000);
        assert_eq!(db.categories_for_file(file.id).unwrap(), vec!["Images".to_string()]);
        assert_eq!(db.list_files_for_user(user.id).unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_not_found() {
        let (db, _) = db_with_user();
        assert!(matches!(db.get_file(Uuid::new_v4()), Err(StoreError::NotFound)));
    }
}

//! Sample dataset and transactional seeding.
//!
//! [`SampleData::generate`] builds the whole demo dataset in memory with every
//! identifier already assigned, so cross-references are plain field copies.
//! [`Database::seed`] then inserts it table by table inside one transaction:
//! each insert completes before the next starts, a failing row is logged and
//! counted without stopping the run, and the commit happens only after the
//! last insert has returned.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use rusqlite::{Connection, DropBehavior};
use serde::Serialize;
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::*;
use crate::record::Record;

#[derive(Debug, Clone, Default)]
pub struct SampleData {
    pub users: Vec<User>,
    pub friends: Vec<Friend>,
    pub friend_contexts: Vec<FriendContext>,
    pub friend_likes: Vec<FriendLike>,
    pub collections: Vec<Collection>,
    pub folders: Vec<Folder>,
    pub files: Vec<File>,
    pub file_categories: Vec<FileCategory>,
    pub file_category_associations: Vec<FileCategoryAssociation>,
    pub shared_files: Vec<SharedFile>,
    pub activity_log: Vec<ActivityLog>,
}

/// Inserted / failed counts for one table.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TableCount {
    pub inserted: usize,
    pub failed: usize,
}

/// Outcome of a seeding run, keyed by table in insertion order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SeedReport {
    pub tables: IndexMap<&'static str, TableCount>,
}

impl SeedReport {
    pub fn inserted(&self) -> usize {
        self.tables.values().map(|c| c.inserted).sum()
    }

    pub fn failed(&self) -> usize {
        self.tables.values().map(|c| c.failed).sum()
    }

    pub fn table(&self, name: &str) -> TableCount {
        self.tables.get(name).copied().unwrap_or_default()
    }
}

struct UserSeed {
    username: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
}

const USERS: [UserSeed; 5] = [
    UserSeed { username: "john_doe", email: "john@example.com", first_name: "John", last_name: "Doe" },
    UserSeed { username: "jane_smith", email: "jane@example.com", first_name: "Jane", last_name: "Smith" },
    UserSeed { username: "alice_j", email: "alice@example.com", first_name: "Alice", last_name: "Johnson" },
    UserSeed { username: "bob_smith", email: "bob@example.com", first_name: "Bob", last_name: "Smith" },
    UserSeed { username: "charlie_b", email: "charlie@example.com", first_name: "Charlie", last_name: "Brown" },
];

const CATEGORIES: [&str; 5] = ["Documents", "Images", "Music", "Voice Notes", "Books"];

impl SampleData {
    /// Build the demo dataset with `now` as the reference time.
    ///
    /// Structure and names are fixed; UUIDs are fresh on every call.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let mut data = SampleData::default();

        data.users = USERS
            .iter()
            .map(|u| User {
                id: Uuid::new_v4(),
                email: u.email.to_string(),
                username: u.username.to_string(),
                first_name: u.first_name.to_string(),
                last_name: u.last_name.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let ids: Vec<Uuid> = data.users.iter().map(|u| u.id).collect();
        let (john, jane, alice, bob, charlie) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

        // -- friendship ---------------------------------------------------

        let edges = [
            (john, jane, FriendStatus::Accepted),
            (john, alice, FriendStatus::Accepted),
            (jane, bob, FriendStatus::Pending),
            (alice, charlie, FriendStatus::Accepted),
            (bob, charlie, FriendStatus::Blocked),
        ];
        data.friends = edges
            .iter()
            .map(|&(user_id, friend_id, status)| Friend {
                id: Uuid::new_v4(),
                user_id,
                friend_id,
                status,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let contexts = [
            (john, jane, "Book Club"),
            (john, alice, "Work"),
            (jane, bob, "Music"),
            (alice, charlie, "Fitness"),
        ];
        data.friend_contexts = contexts
            .iter()
            .map(|&(user_id, friend_id, context)| FriendContext {
                id: Uuid::new_v4(),
                user_id,
                friend_id,
                context: context.to_string(),
                created_at: now,
            })
            .collect();

        data.friend_likes = [(john, jane), (jane, john), (alice, charlie)]
            .iter()
            .map(|&(user_id, friend_id)| FriendLike {
                id: Uuid::new_v4(),
                user_id,
                friend_id,
                created_at: now,
            })
            .collect();

        // -- collections and folders ----------------------------------------

        let collection = |user_id: Uuid, name: &str, description: &str| Collection {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            description: Some(description.to_string()),
            created_at: now,
            updated_at: now,
        };
        let work = collection(john, "Work Projects", "Proposals and client decks");
        let vacation = collection(jane, "Vacation 2023", "Photos from Italy");
        let reading = collection(alice, "Reading List", "Books for the club");

        let folder = |user_id: Uuid, name: &str, parent_id: Option<Uuid>| Folder {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            description: None,
            parent_id,
            created_at: now,
            updated_at: now,
        };
        // parents come before children so the self-reference resolves
        let documents = folder(john, "Documents", None);
        let proposals = folder(john, "Proposals", Some(documents.id));
        let taxes = folder(john, "Taxes", Some(documents.id));
        let photos = folder(jane, "Photos", None);
        let audio = folder(bob, "Audio", None);

        // -- files ----------------------------------------------------------

        struct FileSeed<'a> {
            owner: Uuid,
            folder: Option<&'a Folder>,
            collection: Option<&'a Collection>,
            name: &'static str,
            content_type: &'static str,
            size: i64,
            category: &'static str,
            days_ago: i64,
        }

        let file_seeds = [
            FileSeed { owner: john, folder: Some(&proposals), collection: Some(&work), name: "Project X Proposal.pdf", content_type: "application/pdf", size: 482_133, category: "Documents", days_ago: 12 },
            FileSeed { owner: john, folder: Some(&proposals), collection: Some(&work), name: "Q2 Client Presentation.pptx", content_type: "application/vnd.openxmlformats-officedocument.presentationml.presentation", size: 3_204_551, category: "Documents", days_ago: 9 },
            FileSeed { owner: john, folder: Some(&taxes), collection: None, name: "Tax Return 2023.pdf", content_type: "application/pdf", size: 221_904, category: "Documents", days_ago: 30 },
            FileSeed { owner: jane, folder: Some(&photos), collection: Some(&vacation), name: "Rome Colosseum.jpg", content_type: "image/jpeg", size: 2_048_000, category: "Images", days_ago: 20 },
            FileSeed { owner: bob, folder: Some(&audio), collection: None, name: "Summer Playlist.mp3", content_type: "audio/mpeg", size: 6_912_400, category: "Music", days_ago: 5 },
            FileSeed { owner: bob, folder: Some(&audio), collection: None, name: "Idea Brainstorm.m4a", content_type: "audio/mp4", size: 1_311_220, category: "Voice Notes", days_ago: 2 },
            FileSeed { owner: alice, folder: None, collection: Some(&reading), name: "1984.epub", content_type: "application/epub+zip", size: 612_037, category: "Books", days_ago: 40 },
        ];

        data.file_categories = CATEGORIES
            .iter()
            .map(|name| FileCategory {
                id: Uuid::new_v4(),
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        for seed in &file_seeds {
            let id = Uuid::new_v4();
            let uploaded_at = now - Duration::days(seed.days_ago);
            data.files.push(File {
                id,
                user_id: seed.owner,
                folder_id: seed.folder.map(|f| f.id),
                collection_id: seed.collection.map(|c| c.id),
                key: format!("users/{}/{}", seed.owner, id),
                name: seed.name.to_string(),
                content_type: seed.content_type.to_string(),
                size: seed.size,
                uploaded_at,
                created_at: uploaded_at,
                updated_at: uploaded_at,
            });

            if let Some(category) = data.file_categories.iter().find(|c| c.name == seed.category) {
                data.file_category_associations.push(FileCategoryAssociation {
                    file_id: id,
                    category_id: category.id,
                });
            }

            data.activity_log.push(ActivityLog {
                id: Uuid::new_v4(),
                user_id: seed.owner,
                action_type: "file_upload".to_string(),
                action_details: serde_json::json!({
                    "file_id": id,
                    "file_name": seed.name,
                    "size": seed.size,
                })
                .to_string(),
                created_at: uploaded_at,
            });
        }

        data.collections = vec![work, vacation, reading];
        data.folders = vec![documents, proposals, taxes, photos, audio];

        // -- sharing ----------------------------------------------------------

        let file_id = |name: &str| {
            data.files
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.id)
                .unwrap_or_default()
        };
        let shares = [
            (file_id("Project X Proposal.pdf"), john, jane),
            (file_id("Project X Proposal.pdf"), john, alice),
            (file_id("Rome Colosseum.jpg"), jane, john),
            (file_id("Summer Playlist.mp3"), bob, jane),
            (file_id("1984.epub"), alice, charlie),
        ];
        let shared_files: Vec<SharedFile> = shares
            .iter()
            .map(|&(file_id, shared_by, shared_with)| SharedFile {
                id: Uuid::new_v4(),
                file_id,
                shared_by,
                shared_with,
                created_at: now,
            })
            .collect();

        for share in &shared_files {
            data.activity_log.push(ActivityLog {
                id: Uuid::new_v4(),
                user_id: share.shared_by,
                action_type: "file_share".to_string(),
                action_details: serde_json::json!({
                    "file_id": share.file_id,
                    "shared_with": share.shared_with,
                })
                .to_string(),
                created_at: now,
            });
        }
        data.shared_files = shared_files;

        for friend in &data.friends {
            data.activity_log.push(ActivityLog {
                id: Uuid::new_v4(),
                user_id: friend.user_id,
                action_type: "friend_request".to_string(),
                action_details: serde_json::json!({
                    "friend_id": friend.friend_id,
                    "status": friend.status.as_str(),
                })
                .to_string(),
                created_at: now,
            });
        }

        data
    }

    pub fn total_rows(&self) -> usize {
        self.users.len()
            + self.friends.len()
            + self.friend_contexts.len()
            + self.friend_likes.len()
            + self.collections.len()
            + self.folders.len()
            + self.files.len()
            + self.file_categories.len()
            + self.file_category_associations.len()
            + self.shared_files.len()
            + self.activity_log.len()
    }
}

impl Database {
    /// Insert `data` inside a single transaction.
    ///
    /// Row failures are logged and counted in the report. The transaction is
    /// committed once every insert has returned; if the commit fails the
    /// transaction is rolled back and [`StoreError::Commit`] is returned.
    pub fn seed(&mut self, data: &SampleData) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        let mut tx = self.conn_mut().transaction()?;
        // the commit-failure path below owns the rollback
        tx.set_drop_behavior(DropBehavior::Ignore);

        insert_all(&tx, &data.users, &mut report);
        insert_all(&tx, &data.friends, &mut report);
        insert_all(&tx, &data.friend_contexts, &mut report);
        insert_all(&tx, &data.friend_likes, &mut report);
        insert_all(&tx, &data.collections, &mut report);
        insert_all(&tx, &data.folders, &mut report);
        insert_all(&tx, &data.files, &mut report);
        insert_all(&tx, &data.file_categories, &mut report);
        insert_all(&tx, &data.file_category_associations, &mut report);
        insert_all(&tx, &data.shared_files, &mut report);
        insert_all(&tx, &data.activity_log, &mut report);

        if let Err(e) = tx.commit() {
            tracing::error!(error = %e, "commit failed, rolling back");
            // a failed COMMIT leaves the transaction open
            if !self.conn().is_autocommit() {
                match self.conn().execute_batch("ROLLBACK") {
                    Ok(()) => tracing::warn!("transaction rolled back"),
                    Err(rb) => tracing::error!(error = %rb, "rollback failed"),
                }
            }
            return Err(StoreError::Commit(e));
        }

        tracing::info!(
            inserted = report.inserted(),
            failed = report.failed(),
            "seed transaction committed"
        );
        Ok(report)
    }
}

fn insert_all<R: Record>(conn: &Connection, rows: &[R], report: &mut SeedReport) {
    let count = report.tables.entry(R::TABLE).or_default();
    for row in rows {
        match row.insert(conn) {
            Ok(_) => {
                count.inserted += 1;
                tracing::debug!(table = R::TABLE, row = %row.label(), "inserted");
            }
            Err(e) => {
                count.failed += 1;
                tracing::warn!(table = R::TABLE, row = %row.label(), error = %e, "insert failed");
            }
        }
    }
    tracing::info!(
        table = R::TABLE,
        inserted = count.inserted,
        failed = count.failed,
        "table seeded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::v001_initial::TABLES;

    fn fresh() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("seed.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn dataset_shape() {
        let data = SampleData::generate(Utc::now());
        assert_eq!(data.users.len(), 5);
        assert_eq!(data.file_categories.len(), 5);
        assert_eq!(data.file_category_associations.len(), data.files.len());

        // every reference points at a record built in the same dataset
        let user_ids: Vec<Uuid> = data.users.iter().map(|u| u.id).collect();
        let file_ids: Vec<Uuid> = data.files.iter().map(|f| f.id).collect();
        assert!(data.friends.iter().all(|f| user_ids.contains(&f.user_id) && user_ids.contains(&f.friend_id)));
        assert!(data.shared_files.iter().all(|s| file_ids.contains(&s.file_id)));
        assert!(data
            .folders
            .iter()
            .filter_map(|f| f.parent_id)
            .all(|p| data.folders.iter().any(|f| f.id == p)));
    }

    #[test]
    fn seeds_every_table() {
        let (_dir, mut db) = fresh();
        assert!(db.ensure_schema(None).unwrap());

        let data = SampleData::generate(Utc::now());
        let report = db.seed(&data).unwrap();

        assert_eq!(report.failed(), 0);
        assert_eq!(report.inserted(), data.total_rows());
        let order: Vec<&str> = report.tables.keys().copied().collect();
        assert_eq!(order, TABLES.to_vec());

        for table in TABLES {
            assert!(db.count_rows(table).unwrap() > 0, "{table} is empty");
        }

        let john = data.users[0].id;
        assert_eq!(db.list_files_for_user(john).unwrap().len(), 3);
        assert_eq!(db.list_friends_of(john).unwrap().len(), 2);
        assert_eq!(db.files_shared_with(data.users[1].id).unwrap().len(), 2);
        assert!(!db.recent_activity(john, 10).unwrap().is_empty());
    }

    #[test]
    fn second_run_skips_schema_but_duplicates_rows() {
        let (_dir, mut db) = fresh();

        assert!(db.ensure_schema(None).unwrap());
        db.seed(&SampleData::generate(Utc::now())).unwrap();

        assert!(!db.ensure_schema(None).unwrap());
        db.seed(&SampleData::generate(Utc::now())).unwrap();

        assert_eq!(db.count_rows("users").unwrap(), 10);
        assert_eq!(db.count_rows("file_categories").unwrap(), 10);
    }

    #[test]
    fn failing_rows_do_not_stop_the_run() {
        let (_dir, mut db) = fresh();
        db.ensure_schema(None).unwrap();

        let mut data = SampleData::generate(Utc::now());
        let now = Utc::now();
        data.friends.push(Friend {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            friend_id: Uuid::new_v4(),
            status: FriendStatus::Pending,
            created_at: now,
            updated_at: now,
        });

        let report = db.seed(&data).unwrap();
        assert_eq!(report.table("friends").failed, 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.inserted(), data.total_rows() - 1);
        assert_eq!(db.count_rows("activity_log").unwrap() as usize, data.activity_log.len());
    }

    /// Log sink for asserting on what a seeding run reported.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    // friend references are only checked at COMMIT
    const DEFERRED_SCHEMA: &str = "
        CREATE TABLE users (
            id TEXT PRIMARY KEY NOT NULL, email TEXT NOT NULL, username TEXT NOT NULL,
            first_name TEXT NOT NULL, last_name TEXT NOT NULL,
            created_at TEXT NOT NULL, updated_at TEXT NOT NULL
        );
        CREATE TABLE friends (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL
                REFERENCES users(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
            friend_id TEXT NOT NULL
                REFERENCES users(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
            status TEXT NOT NULL, created_at TEXT NOT NULL, updated_at TEXT NOT NULL
        );";

    #[test]
    fn failed_commit_rolls_back_everything() {
        let (_dir, mut db) = fresh();
        assert!(db.ensure_schema(Some(DEFERRED_SCHEMA)).unwrap());

        let generated = SampleData::generate(Utc::now());
        let now = Utc::now();
        let data = SampleData {
            users: generated.users.clone(),
            friends: vec![Friend {
                id: Uuid::new_v4(),
                user_id: generated.users[0].id,
                friend_id: Uuid::new_v4(),
                status: FriendStatus::Pending,
                created_at: now,
                updated_at: now,
            }],
            ..SampleData::default()
        };

        let logs = Captured::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || sink.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || db.seed(&data));

        assert!(matches!(result, Err(StoreError::Commit(_))));
        assert!(db.conn().is_autocommit());
        assert_eq!(db.count_rows("users").unwrap(), 0);
        assert_eq!(db.count_rows("friends").unwrap(), 0);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("commit failed, rolling back"), "{output}");
        assert!(output.contains("transaction rolled back"), "{output}");
    }

    #[test]
    fn seeding_without_schema_fails_every_row() {
        let (_dir, mut db) = fresh();
        let data = SampleData::generate(Utc::now());
        let report = db.seed(&data).unwrap();
        assert_eq!(report.inserted(), 0);
        assert_eq!(report.failed(), data.total_rows());
    }
}

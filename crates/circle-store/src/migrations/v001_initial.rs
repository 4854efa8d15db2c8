//! v001 -- Initial schema creation.
//!
//! Creates the eleven tables the sample dataset fills. Identifiers are UUID
//! v4 strings and timestamps are RFC-3339 text.

/// Tables created by [`UP_SQL`], in dependency order.
pub const TABLES: [&str; 11] = [
    "users",
    "friends",
    "friend_contexts",
    "friend_likes",
    "collections",
    "folders",
    "files",
    "file_categories",
    "file_category_associations",
    "shared_files",
    "activity_log",
];

/// Schema script executed when the marker table is missing.
pub const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    id         TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    email      TEXT NOT NULL,
    username   TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    created_at TEXT NOT NULL,               -- RFC-3339
    updated_at TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- Friendship edges and what they are about
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS friends (
    id         TEXT PRIMARY KEY NOT NULL,
    user_id    TEXT NOT NULL,               -- FK -> users(id)
    friend_id  TEXT NOT NULL,               -- FK -> users(id)
    status     TEXT NOT NULL,               -- pending / accepted / blocked
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,

    FOREIGN KEY (user_id)   REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (friend_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_friends_user ON friends(user_id);

CREATE TABLE IF NOT EXISTS friend_contexts (
    id         TEXT PRIMARY KEY NOT NULL,
    user_id    TEXT NOT NULL,
    friend_id  TEXT NOT NULL,
    context    TEXT NOT NULL,               -- "Work", "Book Club", ...
    created_at TEXT NOT NULL,

    FOREIGN KEY (user_id)   REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (friend_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS friend_likes (
    id         TEXT PRIMARY KEY NOT NULL,
    user_id    TEXT NOT NULL,
    friend_id  TEXT NOT NULL,
    created_at TEXT NOT NULL,

    FOREIGN KEY (user_id)   REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (friend_id) REFERENCES users(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Collections and folders
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS collections (
    id          TEXT PRIMARY KEY NOT NULL,
    user_id     TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,

    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS folders (
    id          TEXT PRIMARY KEY NOT NULL,
    user_id     TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    parent_id   TEXT,                       -- nullable FK -> folders(id)
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,

    FOREIGN KEY (user_id)   REFERENCES users(id)   ON DELETE CASCADE,
    FOREIGN KEY (parent_id) REFERENCES folders(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Files
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS files (
    id            TEXT PRIMARY KEY NOT NULL,
    user_id       TEXT NOT NULL,
    folder_id     TEXT,                     -- nullable FK -> folders(id)
    collection_id TEXT,                     -- nullable FK -> collections(id)
    key           TEXT NOT NULL,            -- object storage key
    name          TEXT NOT NULL,
    content_type  TEXT NOT NULL,
    size          INTEGER NOT NULL,
    uploaded_at   TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL,

    FOREIGN KEY (user_id)       REFERENCES users(id)       ON DELETE CASCADE,
    FOREIGN KEY (folder_id)     REFERENCES folders(id)     ON DELETE SET NULL,
    FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_files_user ON files(user_id);

CREATE TABLE IF NOT EXISTS file_categories (
    id         TEXT PRIMARY KEY NOT NULL,
    name       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS file_category_associations (
    file_id     TEXT NOT NULL,
    category_id TEXT NOT NULL,

    PRIMARY KEY (file_id, category_id),
    FOREIGN KEY (file_id)     REFERENCES files(id)           ON DELETE CASCADE,
    FOREIGN KEY (category_id) REFERENCES file_categories(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS shared_files (
    id          TEXT PRIMARY KEY NOT NULL,
    file_id     TEXT NOT NULL,
    shared_by   TEXT NOT NULL,              -- FK -> users(id)
    shared_with TEXT NOT NULL,              -- FK -> users(id)
    created_at  TEXT NOT NULL,

    FOREIGN KEY (file_id)     REFERENCES files(id) ON DELETE CASCADE,
    FOREIGN KEY (shared_by)   REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (shared_with) REFERENCES users(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Activity log
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS activity_log (
    id             TEXT PRIMARY KEY NOT NULL,
    user_id        TEXT NOT NULL,
    action_type    TEXT NOT NULL,
    action_details TEXT,                    -- JSON document
    created_at     TEXT NOT NULL,

    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_activity_user_ts
    ON activity_log(user_id, created_at DESC);
"#;

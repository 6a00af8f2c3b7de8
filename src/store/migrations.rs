pub const BASE_MIGRATION: &str = r#"
CREATE TABLE IF NOT EXISTS directions (
    id TEXT PRIMARY KEY NOT NULL,
    order_default INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS course_groups (
    id TEXT PRIMARY KEY NOT NULL,
    direction_id TEXT NOT NULL,
    title TEXT NOT NULL,
    subtitle TEXT,
    order_in_direction INTEGER NOT NULL DEFAULT 0,
    course_slugs TEXT NOT NULL DEFAULT '[]'
);
CREATE INDEX IF NOT EXISTS idx_course_groups_direction
    ON course_groups(direction_id, order_in_direction);

CREATE TABLE IF NOT EXISTS direction_weights (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    direction_id TEXT NOT NULL,
    source TEXT NOT NULL,
    source_value TEXT NOT NULL,
    weight REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_direction_weights_source
    ON direction_weights(source, source_value);

CREATE TABLE IF NOT EXISTS profiles (
    user_id TEXT PRIMARY KEY NOT NULL,
    goals TEXT NOT NULL DEFAULT '[]',
    priority_tracks TEXT NOT NULL DEFAULT '[]',
    context TEXT,
    ai_level TEXT,
    code_level TEXT,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS course_enrollments (
    user_id TEXT NOT NULL,
    course_slug TEXT NOT NULL,
    status TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (user_id, course_slug)
);
"#;

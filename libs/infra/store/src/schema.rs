// [libs/infra/store/src/schema.rs]
/*!
 * APARATO: ESQUEMA SOBERANO (DDL)
 * RESPONSABILIDAD: Bootstrap idempotente de las tablas persistentes.
 */

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id              TEXT PRIMARY KEY,
        key_hash        TEXT NOT NULL UNIQUE,
        key_prefix      TEXT NOT NULL,
        status          TEXT NOT NULL,
        created_at      TEXT NOT NULL,
        last_activity_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS enrollment_tokens (
        token_hash   TEXT PRIMARY KEY,
        consumed_at  TEXT,
        created_at   TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nodes (
        id               TEXT PRIMARY KEY,
        account_id       TEXT,
        public_key       TEXT NOT NULL,
        model_name       TEXT NOT NULL,
        max_context      INTEGER NOT NULL,
        vram_gb          REAL NOT NULL,
        gpu_name         TEXT NOT NULL,
        model_params_b   REAL NOT NULL,
        quant            TEXT NOT NULL,
        tokens_per_second REAL NOT NULL,
        tier             TEXT NOT NULL,
        supports_vision  INTEGER NOT NULL,
        reputation       REAL NOT NULL,
        tasks_completed  INTEGER NOT NULL,
        created_at       TEXT NOT NULL,
        last_seen_at     TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id               TEXT PRIMARY KEY,
        principal_id     TEXT NOT NULL,
        mode             TEXT NOT NULL,
        difficulty       TEXT NOT NULL,
        original_prompt  TEXT NOT NULL,
        final_response   TEXT,
        status           TEXT NOT NULL,
        has_files        INTEGER NOT NULL,
        created_at       TEXT NOT NULL,
        completed_at     TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subtasks (
        id                TEXT PRIMARY KEY,
        task_id           TEXT NOT NULL,
        node_id           TEXT,
        prompt            TEXT NOT NULL,
        response          TEXT,
        status            TEXT NOT NULL,
        assigned_at       TEXT,
        completed_at      TEXT,
        execution_time_ms INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reputation_events (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        node_id  TEXT NOT NULL,
        delta    REAL NOT NULL,
        reason   TEXT NOT NULL,
        at       TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_subtasks_task_id ON subtasks(task_id)",
    "CREATE INDEX IF NOT EXISTS idx_reputation_events_node_id ON reputation_events(node_id)",
];

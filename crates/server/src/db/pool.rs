use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run the full Postgres schema migration inline.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Game sessions. last_seq is the append cursor: the sequence number of the
-- most recent snapshot, bumped inside the append transaction.
CREATE TABLE IF NOT EXISTS games (
    id           BIGSERIAL PRIMARY KEY,
    game_id      UUID UNIQUE NOT NULL,
    white_player BYTEA,
    black_player BYTEA,
    last_seq     BIGINT NOT NULL DEFAULT 0,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Append-only board history, ordered by seq within a game.
-- The UNIQUE constraint doubles as the index behind history reads.
CREATE TABLE IF NOT EXISTS board_states (
    id             BIGSERIAL PRIMARY KEY,
    game_id        UUID NOT NULL REFERENCES games(game_id),
    seq            BIGINT NOT NULL,
    board          BYTEA NOT NULL,
    move_author    TEXT,
    piece_moved    INTEGER,
    piece_taken    INTEGER,
    start_position TEXT,
    end_position   TEXT,
    is_check       BOOLEAN NOT NULL DEFAULT FALSE,
    is_checkmate   BOOLEAN NOT NULL DEFAULT FALSE,
    created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (game_id, seq)
);
"#;

//! SQL schema for the scheduling table.
//!
//! The column set matches the original trainer's database so an existing
//! `sm.sqlite` opens unchanged. The unique index is an addition: the original
//! assumed (type, item) uniqueness without enforcing it.

/// Schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sm2 (
    type INTEGER NOT NULL,   -- 0 = position, 1 = name
    item TEXT NOT NULL,      -- state name
    ef   REAL NOT NULL,      -- easiness factor, >= 1.3
    next INT,                -- epoch seconds; NULL = due now
    reps INT                 -- consecutive successful recalls
);

CREATE UNIQUE INDEX IF NOT EXISTS sm2_type_item_idx ON sm2(type, item);
";

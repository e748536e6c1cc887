//! SQL schema for the Digidex SQLite store.
//!
//! Executed once at connection startup. The catalog itself is loaded from
//! seed scripts; the service never writes to these tables.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS digimon (
    id           INTEGER PRIMARY KEY,
    name         TEXT    NOT NULL,
    xantibody    INTEGER NOT NULL DEFAULT 0,   -- 0 | 1
    release_date TEXT    NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS level (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS field (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS \"type\" (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS attribute (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS skill (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS digimon_description (
    id          INTEGER PRIMARY KEY,
    id_digimon  INTEGER NOT NULL REFERENCES digimon(id),
    origin      TEXT    NOT NULL DEFAULT '',
    language    TEXT    NOT NULL DEFAULT '',
    description TEXT    NOT NULL DEFAULT ''
);

-- Many-to-many links between digimon and the lookup tables.
CREATE TABLE IF NOT EXISTS digimon_level (
    id_digimon INTEGER NOT NULL REFERENCES digimon(id),
    id_level   INTEGER NOT NULL REFERENCES level(id),
    PRIMARY KEY (id_digimon, id_level)
);

CREATE TABLE IF NOT EXISTS digimon_field (
    id_digimon INTEGER NOT NULL REFERENCES digimon(id),
    id_field   INTEGER NOT NULL REFERENCES field(id),
    PRIMARY KEY (id_digimon, id_field)
);

CREATE TABLE IF NOT EXISTS digimon_type (
    id_digimon INTEGER NOT NULL REFERENCES digimon(id),
    id_type    INTEGER NOT NULL REFERENCES \"type\"(id),
    PRIMARY KEY (id_digimon, id_type)
);

CREATE TABLE IF NOT EXISTS digimon_attribute (
    id_digimon   INTEGER NOT NULL REFERENCES digimon(id),
    id_attribute INTEGER NOT NULL REFERENCES attribute(id),
    PRIMARY KEY (id_digimon, id_attribute)
);

CREATE TABLE IF NOT EXISTS digimon_skill (
    id_digimon INTEGER NOT NULL REFERENCES digimon(id),
    id_skill   INTEGER NOT NULL REFERENCES skill(id),
    PRIMARY KEY (id_digimon, id_skill)
);

-- Directed evolution edges: prior -> next.
CREATE TABLE IF NOT EXISTS digivolution (
    id_digimon_prior INTEGER NOT NULL REFERENCES digimon(id),
    id_digimon_next  INTEGER NOT NULL REFERENCES digimon(id),
    condition        TEXT    NOT NULL DEFAULT '',
    PRIMARY KEY (id_digimon_prior, id_digimon_next)
);

CREATE INDEX IF NOT EXISTS digimon_name_idx          ON digimon(name);
CREATE INDEX IF NOT EXISTS description_digimon_idx   ON digimon_description(id_digimon);
CREATE INDEX IF NOT EXISTS digimon_level_rev_idx     ON digimon_level(id_level);
CREATE INDEX IF NOT EXISTS digimon_field_rev_idx     ON digimon_field(id_field);
CREATE INDEX IF NOT EXISTS digimon_type_rev_idx      ON digimon_type(id_type);
CREATE INDEX IF NOT EXISTS digimon_attribute_rev_idx ON digimon_attribute(id_attribute);
CREATE INDEX IF NOT EXISTS digivolution_next_idx     ON digivolution(id_digimon_next);

PRAGMA user_version = 1;
";

//! SQL schema for the pitstop SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- ── Reference taxonomy ────────────────────────────────────────────────────

-- Manufacturer, make, model, and variable ids come from the upstream
-- reference source and are inserted verbatim.
CREATE TABLE IF NOT EXISTS manufacturers (
    manufacturer_id INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    refreshed_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS makes (
    make_id         INTEGER PRIMARY KEY,
    manufacturer_id INTEGER NOT NULL REFERENCES manufacturers(manufacturer_id),
    name            TEXT NOT NULL,
    external_code   TEXT,
    refreshed_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS models (
    model_id     INTEGER PRIMARY KEY,
    make_id      INTEGER NOT NULL REFERENCES makes(make_id),
    name         TEXT NOT NULL,
    refreshed_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vehicle_types (
    vehicle_type_id INTEGER PRIMARY KEY AUTOINCREMENT,
    make_id         INTEGER NOT NULL REFERENCES makes(make_id),
    name            TEXT NOT NULL,
    external_code   TEXT NOT NULL,
    refreshed_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vehicle_variables (
    variable_id  INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    description  TEXT,
    refreshed_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vehicle_variable_values (
    value_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    variable_id   INTEGER NOT NULL REFERENCES vehicle_variables(variable_id),
    value         TEXT NOT NULL,
    external_code TEXT,
    refreshed_at  TEXT NOT NULL
);

-- ── Vehicle registry ──────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS vehicles (
    vehicle_id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind       TEXT NOT NULL,    -- 'passenger_truck' | 'van' | 'commercial_truck'
    make       TEXT NOT NULL,
    model      TEXT NOT NULL,
    year       INTEGER NOT NULL,
    vin        TEXT
);

-- ── Part fitment ──────────────────────────────────────────────────────────

-- Taxonomy references are soft: a fitment stays valid across taxonomy
-- refreshes, so no foreign keys here.
CREATE TABLE IF NOT EXISTS part_fitments (
    fitment_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    part_number_id  INTEGER NOT NULL,
    manufacturer_id INTEGER,
    make_id         INTEGER,
    model_id        INTEGER,
    vehicle_type_id INTEGER,
    year            TEXT,            -- free-text year or range
    engine_type     TEXT,
    submodel        TEXT,
    notes           TEXT
);

CREATE TABLE IF NOT EXISTS fitment_variable_values (
    fitment_id INTEGER NOT NULL
               REFERENCES part_fitments(fitment_id) ON DELETE CASCADE,
    value_id   INTEGER NOT NULL,
    PRIMARY KEY (fitment_id, value_id)
);

-- ── Catalog ───────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS products (
    product_id               INTEGER PRIMARY KEY AUTOINCREMENT,
    name                     TEXT NOT NULL,
    short_description        TEXT,
    long_description         TEXT,
    sku                      TEXT,
    manufacturer_part_number TEXT,
    manufacturer_name        TEXT,
    brand                    TEXT,
    country_of_origin        TEXT,
    material                 TEXT,
    color                    TEXT,
    warranty                 TEXT
);

CREATE TABLE IF NOT EXISTS service_items (
    service_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT NOT NULL,
    short_description TEXT,
    long_description  TEXT
);

CREATE TABLE IF NOT EXISTS non_inventory_products (
    product_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT NOT NULL,
    short_description TEXT,
    long_description  TEXT
);

-- ── People / locations / customers ────────────────────────────────────────

CREATE TABLE IF NOT EXISTS people (
    person_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    primary_email   TEXT NOT NULL,
    secondary_email TEXT,
    phone_numbers   TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    username        TEXT
);

CREATE TABLE IF NOT EXISTS locations (
    location_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name                  TEXT NOT NULL,
    address_line1         TEXT NOT NULL,
    address_line2         TEXT,
    city                  TEXT NOT NULL,
    state                 TEXT NOT NULL,
    postal_code           TEXT NOT NULL,
    country               TEXT NOT NULL,
    mailing_address       TEXT,
    responsible_person_id INTEGER
);

CREATE TABLE IF NOT EXISTS customers (
    customer_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    kind            TEXT NOT NULL,    -- 'private' | 'commercial' | 'government'
    customer_number TEXT NOT NULL UNIQUE,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    phone_number    TEXT,
    email           TEXT,
    vehicle_vins    TEXT NOT NULL DEFAULT '[]'    -- JSON array of strings
);

-- ── Events ────────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS preregistered_events (
    id TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS emitted_events (
    event_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    id        TEXT NOT NULL,
    timestamp INTEGER NOT NULL     -- caller-submitted, epoch milliseconds
);

-- ── Auth ──────────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS roles (
    role_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS users (
    user_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,       -- argon2 PHC string
    roles         TEXT NOT NULL DEFAULT '[]'     -- JSON array of role names
);

CREATE TABLE IF NOT EXISTS auth_tokens (
    token_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    token      TEXT NOT NULL UNIQUE,
    subject    TEXT NOT NULL,
    issued_at  TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

-- ── Shops ─────────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS shops (
    shop_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    address TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS technicians (
    technician_id INTEGER PRIMARY KEY AUTOINCREMENT,
    shop_id       INTEGER NOT NULL REFERENCES shops(shop_id),
    person_id     INTEGER NOT NULL
);

-- VIN uniqueness is enforced for non-NULL VINs only.
CREATE UNIQUE INDEX IF NOT EXISTS vehicles_vin_idx
    ON vehicles(vin) WHERE vin IS NOT NULL;

CREATE INDEX IF NOT EXISTS makes_manufacturer_idx  ON makes(manufacturer_id);
CREATE INDEX IF NOT EXISTS models_make_idx         ON models(make_id);
CREATE INDEX IF NOT EXISTS vehicle_types_make_idx  ON vehicle_types(make_id);
CREATE INDEX IF NOT EXISTS variable_values_idx     ON vehicle_variable_values(variable_id);
CREATE INDEX IF NOT EXISTS fitments_part_idx       ON part_fitments(part_number_id);
CREATE INDEX IF NOT EXISTS emitted_events_id_idx   ON emitted_events(id);
CREATE INDEX IF NOT EXISTS technicians_shop_idx    ON technicians(shop_id);

PRAGMA user_version = 1;
";

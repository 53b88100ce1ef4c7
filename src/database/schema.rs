/// Tables created on start when `DATABASE_BOOTSTRAP_SCHEMA` is on.
/// Existing tables are left untouched.
pub const STATEMENTS: [&str; 3] = [
    r#"CREATE TABLE IF NOT EXISTS packager (
    id SERIAL PRIMARY KEY,
    first_name VARCHAR NOT NULL,
    last_name VARCHAR,
    initials VARCHAR NOT NULL,
    active BOOLEAN NOT NULL DEFAULT TRUE
)"#,
    r#"CREATE TABLE IF NOT EXISTS carrier (
    id SERIAL PRIMARY KEY,
    name VARCHAR NOT NULL,
    active BOOLEAN NOT NULL DEFAULT TRUE
)"#,
    r#"CREATE TABLE IF NOT EXISTS shipment (
    id SERIAL PRIMARY KEY,
    reference INTEGER,
    carrier_id INTEGER NOT NULL REFERENCES carrier (id),
    packages INTEGER NOT NULL CHECK (packages > 0),
    weight DOUBLE PRECISION NOT NULL CHECK (weight > 0),
    tracking VARCHAR,
    packaged_by INTEGER NOT NULL REFERENCES packager (id),
    create_date TIMESTAMP NOT NULL DEFAULT timezone('utc', now())
)"#,
];

pub fn ddl() -> String {
    STATEMENTS.iter().map(|s| format!("{};\n", s)).collect::<Vec<_>>().join("\n")
}

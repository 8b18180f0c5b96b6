use anyhow::Result;

use crate::{Code, Connection, Null, Statement, Type};

fn setup_users() -> Result<Connection> {
    let mut c = Connection::new();
    assert!(c.open(":memory:"));

    c.execute(
        "CREATE TABLE users (id INTEGER, name TEXT, age REAL, photo BLOB, email TEXT)",
        (),
    )?;
    c.execute(
        "INSERT INTO users VALUES (1, 'Alice', 42.69, X'4269', NULL)",
        (),
    )?;

    Ok(c)
}

#[test]
fn connection_changes() -> Result<()> {
    let c = setup_users()?;
    assert_eq!(c.changes(), 1);
    assert_eq!(c.total_changes(), 1);

    c.execute("INSERT INTO users VALUES (2, 'Bob', NULL, NULL, NULL)", ())?;
    assert_eq!(c.changes(), 1);
    assert_eq!(c.total_changes(), 2);

    c.execute("UPDATE users SET name = 'Bob' WHERE id = 1", ())?;
    assert_eq!(c.changes(), 1);
    assert_eq!(c.total_changes(), 3);

    c.execute("DELETE FROM users", ())?;
    assert_eq!(c.changes(), 2);
    assert_eq!(c.total_changes(), 5);
    Ok(())
}

#[test]
fn connection_prepare_error() -> Result<()> {
    let c = setup_users()?;
    let e = c.prepare(":)").unwrap_err();
    assert_eq!(e.code(), Code::ERROR);
    assert_eq!(e.operation(), "prepare");
    assert_eq!(e.query(), ":)");
    assert_eq!(format!("{e}"), format!("prepare: {} IN :)", e.message()));
    Ok(())
}

#[test]
fn connection_closed() {
    let c = Connection::new();
    assert!(!c.is_open());

    let e = c.prepare("SELECT 1").unwrap_err();
    assert_eq!(e.code(), Code::MISUSE);
    assert_eq!(e.operation(), "prepare");
    assert_eq!(e.query(), "SELECT 1");

    assert_eq!(c.changes(), 0);
    assert_eq!(c.last_insert_rowid(), 0);
    assert_eq!(c.error(), Code::MISUSE);
}

#[test]
fn connection_close_idempotent() -> Result<()> {
    let mut c = setup_users()?;
    c.close();
    assert!(!c.is_open());
    c.close();
    assert!(!c.is_open());
    Ok(())
}

#[test]
fn connection_close_with_live_statement() -> Result<()> {
    let mut c = setup_users()?;
    let mut stmt = c.prepare("SELECT name FROM users")?;

    c.close();
    assert!(!c.is_open());

    // The engine keeps the database alive for the unfinalized statement.
    assert!(stmt.next()?);
    assert_eq!(stmt.get::<String>(0)?, "Alice");

    // The connection itself is detached and free for reuse.
    assert!(c.open(":memory:"));
    Ok(())
}

#[test]
fn connection_reopen_replaces() -> Result<()> {
    let mut c = setup_users()?;

    // A fresh in-memory database has no tables.
    assert!(c.open(":memory:"));
    let e = c.prepare("SELECT * FROM users").unwrap_err();
    assert_eq!(e.operation(), "prepare");
    Ok(())
}

#[test]
fn connection_failed_open_preserved() -> Result<()> {
    let mut c = setup_users()?;

    assert!(!c.open("/nonexistent-dir/database.sqlite3"));
    assert!(c.is_open());

    // The original database is untouched by the failed open.
    assert_eq!(c.query::<i64, _>("SELECT count(*) FROM users", ())?, 1);
    Ok(())
}

#[test]
fn connection_last_insert_rowid() -> Result<()> {
    let mut c = Connection::new();
    assert!(c.open(":memory:"));

    c.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)", ())?;
    assert_eq!(c.last_insert_rowid(), 0);

    c.execute("INSERT INTO t (v) VALUES ('a')", ())?;
    assert_eq!(c.last_insert_rowid(), 1);

    c.execute("INSERT INTO t (id, v) VALUES (42, 'b')", ())?;
    assert_eq!(c.last_insert_rowid(), 42);
    Ok(())
}

#[test]
fn connection_errmsg_format() -> Result<()> {
    let mut c = Connection::new();
    assert!(c.open(":memory:"));

    c.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)", ())?;
    c.execute("INSERT INTO t VALUES (1)", ())?;

    let e = c.execute("INSERT INTO t VALUES (1)", ()).unwrap_err();
    assert_eq!(e.code(), Code::CONSTRAINT);
    assert_eq!(Code::new(e.extended()), Code::CONSTRAINT_PRIMARYKEY);

    // SQLITE_CONSTRAINT is 19, SQLITE_CONSTRAINT_PRIMARYKEY is 1555.
    let msg = c.errmsg();
    assert!(msg.starts_with("13:06 "), "{msg}");
    assert_eq!(c.error(), Code::CONSTRAINT);
    Ok(())
}

#[test]
fn statement_bind_variadic_matches_sequential() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("INSERT INTO users VALUES (?, ?, ?, ?, ?)")?;
    stmt.bind((2, "Bob", 69.42, &[0x69u8, 0x42][..], Null))?;
    stmt.execute()?;

    let mut stmt = c.prepare("INSERT INTO users VALUES (?, ?, ?, ?, ?)")?;
    stmt.bind_value(3)?;
    stmt.bind_value("Carol")?;
    stmt.bind_value(12.5)?;
    stmt.bind_value(&[0x42u8, 0x69][..])?;
    stmt.bind_value(Null)?;
    stmt.execute()?;

    assert_eq!(c.query::<i64, _>("SELECT count(*) FROM users", ())?, 3);
    Ok(())
}

#[test]
fn statement_bind_nullable() -> Result<()> {
    let c = setup_users()?;

    c.execute(
        "INSERT INTO users VALUES (?, ?, ?, ?, ?)",
        (
            None::<i64>,
            None::<&str>,
            None::<f64>,
            None::<&[u8]>,
            None::<&str>,
        ),
    )?;

    c.execute(
        "INSERT INTO users VALUES (?, ?, ?, ?, ?)",
        (
            Some(2i64),
            Some("Bob"),
            Some(69.42),
            Some(&[0x69u8, 0x42][..]),
            None::<&str>,
        ),
    )?;

    let mut stmt = c.prepare("SELECT * FROM users WHERE id IS NULL")?;
    assert!(stmt.next()?);
    assert!(stmt.null(0));
    assert!(stmt.null(1));
    Ok(())
}

#[test]
fn statement_bind_past_last_parameter() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("SELECT ?")?;
    stmt.bind_value(1)?;

    let e = stmt.bind_value(2).unwrap_err();
    assert_eq!(e.code(), Code::RANGE);
    assert_eq!(e.operation(), "bind");
    assert_eq!(e.query(), "SELECT ?");

    // Resetting rewinds the cursor to the first position.
    stmt.reset()?;
    stmt.bind_value(1)?;
    Ok(())
}

#[test]
fn statement_exhaustion_resets() -> Result<()> {
    let c = setup_users()?;
    c.execute("INSERT INTO users VALUES (2, 'Bob', NULL, NULL, NULL)", ())?;

    let mut stmt = c.prepare("SELECT name FROM users WHERE id >= ? ORDER BY id")?;

    stmt.bind_value(1)?;
    assert!(stmt.next()?);
    assert_eq!(stmt.get::<String>(0)?, "Alice");
    assert!(stmt.next()?);
    assert!(!stmt.next()?);

    // Exhaustion reset the statement; it can be bound and run again.
    stmt.bind_value(2)?;
    assert!(stmt.next()?);
    assert_eq!(stmt.get::<String>(0)?, "Bob");
    assert!(!stmt.next()?);
    Ok(())
}

#[test]
fn statement_execute_rejects_rows() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("SELECT * FROM users")?;
    let e = stmt.execute().unwrap_err();
    assert_eq!(e.operation(), "step !done");
    assert_eq!(e.query(), "SELECT * FROM users");
    Ok(())
}

#[test]
fn statement_query_no_data() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("SELECT id FROM users WHERE id = ?")?;
    assert_eq!(stmt.query::<i64, _>(1)?, 1);

    let e = stmt.query::<i64, _>(404).unwrap_err();
    assert_eq!(e.operation(), "no data");
    Ok(())
}

#[test]
fn statement_get_by_name() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("SELECT id, name, photo AS user_photo FROM users")?;
    assert!(stmt.next()?);

    assert_eq!(stmt.get_by_name::<i64>("id")?, 1);
    assert_eq!(stmt.get_by_name::<String>("name")?, "Alice");
    assert_eq!(stmt.get_by_name::<Vec<u8>>("user_photo")?, [0x42, 0x69]);

    let e = stmt.get_by_name::<i64>("missing").unwrap_err();
    assert_eq!(e.operation(), "no such column");
    Ok(())
}

#[test]
fn statement_columns() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("SELECT * FROM users")?;
    assert_eq!(stmt.width(), 5);
    assert_eq!(stmt.name(0), Some("id"));
    assert_eq!(stmt.name(4), Some("email"));
    assert_eq!(stmt.name(5), None);

    assert!(stmt.next()?);
    assert_eq!(stmt.width(), 5);
    assert_eq!(stmt.column_type(0), Type::INTEGER);
    assert_eq!(stmt.column_type(1), Type::TEXT);
    assert_eq!(stmt.column_type(2), Type::FLOAT);
    assert_eq!(stmt.column_type(3), Type::BLOB);
    assert_eq!(stmt.column_type(4), Type::NULL);
    assert!(!stmt.null(0));
    assert!(stmt.null(4));

    // Out-of-range columns report NULL rather than failing.
    assert_eq!(stmt.column_type(5), Type::NULL);
    Ok(())
}

#[test]
fn statement_read() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("SELECT * FROM users")?;
    assert!(stmt.next()?);

    assert_eq!(stmt.get::<i32>(0)?, 1);
    assert_eq!(stmt.get::<i64>(0)?, 1);
    assert_eq!(stmt.get::<String>(1)?, "Alice");
    assert_eq!(stmt.get::<f64>(2)?, 42.69);
    assert_eq!(stmt.get::<Vec<u8>>(3)?, [0x42, 0x69]);

    // NULL cells read empty through text and blob conversions.
    assert_eq!(stmt.get::<String>(4)?, "");
    assert_eq!(stmt.get::<Vec<u8>>(4)?, Vec::<u8>::new());
    Ok(())
}

#[test]
fn statement_blob_round_trip() -> Result<()> {
    let mut c = Connection::new();
    assert!(c.open(":memory:"));

    c.execute("CREATE TABLE files (data BLOB)", ())?;
    c.execute("INSERT INTO files VALUES (?)", &[0x01u8, 0x02, 0x03][..])?;
    c.execute("INSERT INTO files VALUES (?)", &b""[..])?;
    c.execute("INSERT INTO files VALUES (?)", Null)?;

    let mut stmt = c.prepare("SELECT data FROM files ORDER BY rowid")?;

    assert!(stmt.next()?);
    assert_eq!(stmt.get::<Vec<u8>>(0)?, [0x01, 0x02, 0x03]);

    // The empty blob stays a blob, distinguishable from NULL.
    assert!(stmt.next()?);
    assert_eq!(stmt.column_type(0), Type::BLOB);
    assert!(!stmt.null(0));
    assert_eq!(stmt.get::<Vec<u8>>(0)?, Vec::<u8>::new());

    assert!(stmt.next()?);
    assert!(stmt.null(0));
    assert_eq!(stmt.get::<Vec<u8>>(0)?, Vec::<u8>::new());
    Ok(())
}

#[test]
fn statement_bind_u64_reinterprets() -> Result<()> {
    let mut c = Connection::new();
    assert!(c.open(":memory:"));

    assert_eq!(c.query::<i64, _>("SELECT ?", u64::MAX)?, -1);
    assert_eq!(c.query::<i64, _>("SELECT ?", u64::MAX - 1)?, -2);
    assert_eq!(c.query::<i64, _>("SELECT ?", 42u64)?, 42);
    Ok(())
}

#[test]
fn statement_inert() {
    let mut stmt = Statement::default();
    assert!(stmt.empty());
    assert_eq!(stmt.width(), 0);
    assert_eq!(stmt.name(0), None);
    assert_eq!(stmt.column_type(0), Type::NULL);

    let e = stmt.next().unwrap_err();
    assert_eq!(e.code(), Code::MISUSE);
    assert_eq!(e.query(), "--empty--");

    let e = stmt.execute().unwrap_err();
    assert_eq!(e.operation(), "step !done");

    let e = stmt.get::<i64>(0).unwrap_err();
    assert_eq!(e.operation(), "column");

    // Reset is the one operation tolerated on an inert statement.
    assert!(stmt.reset().is_ok());
}

#[test]
fn statement_taken_goes_inert() -> Result<()> {
    let c = setup_users()?;

    let mut stmt = c.prepare("SELECT count(*) FROM users")?;
    assert!(!stmt.empty());

    let mut taken = std::mem::take(&mut stmt);
    assert!(stmt.empty());
    assert!(!taken.empty());
    assert_eq!(taken.query::<i64, _>(())?, 1);
    Ok(())
}

#[test]
fn statement_blank_query() -> Result<()> {
    let c = setup_users()?;
    assert!(c.prepare("")?.empty());
    assert!(c.prepare("  -- nothing here")?.empty());
    Ok(())
}

#[test]
fn statement_interior_nul_rejected() -> Result<()> {
    let c = setup_users()?;
    let e = c.prepare("SELECT 1\0DROP TABLE users").unwrap_err();
    assert_eq!(e.code(), Code::MISUSE);
    assert_eq!(e.operation(), "prepare");
    Ok(())
}

#[test]
fn statement_text_coercion() -> Result<()> {
    let mut c = Connection::new();
    assert!(c.open(":memory:"));

    // Conversions follow the engine's coercion rules.
    assert_eq!(c.query::<i64, _>("SELECT '42'", ())?, 42);
    assert_eq!(c.query::<String, _>("SELECT 42", ())?, "42");
    assert_eq!(c.query::<f64, _>("SELECT '1.5'", ())?, 1.5);
    Ok(())
}

#[test]
fn global_initialize() {
    assert!(crate::initialize());
    // Initialization is idempotent once the library is live.
    assert!(crate::initialize());
}

#[test]
fn version() {
    assert!(crate::lib_version().starts_with("3."));
    assert!(matches!(crate::lib_version_number(), 3000000..4000000));
}

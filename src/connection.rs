use std::fmt;
use std::path::Path;
use std::ptr;

use crate::bind::Bind;
use crate::error::{Code, Error, Result};
use crate::ffi;
use crate::from_column::FromColumn;
use crate::statement::Statement;
use crate::utils;

/// A database connection.
///
/// A connection starts closed and is attached to a database with [`open`].
/// Opening another database on the same connection closes the previous one
/// first, and dropping the connection closes it. Prepared statements borrow
/// nothing from the connection; the engine refuses to close a database while
/// statements prepared from it are still alive, so dropping the connection
/// first leaves such statements usable against the still-live database.
///
/// [`open`]: Connection::open
///
/// # Examples
///
/// ```
/// use sqv::Connection;
///
/// let mut c = Connection::new();
/// assert!(c.open(":memory:"));
///
/// c.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
/// c.execute("INSERT INTO users VALUES (?, ?)", ("Alice", 42))?;
/// assert_eq!(c.changes(), 1);
///
/// let age = c.query::<i64, _>("SELECT age FROM users WHERE name = ?", "Alice")?;
/// assert_eq!(age, 42);
/// # Ok::<_, sqv::Error>(())
/// ```
pub struct Connection {
    raw: *mut ffi::sqlite3,
}

/// A connection is `Send`.
unsafe impl Send for Connection {}

impl Connection {
    /// Construct a closed connection.
    #[inline]
    pub fn new() -> Connection {
        Connection {
            raw: ptr::null_mut(),
        }
    }

    /// Returns `true` if the connection currently holds an open database.
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.raw.is_null()
    }

    /// Open a read-write connection to a new or existing database.
    ///
    /// `path` can be a filesystem path, or `:memory:` to construct an
    /// in-memory database. Returns `true` on success. On success any database
    /// previously held by this connection is closed first; on failure the
    /// previous database stays open and usable.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqv::Connection;
    ///
    /// let mut c = Connection::new();
    /// assert!(!c.open("/nonexistent-dir/db"));
    /// assert!(!c.is_open());
    ///
    /// assert!(c.open(":memory:"));
    /// assert!(c.is_open());
    /// ```
    pub fn open(&mut self, path: impl AsRef<Path>) -> bool {
        let Some(path) = utils::path_to_cstring(path.as_ref()) else {
            return false;
        };

        unsafe {
            let mut raw = ptr::null_mut();
            let code = ffi::sqlite3_open(path.as_ptr(), &mut raw);

            if code != ffi::SQLITE_OK {
                // The engine hands back a handle even on failure, carrying the
                // error state. It must still be closed.
                ffi::sqlite3_close(raw);
                return false;
            }

            self.close();
            self.raw = raw;
        }

        true
    }

    /// Close the database held by this connection, if any.
    ///
    /// Closing an already-closed connection is a no-op. The engine refuses to
    /// tear down a database that still has unfinalized statements; the handle
    /// is detached from this connection either way, and such statements keep
    /// operating on the still-live database.
    #[inline]
    pub fn close(&mut self) {
        if self.raw.is_null() {
            return;
        }

        unsafe { ffi::sqlite3_close(self.raw) };
        self.raw = ptr::null_mut();
    }

    /// Create a prepared statement.
    ///
    /// # Errors
    ///
    /// Fails with operation `"prepare"` if the connection is closed or the
    /// query does not compile.
    ///
    /// ```
    /// use sqv::{Code, Connection};
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// let e = c.prepare("NOT VALID SQL").unwrap_err();
    /// assert_eq!(e.operation(), "prepare");
    /// assert_eq!(e.code(), Code::ERROR);
    /// assert_eq!(e.query(), "NOT VALID SQL");
    /// # Ok::<_, sqv::Error>(())
    /// ```
    pub fn prepare(&self, query: impl AsRef<str>) -> Result<Statement> {
        let query = query.as_ref();

        if self.raw.is_null() {
            return Err(Error::with_code("prepare", Code::MISUSE, query));
        }

        let sql = utils::string_to_cstring("prepare", query)?;

        unsafe {
            let mut raw = ptr::null_mut();
            let code =
                ffi::sqlite3_prepare_v2(self.raw, sql.as_ptr(), -1, &mut raw, ptr::null_mut());

            if code != ffi::SQLITE_OK {
                ffi::sqlite3_finalize(raw);
                return Err(Error::from_connection("prepare", self.raw, query));
            }

            Ok(Statement::from_raw(raw))
        }
    }

    /// Prepare a query, bind the given arguments and drive it to completion,
    /// expecting it to produce no rows. Returns the number of rows changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqv::Connection;
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// c.execute("CREATE TABLE users (name TEXT)", ())?;
    /// assert_eq!(c.execute("INSERT INTO users VALUES (?)", "Alice")?, 1);
    /// # Ok::<_, sqv::Error>(())
    /// ```
    pub fn execute<A>(&self, query: impl AsRef<str>, args: A) -> Result<usize>
    where
        A: Bind,
    {
        let mut stmt = self.prepare(query)?;
        stmt.bind(args)?;
        stmt.execute()?;
        Ok(self.changes())
    }

    /// Prepare a query, bind the given arguments and return the first column
    /// of the first produced row converted to `T`.
    ///
    /// # Errors
    ///
    /// Fails with operation `"no data"` if the query produces no rows.
    pub fn query<T, A>(&self, query: impl AsRef<str>, args: A) -> Result<T>
    where
        T: FromColumn,
        A: Bind,
    {
        let mut stmt = self.prepare(query)?;
        stmt.query(args)
    }

    /// Return the number of rows inserted, updated, or deleted by the most
    /// recent INSERT, UPDATE, or DELETE statement.
    ///
    /// Reports zero on a closed connection.
    #[inline]
    pub fn changes(&self) -> usize {
        if self.raw.is_null() {
            return 0;
        }

        unsafe { ffi::sqlite3_changes(self.raw) as usize }
    }

    /// Return the total number of rows inserted, updated, and deleted by all
    /// INSERT, UPDATE, and DELETE statements since the database was opened.
    #[inline]
    pub fn total_changes(&self) -> usize {
        if self.raw.is_null() {
            return 0;
        }

        unsafe { ffi::sqlite3_total_changes(self.raw) as usize }
    }

    /// Return the rowid of the most recent successful INSERT.
    ///
    /// Reports zero on a closed connection or before the first insert.
    #[inline]
    pub fn last_insert_rowid(&self) -> i64 {
        if self.raw.is_null() {
            return 0;
        }

        unsafe { ffi::sqlite3_last_insert_rowid(self.raw) }
    }

    /// Return the primary status code of the most recent failed call on this
    /// connection.
    ///
    /// Reports [`Code::MISUSE`] on a closed connection.
    #[inline]
    pub fn error(&self) -> Code {
        if self.raw.is_null() {
            return Code::MISUSE;
        }

        unsafe { Code::new(ffi::sqlite3_errcode(self.raw)) }
    }

    /// Render the connection's most recent error as
    /// `"<primary:02X>:<extended-qualifier:02X> <message>"`, where the
    /// qualifier is the extended code shifted down past its primary-code
    /// byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqv::Connection;
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// c.execute("CREATE TABLE users (id INTEGER PRIMARY KEY)", ())?;
    /// c.execute("INSERT INTO users VALUES (1)", ())?;
    /// assert!(c.execute("INSERT INTO users VALUES (1)", ()).is_err());
    ///
    /// // SQLITE_CONSTRAINT (19) with the PRIMARYKEY qualifier (1555 >> 8 == 6).
    /// assert!(c.errmsg().starts_with("13:06 "));
    /// # Ok::<_, sqv::Error>(())
    /// ```
    pub fn errmsg(&self) -> String {
        unsafe {
            if self.raw.is_null() {
                let code = Code::MISUSE.as_raw();
                let message = utils::message_from(ffi::sqlite3_errstr(code));
                return format!("{:02X}:{:02X} {}", code, code >> 8, message);
            }

            let code = ffi::sqlite3_errcode(self.raw);
            let extended = ffi::sqlite3_extended_errcode(self.raw);
            let message = utils::message_from(ffi::sqlite3_errmsg(self.raw));
            format!("{:02X}:{:02X} {}", code, extended >> 8, message)
        }
    }
}

impl Default for Connection {
    #[inline]
    fn default() -> Self {
        Connection::new()
    }
}

impl fmt::Debug for Connection {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl Drop for Connection {
    #[inline]
    fn drop(&mut self) {
        self.close();
    }
}

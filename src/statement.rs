use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_int;
use std::ptr;

use crate::bind::Bind;
use crate::bind_value::BindValue;
use crate::error::{Error, Result};
use crate::ffi;
use crate::from_column::FromColumn;
use crate::ty::Type;

/// A marker type representing a SQL NULL value when binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Null;

/// A prepared statement.
///
/// Statements are created through [`Connection::prepare`] and own exactly one
/// compiled query. The compiled query is finalized when the statement is
/// dropped. Statements are move-only; the default value is an inert statement
/// holding no query, for which every operation other than [`empty`] fails.
///
/// Parameters are bound by a cursor: each [`bind_value`] call binds the next
/// 1-based position, and [`reset`] rewinds the cursor to the start.
///
/// Column accessors ([`width`], [`name`], [`null`], [`column_type`], [`get`])
/// are meaningful only while a row is available, that is after [`next`] has
/// returned `true`. Outside that state they delegate directly to the engine,
/// which may report stale values rather than failing.
///
/// [`Connection::prepare`]: crate::Connection::prepare
/// [`empty`]: Statement::empty
/// [`bind_value`]: Statement::bind_value
/// [`reset`]: Statement::reset
/// [`width`]: Statement::width
/// [`name`]: Statement::name
/// [`null`]: Statement::null
/// [`column_type`]: Statement::column_type
/// [`get`]: Statement::get
/// [`next`]: Statement::next
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
///
/// let mut insert = c.prepare("INSERT INTO users VALUES (?, ?)")?;
/// insert.bind(("Alice", 42))?;
/// insert.execute()?;
///
/// let mut select = c.prepare("SELECT age FROM users WHERE name = ?")?;
/// let age = select.query::<i64, _>("Alice")?;
/// assert_eq!(age, 42);
/// # Ok::<_, sqv::Error>(())
/// ```
pub struct Statement {
    raw: *mut ffi::sqlite3_stmt,
    cursor: c_int,
}

/// A prepared statement is `Send`.
unsafe impl Send for Statement {}

impl Statement {
    /// Construct a statement from a raw handle.
    #[inline]
    pub(crate) fn from_raw(raw: *mut ffi::sqlite3_stmt) -> Statement {
        Statement { raw, cursor: 0 }
    }

    /// Access the raw statement handle.
    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut ffi::sqlite3_stmt {
        self.raw
    }

    /// Returns `true` if the statement holds no compiled query.
    ///
    /// This is the case for default-constructed statements, for statements
    /// taken with [`std::mem::take`], and for statements prepared from blank
    /// query text. Every operation other than this check fails on an inert
    /// statement.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqv::{Connection, Statement};
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// assert!(Statement::default().empty());
    /// assert!(c.prepare("")?.empty());
    /// assert!(!c.prepare("SELECT 1")?.empty());
    /// # Ok::<_, sqv::Error>(())
    /// ```
    #[inline]
    pub fn empty(&self) -> bool {
        if self.raw.is_null() {
            return true;
        }

        unsafe { ffi::sqlite3_sql(self.raw).is_null() }
    }

    /// Bind a pack of values to the next parameter positions in order.
    ///
    /// Accepts a single bindable value, a tuple of up to eight values, or
    /// `()` to bind nothing. Each element advances the bind cursor by one,
    /// exactly as the corresponding sequence of [`bind_value`] calls would.
    ///
    /// [`bind_value`]: Statement::bind_value
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
    ///
    /// let mut stmt = c.prepare("INSERT INTO users VALUES (?, ?)")?;
    /// stmt.bind(("Alice", 42))?;
    /// stmt.execute()?;
    /// # Ok::<_, sqv::Error>(())
    /// ```
    #[inline]
    pub fn bind<A>(&mut self, args: A) -> Result<()>
    where
        A: Bind,
    {
        args.bind(self)
    }

    /// Bind a single value to the next parameter position.
    ///
    /// The cursor advances regardless of the value's type; positions are
    /// 1-based and strictly increasing until [`reset`].
    ///
    /// [`reset`]: Statement::reset
    ///
    /// # Errors
    ///
    /// Fails with operation `"bind"` if the engine rejects the binding, for
    /// example when the cursor has advanced past the last parameter.
    ///
    /// ```
    /// use sqv::{Code, Connection};
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// let mut stmt = c.prepare("SELECT ?")?;
    /// stmt.bind_value(1)?;
    /// let e = stmt.bind_value(2).unwrap_err();
    /// assert_eq!(e.code(), Code::RANGE);
    /// assert_eq!(e.operation(), "bind");
    /// # Ok::<_, sqv::Error>(())
    /// ```
    #[inline]
    pub fn bind_value<T>(&mut self, value: T) -> Result<()>
    where
        T: BindValue,
    {
        self.cursor += 1;
        value.bind_value(self, self.cursor)
    }

    /// Drive the statement to completion, expecting it to produce no rows.
    ///
    /// # Errors
    ///
    /// Fails with operation `"step !done"` if the statement produces a row,
    /// which is the case for SELECT statements.
    ///
    /// ```
    /// use sqv::Connection;
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// let mut stmt = c.prepare("SELECT 1")?;
    /// let e = stmt.execute().unwrap_err();
    /// assert_eq!(e.operation(), "step !done");
    /// # Ok::<_, sqv::Error>(())
    /// ```
    pub fn execute(&mut self) -> Result<()> {
        if self.raw.is_null() {
            return Err(Error::from_statement("step !done", self.raw));
        }

        if unsafe { ffi::sqlite3_step(self.raw) } != ffi::SQLITE_DONE {
            return Err(Error::from_statement("step !done", self.raw));
        }

        Ok(())
    }

    /// Advance to the next row.
    ///
    /// Returns `true` if a row was produced. Returns `false` once the
    /// statement is done, in which case the statement is automatically reset
    /// so it can be bound and run again.
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
    /// c.execute("INSERT INTO users VALUES ('Alice'), ('Bob')", ())?;
    ///
    /// let mut stmt = c.prepare("SELECT name FROM users ORDER BY name")?;
    /// let mut names = Vec::new();
    ///
    /// while stmt.next()? {
    ///     names.push(stmt.get::<String>(0)?);
    /// }
    ///
    /// assert_eq!(names, ["Alice", "Bob"]);
    /// # Ok::<_, sqv::Error>(())
    /// ```
    pub fn next(&mut self) -> Result<bool> {
        if self.raw.is_null() {
            return Err(Error::from_statement("step", self.raw));
        }

        match unsafe { ffi::sqlite3_step(self.raw) } {
            ffi::SQLITE_ROW => Ok(true),
            ffi::SQLITE_DONE => {
                self.reset()?;
                Ok(false)
            }
            _ => Err(Error::from_statement("step", self.raw)),
        }
    }

    /// Reset the statement so it can be run again.
    ///
    /// Rewinds the bind cursor to the start; parameter values themselves are
    /// retained by the engine until rebound.
    ///
    /// # Errors
    ///
    /// Fails with operation `"reset"` if the engine reports a failure
    /// resetting the underlying handle.
    pub fn reset(&mut self) -> Result<()> {
        self.cursor = 0;

        if self.raw.is_null() {
            return Ok(());
        }

        if unsafe { ffi::sqlite3_reset(self.raw) } != ffi::SQLITE_OK {
            return Err(Error::from_statement("reset", self.raw));
        }

        Ok(())
    }

    /// Return the number of columns in the current row, falling back to the
    /// number of columns the statement would produce when no row is
    /// materialized.
    #[inline]
    pub fn width(&self) -> c_int {
        if self.raw.is_null() {
            return 0;
        }

        unsafe {
            match ffi::sqlite3_data_count(self.raw) {
                0 => ffi::sqlite3_column_count(self.raw),
                n => n,
            }
        }
    }

    /// Return the name of a column.
    ///
    /// If an invalid index is specified, `None` is returned.
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
    /// let stmt = c.prepare("SELECT * FROM users")?;
    ///
    /// assert_eq!(stmt.name(0), Some("name"));
    /// assert_eq!(stmt.name(1), Some("age"));
    /// assert_eq!(stmt.name(2), None);
    /// # Ok::<_, sqv::Error>(())
    /// ```
    #[inline]
    pub fn name(&self, index: c_int) -> Option<&str> {
        if self.raw.is_null() {
            return None;
        }

        unsafe {
            let ptr = ffi::sqlite3_column_name(self.raw, index);

            if ptr.is_null() {
                return None;
            }

            CStr::from_ptr(ptr).to_str().ok()
        }
    }

    /// Returns `true` if the column in the current row is SQL NULL.
    #[inline]
    pub fn null(&self, index: c_int) -> bool {
        self.column_type(index) == Type::NULL
    }

    /// Return the dynamic type of a column in the current row.
    ///
    /// Out-of-range columns report [`Type::NULL`].
    #[inline]
    pub fn column_type(&self, index: c_int) -> Type {
        if self.raw.is_null() {
            return Type::NULL;
        }

        unsafe { Type::from_raw(ffi::sqlite3_column_type(self.raw, index)) }
    }

    /// Read a column of the current row, converted to `T`.
    ///
    /// `T` is closed over `i32`, `i64`, `f64`, `String` and `Vec<u8>`; any
    /// other type is rejected at compile time. Conversions follow the
    /// engine's coercion rules, so for example reading a TEXT column as `i64`
    /// applies the engine's text-to-number parsing. Text and blob reads of a
    /// NULL cell yield an empty value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqv::Connection;
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// let mut stmt = c.prepare("SELECT 42, 'hello'")?;
    /// assert!(stmt.next()?);
    ///
    /// assert_eq!(stmt.get::<i64>(0)?, 42);
    /// assert_eq!(stmt.get::<String>(1)?, "hello");
    /// # Ok::<_, sqv::Error>(())
    /// ```
    #[inline]
    pub fn get<T>(&self, index: c_int) -> Result<T>
    where
        T: FromColumn,
    {
        if self.raw.is_null() {
            return Err(Error::from_statement("column", self.raw));
        }

        Ok(T::from_column(self, index))
    }

    /// Read a column of the current row by name, converted to `T`.
    ///
    /// Performs a linear scan over [`width`] columns for the first exact name
    /// match.
    ///
    /// [`width`]: Statement::width
    ///
    /// # Errors
    ///
    /// Fails with operation `"no such column"` if no column matches.
    pub fn get_by_name<T>(&self, column: &str) -> Result<T>
    where
        T: FromColumn,
    {
        for index in 0..self.width() {
            if self.name(index) == Some(column) {
                return self.get(index);
            }
        }

        Err(Error::from_statement("no such column", self.raw))
    }

    /// Reset, bind the given arguments, step once and return the first
    /// column of the produced row converted to `T`.
    ///
    /// # Errors
    ///
    /// Fails with operation `"no data"` if the statement produces no rows.
    ///
    /// ```
    /// use sqv::Connection;
    ///
    /// let mut c = Connection::new();
    /// assert!(c.open(":memory:"));
    ///
    /// let mut stmt = c.prepare("SELECT 1 WHERE 0")?;
    /// let e = stmt.query::<i64, _>(()).unwrap_err();
    /// assert_eq!(e.operation(), "no data");
    /// # Ok::<_, sqv::Error>(())
    /// ```
    pub fn query<T, A>(&mut self, args: A) -> Result<T>
    where
        T: FromColumn,
        A: Bind,
    {
        self.reset()?;
        self.bind(args)?;

        if self.next()? {
            self.get(0)
        } else {
            Err(Error::from_statement("no data", self.raw))
        }
    }
}

impl Default for Statement {
    #[inline]
    fn default() -> Self {
        Statement {
            raw: ptr::null_mut(),
            cursor: 0,
        }
    }
}

impl fmt::Debug for Statement {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("empty", &self.empty())
            .finish_non_exhaustive()
    }
}

impl Drop for Statement {
    #[inline]
    fn drop(&mut self) {
        // Finalizing a null handle is a harmless no-op.
        unsafe { ffi::sqlite3_finalize(self.raw) };
    }
}

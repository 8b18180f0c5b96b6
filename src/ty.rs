use std::fmt;
use std::os::raw::c_int;

use crate::ffi;

/// The dynamic type of a column in the current row.
///
/// See [`Statement::column_type`].
///
/// [`Statement::column_type`]: crate::Statement::column_type
///
/// # Examples
///
/// ```
/// use sqv::{Connection, Type};
///
/// let mut c = Connection::new();
/// assert!(c.open(":memory:"));
///
/// c.execute("CREATE TABLE test (a INTEGER, b REAL, c TEXT, d BLOB, e)", ())?;
/// c.execute("INSERT INTO test VALUES (42, 3.14, 'hello', X'DEADBEEF', NULL)", ())?;
///
/// let mut stmt = c.prepare("SELECT * FROM test")?;
/// assert!(stmt.next()?);
///
/// assert_eq!(stmt.column_type(0), Type::INTEGER);
/// assert_eq!(stmt.column_type(1), Type::FLOAT);
/// assert_eq!(stmt.column_type(2), Type::TEXT);
/// assert_eq!(stmt.column_type(3), Type::BLOB);
/// assert_eq!(stmt.column_type(4), Type::NULL);
/// # Ok::<_, sqv::Error>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Type {
    raw: c_int,
}

impl Type {
    /// Construct from a raw sqlite3 type code.
    #[inline]
    pub(crate) const fn from_raw(raw: c_int) -> Self {
        Self { raw }
    }

    /// The integer type, represented in rust by [`i64`] (or [`i32`] with
    /// truncation).
    pub const INTEGER: Self = Self::from_raw(ffi::SQLITE_INTEGER);

    /// The floating-point type, represented in rust by [`f64`].
    pub const FLOAT: Self = Self::from_raw(ffi::SQLITE_FLOAT);

    /// The text type, represented in rust by [`String`].
    pub const TEXT: Self = Self::from_raw(ffi::SQLITE_TEXT);

    /// The blob type, represented in rust by [`Vec<u8>`].
    pub const BLOB: Self = Self::from_raw(ffi::SQLITE_BLOB);

    /// The null type.
    pub const NULL: Self = Self::from_raw(ffi::SQLITE_NULL);
}

impl fmt::Display for Type {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw {
            ffi::SQLITE_INTEGER => write!(f, "INTEGER"),
            ffi::SQLITE_FLOAT => write!(f, "FLOAT"),
            ffi::SQLITE_TEXT => write!(f, "TEXT"),
            ffi::SQLITE_BLOB => write!(f, "BLOB"),
            ffi::SQLITE_NULL => write!(f, "NULL"),
            raw => write!(f, "UNKNOWN({raw})"),
        }
    }
}

impl fmt::Debug for Type {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

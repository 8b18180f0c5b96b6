use std::os::raw::c_int;

use crate::error::Result;
use crate::ffi::{self, stmt_try};
use crate::statement::{Null, Statement};

/// A single value suitable for binding to a prepared statement.
///
/// This is typically used indirectly via [`bind_value`] or [`bind`], which
/// assign the parameter position from the statement's cursor. Custom
/// implementations tend to delegate to the interior value type they wrap.
///
/// [`bind_value`]: Statement::bind_value
/// [`bind`]: Statement::bind
///
/// # Examples
///
/// ```
/// use std::os::raw::c_int;
///
/// use sqv::{BindValue, Connection, Result, Statement};
///
/// struct Id([u8; 8]);
///
/// impl BindValue for Id {
///     #[inline]
///     fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
///         self.0.bind_value(stmt, index)
///     }
/// }
///
/// let mut c = Connection::new();
/// assert!(c.open(":memory:"));
///
/// c.execute("CREATE TABLE ids (id BLOB NOT NULL)", ())?;
///
/// let mut stmt = c.prepare("INSERT INTO ids (id) VALUES (?)")?;
/// stmt.bind_value(Id(*b"abcdabcd"))?;
/// stmt.execute()?;
/// # Ok::<_, sqv::Error>(())
/// ```
pub trait BindValue {
    /// Bind this value to the specified 1-based parameter index.
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()>;
}

impl<T> BindValue for &T
where
    T: ?Sized + BindValue,
{
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        (**self).bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for [`Null`], binding an explicit SQL NULL.
impl BindValue for Null {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        unsafe {
            stmt_try! {
                "bind", stmt.as_ptr(),
                ffi::sqlite3_bind_null(stmt.as_ptr(), index)
            };
        }

        Ok(())
    }
}

/// [`BindValue`] implementation for [`i64`].
///
/// This corresponds to the engine's native INTEGER representation and can
/// hold any integer value.
impl BindValue for i64 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        unsafe {
            stmt_try! {
                "bind", stmt.as_ptr(),
                ffi::sqlite3_bind_int64(stmt.as_ptr(), index, *self)
            };
        }

        Ok(())
    }
}

/// [`BindValue`] implementation for [`i32`].
impl BindValue for i32 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        unsafe {
            stmt_try! {
                "bind", stmt.as_ptr(),
                ffi::sqlite3_bind_int(stmt.as_ptr(), index, *self)
            };
        }

        Ok(())
    }
}

/// [`BindValue`] implementation for [`u32`], widened losslessly to an
/// integer.
impl BindValue for u32 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        (*self as i64).bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for [`u64`].
///
/// Values are reinterpreted bit-for-bit as the engine's signed 64-bit
/// integer, so `u64::MAX` is stored as `-1`.
///
/// # Examples
///
/// ```
/// use sqv::Connection;
///
/// let mut c = Connection::new();
/// assert!(c.open(":memory:"));
///
/// assert_eq!(c.query::<i64, _>("SELECT ?", u64::MAX)?, -1);
/// # Ok::<_, sqv::Error>(())
/// ```
impl BindValue for u64 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        (*self as i64).bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for [`f64`].
impl BindValue for f64 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        unsafe {
            stmt_try! {
                "bind", stmt.as_ptr(),
                ffi::sqlite3_bind_double(stmt.as_ptr(), index, *self)
            };
        }

        Ok(())
    }
}

/// [`BindValue`] implementation for [`f32`], widened to double precision.
impl BindValue for f32 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        (*self as f64).bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for [`str`] slices.
///
/// The engine stores a transient copy; the caller's buffer is not retained
/// past the call.
impl BindValue for str {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        unsafe {
            stmt_try! {
                "bind", stmt.as_ptr(),
                ffi::sqlite3_bind_text(
                    stmt.as_ptr(),
                    index,
                    self.as_ptr().cast(),
                    self.len() as c_int,
                    ffi::SQLITE_TRANSIENT(),
                )
            };
        }

        Ok(())
    }
}

/// [`BindValue`] implementation for [`String`].
impl BindValue for String {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        self.as_str().bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for byte slices, bound as a blob.
///
/// The engine stores a transient copy. A zero-length blob is bound through a
/// non-null marker pointer so it stays distinguishable from SQL NULL.
///
/// # Examples
///
/// ```
/// use sqv::Connection;
///
/// let mut c = Connection::new();
/// assert!(c.open(":memory:"));
///
/// c.execute("CREATE TABLE files (data BLOB)", ())?;
/// c.execute("INSERT INTO files VALUES (?)", &b""[..])?;
///
/// let mut stmt = c.prepare("SELECT data FROM files")?;
/// assert!(stmt.next()?);
/// assert!(!stmt.null(0));
/// assert_eq!(stmt.get::<Vec<u8>>(0)?, Vec::<u8>::new());
/// # Ok::<_, sqv::Error>(())
/// ```
impl BindValue for [u8] {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        // The engine treats a null data pointer as SQL NULL regardless of
        // length, so the empty blob goes through a static marker.
        static EMPTY: [u8; 1] = [0];

        let ptr = if self.is_empty() {
            EMPTY.as_ptr()
        } else {
            self.as_ptr()
        };

        unsafe {
            stmt_try! {
                "bind", stmt.as_ptr(),
                ffi::sqlite3_bind_blob(
                    stmt.as_ptr(),
                    index,
                    ptr.cast(),
                    self.len() as c_int,
                    ffi::SQLITE_TRANSIENT(),
                )
            };
        }

        Ok(())
    }
}

/// [`BindValue`] implementation for byte arrays.
impl<const N: usize> BindValue for [u8; N] {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        self.as_slice().bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for [`Vec<u8>`].
impl BindValue for Vec<u8> {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        self.as_slice().bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for [`Option`].
///
/// `None` binds a SQL NULL, `Some(..)` binds the inner value.
impl<T> BindValue for Option<T>
where
    T: BindValue,
{
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        match self {
            Some(inner) => inner.bind_value(stmt, index),
            None => Null.bind_value(stmt, index),
        }
    }
}

use std::os::raw::c_int;
use std::slice;

use crate::ffi;
use crate::statement::Statement;

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for Vec<u8> {}
}

/// A type a column of the current row can be read as.
///
/// This trait is sealed and implemented for exactly [`i32`], [`i64`],
/// [`f64`], [`String`] and [`Vec<u8>`]; any other type argument to
/// [`Statement::get`] is rejected at compile time. Conversions follow the
/// engine's coercion rules, so the dynamic column type does not have to match
/// the requested type.
pub trait FromColumn: self::sealed::Sealed {
    /// Read the column at `index` from the statement's current row.
    #[doc(hidden)]
    fn from_column(stmt: &Statement, index: c_int) -> Self;
}

impl FromColumn for i32 {
    #[inline]
    fn from_column(stmt: &Statement, index: c_int) -> Self {
        unsafe { ffi::sqlite3_column_int(stmt.as_ptr(), index) }
    }
}

impl FromColumn for i64 {
    #[inline]
    fn from_column(stmt: &Statement, index: c_int) -> Self {
        unsafe { ffi::sqlite3_column_int64(stmt.as_ptr(), index) }
    }
}

impl FromColumn for f64 {
    #[inline]
    fn from_column(stmt: &Statement, index: c_int) -> Self {
        unsafe { ffi::sqlite3_column_double(stmt.as_ptr(), index) }
    }
}

/// Reads the column as text. A NULL cell yields the empty string.
impl FromColumn for String {
    fn from_column(stmt: &Statement, index: c_int) -> Self {
        unsafe {
            let ptr = ffi::sqlite3_column_text(stmt.as_ptr(), index);

            if ptr.is_null() {
                return String::new();
            }

            let len = ffi::sqlite3_column_bytes(stmt.as_ptr(), index) as usize;
            let bytes = slice::from_raw_parts(ptr, len);
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Reads the column as a blob. A NULL cell yields the empty vector.
impl FromColumn for Vec<u8> {
    fn from_column(stmt: &Statement, index: c_int) -> Self {
        unsafe {
            let ptr = ffi::sqlite3_column_blob(stmt.as_ptr(), index);

            if ptr.is_null() {
                return Vec::new();
            }

            let len = ffi::sqlite3_column_bytes(stmt.as_ptr(), index) as usize;
            slice::from_raw_parts(ptr.cast::<u8>(), len).to_vec()
        }
    }
}

pub(crate) use libsqlite3_sys::*;

/// Helper to evaluate sqlite3 statement calls which are expected to return
/// `SQLITE_OK`.
///
/// On any other status the statement's error state is snapshotted into an
/// [`Error`] tagged with the given operation.
///
/// [`Error`]: crate::Error
macro_rules! __stmt_try {
    ($op:literal, $stmt:expr, $expr:expr) => {{
        let code = $expr;

        if code != $crate::ffi::SQLITE_OK {
            return Err($crate::error::Error::from_statement($op, $stmt));
        }
    }};
}

pub(crate) use __stmt_try as stmt_try;

use std::error;
use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_int;

use crate::ffi;
use crate::utils::message_from;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Stand-in query text for errors raised without any compiled SQL available.
const EMPTY_QUERY: &str = "--empty--";

/// A primary or extended sqlite3 status code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Code {
    raw: c_int,
}

impl Code {
    /// Construct a new code from the specified raw code.
    #[inline]
    pub(crate) const fn new(raw: c_int) -> Self {
        Self { raw }
    }

    /// Return the numeric representation of the code.
    #[inline]
    pub const fn as_raw(self) -> c_int {
        self.raw
    }
}

macro_rules! define_codes {
    ($(
        $vis:vis const $name:ident = $value:ident;
    )*) => {
        impl Code {
            $(
                $vis const $name: Code = Code::new($crate::ffi::$value);
            )*
        }

        impl fmt::Display for Code {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $(Code::$name => write!(f, stringify!($name)),)*
                    Code { raw } => write!(f, "UNKNOWN({raw})"),
                }
            }
        }

        impl fmt::Debug for Code {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $(Code::$name => write!(f, stringify!($name)),)*
                    Code { raw } => write!(f, "UNKNOWN({raw})"),
                }
            }
        }
    };
}

define_codes! {
    pub const OK = SQLITE_OK;
    pub const ERROR = SQLITE_ERROR;
    pub const INTERNAL = SQLITE_INTERNAL;
    pub const PERM = SQLITE_PERM;
    pub const ABORT = SQLITE_ABORT;
    pub const BUSY = SQLITE_BUSY;
    pub const LOCKED = SQLITE_LOCKED;
    pub const NOMEM = SQLITE_NOMEM;
    pub const READONLY = SQLITE_READONLY;
    pub const INTERRUPT = SQLITE_INTERRUPT;
    pub const IOERR = SQLITE_IOERR;
    pub const CORRUPT = SQLITE_CORRUPT;
    pub const NOTFOUND = SQLITE_NOTFOUND;
    pub const FULL = SQLITE_FULL;
    pub const CANTOPEN = SQLITE_CANTOPEN;
    pub const PROTOCOL = SQLITE_PROTOCOL;
    pub const EMPTY = SQLITE_EMPTY;
    pub const SCHEMA = SQLITE_SCHEMA;
    pub const TOOBIG = SQLITE_TOOBIG;
    pub const CONSTRAINT = SQLITE_CONSTRAINT;
    pub const MISMATCH = SQLITE_MISMATCH;
    pub const MISUSE = SQLITE_MISUSE;
    pub const NOLFS = SQLITE_NOLFS;
    pub const AUTH = SQLITE_AUTH;
    pub const FORMAT = SQLITE_FORMAT;
    pub const RANGE = SQLITE_RANGE;
    pub const NOTADB = SQLITE_NOTADB;
    pub const NOTICE = SQLITE_NOTICE;
    pub const WARNING = SQLITE_WARNING;
    pub const CONSTRAINT_CHECK = SQLITE_CONSTRAINT_CHECK;
    pub const CONSTRAINT_FOREIGNKEY = SQLITE_CONSTRAINT_FOREIGNKEY;
    pub const CONSTRAINT_NOTNULL = SQLITE_CONSTRAINT_NOTNULL;
    pub const CONSTRAINT_PRIMARYKEY = SQLITE_CONSTRAINT_PRIMARYKEY;
    pub const CONSTRAINT_UNIQUE = SQLITE_CONSTRAINT_UNIQUE;
    pub const CONSTRAINT_ROWID = SQLITE_CONSTRAINT_ROWID;
}

/// An error raised by a failed wrapper operation.
///
/// Every failure snapshots the error state of the connection or statement at
/// the point it was detected: the primary [`Code`], the extended code, the
/// engine's human-readable message and the text of the offending query.
///
/// The [`Display`] rendering is `"<operation>: <message> IN <query>"`.
///
/// [`Display`]: fmt::Display
pub struct Error {
    code: Code,
    extended: c_int,
    operation: &'static str,
    message: String,
    query: String,
}

impl Error {
    /// Snapshot the current error state of a connection handle.
    pub(crate) fn from_connection(
        operation: &'static str,
        db: *mut ffi::sqlite3,
        query: &str,
    ) -> Self {
        if db.is_null() {
            return Self::with_code(operation, Code::MISUSE, query);
        }

        unsafe {
            Self {
                code: Code::new(ffi::sqlite3_errcode(db)),
                extended: ffi::sqlite3_extended_errcode(db),
                operation,
                message: message_from(ffi::sqlite3_errmsg(db)),
                query: String::from(query),
            }
        }
    }

    /// Snapshot the current error state of a statement's owning connection,
    /// recovering the query text from the compiled statement itself.
    pub(crate) fn from_statement(operation: &'static str, stmt: *mut ffi::sqlite3_stmt) -> Self {
        if stmt.is_null() {
            return Self::with_code(operation, Code::MISUSE, EMPTY_QUERY);
        }

        unsafe {
            let db = ffi::sqlite3_db_handle(stmt);
            let sql = ffi::sqlite3_sql(stmt);

            let query = if sql.is_null() {
                String::from(EMPTY_QUERY)
            } else {
                CStr::from_ptr(sql).to_string_lossy().into_owned()
            };

            Self {
                code: Code::new(ffi::sqlite3_errcode(db)),
                extended: ffi::sqlite3_extended_errcode(db),
                operation,
                message: message_from(ffi::sqlite3_errmsg(db)),
                query,
            }
        }
    }

    /// Construct an error from a bare status code, without any handle to
    /// snapshot. Used when no connection exists yet or the handle is gone.
    pub(crate) fn with_code(operation: &'static str, code: Code, query: &str) -> Self {
        Self {
            code,
            extended: code.as_raw(),
            operation,
            message: unsafe { message_from(ffi::sqlite3_errstr(code.as_raw())) },
            query: String::from(query),
        }
    }

    /// The primary status code that caused this error.
    #[inline]
    pub fn code(&self) -> Code {
        self.code
    }

    /// The extended status code that caused this error.
    #[inline]
    pub fn extended(&self) -> c_int {
        self.extended
    }

    /// The operation that failed, such as `"prepare"` or `"bind"`.
    #[inline]
    pub fn operation(&self) -> &str {
        self.operation
    }

    /// The text of the offending query, or `"--empty--"` if no query text was
    /// available.
    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The engine's human-readable message captured when the error was
    /// detected.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.code)
            .field("extended", &self.extended)
            .field("operation", &self.operation)
            .field("message", &self.message)
            .field("query", &self.query)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} IN {}", self.operation, self.message, self.query)
    }
}

impl error::Error for Error {}

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;

use crate::error::{Code, Error, Result};

/// Copy an engine message out of a borrowed c-string, tolerating a null
/// pointer.
pub(crate) unsafe fn message_from(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }

    unsafe { CStr::from_ptr(ptr).to_string_lossy().into_owned() }
}

/// Convert a query string into a c-string for the engine.
///
/// Interior NUL bytes cannot be represented and fail with a MISUSE-coded
/// error rather than truncating the query.
pub(crate) fn string_to_cstring(operation: &'static str, s: &str) -> Result<CString> {
    match CString::new(s) {
        Ok(string) => Ok(string),
        Err(..) => Err(Error::with_code(operation, Code::MISUSE, s)),
    }
}

/// Convert a filesystem path into a c-string for the engine's open call.
///
/// On unix the raw bytes are passed through, so any path the filesystem
/// accepts is representable. Elsewhere the path must be valid Unicode, which
/// sqlite expects as UTF-8.
#[cfg(unix)]
pub(crate) fn path_to_cstring(p: &Path) -> Option<CString> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(p.as_os_str().as_bytes()).ok()
}

#[cfg(not(unix))]
pub(crate) fn path_to_cstring(p: &Path) -> Option<CString> {
    CString::new(p.to_str()?).ok()
}

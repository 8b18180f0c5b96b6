use std::ffi::CStr;
use std::os::raw::c_int;
use std::str;

use crate::ffi;

/// Return the version string of the SQLite library in use.
///
/// This may return a version string like `"3.46.0"`.
///
/// # Examples
///
/// ```
/// assert!(sqv::lib_version().starts_with("3."));
/// ```
#[inline]
pub fn lib_version() -> &'static str {
    unsafe {
        let c_str = ffi::sqlite3_libversion();
        let bytes = CStr::from_ptr(c_str).to_bytes();
        str::from_utf8_unchecked(bytes)
    }
}

/// Return the version number of the SQLite library in use.
///
/// The version `3.46.0` as returned by [`lib_version`] would correspond to
/// the integer `3046000`.
///
/// # Examples
///
/// ```
/// assert!(matches!(sqv::lib_version_number(), 3000000..4000000));
/// ```
#[inline]
pub fn lib_version_number() -> c_int {
    unsafe { ffi::sqlite3_libversion_number() }
}

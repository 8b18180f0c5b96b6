use crate::ffi;

/// Initialize the engine's process-wide state.
///
/// Returns `true` on success. Call once before the first connection is
/// opened; the call must not overlap any other use of the library, which is
/// the caller's responsibility.
///
/// # Examples
///
/// ```
/// use sqv::Connection;
///
/// assert!(sqv::initialize());
///
/// let mut c = Connection::new();
/// assert!(c.open(":memory:"));
/// ```
#[inline]
pub fn initialize() -> bool {
    unsafe { ffi::sqlite3_initialize() == ffi::SQLITE_OK }
}

/// Release the engine's process-wide state.
///
/// Returns `true` on success. Call once after the last connection and
/// statement have been dropped; open handles cause the engine to report
/// failure.
#[inline]
pub fn shutdown() -> bool {
    unsafe { ffi::sqlite3_shutdown() == ffi::SQLITE_OK }
}

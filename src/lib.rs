//! A thin, resource-safe veneer over the [SQLite] C interface.
//!
//! The crate wraps the raw engine handles in move-only owners: a
//! [`Connection`] owns at most one database handle, a [`Statement`] owns at
//! most one compiled query, and both release their handle on drop. Beyond
//! ownership the layer stays deliberately thin; SQL text passes through
//! unmodified and row conversions follow the engine's own coercion rules.
//!
//! <br>
//!
//! ## Usage
//!
//! Attach a connection to a database with [`open`], then either run one-shot
//! statements through [`execute`] and [`query`], or [`prepare`] a statement
//! once and re-use it.
//!
//! Parameters are bound by position through a cursor: each bound value takes
//! the next 1-based parameter slot, and [`reset`] rewinds the cursor so the
//! statement can be re-bound and re-run.
//!
//! [`open`]: Connection::open
//! [`execute`]: Connection::execute
//! [`query`]: Connection::query
//! [`prepare`]: Connection::prepare
//! [`reset`]: Statement::reset
//!
//! <br>
//!
//! #### Connecting and querying
//!
//! ```
//! use sqv::Connection;
//!
//! let mut c = Connection::new();
//! assert!(c.open(":memory:"));
//!
//! c.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
//! c.execute("INSERT INTO users VALUES (?, ?)", ("Alice", 42))?;
//! c.execute("INSERT INTO users VALUES (?, ?)", ("Bob", 52))?;
//!
//! let mut stmt = c.prepare("SELECT name, age FROM users ORDER BY age")?;
//! let mut results = Vec::new();
//!
//! while stmt.next()? {
//!     results.push((stmt.get::<String>(0)?, stmt.get::<i64>(1)?));
//! }
//!
//! assert_eq!(results, [(String::from("Alice"), 42), (String::from("Bob"), 52)]);
//! # Ok::<_, sqv::Error>(())
//! ```
//!
//! <br>
//!
//! #### Re-using a prepared statement
//!
//! Prepared statements carry all the state of a query and are expensive to
//! compile, so hold on to them. [`next`] resets the statement when it runs
//! out of rows, after which it can be bound and run again:
//!
//! ```
//! use sqv::Connection;
//!
//! let mut c = Connection::new();
//! assert!(c.open(":memory:"));
//!
//! c.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
//! c.execute("INSERT INTO users VALUES ('Alice', 42), ('Bob', 52)", ())?;
//!
//! let mut stmt = c.prepare("SELECT name FROM users WHERE age > ?")?;
//! let mut names = Vec::new();
//!
//! for age in [40, 50] {
//!     stmt.bind(age)?;
//!
//!     while stmt.next()? {
//!         names.push(stmt.get::<String>(0)?);
//!     }
//! }
//!
//! assert_eq!(names, ["Alice", "Bob", "Bob"]);
//! # Ok::<_, sqv::Error>(())
//! ```
//!
//! [`next`]: Statement::next
//!
//! <br>
//!
//! ## Thread safety
//!
//! Connections and statements are `Send` but not `Sync`: a handle may move
//! between threads but must be externally synchronized for shared use, for
//! example behind a mutex. The process-wide [`initialize`] and [`shutdown`]
//! calls must not overlap any other use of the library.
//!
//! <br>
//!
//! ## Features
//!
//! * `bundled` - Build and statically link the bundled copy of sqlite instead
//!   of linking the system library. Enabled by default.
//!
//! [SQLite]: https://www.sqlite.org

#![allow(clippy::should_implement_trait)]
#![warn(rustdoc::broken_intra_doc_links)]

#[cfg(test)]
mod tests;

mod bind;
mod bind_value;
mod connection;
mod error;
mod ffi;
mod from_column;
mod global;
mod statement;
mod ty;
mod utils;
mod version;

#[doc(inline)]
pub use self::bind::Bind;
#[doc(inline)]
pub use self::bind_value::BindValue;
#[doc(inline)]
pub use self::connection::Connection;
#[doc(inline)]
pub use self::error::{Code, Error, Result};
#[doc(inline)]
pub use self::from_column::FromColumn;
#[doc(inline)]
pub use self::global::{initialize, shutdown};
#[doc(inline)]
pub use self::statement::{Null, Statement};
#[doc(inline)]
pub use self::ty::Type;
#[doc(inline)]
pub use self::version::{lib_version, lib_version_number};

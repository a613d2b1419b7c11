//! # symname
//!
//! Symbolic names for the integers a debugger sees when it traces or inspects a crashed
//! process: signal numbers, the `si_code` of `SIGILL`, `SIGBUS` and `SIGSEGV`, `errno` values
//! and `ptrace` requests.
//!
//! ```
//! use nix::libc;
//!
//! assert_eq!(symname::stringify::signal(libc::SIGSEGV, false), Some("SIGSEGV"));
//! assert_eq!(symname::describe::describe_errno(libc::ENOENT), "ENOENT");
//! ```
//!
//! ## Platforms
//!
//! The tables are fixed at compile time. A common POSIX subset is always present, the entries
//! that only the Linux kernel family defines are compiled in for `target_os = "linux"` and
//! `"android"`. `ptrace` requests are only known on those targets, and a few of them
//! additionally depend on `target_arch`.
//!
//! ## Modules
//!
//! - [`stringify`]: the lookups, with a caller chosen policy for unknown codes
//! - [`describe`]: formatting for log messages that falls back to hex
//! - [`table`]: the static tables, reverse lookup and iteration
//! - [`consts`]: ABI constants the libc bindings do not provide uniformly
//! - [`errors`]: the error type

pub mod consts;
pub mod describe;
pub mod errors;
pub mod stringify;
pub mod table;

pub use errors::{Result, StringifyError};
pub use table::{Category, Resolved};

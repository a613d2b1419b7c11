//! # Stringify
//!
//! Translates raw diagnostic codes into the names of the constants that produced them.
//!
//! Every lookup comes in two shapes:
//!
//! - `try_*` returns a [`Result`] with a [`StringifyError`] that says which kind of code was
//!   unknown. Use this when the caller wants to decide itself what to do.
//! - the plain function takes a `die_on_fail` flag. With `false` an unknown code gives [`None`]
//!   and the caller can fall back to printing the raw value. With `true` an unknown code is a
//!   bug (usually a platform mismatch) and the process is aborted with a diagnostic, see
//!   [`fatal`].
//!
//! All functions are pure lookups in static tables and can be called from any thread.
//!
//! # Examples
//!
//! ```
//! use nix::libc;
//! use symname::stringify;
//!
//! assert_eq!(stringify::signal(libc::SIGSEGV, false), Some("SIGSEGV"));
//! assert_eq!(stringify::errno(libc::EINVAL, false), Some("EINVAL"));
//! assert_eq!(stringify::signal(0, false), None);
//! ```

use tracing::{error, trace};

use crate::errors::{Result, StringifyError};
use crate::table::{self, Category, Resolved};

/// Name of a signal number
///
/// Aborts the process if `die_on_fail` is set and `signal` is unknown.
#[must_use]
pub fn signal(signal: i32, die_on_fail: bool) -> Option<&'static str> {
    resolve(try_signal(signal), die_on_fail)
}

/// Name of the `si_code` `code` in the context of `signal`
///
/// Only `SIGILL`, `SIGBUS` and `SIGSEGV` have sub-codes. The same number can be valid for one of
/// them and unknown for another.
#[must_use]
pub fn signal_code(signal: i32, code: i32, die_on_fail: bool) -> Option<&'static str> {
    resolve(try_signal_code(signal, code), die_on_fail)
}

/// Name of an `errno` value
#[must_use]
pub fn errno(error: i32, die_on_fail: bool) -> Option<&'static str> {
    resolve(try_errno(error), die_on_fail)
}

/// Name of a `ptrace` request
#[must_use]
pub fn ptrace(request: i32, die_on_fail: bool) -> Option<&'static str> {
    resolve(try_ptrace(request), die_on_fail)
}

/// # Errors
///
/// [`StringifyError::UnknownSignal`] if the signal has no name on this platform.
pub fn try_signal(signal: i32) -> Result<&'static str> {
    table::SIGNALS
        .lookup(signal)
        .ok_or(StringifyError::UnknownSignal(signal))
}

/// # Errors
///
/// [`StringifyError::UnknownSignal`] if `signal` carries no sub-codes at all, and
/// [`StringifyError::UnknownCode`] if it does but `code` is not one of them.
pub fn try_signal_code(signal: i32, code: i32) -> Result<&'static str> {
    let codes =
        table::signal_code_table(signal).ok_or(StringifyError::UnknownSignal(signal))?;
    codes
        .lookup(code)
        .ok_or(StringifyError::UnknownCode {
            signal: Some(signal),
            code,
        })
}

/// # Errors
///
/// [`StringifyError::UnknownErrno`] if the value has no name on this platform.
pub fn try_errno(error: i32) -> Result<&'static str> {
    table::ERRNOS
        .lookup(error)
        .ok_or(StringifyError::UnknownErrno(error))
}

/// # Errors
///
/// [`StringifyError::UnknownPtrace`] if the request is not defined for this platform and
/// architecture.
pub fn try_ptrace(request: i32) -> Result<&'static str> {
    table::PTRACE_REQUESTS
        .lookup(request)
        .ok_or(StringifyError::UnknownPtrace(request))
}

/// Looks up `code` in the table of `category`
///
/// `signal` is the enclosing signal and only used for [`Category::SignalCode`]. Sub-codes have no
/// meaning on their own, so without a signal every code is reported as
/// [`StringifyError::UnknownCode`].
///
/// # Errors
///
/// The error of the `try_*` function of `category`.
pub fn try_lookup(category: Category, signal: Option<i32>, code: i32) -> Result<&'static str> {
    match category {
        Category::Signal => try_signal(code),
        Category::SignalCode => match signal {
            Some(signal) => try_signal_code(signal, code),
            None => Err(StringifyError::UnknownCode { signal: None, code }),
        },
        Category::Errno => try_errno(code),
        Category::Ptrace => try_ptrace(code),
    }
}

/// Looks up `code` like [`try_lookup`] and packs the outcome into a [`Resolved`]
#[must_use]
pub fn resolved(category: Category, signal: Option<i32>, code: i32) -> Resolved {
    let name = try_lookup(category, signal, code).ok();

    Resolved {
        category,
        signal: signal.filter(|_| category == Category::SignalCode),
        code,
        name,
    }
}

/// Finds the value of the token `name` in the table of `category`
///
/// For [`Category::SignalCode`] all sub-code tables are searched. Their values overlap, so the
/// value alone does not say which signal the code belongs to.
///
/// # Errors
///
/// [`StringifyError::UnknownName`] if no table of that category contains `name`.
pub fn code_of(category: Category, name: &str) -> Result<i32> {
    let found = match category {
        Category::Signal => table::SIGNALS.code_of(name),
        Category::SignalCode => [&table::ILL_CODES, &table::BUS_CODES, &table::SEGV_CODES]
            .into_iter()
            .find_map(|t| t.code_of(name)),
        Category::Errno => table::ERRNOS.code_of(name),
        Category::Ptrace => table::PTRACE_REQUESTS.code_of(name),
    };

    found.ok_or_else(|| StringifyError::UnknownName {
        category,
        name: name.to_string(),
    })
}

/// Applies the `die_on_fail` policy to the outcome of a lookup
#[must_use]
pub fn resolve(result: Result<&'static str>, die_on_fail: bool) -> Option<&'static str> {
    match result {
        Ok(name) => Some(name),
        Err(e) if die_on_fail => fatal(&e),
        Err(e) => {
            trace!("no symbolic name: {e}");
            None
        }
    }
}

/// Reports `err` and aborts the process
///
/// The message contains the label of the category and the raw value in hexadecimal, for example
/// `unknown signal: 0x7f`. Values are formatted with `{:#x}`, so zero is `0x0` where C's `%#x`
/// would print `0`, and negative values show as 32 bit two's complement (`0xffffffff`).
///
/// The message is logged as an error. If no global subscriber has been installed it is written
/// to stderr instead, so it is never lost.
pub fn fatal(err: &StringifyError) -> ! {
    if tracing::dispatcher::has_been_set() {
        error!("{err}");
    } else {
        eprintln!("{}: {err}", env!("CARGO_PKG_NAME"));
    }
    std::process::abort()
}

#[cfg(test)]
mod test {
    use nix::libc;

    use super::*;
    use crate::consts;

    #[test]
    fn test_signal() {
        assert_eq!(signal(libc::SIGSEGV, false), Some("SIGSEGV"));
        assert_eq!(signal(libc::SIGINT, true), Some("SIGINT"));
        assert_eq!(signal(libc::SIGABRT, false), Some("SIGABRT"));
        assert_eq!(signal(libc::SIGIO, false), Some("SIGIO"));
        assert_eq!(signal(0, false), None);
        assert_eq!(signal(0x7f, false), None);
        assert_eq!(try_signal(0x7f), Err(StringifyError::UnknownSignal(0x7f)));
    }

    #[test]
    fn test_signal_code_uses_the_right_table() {
        assert_eq!(
            signal_code(libc::SIGBUS, consts::BUS_ADRALN, false),
            Some("BUS_ADRALN")
        );
        assert_eq!(
            signal_code(libc::SIGBUS, consts::BUS_OBJERR, false),
            Some("BUS_OBJERR")
        );
        // same value as BUS_ADRALN, different meaning
        assert_eq!(
            signal_code(libc::SIGSEGV, consts::BUS_ADRALN, false),
            Some("SEGV_MAPERR")
        );
        assert_eq!(signal_code(libc::SIGSEGV, consts::BUS_OBJERR, false), None);
        assert_eq!(signal_code(libc::SIGBUS, consts::ILL_BADSTK, false), None);
        assert_eq!(
            signal_code(libc::SIGILL, consts::ILL_PRVOPC, false),
            Some("ILL_PRVOPC")
        );
    }

    #[test]
    fn test_signal_code_errors_are_distinguishable() {
        assert_eq!(
            try_signal_code(libc::SIGTRAP, 1),
            Err(StringifyError::UnknownSignal(libc::SIGTRAP))
        );
        assert_eq!(
            try_signal_code(libc::SIGSEGV, 9),
            Err(StringifyError::UnknownCode {
                signal: Some(libc::SIGSEGV),
                code: 9
            })
        );
        assert_eq!(signal_code(libc::SIGTRAP, 1, false), None);
    }

    #[test]
    fn test_errno() {
        assert_eq!(errno(libc::EINVAL, false), Some("EINVAL"));
        assert_eq!(errno(libc::EPERM, false), Some("EPERM"));
        assert_eq!(errno(libc::ENOTRECOVERABLE, false), Some("ENOTRECOVERABLE"));
        assert_eq!(errno(0, false), None);
        assert_eq!(errno(-22, false), None);
        assert_eq!(try_errno(0), Err(StringifyError::UnknownErrno(0)));
    }

    #[test]
    fn test_ptrace() {
        assert_eq!(ptrace(-1, false), None);
        assert_eq!(try_ptrace(0x1234), Err(StringifyError::UnknownPtrace(0x1234)));
    }

    #[test]
    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn test_ptrace_linux() {
        assert_eq!(ptrace(consts::PTRACE_ATTACH, false), Some("PTRACE_ATTACH"));
        assert_eq!(ptrace(consts::PTRACE_PEEKDATA, true), Some("PTRACE_PEEKDATA"));
        assert_eq!(ptrace(consts::PTRACE_LISTEN, false), Some("PTRACE_LISTEN"));
        assert_eq!(ptrace(0x4209, false), None);
    }

    #[test]
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn test_ptrace_elsewhere_is_always_unknown() {
        for code in 0..0x4300 {
            assert_eq!(ptrace(code, false), None);
        }
    }

    #[test]
    fn test_repeated_calls_agree() {
        for code in -4..128 {
            assert_eq!(signal(code, false), signal(code, false));
            assert_eq!(errno(code, false), errno(code, false));
            assert_eq!(try_signal_code(libc::SIGILL, code), try_signal_code(libc::SIGILL, code));
        }
    }

    #[test]
    fn test_resolved() {
        let r = resolved(Category::SignalCode, Some(libc::SIGSEGV), consts::SEGV_ACCERR);
        assert_eq!(r.name, Some("SEGV_ACCERR"));
        assert_eq!(r.signal, Some(libc::SIGSEGV));

        let r = resolved(Category::Errno, Some(libc::SIGSEGV), libc::EIO);
        assert_eq!(r.name, Some("EIO"));
        assert_eq!(r.signal, None);

        let r = resolved(Category::SignalCode, None, consts::SEGV_ACCERR);
        assert_eq!(r.name, None);
    }

    #[test]
    fn test_try_lookup() {
        assert_eq!(try_lookup(Category::Signal, None, libc::SIGHUP), Ok("SIGHUP"));
        assert_eq!(
            try_lookup(Category::SignalCode, Some(libc::SIGILL), consts::ILL_ILLOPC),
            Ok("ILL_ILLOPC")
        );
        // a sub-code without its signal never resolves, and no signal is made up for it
        assert_eq!(
            try_lookup(Category::SignalCode, None, consts::SEGV_MAPERR),
            Err(StringifyError::UnknownCode {
                signal: None,
                code: consts::SEGV_MAPERR
            })
        );
        assert_eq!(
            try_lookup(Category::Errno, None, -5),
            Err(StringifyError::UnknownErrno(-5))
        );
    }

    #[test]
    fn test_code_of() {
        assert_eq!(code_of(Category::Signal, "SIGKILL"), Ok(libc::SIGKILL));
        assert_eq!(code_of(Category::Errno, "EACCES"), Ok(libc::EACCES));
        assert_eq!(
            code_of(Category::SignalCode, "ILL_COPROC"),
            Ok(consts::ILL_COPROC)
        );
        assert_eq!(
            code_of(Category::SignalCode, "SEGV_ACCERR"),
            Ok(consts::SEGV_ACCERR)
        );
        assert!(matches!(
            code_of(Category::Signal, "SIGNOPE"),
            Err(StringifyError::UnknownName {
                category: Category::Signal,
                ..
            })
        ));
    }

    #[test]
    fn test_resolve_without_dying() {
        assert_eq!(resolve(Ok("SIGHUP"), true), Some("SIGHUP"));
        assert_eq!(resolve(Err(StringifyError::UnknownErrno(1337)), false), None);
    }
}

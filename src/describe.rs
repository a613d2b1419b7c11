//! # Describe
//!
//! Renders codes for log messages. Unlike the functions in [`crate::stringify`] these never
//! abort: a code without a name is printed as its raw hexadecimal value instead.
//!
//! The helpers accept both raw integers and the typed values of [`nix`] that a ptrace based
//! debugger usually has at hand.

use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;

use crate::stringify;

fn or_hex(name: Option<&'static str>, code: i32) -> String {
    match name {
        Some(n) => n.to_string(),
        None => format!("{code:#x}"),
    }
}

/// `"SIGSEGV"`, or the value in hex if it has no name
#[must_use]
pub fn describe_signal(signal: i32) -> String {
    or_hex(stringify::signal(signal, false), signal)
}

/// Signal with its `si_code`, like `"SIGSEGV (SEGV_MAPERR)"`
#[must_use]
pub fn describe_signal_code(signal: i32, code: i32) -> String {
    format!(
        "{} ({})",
        describe_signal(signal),
        or_hex(stringify::signal_code(signal, code, false), code)
    )
}

/// `"EINVAL"`, or the value in hex if it has no name
#[must_use]
pub fn describe_errno(error: i32) -> String {
    or_hex(stringify::errno(error, false), error)
}

#[must_use]
pub fn describe_nix_errno(error: Errno) -> String {
    describe_errno(error as i32)
}

#[must_use]
pub fn describe_nix_signal(signal: Signal) -> String {
    describe_signal(signal as i32)
}

/// `"PTRACE_PEEKDATA"`, or the value in hex if it has no name
#[must_use]
pub fn describe_ptrace(request: i32) -> String {
    or_hex(stringify::ptrace(request, false), request)
}

/// Message for a failed `ptrace` call, like `"PTRACE_PEEKDATA failed: ESRCH"`
#[must_use]
pub fn describe_ptrace_failure(request: i32, error: Errno) -> String {
    format!(
        "{} failed: {}",
        describe_ptrace(request),
        describe_nix_errno(error)
    )
}

/// Signal number and code of a `siginfo_t`, as delivered by `PTRACE_GETSIGINFO`
#[must_use]
pub fn describe_siginfo(info: &libc::siginfo_t) -> String {
    describe_signal_code(info.si_signo, info.si_code)
}

/// Explains why `waitpid` returned
#[must_use]
pub fn describe_wait_status(status: &WaitStatus) -> String {
    match status {
        WaitStatus::Exited(pid, code) => format!("{pid} exited with status {code}"),
        WaitStatus::Signaled(pid, sig, core_dumped) => format!(
            "{pid} was terminated by {}{}",
            describe_nix_signal(*sig),
            if *core_dumped { " (core dumped)" } else { "" }
        ),
        WaitStatus::Stopped(pid, sig) => {
            format!("{pid} was stopped by {}", describe_nix_signal(*sig))
        }
        #[cfg(any(target_os = "linux", target_os = "android"))]
        WaitStatus::PtraceEvent(pid, sig, event) => format!(
            "{pid} was stopped by {} for ptrace event {event}",
            describe_nix_signal(*sig)
        ),
        #[cfg(any(target_os = "linux", target_os = "android"))]
        WaitStatus::PtraceSyscall(pid) => format!("{pid} was stopped at a syscall"),
        WaitStatus::Continued(pid) => format!("{pid} was continued"),
        WaitStatus::StillAlive => "no state change".to_string(),
    }
}

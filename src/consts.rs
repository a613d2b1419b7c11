//! Kernel ABI constants that are not exported uniformly by the libc bindings.
//!
//! The `si_code` values live deep inside the C headers and are missing from some of the
//! `libc` targets we build on. The generic `ptrace` request numbers are exported by `libc`, but
//! with a different integer type per C library, so they are written down here once as `i32`.
//! `PTRACE_GETREGS` and `PTRACE_SETREGS` are taken from `libc` directly, since which targets
//! define them depends on the C library as well as the architecture.
//!
//! Sources:
//! - <https://elixir.bootlin.com/linux/v6.13.1/source/include/uapi/asm-generic/siginfo.h>
//! - <https://elixir.bootlin.com/linux/v6.13.1/source/include/uapi/linux/ptrace.h>
//! - `sys/signal.h` of the Darwin xnu sources for the Apple `ILL_*` ordering

// ---------------- SIGILL si_codes ----------------------------------------------------------------

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
mod ill {
    /// Illegal opcode
    pub const ILL_ILLOPC: i32 = 1;
    /// Illegal operand
    pub const ILL_ILLOPN: i32 = 2;
    /// Illegal addressing mode
    pub const ILL_ILLADR: i32 = 3;
    /// Illegal trap
    pub const ILL_ILLTRP: i32 = 4;
    /// Privileged opcode
    pub const ILL_PRVOPC: i32 = 5;
    /// Privileged register
    pub const ILL_PRVREG: i32 = 6;
    /// Coprocessor error
    pub const ILL_COPROC: i32 = 7;
    /// Internal stack error
    pub const ILL_BADSTK: i32 = 8;
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod ill {
    pub const ILL_ILLOPC: i32 = 1;
    pub const ILL_ILLTRP: i32 = 2;
    pub const ILL_PRVOPC: i32 = 3;
    pub const ILL_ILLOPN: i32 = 4;
    pub const ILL_ILLADR: i32 = 5;
    pub const ILL_PRVREG: i32 = 6;
    pub const ILL_COPROC: i32 = 7;
    pub const ILL_BADSTK: i32 = 8;
}

pub use ill::*;

// ---------------- SIGBUS si_codes ----------------------------------------------------------------

/// Invalid address alignment
pub const BUS_ADRALN: i32 = 1;
/// Nonexistent physical address
pub const BUS_ADRERR: i32 = 2;
/// Object specific hardware error
pub const BUS_OBJERR: i32 = 3;

// ---------------- SIGSEGV si_codes ---------------------------------------------------------------

/// Address not mapped to object
pub const SEGV_MAPERR: i32 = 1;
/// Invalid permissions for mapped object
pub const SEGV_ACCERR: i32 = 2;

// ---------------- ptrace requests ----------------------------------------------------------------

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use self::ptrace::*;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod ptrace {
    pub const PTRACE_TRACEME: i32 = 0;
    pub const PTRACE_PEEKTEXT: i32 = 1;
    pub const PTRACE_PEEKDATA: i32 = 2;
    pub const PTRACE_PEEKUSER: i32 = 3;
    pub const PTRACE_POKETEXT: i32 = 4;
    pub const PTRACE_POKEDATA: i32 = 5;
    pub const PTRACE_POKEUSER: i32 = 6;
    pub const PTRACE_CONT: i32 = 7;
    pub const PTRACE_KILL: i32 = 8;
    pub const PTRACE_SINGLESTEP: i32 = 9;
    pub const PTRACE_ATTACH: i32 = 16;
    pub const PTRACE_DETACH: i32 = 17;
    pub const PTRACE_SYSCALL: i32 = 24;

    pub const PTRACE_SETOPTIONS: i32 = 0x4200;
    pub const PTRACE_GETEVENTMSG: i32 = 0x4201;
    pub const PTRACE_GETSIGINFO: i32 = 0x4202;
    pub const PTRACE_SETSIGINFO: i32 = 0x4203;
    pub const PTRACE_GETREGSET: i32 = 0x4204;
    pub const PTRACE_SETREGSET: i32 = 0x4205;
    pub const PTRACE_SEIZE: i32 = 0x4206;
    pub const PTRACE_INTERRUPT: i32 = 0x4207;
    pub const PTRACE_LISTEN: i32 = 0x4208;

    /// Hardware breakpoint registers, 32 bit arm only. Not exported by libc at all.
    #[cfg(target_arch = "arm")]
    pub const PTRACE_GETHBPREGS: i32 = 29;
    #[cfg(target_arch = "arm")]
    pub const PTRACE_SETHBPREGS: i32 = 30;
}

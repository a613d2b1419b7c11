//! # Symbol Tables
//!
//! Immutable `code -> name` tables for signals, signal sub-codes, `errno` values and `ptrace`
//! requests.
//!
//! Every table is split into a `common` part, which exists on every POSIX platform we build for,
//! and `extensions` that are only filled where the platform defines them: the Linux kernel
//! family (`target_os = "linux"` or `"android"`), and for a few `ptrace` requests only some
//! architectures or C libraries on top of that. Entries that a platform does not define are
//! simply not compiled in, so at runtime they look exactly like any other unknown code.
//!
//! The tables are built from the constants themselves with the `symbols!` macro, so the name
//! of an entry is always the token of the constant that produced it.

use std::fmt::{self, Display};

use nix::libc;
use serde::Serialize;

use crate::consts;

/// A single entry: the raw value and the token that names it
pub type Symbol = (i32, &'static str);

/// Builds a `&[Symbol]` from constant names that live in the module `$src`
macro_rules! symbols {
    ($src:ident => $($name:ident),* $(,)?) => {
        &[$(($src::$name, stringify!($name))),*]
    };
    // for constants whose integer type differs between C libraries
    ($src:ident as i32 => $($name:ident),* $(,)?) => {
        &[$(($src::$name as i32, stringify!($name))),*]
    };
}

/// Which kind of code a table, lookup or error is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Signal,
    SignalCode,
    Errno,
    Ptrace,
}

impl Category {
    /// The fixed label used in diagnostics when a code of this category is unknown
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Signal => "unknown signal",
            Category::SignalCode => "unknown code",
            Category::Errno => "unknown error",
            Category::Ptrace => "unknown ptrace command",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Signal => "signal",
            Category::SignalCode => "signal code",
            Category::Errno => "errno",
            Category::Ptrace => "ptrace request",
        };
        write!(f, "{s}")
    }
}

/// A fixed mapping from raw values to their symbolic names
///
/// Keys are unique within a table, but the same value may appear in different tables
/// (`BUS_ADRALN` and `SEGV_MAPERR` are both `1`).
#[derive(Debug)]
pub struct SymbolTable {
    category: Category,
    common: &'static [Symbol],
    extensions: &'static [&'static [Symbol]],
}

impl SymbolTable {
    const fn new(
        category: Category,
        common: &'static [Symbol],
        extensions: &'static [&'static [Symbol]],
    ) -> Self {
        Self {
            category,
            common,
            extensions,
        }
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Finds the name of `code`
    #[must_use]
    pub fn lookup(&self, code: i32) -> Option<&'static str> {
        self.iter().find(|(c, _)| *c == code).map(|(_, n)| n)
    }

    /// Finds the value named by `name`, which has to match the token exactly
    #[must_use]
    pub fn code_of(&self, name: &str) -> Option<i32> {
        self.iter().find(|(_, n)| *n == name).map(|(c, _)| c)
    }

    /// All entries of the table, the platform extensions last
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.common
            .iter()
            .chain(self.extensions.iter().flat_map(|ext| ext.iter()))
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.common.len() + self.extensions.iter().map(|ext| ext.len()).sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a lookup in a form that can be printed or serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub category: Category,
    /// The enclosing signal, only set for [`Category::SignalCode`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,
    pub code: i32,
    pub name: Option<&'static str>,
}

impl Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{:#x}", self.code),
        }
    }
}

/// The table of sub-codes carried by `signal`, if it has one
///
/// Only `SIGILL`, `SIGBUS` and `SIGSEGV` carry sub-codes.
#[must_use]
pub fn signal_code_table(signal: i32) -> Option<&'static SymbolTable> {
    match signal {
        libc::SIGILL => Some(&ILL_CODES),
        libc::SIGBUS => Some(&BUS_CODES),
        libc::SIGSEGV => Some(&SEGV_CODES),
        _ => None,
    }
}

// ---------------- signals ------------------------------------------------------------------------

pub static SIGNALS: SymbolTable = SymbolTable::new(Category::Signal, SIGNALS_COMMON, &[SIGNALS_EXT]);

const SIGNALS_COMMON: &[Symbol] = symbols!(libc =>
    SIGHUP, SIGINT, SIGQUIT, SIGILL, SIGTRAP, SIGABRT, SIGBUS, SIGFPE, SIGKILL, SIGUSR1,
    SIGSEGV, SIGUSR2, SIGPIPE, SIGALRM, SIGTERM, SIGCHLD, SIGCONT, SIGSTOP, SIGTSTP, SIGTTIN,
    SIGTTOU, SIGURG, SIGXCPU, SIGXFSZ, SIGVTALRM, SIGPROF, SIGWINCH, SIGIO, SIGSYS,
);

#[cfg(any(target_os = "linux", target_os = "android"))]
const SIGNALS_EXT: &[Symbol] = symbols!(libc => SIGSTKFLT, SIGPWR);
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const SIGNALS_EXT: &[Symbol] = &[];

// ---------------- signal codes -------------------------------------------------------------------

pub static ILL_CODES: SymbolTable = SymbolTable::new(
    Category::SignalCode,
    symbols!(consts =>
        ILL_ILLOPC, ILL_ILLOPN, ILL_ILLADR, ILL_ILLTRP, ILL_PRVOPC, ILL_PRVREG, ILL_COPROC,
        ILL_BADSTK,
    ),
    &[],
);

pub static BUS_CODES: SymbolTable = SymbolTable::new(
    Category::SignalCode,
    symbols!(consts => BUS_ADRALN, BUS_ADRERR, BUS_OBJERR),
    &[],
);

pub static SEGV_CODES: SymbolTable = SymbolTable::new(
    Category::SignalCode,
    symbols!(consts => SEGV_MAPERR, SEGV_ACCERR),
    &[],
);

// ---------------- errno --------------------------------------------------------------------------

pub static ERRNOS: SymbolTable = SymbolTable::new(Category::Errno, ERRNOS_COMMON, &[ERRNOS_EXT]);

const ERRNOS_COMMON: &[Symbol] = symbols!(libc =>
    EPERM, ENOENT, ESRCH, EINTR, EIO, ENXIO, E2BIG, ENOEXEC, EBADF, ECHILD, EAGAIN, ENOMEM,
    EACCES, EFAULT, ENOTBLK, EBUSY, EEXIST, EXDEV, ENODEV, ENOTDIR, EISDIR, EINVAL, ENFILE,
    EMFILE, ENOTTY, ETXTBSY, EFBIG, ENOSPC, ESPIPE, EROFS, EMLINK, EPIPE, EDOM, ERANGE,
    EDEADLK, ENAMETOOLONG, ENOLCK, ENOSYS, ENOTEMPTY, ELOOP, ENOMSG, EIDRM, EREMOTE, ENOLINK,
    EPROTO, EMULTIHOP, EBADMSG, EOVERFLOW, EILSEQ, EUSERS, ENOTSOCK, EDESTADDRREQ, EMSGSIZE,
    EPROTOTYPE, ENOPROTOOPT, EPROTONOSUPPORT, ESOCKTNOSUPPORT, EOPNOTSUPP, EPFNOSUPPORT,
    EAFNOSUPPORT, EADDRINUSE, EADDRNOTAVAIL, ENETDOWN, ENETUNREACH, ENETRESET, ECONNABORTED,
    ECONNRESET, ENOBUFS, EISCONN, ENOTCONN, ESHUTDOWN, ETOOMANYREFS, ETIMEDOUT, ECONNREFUSED,
    EHOSTDOWN, EHOSTUNREACH, EALREADY, EINPROGRESS, ESTALE, EDQUOT, ECANCELED, EOWNERDEAD,
    ENOTRECOVERABLE,
);

#[cfg(any(target_os = "linux", target_os = "android"))]
const ERRNOS_EXT: &[Symbol] = symbols!(libc =>
    ECHRNG, EL2NSYNC, EL3HLT, EL3RST, ELNRNG, EUNATCH, ENOCSI, EL2HLT, EBADE, EBADR, EXFULL,
    ENOANO, EBADRQC, EBADSLT, EBFONT, ENOSTR, ENODATA, ETIME, ENOSR, ENONET, ENOPKG, EADV,
    ESRMNT, ECOMM, EDOTDOT, ENOTUNIQ, EBADFD, EREMCHG, ELIBACC, ELIBBAD, ELIBSCN, ELIBMAX,
    ELIBEXEC, ERESTART, ESTRPIPE, EUCLEAN, ENOTNAM, ENAVAIL, EISNAM, EREMOTEIO, ENOMEDIUM,
    EMEDIUMTYPE, ENOKEY, EKEYEXPIRED, EKEYREVOKED, EKEYREJECTED, ERFKILL, EHWPOISON,
);
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const ERRNOS_EXT: &[Symbol] = &[];

// ---------------- ptrace -------------------------------------------------------------------------

/// `ptrace` requests exist on the Linux family only. The extensions hold the requests that only
/// some architectures or C libraries define.
pub static PTRACE_REQUESTS: SymbolTable = SymbolTable::new(
    Category::Ptrace,
    PTRACE_GENERIC,
    &[PTRACE_REGS, PTRACE_HBPREGS],
);

#[cfg(any(target_os = "linux", target_os = "android"))]
const PTRACE_GENERIC: &[Symbol] = symbols!(consts =>
    PTRACE_ATTACH, PTRACE_CONT, PTRACE_DETACH, PTRACE_GETEVENTMSG, PTRACE_GETREGSET,
    PTRACE_GETSIGINFO, PTRACE_INTERRUPT, PTRACE_KILL, PTRACE_LISTEN, PTRACE_PEEKDATA,
    PTRACE_PEEKTEXT, PTRACE_PEEKUSER, PTRACE_POKEDATA, PTRACE_POKETEXT, PTRACE_POKEUSER,
    PTRACE_SEIZE, PTRACE_SETOPTIONS, PTRACE_SETREGSET, PTRACE_SETSIGINFO, PTRACE_SINGLESTEP,
    PTRACE_SYSCALL, PTRACE_TRACEME,
);
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const PTRACE_GENERIC: &[Symbol] = &[];

// the same targets libc exports PTRACE_GETREGS for: every android, musl, ohos and uclibc target,
// and glibc except on aarch64, powerpc64, s390x and sparc64
#[cfg(any(
    target_os = "android",
    all(
        target_os = "linux",
        any(target_env = "musl", target_env = "ohos", target_env = "uclibc")
    ),
    all(
        target_os = "linux",
        target_env = "gnu",
        any(
            target_arch = "x86",
            target_arch = "arm",
            target_arch = "m68k",
            target_arch = "csky",
            target_arch = "mips",
            target_arch = "mips32r6",
            target_arch = "powerpc",
            target_arch = "sparc",
            target_arch = "riscv32",
            target_arch = "x86_64",
            target_arch = "mips64",
            target_arch = "mips64r6",
            target_arch = "riscv64",
            target_arch = "loongarch64"
        )
    )
))]
const PTRACE_REGS: &[Symbol] = symbols!(libc as i32 => PTRACE_GETREGS, PTRACE_SETREGS);
#[cfg(not(any(
    target_os = "android",
    all(
        target_os = "linux",
        any(target_env = "musl", target_env = "ohos", target_env = "uclibc")
    ),
    all(
        target_os = "linux",
        target_env = "gnu",
        any(
            target_arch = "x86",
            target_arch = "arm",
            target_arch = "m68k",
            target_arch = "csky",
            target_arch = "mips",
            target_arch = "mips32r6",
            target_arch = "powerpc",
            target_arch = "sparc",
            target_arch = "riscv32",
            target_arch = "x86_64",
            target_arch = "mips64",
            target_arch = "mips64r6",
            target_arch = "riscv64",
            target_arch = "loongarch64"
        )
    )
)))]
const PTRACE_REGS: &[Symbol] = &[];

#[cfg(all(any(target_os = "linux", target_os = "android"), target_arch = "arm"))]
const PTRACE_HBPREGS: &[Symbol] = symbols!(consts => PTRACE_GETHBPREGS, PTRACE_SETHBPREGS);
#[cfg(not(all(any(target_os = "linux", target_os = "android"), target_arch = "arm")))]
const PTRACE_HBPREGS: &[Symbol] = &[];

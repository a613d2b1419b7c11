//! # Errors
//!
//! There is only one thing that can go wrong in this crate: a code has no symbolic name in the
//! table it was looked up in. [`StringifyError`] carries one variant per [`Category`] so a caller
//! can tell an unknown signal apart from an unknown sub-code of a known signal.

use thiserror::Error;

use crate::table::Category;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, StringifyError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StringifyError {
    #[error("unknown signal: {0:#x}")]
    UnknownSignal(i32),
    /// The signal is known to carry sub-codes, but this code is not one of them. `signal` is
    /// [`None`] if the lookup was made without an enclosing signal.
    #[error("unknown code: {code:#x}")]
    UnknownCode { signal: Option<i32>, code: i32 },
    #[error("unknown error: {0:#x}")]
    UnknownErrno(i32),
    #[error("unknown ptrace command: {0:#x}")]
    UnknownPtrace(i32),
    /// Reverse lookup of a token that is not in the table
    #[error("unknown {category} name: {name}")]
    UnknownName { category: Category, name: String },
}

impl StringifyError {
    /// The table the failed lookup was made against
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::UnknownSignal(_) => Category::Signal,
            Self::UnknownCode { .. } => Category::SignalCode,
            Self::UnknownErrno(_) => Category::Errno,
            Self::UnknownPtrace(_) => Category::Ptrace,
            Self::UnknownName { category, .. } => *category,
        }
    }

    /// The raw value that could not be mapped, if the lookup was by value
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::UnknownSignal(c) | Self::UnknownErrno(c) | Self::UnknownPtrace(c) => Some(*c),
            Self::UnknownCode { code, .. } => Some(*code),
            Self::UnknownName { .. } => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages_carry_label_and_hex() {
        assert_eq!(
            StringifyError::UnknownSignal(0x7f).to_string(),
            "unknown signal: 0x7f"
        );
        assert_eq!(
            StringifyError::UnknownCode {
                signal: Some(11),
                code: 42
            }
            .to_string(),
            "unknown code: 0x2a"
        );
        assert_eq!(
            StringifyError::UnknownErrno(4096).to_string(),
            "unknown error: 0x1000"
        );
        assert_eq!(
            StringifyError::UnknownPtrace(-1).to_string(),
            "unknown ptrace command: 0xffffffff"
        );
        // Rust's alternate hex keeps the prefix for zero, unlike C's %#x
        assert_eq!(
            StringifyError::UnknownErrno(0).to_string(),
            "unknown error: 0x0"
        );
    }

    #[test]
    fn test_category_and_code() {
        let e = StringifyError::UnknownCode {
            signal: Some(7),
            code: 9,
        };
        assert_eq!(e.category(), Category::SignalCode);
        assert_eq!(e.code(), Some(9));

        let e = StringifyError::UnknownName {
            category: Category::Errno,
            name: "ENOPE".to_string(),
        };
        assert_eq!(e.category(), Category::Errno);
        assert_eq!(e.code(), None);
        assert_eq!(e.to_string(), "unknown errno name: ENOPE");
    }
}

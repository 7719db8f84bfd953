use goblin::elf64::header::SIZEOF_EHDR;
use std::io;
use thiserror::Error;

/// Why a buffer could not be decoded as an ELF header.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than a full ELF-64 header.
    #[error("header is {len} bytes, expected at least {min}", min = SIZEOF_EHDR)]
    Truncated { len: usize },
    /// The first four bytes are not `\x7fELF`.
    #[error("bad ELF magic")]
    NotElf,
}

/// Failure to obtain a header from a file or reader, tagged with its path.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Can't open file {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Can't read ELF header from file {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Can't read ELF header from file {path}")]
    Truncated {
        path: String,
        #[source]
        source: DecodeError,
    },
    #[error("File {path} is not an ELF file")]
    NotElf {
        path: String,
        #[source]
        source: DecodeError,
    },
}

impl LoadError {
    pub fn path(&self) -> &str {
        match self {
            LoadError::Open { path, .. }
            | LoadError::Read { path, .. }
            | LoadError::Truncated { path, .. }
            | LoadError::NotElf { path, .. } => path,
        }
    }
}

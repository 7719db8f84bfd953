pub mod binary;
pub mod error;
pub mod header;

pub use binary::*;
pub use error::*;
pub use header::elf::{decode, ElfHeader};
pub use header::ident::*;

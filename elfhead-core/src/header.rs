pub mod elf;
pub mod ident;

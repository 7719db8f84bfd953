use crate::error::DecodeError;
use crate::header::ident::{DataEncoding, FileClass, ObjectType, OsAbi};
use byteorder::{ByteOrder, BE, LE};
use goblin::elf::header::{
    machine_to_str, EI_ABIVERSION, EI_CLASS, EI_DATA, EI_OSABI, EI_VERSION, ELFMAG, SIZEOF_IDENT,
};
use goblin::elf64::header::SIZEOF_EHDR;
use serde::Serialize;

// Field offsets within the ELF-64 header.
const E_TYPE: usize = 16;
const E_MACHINE: usize = 18;
const E_VERSION: usize = 20;
const E_ENTRY: usize = 24;
const E_PHOFF: usize = 32;
const E_SHOFF: usize = 40;
const E_FLAGS: usize = 48;
const E_EHSIZE: usize = 52;
const E_PHENTSIZE: usize = 54;
const E_PHNUM: usize = 56;
const E_SHENTSIZE: usize = 58;
const E_SHNUM: usize = 60;
const E_SHSTRNDX: usize = 62;

/// Decoded ELF file header.
///
/// Mirrors `Elf64_Ehdr` from the ELF specification, with the `e_ident` bytes
/// and `e_type` resolved into their classifications. Values outside the known
/// enumerations are carried as `Unknown(raw)` rather than rejected.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElfHeader {
    /// The 16 `e_ident` bytes, verbatim.
    ///
    /// The first 4 bytes are always `0x7F`, `'E'`, `'L'`, `'F'`.
    pub ident: [u8; 16],

    /// 32- or 64-bit class (`e_ident[EI_CLASS]`).
    pub class: FileClass,

    /// Byte order of every multi-byte field below (`e_ident[EI_DATA]`).
    pub data: DataEncoding,

    /// `e_ident[EI_VERSION]`, usually 1.
    pub version: u8,

    /// `e_ident[EI_OSABI]`.
    pub os_abi: OsAbi,

    /// `e_ident[EI_ABIVERSION]`.
    pub abi_version: u8,

    /// Object file type (relocatable, executable, shared, core).
    pub object_type: ObjectType,

    /// Target architecture, e.g. `EM_X86_64` (62) or `EM_AARCH64` (183).
    pub machine: u16,

    /// `e_version`, the object file version.
    pub elf_version: u32,

    /// Virtual address where execution starts.
    pub entry_point: u64,

    /// File offset of the program header table.
    pub program_header_offset: u64,

    /// File offset of the section header table.
    pub section_header_offset: u64,

    /// Processor-specific flags.
    pub flags: u32,

    /// Size of this header (`64` for ELF64).
    pub header_size: u16,

    /// Size of one program header table entry.
    pub program_header_entry_size: u16,

    /// Number of program header table entries.
    pub program_header_count: u16,

    /// Size of one section header table entry.
    pub section_header_entry_size: u16,

    /// Number of section header table entries.
    pub section_header_count: u16,

    /// Index of the section name string table.
    pub section_name_index: u16,
}

/// Decodes the fixed-size ELF header at the start of `buf`.
///
/// Fails with [`DecodeError::Truncated`] when fewer than 64 bytes are given
/// and with [`DecodeError::NotElf`] when the magic does not match, checked in
/// that order. Anything past the magic is accepted: unrecognised codes come
/// back as `Unknown(raw)`.
///
/// Multi-byte fields are read big-endian for `ELFDATA2MSB` and little-endian
/// otherwise, including for an unknown encoding. The 64-bit layout is used
/// whatever the class byte says.
pub fn decode(buf: &[u8]) -> Result<ElfHeader, DecodeError> {
    if buf.len() < SIZEOF_EHDR {
        return Err(DecodeError::Truncated { len: buf.len() });
    }

    if !buf.starts_with(ELFMAG) {
        return Err(DecodeError::NotElf);
    }

    let mut ident = [0u8; SIZEOF_IDENT];
    ident.copy_from_slice(&buf[..SIZEOF_IDENT]);

    let header = match DataEncoding::from_raw(ident[EI_DATA]) {
        DataEncoding::BigEndian => ElfHeader::read_fields::<BE>(ident, buf),
        DataEncoding::LittleEndian | DataEncoding::Unknown(_) => {
            ElfHeader::read_fields::<LE>(ident, buf)
        }
    };

    Ok(header)
}

impl ElfHeader {
    /// Caller guarantees `buf` holds at least `SIZEOF_EHDR` bytes.
    fn read_fields<E: ByteOrder>(ident: [u8; 16], buf: &[u8]) -> Self {
        ElfHeader {
            class: FileClass::from_raw(ident[EI_CLASS]),
            data: DataEncoding::from_raw(ident[EI_DATA]),
            version: ident[EI_VERSION],
            os_abi: OsAbi::from_raw(ident[EI_OSABI]),
            abi_version: ident[EI_ABIVERSION],
            ident,
            object_type: ObjectType::from_raw(E::read_u16(&buf[E_TYPE..])),
            machine: E::read_u16(&buf[E_MACHINE..]),
            elf_version: E::read_u32(&buf[E_VERSION..]),
            entry_point: E::read_u64(&buf[E_ENTRY..]),
            program_header_offset: E::read_u64(&buf[E_PHOFF..]),
            section_header_offset: E::read_u64(&buf[E_SHOFF..]),
            flags: E::read_u32(&buf[E_FLAGS..]),
            header_size: E::read_u16(&buf[E_EHSIZE..]),
            program_header_entry_size: E::read_u16(&buf[E_PHENTSIZE..]),
            program_header_count: E::read_u16(&buf[E_PHNUM..]),
            section_header_entry_size: E::read_u16(&buf[E_SHENTSIZE..]),
            section_header_count: E::read_u16(&buf[E_SHNUM..]),
            section_name_index: E::read_u16(&buf[E_SHSTRNDX..]),
        }
    }

    /// Name of the target architecture, e.g. `"X86_64"`.
    pub fn machine_name(&self) -> &'static str {
        machine_to_str(self.machine)
    }

    /// Returns true if this is a 64-bit binary.
    pub fn is_64(&self) -> bool {
        self.class == FileClass::SixtyFourBit
    }

    /// Returns true for `ET_EXEC` files (not objects, libraries or PIEs).
    pub fn is_executable(&self) -> bool {
        self.object_type == ObjectType::Executable
    }
}

//! Classifications of the `e_ident` bytes and the `e_type` field.
//!
//! Every classification is permissive: a value outside the known set is kept
//! as `Unknown(raw)` so that a header with an odd byte still decodes.

use std::fmt;

use goblin::elf::header::{
    ELFCLASS32, ELFCLASS64, ELFDATA2LSB, ELFDATA2MSB, ET_CORE, ET_DYN, ET_EXEC, ET_NONE, ET_REL,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};

// EI_OSABI codes
pub const ELFOSABI_SYSV: u8 = 0;
pub const ELFOSABI_HPUX: u8 = 1;
pub const ELFOSABI_NETBSD: u8 = 2;
pub const ELFOSABI_LINUX: u8 = 3;
pub const ELFOSABI_SOLARIS: u8 = 6;
pub const ELFOSABI_IRIX: u8 = 8;
pub const ELFOSABI_FREEBSD: u8 = 9;
pub const ELFOSABI_TRU64: u8 = 10;
pub const ELFOSABI_ARM: u8 = 97;
pub const ELFOSABI_STANDALONE: u8 = 255;

/// Addressing width, from `e_ident[EI_CLASS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    ThirtyTwoBit,
    SixtyFourBit,
    Unknown(u8),
}

impl FileClass {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            ELFCLASS32 => FileClass::ThirtyTwoBit,
            ELFCLASS64 => FileClass::SixtyFourBit,
            other => FileClass::Unknown(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            FileClass::ThirtyTwoBit => ELFCLASS32,
            FileClass::SixtyFourBit => ELFCLASS64,
            FileClass::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for FileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileClass::ThirtyTwoBit => "ELF32",
            FileClass::SixtyFourBit => "ELF64",
            FileClass::Unknown(_) => "unknown",
        };
        f.write_str(label)
    }
}

/// Byte order of the multi-byte fields, from `e_ident[EI_DATA]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataEncoding {
    LittleEndian,
    BigEndian,
    Unknown(u8),
}

impl DataEncoding {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            ELFDATA2LSB => DataEncoding::LittleEndian,
            ELFDATA2MSB => DataEncoding::BigEndian,
            other => DataEncoding::Unknown(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            DataEncoding::LittleEndian => ELFDATA2LSB,
            DataEncoding::BigEndian => ELFDATA2MSB,
            DataEncoding::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DataEncoding::LittleEndian => "2's complement, little endian",
            DataEncoding::BigEndian => "2's complement, big endian",
            DataEncoding::Unknown(_) => "unknown",
        };
        f.write_str(label)
    }
}

/// Target operating system / ABI, from `e_ident[EI_OSABI]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsAbi {
    SystemV,
    HpUx,
    NetBsd,
    Linux,
    Solaris,
    Irix,
    FreeBsd,
    Tru64,
    Arm,
    Standalone,
    Unknown(u8),
}

impl OsAbi {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            ELFOSABI_SYSV => OsAbi::SystemV,
            ELFOSABI_HPUX => OsAbi::HpUx,
            ELFOSABI_NETBSD => OsAbi::NetBsd,
            ELFOSABI_LINUX => OsAbi::Linux,
            ELFOSABI_SOLARIS => OsAbi::Solaris,
            ELFOSABI_IRIX => OsAbi::Irix,
            ELFOSABI_FREEBSD => OsAbi::FreeBsd,
            ELFOSABI_TRU64 => OsAbi::Tru64,
            ELFOSABI_ARM => OsAbi::Arm,
            ELFOSABI_STANDALONE => OsAbi::Standalone,
            other => OsAbi::Unknown(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            OsAbi::SystemV => ELFOSABI_SYSV,
            OsAbi::HpUx => ELFOSABI_HPUX,
            OsAbi::NetBsd => ELFOSABI_NETBSD,
            OsAbi::Linux => ELFOSABI_LINUX,
            OsAbi::Solaris => ELFOSABI_SOLARIS,
            OsAbi::Irix => ELFOSABI_IRIX,
            OsAbi::FreeBsd => ELFOSABI_FREEBSD,
            OsAbi::Tru64 => ELFOSABI_TRU64,
            OsAbi::Arm => ELFOSABI_ARM,
            OsAbi::Standalone => ELFOSABI_STANDALONE,
            OsAbi::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for OsAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OsAbi::SystemV => "UNIX System V ABI",
            OsAbi::HpUx => "HP-UX ABI",
            OsAbi::NetBsd => "NetBSD ABI",
            OsAbi::Linux => "Linux ABI",
            OsAbi::Solaris => "Solaris ABI",
            OsAbi::Irix => "IRIX ABI",
            OsAbi::FreeBsd => "FreeBSD ABI",
            OsAbi::Tru64 => "TRU64 UNIX ABI",
            OsAbi::Arm => "ARM architecture ABI",
            OsAbi::Standalone => "Stand-alone (embedded) ABI",
            OsAbi::Unknown(_) => "unknown",
        };
        f.write_str(label)
    }
}

/// Object file type, from `e_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    None,
    Relocatable,
    Executable,
    SharedObject,
    Core,
    Unknown(u16),
}

impl ObjectType {
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            ET_NONE => ObjectType::None,
            ET_REL => ObjectType::Relocatable,
            ET_EXEC => ObjectType::Executable,
            ET_DYN => ObjectType::SharedObject,
            ET_CORE => ObjectType::Core,
            other => ObjectType::Unknown(other),
        }
    }

    pub fn raw(self) -> u16 {
        match self {
            ObjectType::None => ET_NONE,
            ObjectType::Relocatable => ET_REL,
            ObjectType::Executable => ET_EXEC,
            ObjectType::SharedObject => ET_DYN,
            ObjectType::Core => ET_CORE,
            ObjectType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ObjectType::None => "NONE (Unknown type)",
            ObjectType::Relocatable => "REL (Relocatable file)",
            ObjectType::Executable => "EXEC (Executable file)",
            ObjectType::SharedObject => "DYN (Shared object file)",
            ObjectType::Core => "CORE (Core file)",
            ObjectType::Unknown(_) => "unknown",
        };
        f.write_str(label)
    }
}

/// Serializes a classification as `{ "label": ..., "raw": ... }`.
fn serialize_code<S: Serializer>(
    serializer: S,
    name: &'static str,
    label: String,
    raw: u16,
) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct(name, 2)?;
    state.serialize_field("label", &label)?;
    state.serialize_field("raw", &raw)?;
    state.end()
}

impl Serialize for FileClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(serializer, "FileClass", self.to_string(), self.raw().into())
    }
}

impl Serialize for DataEncoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(serializer, "DataEncoding", self.to_string(), self.raw().into())
    }
}

impl Serialize for OsAbi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(serializer, "OsAbi", self.to_string(), self.raw().into())
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_code(serializer, "ObjectType", self.to_string(), self.raw())
    }
}

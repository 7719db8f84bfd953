use crate::error::{DecodeError, LoadError};
use crate::header::elf::{decode, ElfHeader};
use crate::header::ident::{DataEncoding, FileClass};
use goblin::elf64::header::SIZEOF_EHDR;
use std::io::{self, Read};
use std::path::Path;

/// A file whose ELF header has been read and decoded.
#[derive(Debug, Clone)]
pub struct Binary {
    pub path: String,
    pub header: ElfHeader,
}

impl Binary {
    /// Opens `path` read-only and decodes the header from its first bytes.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let display = path.as_ref().display().to_string();
        let file = std::fs::File::open(&path).map_err(|source| LoadError::Open {
            path: display.clone(),
            source,
        })?;

        Self::from_reader(file, display)
    }

    /// Decodes the header from `reader`, reporting failures against `path`.
    pub fn from_reader<R: Read>(reader: R, path: impl Into<String>) -> Result<Self, LoadError> {
        let path = path.into();

        let bytes = match read_header_bytes(reader) {
            Ok(bytes) => bytes,
            Err(source) => return Err(LoadError::Read { path, source }),
        };
        log::debug!("Read {} header bytes from {}", bytes.len(), path);

        let header = match decode(&bytes) {
            Ok(header) => header,
            Err(source @ DecodeError::Truncated { .. }) => {
                return Err(LoadError::Truncated { path, source })
            }
            Err(source @ DecodeError::NotElf) => return Err(LoadError::NotElf { path, source }),
        };

        if let DataEncoding::Unknown(raw) = header.data {
            log::warn!(
                "{}: unknown data encoding {:#x}; fields read as little endian",
                path,
                raw
            );
        }
        if header.class != FileClass::SixtyFourBit {
            log::warn!("{}: class is {}; fields read with the ELF64 layout", path, header.class);
        }

        Ok(Self { path, header })
    }
}

/// Reads up to one ELF-64 header's worth of bytes, stopping early only at EOF.
pub fn read_header_bytes<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(SIZEOF_EHDR);
    reader.take(SIZEOF_EHDR as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectType;
    use std::error::Error;
    use std::io::Cursor;

    fn header_bytes() -> Vec<u8> {
        let mut buf = vec![0u8; 64];
        buf[..7].copy_from_slice(&[0x7f, b'E', b'L', b'F', 2, 1, 1]);
        buf[16..18].copy_from_slice(&3u16.to_le_bytes());
        buf[24..32].copy_from_slice(&0x1040u64.to_le_bytes());
        buf
    }

    /// Hands out at most three bytes per `read` call.
    struct Trickle<R>(R);

    impl<R: Read> Read for Trickle<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(3);
            self.0.read(&mut buf[..len])
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn reads_at_most_one_header() {
        let mut data = header_bytes();
        data.extend_from_slice(&[0xcc; 500]);
        let bytes = read_header_bytes(Cursor::new(data)).unwrap();
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes, header_bytes());
    }

    #[test]
    fn short_reads_are_stitched_together() {
        let bin = Binary::from_reader(Trickle(Cursor::new(header_bytes())), "lib.so").unwrap();
        assert_eq!(bin.path, "lib.so");
        assert_eq!(bin.header.object_type, ObjectType::SharedObject);
        assert_eq!(bin.header.entry_point, 0x1040);
    }

    #[test]
    fn short_file_is_reported_as_read_failure() {
        let err = Binary::from_reader(Cursor::new(vec![0x7f, b'E', b'L', b'F']), "tiny").unwrap_err();
        assert!(matches!(err, LoadError::Truncated { .. }));
        assert_eq!(err.to_string(), "Can't read ELF header from file tiny");
        assert_eq!(
            err.source().unwrap().to_string(),
            "header is 4 bytes, expected at least 64"
        );
    }

    #[test]
    fn io_failure_is_reported_as_read_failure() {
        let err = Binary::from_reader(Broken, "dev").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert_eq!(err.to_string(), "Can't read ELF header from file dev");
        assert_eq!(err.path(), "dev");
    }

    #[test]
    fn wrong_magic_is_not_elf() {
        let mut data = header_bytes();
        data[0] = 0;
        let err = Binary::from_reader(Cursor::new(data), "notes.txt").unwrap_err();
        assert!(matches!(err, LoadError::NotElf { .. }));
        assert_eq!(err.to_string(), "File notes.txt is not an ELF file");
    }

    #[test]
    fn missing_file_cannot_be_opened() {
        let path = std::env::temp_dir().join("elfhead-core-test-does-not-exist");
        let err = Binary::open(&path).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(
            err.to_string(),
            format!("Can't open file {}", path.display())
        );
    }
}

use elfhead_core::ElfHeader;
use std::io::{self, Write};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn magic(ident: &[u8; 16]) -> String {
    ident
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Printed with `(current)` whatever the byte holds, as `elf_header` always has.
fn version(version: u8) -> String {
    format!("{version} (current)")
}

/// Fields past `Entry point address`, in `readelf -h` order.
fn extra_fields(h: &ElfHeader) -> Vec<(&'static str, String)> {
    vec![
        ("Machine", format!("{} ({})", h.machine_name(), h.machine)),
        ("Version", format!("{:#x}", h.elf_version)),
        (
            "Start of program headers",
            format!("{} (bytes into file)", h.program_header_offset),
        ),
        (
            "Start of section headers",
            format!("{} (bytes into file)", h.section_header_offset),
        ),
        ("Flags", format!("{:#x}", h.flags)),
        ("Size of this header", format!("{} (bytes)", h.header_size)),
        (
            "Size of program headers",
            format!("{} (bytes)", h.program_header_entry_size),
        ),
        ("Number of program headers", h.program_header_count.to_string()),
        (
            "Size of section headers",
            format!("{} (bytes)", h.section_header_entry_size),
        ),
        ("Number of section headers", h.section_header_count.to_string()),
        (
            "Section header string table index",
            h.section_name_index.to_string(),
        ),
    ]
}

/// Writes the header in the classic `elf_header` layout.
pub fn text<W: Write>(h: &ElfHeader, all: bool, out: &mut W) -> io::Result<()> {
    writeln!(out, "Magic:   {}", magic(&h.ident))?;
    writeln!(out, "Class:\n\t\t\t{}", h.class)?;
    writeln!(out, "Data:\n\t\t\t{}", h.data)?;
    writeln!(out, "Version:\n\t\t\t{}", version(h.version))?;
    writeln!(out, "OS/ABI: {}", h.os_abi)?;
    writeln!(out, "ABI Version: {}", h.abi_version)?;
    writeln!(out, "Type:{}", h.object_type)?;
    writeln!(out, "Entry point address: {:#x}", h.entry_point)?;

    if all {
        for (field, value) in extra_fields(h) {
            writeln!(out, "{field}: {value}")?;
        }
    }
    Ok(())
}

/// Writes every header field as a two-column table.
pub fn table<W: Write>(h: &ElfHeader, out: &mut W) -> io::Result<()> {
    let mut rows = vec![
        ("Magic", magic(&h.ident)),
        ("Class", h.class.to_string()),
        ("Data", h.data.to_string()),
        ("Version", version(h.version)),
        ("OS/ABI", h.os_abi.to_string()),
        ("ABI Version", h.abi_version.to_string()),
        ("Type", h.object_type.to_string()),
        ("Entry point address", format!("{:#x}", h.entry_point)),
    ];
    rows.extend(extra_fields(h));

    let table = Table::new(rows.into_iter().map(|(field, value)| Row { field, value }))
        .with(Style::modern())
        .to_string();
    writeln!(out, "{table}")
}

pub fn json<W: Write>(h: &ElfHeader, out: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, h)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use elfhead_core::decode;

    fn exec_header() -> ElfHeader {
        let mut buf = [0u8; 64];
        buf[..9].copy_from_slice(&[0x7f, b'E', b'L', b'F', 2, 1, 1, 0, 0]);
        buf[16..18].copy_from_slice(&2u16.to_le_bytes());
        buf[18..20].copy_from_slice(&62u16.to_le_bytes());
        buf[20..24].copy_from_slice(&1u32.to_le_bytes());
        buf[24..32].copy_from_slice(&0x400078u64.to_le_bytes());
        buf[32..40].copy_from_slice(&64u64.to_le_bytes());
        buf[52..54].copy_from_slice(&64u16.to_le_bytes());
        buf[54..56].copy_from_slice(&56u16.to_le_bytes());
        buf[56..58].copy_from_slice(&1u16.to_le_bytes());
        decode(&buf).unwrap()
    }

    fn render_text(h: &ElfHeader, all: bool) -> String {
        let mut out = Vec::new();
        text(h, all, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn classic_layout() {
        let expected = "\
Magic:   7f 45 4c 46 02 01 01 00 00 00 00 00 00 00 00 00
Class:
\t\t\tELF64
Data:
\t\t\t2's complement, little endian
Version:
\t\t\t1 (current)
OS/ABI: UNIX System V ABI
ABI Version: 0
Type:EXEC (Executable file)
Entry point address: 0x400078
";
        assert_eq!(render_text(&exec_header(), false), expected);
    }

    #[test]
    fn unknown_values_print_unknown() {
        let mut h = exec_header();
        h.ident[4] = 9;
        h.class = elfhead_core::FileClass::Unknown(9);
        h.data = elfhead_core::DataEncoding::Unknown(0);
        h.version = 7;
        h.os_abi = elfhead_core::OsAbi::Unknown(200);
        h.object_type = elfhead_core::ObjectType::Unknown(9999);
        h.entry_point = 0;

        let out = render_text(&h, false);
        assert!(out.starts_with("Magic:   7f 45 4c 46 09 01"));
        assert!(out.contains("Class:\n\t\t\tunknown\n"));
        assert!(out.contains("Data:\n\t\t\tunknown\n"));
        assert!(out.contains("Version:\n\t\t\t7 (current)\n"));
        assert!(out.contains("OS/ABI: unknown\n"));
        assert!(out.contains("Type:unknown\n"));
        assert!(out.ends_with("Entry point address: 0x0\n"));
    }

    #[test]
    fn version_is_always_marked_current() {
        for byte in [0, 1, 2, 255] {
            let mut h = exec_header();
            h.version = byte;
            let out = render_text(&h, false);
            assert!(out.contains(&format!("Version:\n\t\t\t{byte} (current)\n")));
        }
    }

    #[test]
    fn all_appends_remaining_fields() {
        let out = render_text(&exec_header(), true);
        assert!(out.contains("Entry point address: 0x400078\nMachine: X86_64 (62)\n"));
        assert!(out.contains("Start of program headers: 64 (bytes into file)\n"));
        assert!(out.contains("Number of program headers: 1\n"));
        assert!(out.ends_with("Section header string table index: 0\n"));
    }

    #[test]
    fn table_lists_every_field() {
        let mut out = Vec::new();
        table(&exec_header(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Field"));
        assert!(out.contains("ELF64"));
        assert!(out.contains("EXEC (Executable file)"));
        assert!(out.contains("0x400078"));
        assert!(out.contains("Section header string table index"));
    }

    #[test]
    fn json_round_trips_through_serde_json() {
        let mut out = Vec::new();
        json(&exec_header(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["class"]["label"], "ELF64");
        assert_eq!(value["object_type"]["raw"], 2u64);
        assert_eq!(value["entry_point"], 0x400078u64);
    }
}

//! Best-effort content type descriptors.
//!
//! Produces short, libmagic-style descriptions ("ELF 64-bit LSB pie
//! executable, x86-64", "PE32 executable (GUI) Intel 80386, for MS Windows",
//! "Zip archive data") from the first bytes of a file. ELF and PE headers are
//! parsed with goblin; everything else is recognized by magic numbers.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use goblin::container::Ctx;
use goblin::elf::header as elf_header;
use goblin::elf::program_header::{ProgramHeader, PT_INTERP};
use goblin::elf::Elf;
use goblin::pe::characteristic::IMAGE_FILE_DLL;
use goblin::pe::optional_header::MAGIC_64;

/// Bytes read from the start of a file.
const SAMPLE_LEN: u64 = 64 * 1024;

const PE_SUBSYSTEM_GUI: u16 = 2;
const PE_SUBSYSTEM_CONSOLE: u16 = 3;
const PE_MACHINE_I386: u16 = 0x14c;
const PE_MACHINE_AMD64: u16 = 0x8664;
const PE_MACHINE_ARM64: u16 = 0xaa64;

/// Describe the file at `path`.
pub fn describe(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut sample = Vec::new();
    file.take(SAMPLE_LEN).read_to_end(&mut sample)?;
    Ok(describe_bytes(&sample))
}

/// Describe a content sample.
pub fn describe_bytes(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "empty".to_string();
    }
    if bytes.starts_with(b"\x7fELF") {
        return describe_elf(bytes).unwrap_or_else(|| "data".to_string());
    }
    if bytes.starts_with(b"MZ") {
        return describe_pe(bytes).unwrap_or_else(|| "MS-DOS executable".to_string());
    }
    if let Some(desc) = describe_magic(bytes) {
        return desc.to_string();
    }
    if bytes.starts_with(b"#!") {
        return describe_script(bytes);
    }
    describe_text(bytes).unwrap_or_else(|| "data".to_string())
}

fn describe_elf(bytes: &[u8]) -> Option<String> {
    let header = Elf::parse_header(bytes).ok()?;
    let class = match header.e_ident[elf_header::EI_CLASS] {
        elf_header::ELFCLASS32 => "32-bit",
        elf_header::ELFCLASS64 => "64-bit",
        _ => return None,
    };
    let order = match header.e_ident[elf_header::EI_DATA] {
        elf_header::ELFDATA2LSB => "LSB",
        elf_header::ELFDATA2MSB => "MSB",
        _ => return None,
    };
    let kind = match header.e_type {
        elf_header::ET_EXEC => "executable",
        elf_header::ET_DYN if has_interpreter(bytes, &header) => "pie executable",
        elf_header::ET_DYN => "shared object",
        elf_header::ET_REL => "relocatable",
        elf_header::ET_CORE => "core file",
        _ => "processor-specific",
    };

    let mut desc = format!("ELF {class} {order} {kind}");
    let machine = match header.e_machine {
        elf_header::EM_386 => Some("Intel 80386"),
        elf_header::EM_X86_64 => Some("x86-64"),
        elf_header::EM_ARM => Some("ARM"),
        elf_header::EM_AARCH64 => Some("ARM aarch64"),
        _ => None,
    };
    if let Some(machine) = machine {
        desc.push_str(", ");
        desc.push_str(machine);
    }
    Some(desc)
}

/// A dynamic ELF object with a `PT_INTERP` segment is a PIE executable rather
/// than a shared library.
fn has_interpreter(bytes: &[u8], header: &elf_header::Header) -> bool {
    let (Ok(container), Ok(endian)) = (header.container(), header.endianness()) else {
        return false;
    };
    let ctx = Ctx::new(container, endian);
    ProgramHeader::parse(bytes, header.e_phoff as usize, header.e_phnum as usize, ctx)
        .map(|headers| headers.iter().any(|ph| ph.p_type == PT_INTERP))
        .unwrap_or(false)
}

fn describe_pe(bytes: &[u8]) -> Option<String> {
    let header = goblin::pe::header::Header::parse(bytes).ok()?;
    let optional = header.optional_header?;

    let mut desc = String::from(if optional.standard_fields.magic == MAGIC_64 {
        "PE32+ executable"
    } else {
        "PE32 executable"
    });
    if header.coff_header.characteristics & IMAGE_FILE_DLL != 0 {
        desc.push_str(" (DLL)");
    }
    match optional.windows_fields.subsystem {
        PE_SUBSYSTEM_GUI => desc.push_str(" (GUI)"),
        PE_SUBSYSTEM_CONSOLE => desc.push_str(" (console)"),
        _ => {}
    }
    match header.coff_header.machine {
        PE_MACHINE_I386 => desc.push_str(" Intel 80386"),
        PE_MACHINE_AMD64 => desc.push_str(" x86-64"),
        PE_MACHINE_ARM64 => desc.push_str(" Aarch64"),
        _ => {}
    }
    desc.push_str(", for MS Windows");
    Some(desc)
}

fn describe_magic(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"PK\x03\x04", "Zip archive data"),
        (b"PK\x05\x06", "Zip archive data (empty)"),
        (b"7z\xbc\xaf\x27\x1c", "7-zip archive data"),
        (b"Rar!\x1a\x07", "RAR archive data"),
        (b"\x1f\x8b", "gzip compressed data"),
        (b"BZh", "bzip2 compressed data"),
        (b"\xfd7zXZ\x00", "XZ compressed data"),
        (b"\x89PNG\r\n\x1a\n", "PNG image data"),
        (b"\xff\xd8\xff", "JPEG image data"),
        (b"GIF87a", "GIF image data"),
        (b"GIF89a", "GIF image data"),
        (b"%PDF-", "PDF document"),
        (b"OggS", "Ogg data"),
        (b"fLaC", "FLAC audio bitstream data"),
        (b"RIFF", "RIFF (little-endian) data"),
        (b"ID3", "Audio file with ID3 version 2"),
        (b"MThd", "Standard MIDI data"),
        (b"\x00asm", "WebAssembly (wasm) binary module"),
        (b"OTTO", "OpenType font data"),
        (b"\x00\x01\x00\x00\x00", "TrueType Font data"),
        (b"wOFF", "Web Open Font Format"),
        (b"wOF2", "Web Open Font Format (Version 2)"),
        (b"SQLite format 3\x00", "SQLite 3.x database"),
        (b"\x1a\x45\xdf\xa3", "WebM"),
        (b"\xcf\xfa\xed\xfe", "Mach-O 64-bit executable"),
        (b"\xce\xfa\xed\xfe", "Mach-O executable"),
    ];

    if let Some((_, desc)) = SIGNATURES.iter().find(|(magic, _)| bytes.starts_with(magic)) {
        return Some(desc);
    }
    if bytes.starts_with(b"\xca\xfe\xba\xbe") && bytes.len() >= 8 {
        // Fat Mach-O and Java class files share a magic; a small second word
        // is an architecture count, a large one a class file version.
        let word = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        return Some(if word < 20 { "Mach-O universal binary" } else { "compiled Java class data" });
    }
    if bytes.starts_with(b"BM") && bytes.len() >= 14 && bytes[6..10] == [0, 0, 0, 0] {
        return Some("PC bitmap");
    }
    if bytes.len() > 0x8006 && &bytes[0x8001..0x8006] == b"CD001" {
        return Some("ISO 9660 CD-ROM filesystem data");
    }
    None
}

fn describe_script(bytes: &[u8]) -> String {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let first_line = String::from_utf8_lossy(first_line);
    let mut words = first_line.trim_start_matches("#!").split_whitespace();
    let mut interpreter = words.next().unwrap_or_default().rsplit('/').next().unwrap_or_default();
    if interpreter == "env" {
        interpreter = words.find(|w| !w.starts_with('-')).unwrap_or_default();
    }

    let kind = match interpreter {
        "sh" | "dash" => "POSIX shell script".to_string(),
        "bash" => "Bourne-Again shell script".to_string(),
        i if i.starts_with("python") => "Python script".to_string(),
        "ruby" => "Ruby script".to_string(),
        "perl" => "Perl script".to_string(),
        other => format!("a {other} script"),
    };
    let text = describe_text(bytes).unwrap_or_else(|| "data".to_string());
    format!("{kind}, {text} executable")
}

fn describe_text(bytes: &[u8]) -> Option<String> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        // The sample may end inside a multi-byte character.
        Err(err) if err.error_len().is_none() => std::str::from_utf8(&bytes[..err.valid_up_to()]).ok()?,
        Err(_) => return None,
    };
    let is_text = text
        .chars()
        .all(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r' | '\x0c' | '\x1b'));
    if !is_text {
        return None;
    }

    let head = text.trim_start().to_ascii_lowercase();
    if head.starts_with("<?xml") {
        return Some("XML 1.0 document".to_string());
    }
    if head.starts_with("<!doctype html") || head.starts_with("<html") {
        return Some("HTML document".to_string());
    }
    Some(if text.is_ascii() { "ASCII text" } else { "Unicode text, UTF-8 text" }.to_string())
}

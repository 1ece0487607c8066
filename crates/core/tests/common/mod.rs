#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use gamesweep_core::db::{CatalogDb, CatalogEntry, CatalogLayout};

pub const ET_REL: u16 = 1;
pub const ET_EXEC: u16 = 2;
pub const ET_DYN: u16 = 3;

pub const PE_GUI: u16 = 2;
pub const PE_CONSOLE: u16 = 3;

/// Minimal little-endian x86-64 ELF image. With `interp`, a single
/// `PT_INTERP` program header is emitted, which is what marks a PIE.
pub fn elf64(e_type: u16, interp: bool) -> Vec<u8> {
    let phnum: u16 = if interp { 1 } else { 0 };
    let mut b = Vec::new();
    b.extend_from_slice(b"\x7fELF");
    b.extend_from_slice(&[2, 1, 1, 0]);
    b.extend_from_slice(&[0u8; 8]);
    b.extend_from_slice(&e_type.to_le_bytes());
    b.extend_from_slice(&0x3eu16.to_le_bytes());
    b.extend_from_slice(&1u32.to_le_bytes());
    b.extend_from_slice(&0u64.to_le_bytes()); // e_entry
    b.extend_from_slice(&64u64.to_le_bytes()); // e_phoff
    b.extend_from_slice(&0u64.to_le_bytes()); // e_shoff
    b.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    b.extend_from_slice(&64u16.to_le_bytes()); // e_ehsize
    b.extend_from_slice(&56u16.to_le_bytes()); // e_phentsize
    b.extend_from_slice(&phnum.to_le_bytes());
    b.extend_from_slice(&64u16.to_le_bytes()); // e_shentsize
    b.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    b.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx

    if interp {
        let path = b"/lib64/ld-linux-x86-64.so.2\0";
        let offset = 64u64 + 56;
        b.extend_from_slice(&3u32.to_le_bytes()); // PT_INTERP
        b.extend_from_slice(&4u32.to_le_bytes()); // PF_R
        b.extend_from_slice(&offset.to_le_bytes());
        b.extend_from_slice(&offset.to_le_bytes());
        b.extend_from_slice(&offset.to_le_bytes());
        b.extend_from_slice(&(path.len() as u64).to_le_bytes());
        b.extend_from_slice(&(path.len() as u64).to_le_bytes());
        b.extend_from_slice(&1u64.to_le_bytes());
        b.extend_from_slice(path);
    }
    b.resize(256, 0);
    b
}

/// Minimal PE image: DOS header, PE signature, COFF header, and an optional
/// header with sixteen empty data directories.
pub fn pe(plus: bool, dll: bool, subsystem: u16) -> Vec<u8> {
    let mut b = vec![0u8; 0x80];
    b[0] = b'M';
    b[1] = b'Z';
    b[0x3c..0x40].copy_from_slice(&0x80u32.to_le_bytes());
    b.extend_from_slice(b"PE\0\0");

    let optional_len: u16 = if plus { 240 } else { 224 };
    let machine: u16 = if plus { 0x8664 } else { 0x14c };
    let mut characteristics: u16 = 0x0002;
    if dll {
        characteristics |= 0x2000;
    }
    b.extend_from_slice(&machine.to_le_bytes());
    b.extend_from_slice(&0u16.to_le_bytes()); // sections
    b.extend_from_slice(&0u32.to_le_bytes()); // timestamp
    b.extend_from_slice(&0u32.to_le_bytes()); // symbol table
    b.extend_from_slice(&0u32.to_le_bytes()); // symbols
    b.extend_from_slice(&optional_len.to_le_bytes());
    b.extend_from_slice(&characteristics.to_le_bytes());

    let mut optional = vec![0u8; optional_len as usize];
    let magic: u16 = if plus { 0x20b } else { 0x10b };
    optional[0..2].copy_from_slice(&magic.to_le_bytes());
    optional[68..70].copy_from_slice(&subsystem.to_le_bytes());
    let rva_count_at = if plus { 108 } else { 92 };
    optional[rva_count_at..rva_count_at + 4].copy_from_slice(&16u32.to_le_bytes());
    b.extend_from_slice(&optional);
    b.resize(512, 0);
    b
}

/// Bytes that sniff as an ISO 9660 image.
pub fn iso9660() -> Vec<u8> {
    let mut b = vec![0u8; 0x8800];
    b[0x8000] = 1;
    b[0x8001..0x8006].copy_from_slice(b"CD001");
    b
}

/// Write `bytes` at `path`, creating parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, bytes).expect("write fixture");
    path.to_path_buf()
}

/// Fresh store plus an existing (empty) config directory under `root`.
pub fn new_catalog(root: &Path) -> (CatalogLayout, CatalogDb) {
    let layout = CatalogLayout::new(root.join("pga.db"), root.join("games"));
    fs::create_dir_all(&layout.config_dir).expect("create config dir");
    let db = CatalogDb::create(&layout.store_path).expect("create store");
    (layout, db)
}

/// Insert a row plus a document whose `game` block points at `binary`.
pub fn seed_entry(db: &CatalogDb, layout: &CatalogLayout, id: i64, slug: &str, binary: &Path) {
    let entry = CatalogEntry {
        id,
        name: slug.to_string(),
        slug: slug.to_string(),
        platform: Some("Linux".into()),
        runner: Some("linux".into()),
        directory: binary.parent().map(|d| d.to_string_lossy().into_owned()),
        installed_at: Some(0),
        configpath: Some(slug.to_string()),
    };
    db.insert_entry(&entry).expect("insert seeded entry");
    let body = format!("linux: {{}}\ngame:\n  exe: {}\nsystem: {{}}\n", binary.display());
    fs::write(layout.document_path(slug), body).expect("write seeded document");
}

/// Canonical form of a tempdir path, matching what the scanner records.
pub fn canon(path: &Path) -> PathBuf {
    path.canonicalize().expect("canonicalize")
}

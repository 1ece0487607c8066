use std::collections::{BTreeMap, BTreeSet};

use crate::rules::{ContentRule, ExtensionRule, PayloadKind};

/// Extensions that are never game artifacts: documents, text, archives,
/// media, fonts, libraries and save data.
const IGNORED_EXTENSIONS: &[&str] = &[
    "txt", "md", "nfo", "diz", "pdf", "doc", "docx", "rtf", "htm", "html", "xml", "json", "yml",
    "yaml", "ini", "cfg", "conf", "log", "csv", "url", "lnk", "desktop", "zip", "7z", "rar", "tar",
    "gz", "bz2", "xz", "zst", "cab", "png", "jpg", "jpeg", "gif", "bmp", "ico", "icns", "svg",
    "tga", "webp", "mp3", "ogg", "wav", "flac", "mid", "midi", "mp4", "mkv", "avi", "webm", "ttf",
    "otf", "woff", "woff2", "dll", "so", "dylib", "pak", "dat", "sav", "srm", "state", "py", "pyc",
    "rb", "lua", "c", "h", "cpp", "js", "css",
];

/// Content descriptors never treated as runnable.
const IGNORED_CONTENT_PREFIXES: &[&str] = &[
    "7-zip archive data",
    "Adobe Photoshop Image",
    "Apple Desktop Services Store",
    "ASCII text",
    "Audio file with ID3",
    "bzip2 compressed data",
    "C source",
    "C++ source",
    "compiled Java class data",
    "CSV text",
    "data",
    "DOS batch file",
    "ELF 32-bit LSB core file",
    "ELF 32-bit LSB relocatable",
    "ELF 32-bit LSB shared object",
    "ELF 64-bit LSB core file",
    "ELF 64-bit LSB relocatable",
    "ELF 64-bit LSB shared object",
    "empty",
    "FLAC audio bitstream data",
    "GIF image data",
    "gzip compressed data",
    "HTML document",
    "ISO-8859 text",
    "Java archive data",
    "JPEG image data",
    "JSON data",
    "Mach-O",
    "MS Windows icon resource",
    "MS Windows shortcut",
    "Non-ISO extended-ASCII text",
    "Ogg data",
    "OpenType font data",
    "PC bitmap",
    "PDF document",
    "PE32 executable (DLL)",
    "PE32+ executable (DLL)",
    "PNG image data",
    "POSIX tar archive",
    "Python script",
    "RAR archive data",
    "RIFF (little-endian) data",
    "Ruby script",
    "SQLite 3.x database",
    "Standard MIDI data",
    "TrueType Font data",
    "Unicode text",
    "Web Open Font Format",
    "WebAssembly",
    "WebM",
    "XML 1.0 document",
    "XZ compressed data",
    "Zip archive data",
    "zlib compressed data",
];

/// Helper programs shipped next to games: installers, crash handlers,
/// runtimes, bundled tools.
const IGNORED_BINARY_STEMS: &[&str] = &[
    "claunchus",
    "config",
    "crashreporter",
    "cwebp",
    "dxsetup",
    "dxwebsetup",
    "ffmpeg",
    "jabswitch",
    "java",
    "javacpl",
    "java-rmi",
    "javaw",
    "javaws",
    "jjs",
    "jp2launcher",
    "keytool",
    "kinit",
    "klist",
    "ktab",
    "launcher",
    "notification_helper",
    "nwjc",
    "opensavefolder",
    "orbd",
    "pack200",
    "payload",
    "policytool",
    "pysemver",
    "python",
    "pythonw",
    "qgen",
    "resetconfig",
    "rmid",
    "rmiregistry",
    "servertool",
    "subprocess",
    "tnameserv",
    "ue4prereqsetup_x64",
    "ueprereqsetup_x64",
    "unins000",
    "uninstall",
    "uninstaller",
    "unitycrashhandler32",
    "unitycrashhandler64",
    "unpack200",
    "vc_redist.x64",
    "vc_redist.x86",
    "vcredist-x64",
    "vcredist-x86",
    "vcredist_x64",
    "vcredist_x86",
    "zsync",
    "zsyncmake",
];

pub(crate) fn ignored_extensions() -> BTreeSet<String> {
    IGNORED_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn ignored_content_prefixes() -> Vec<String> {
    IGNORED_CONTENT_PREFIXES.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn ignored_binary_stems() -> BTreeSet<String> {
    IGNORED_BINARY_STEMS.iter().map(|s| s.to_string()).collect()
}

/// Native formats first, then DOS, then scripts.
pub(crate) fn content_rules() -> Vec<ContentRule> {
    vec![
        ContentRule {
            prefixes: vec!["ELF 32-bit LSB".into(), "ELF 64-bit LSB".into()],
            platform: "Linux".into(),
            runner: "linux".into(),
            compat_layer: false,
            payload: PayloadKind::Exe,
        },
        ContentRule {
            prefixes: vec!["PE32 executable".into(), "PE32+ executable".into()],
            platform: "Windows".into(),
            runner: "wine".into(),
            compat_layer: true,
            payload: PayloadKind::Exe,
        },
        ContentRule {
            prefixes: vec!["MS-DOS executable".into()],
            platform: "MS-DOS".into(),
            runner: "dosbox".into(),
            compat_layer: true,
            payload: PayloadKind::MainFile,
        },
        ContentRule {
            prefixes: vec!["POSIX shell script".into(), "Bourne-Again shell script".into()],
            platform: "Linux".into(),
            runner: "linux".into(),
            compat_layer: false,
            payload: PayloadKind::Exe,
        },
    ]
}

pub(crate) fn extension_rules() -> BTreeMap<String, ExtensionRule> {
    let mut rules = BTreeMap::new();
    let mut add = |exts: &[&str], rule: ExtensionRule| {
        for ext in exts {
            rules.insert(ext.to_string(), rule.clone());
        }
    };

    add(&["nes"], ExtensionRule::machine("Nintendo NES", "mednafen", "nes"));
    add(&["sfc", "smc"], ExtensionRule::new("Nintendo SNES", "snes9x"));
    add(&["gb"], ExtensionRule::new("Nintendo Game Boy", "mgba"));
    add(&["gbc"], ExtensionRule::new("Nintendo Game Boy Color", "mgba"));
    add(&["gba"], ExtensionRule::new("Nintendo Game Boy Advance", "mgba"));
    add(&["n64", "z64", "v64"], ExtensionRule::new("Nintendo N64", "mupen64plus"));
    add(&["nds"], ExtensionRule::new("Nintendo DS", "desmume"));
    add(&["vb"], ExtensionRule::machine("Nintendo Virtual Boy", "mednafen", "vb"));
    add(&["gcm"], ExtensionRule::new("Nintendo GameCube", "dolphin").option("platform", "0"));
    add(&["wbfs"], ExtensionRule::new("Nintendo Wii", "dolphin").option("platform", "1"));
    add(&["gen", "smd"], ExtensionRule::machine("Sega Genesis", "mednafen", "md"));
    add(&["sms"], ExtensionRule::machine("Sega Master System", "mednafen", "sms"));
    add(&["gg"], ExtensionRule::machine("Sega Game Gear", "mednafen", "gg"));
    add(&["32x"], ExtensionRule::new("Sega 32X", "libretro").option("core", "picodrive"));
    add(&["pce"], ExtensionRule::machine("NEC PC Engine TurboGrafx-16", "mednafen", "pce"));
    add(&["ws", "wsc"], ExtensionRule::machine("Bandai WonderSwan", "mednafen", "wswan"));
    add(&["lnx"], ExtensionRule::machine("Atari Lynx", "mednafen", "lynx"));
    add(&["ngp", "ngc"], ExtensionRule::machine("SNK Neo Geo Pocket", "mednafen", "ngp"));
    add(&["a26"], ExtensionRule::new("Atari 2600", "stella"));
    add(&["z5", "z8"], ExtensionRule::new("Z-Machine", "frotz"));

    rules
}

//! The report's 8-bit document encoding table.
//!
//! The PDF report is drawn with single-byte strings. Bytes 0x20..=0x7E
//! are plain ASCII; bytes 128..=255 follow the CP1251 layout so the
//! Cyrillic title and ingredient names render correctly. The glyph names
//! for the high range are published to the PDF as a `/Differences` array
//! on the font's `/Encoding` dictionary, and [`encode`] maps Rust
//! strings into that byte space.

use crate::pdf::PdfError;

/// Adobe glyph names for code points 128..=255, in byte order.
pub const HIGH_GLYPHS: [&str; 128] = [
    "afii10051",
    "afii10052",
    "quotesinglbase",
    "afii10100",
    "quotedblbase",
    "ellipsis",
    "dagger",
    "daggerdbl",
    "Euro",
    "perthousand",
    "afii10058",
    "guilsinglleft",
    "afii10059",
    "afii10061",
    "afii10060",
    "afii10145",
    "afii10099",
    "quoteleft",
    "quoteright",
    "quotedblleft",
    "quotedblright",
    "bullet",
    "endash",
    "emdash",
    "tilde",
    "trademark",
    "afii10106",
    "guilsinglright",
    "afii10107",
    "afii10109",
    "afii10108",
    "afii10193",
    "space",
    "afii10062",
    "afii10110",
    "afii10057",
    "currency",
    "afii10050",
    "brokenbar",
    "section",
    "afii10023",
    "copyright",
    "afii10053",
    "guillemotleft",
    "logicalnot",
    "hyphen",
    "registered",
    "afii10056",
    "degree",
    "plusminus",
    "afii10055",
    "afii10103",
    "afii10098",
    "mu1",
    "paragraph",
    "periodcentered",
    "afii10071",
    "afii61352",
    "afii10101",
    "guillemotright",
    "afii10105",
    "afii10054",
    "afii10102",
    "afii10104",
    "afii10017",
    "afii10018",
    "afii10019",
    "afii10020",
    "afii10021",
    "afii10022",
    "afii10024",
    "afii10025",
    "afii10026",
    "afii10027",
    "afii10028",
    "afii10029",
    "afii10030",
    "afii10031",
    "afii10032",
    "afii10033",
    "afii10034",
    "afii10035",
    "afii10036",
    "afii10037",
    "afii10038",
    "afii10039",
    "afii10040",
    "afii10041",
    "afii10042",
    "afii10043",
    "afii10044",
    "afii10045",
    "afii10046",
    "afii10047",
    "afii10048",
    "afii10049",
    "afii10065",
    "afii10066",
    "afii10067",
    "afii10068",
    "afii10069",
    "afii10070",
    "afii10072",
    "afii10073",
    "afii10074",
    "afii10075",
    "afii10076",
    "afii10077",
    "afii10078",
    "afii10079",
    "afii10080",
    "afii10081",
    "afii10082",
    "afii10083",
    "afii10084",
    "afii10085",
    "afii10086",
    "afii10087",
    "afii10088",
    "afii10089",
    "afii10090",
    "afii10091",
    "afii10092",
    "afii10093",
    "afii10094",
    "afii10095",
    "afii10096",
    "afii10097",
];

/// Encode a string into the report code page.
///
/// Returns `PdfError::Unencodable` for any character the table cannot
/// represent.
pub fn encode(text: &str) -> Result<Vec<u8>, PdfError> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        out.push(encode_char(ch).ok_or(PdfError::Unencodable(ch))?);
    }
    Ok(out)
}

fn encode_char(ch: char) -> Option<u8> {
    let cp = ch as u32;
    let byte = match cp {
        // Printable ASCII passes through unchanged.
        0x20..=0x7E => cp as u8,
        // The Cyrillic alphabet occupies two contiguous runs.
        0x0410..=0x044F => (0xC0 + (cp - 0x0410)) as u8,
        0x0401 => 0xA8, // Ё
        0x0451 => 0xB8, // ё
        0x0404 => 0xAA, // Є
        0x0454 => 0xBA, // є
        0x0406 => 0xB2, // І
        0x0456 => 0xB3, // і
        0x0407 => 0xAF, // Ї
        0x0457 => 0xBF, // ї
        0x0490 => 0xA5, // Ґ
        0x0491 => 0xB4, // ґ
        0x2116 => 0xB9, // №
        0x00A0 => 0xA0,
        0x00A7 => 0xA7,
        0x00AB => 0xAB,
        0x00BB => 0xBB,
        0x00B0 => 0xB0,
        0x00B1 => 0xB1,
        0x00B7 => 0xB7,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x201E => 0x84,
        0x2022 => 0x95,
        0x2026 => 0x85,
        0x20AC => 0x88,
        0x2122 => 0x99,
        _ => return None,
    };
    Some(byte)
}

//! Glyph table
//!
//! Maps a character to its 8x8 bitmap. Lookup is total: anything outside
//! the supported ranges gets [`UNKNOWN_GLYPH`].

/// Bitmap shown for characters without a glyph
pub const UNKNOWN_GLYPH: u64 = 0xA55A_A55A_A55A_A55A;

/// First codepoint of the Hebrew block covered by the table (alef)
const HEBREW_FIRST: u32 = 0x05D0;

/// Range of the second UTF-8 byte of the covered Hebrew letters
const HEBREW_BYTE_FIRST: u8 = 0x90;
const HEBREW_BYTE_LAST: u8 = 0xAA;

/// Printable ASCII, `'!'` through `'~'`
static PRINTABLE_ASCII: [u64; 94] = [
    0x183C3C1818001800, // !
    0x6C6C6C0000000000, // "
    0x6C6CFE6CFE6C6C00, // #
    0x183E603C067C1800, // $
    0x00C6CC183066C600, // %
    0x386C3876DCCC7600, // &
    0x3030600000000000, // '
    0x0C18303030180C00, // (
    0x30180C0C0C183000, // )
    0x00663CFF3C660000, // *
    0x0018187E18180000, // +
    0x0000000000181830, // ,
    0x0000007E00000000, // -
    0x0000000000181800, // .
    0x060C183060C08000, // /
    0x386CC6D6C66C3800, // 0
    0x1838181818187E00, // 1
    0x3C66061C30667E00, // 2
    0x3C66061C06663C00, // 3
    0x1C3C6CCCFE0C1E00, // 4
    0x7E607C0606663C00, // 5
    0x1C30607C66663C00, // 6
    0x7E66060C18181800, // 7
    0x3C66663C66663C00, // 8
    0x3C66663E060C3800, // 9
    0x0018180000181800, // :
    0x0018180000181830, // ;
    0x0C18306030180C00, // <
    0x00007E00007E0000, // =
    0x30180C060C183000, // >
    0x3C66060C18001800, // ?
    0x7CC6DEDEDEC07800, // @
    0x183C66667E666600, // A
    0xFC66667C6666FC00, // B
    0x3C66C0C0C0663C00, // C
    0xF86C6666666CF800, // D
    0xFE6268786862FE00, // E
    0xFE6268786860F000, // F
    0x3C66C0C0CE663E00, // G
    0x6666667E66666600, // H
    0x3C18181818183C00, // I
    0x1E0C0C0CCCCC7800, // J
    0xE6666C786C66E600, // K
    0xF06060606266FE00, // L
    0xC6EEFEFED6C6C600, // M
    0xC6E6F6DECEC6C600, // N
    0x7CC6C6C6C6C67C00, // O
    0xFC66667C6060F000, // P
    0x7CC6C6C6C6CE7C0E, // Q
    0xFC66667C6C66E600, // R
    0x3C6670380E663C00, // S
    0x7E5A181818183C00, // T
    0x6666666666667E00, // U
    0x66666666663C1800, // V
    0xC6C6C6D6FEEEC600, // W
    0xC6C66C38386CC600, // X
    0x6666663C18183C00, // Y
    0xFEC68C183266FE00, // Z
    0x3C30303030303C00, // [
    0xC06030180C060200, // \
    0x3C0C0C0C0C0C3C00, // ]
    0x10386CC600000000, // ^
    0x00000000000000FF, // _
    0x3030180000000000, // `
    0x0000780C7CCC7600, // a
    0xE060607C6666DC00, // b
    0x00003C6660663C00, // c
    0x1C0C0C7CCCCC7600, // d
    0x00003C667E603C00, // e
    0x1C36307830307800, // f
    0x000076CCCC7C0CF8, // g
    0xE0606C766666E600, // h
    0x1800381818183C00, // i
    0x060006060666663C, // j
    0xE060666C786CE600, // k
    0x3818181818183C00, // l
    0x0000CCFEFED6C600, // m
    0x0000DC6666666600, // n
    0x00003C6666663C00, // o
    0x0000DC66667C60F0, // p
    0x000076CCCC7C0C1E, // q
    0x0000DC766660F000, // r
    0x00003E603C067C00, // s
    0x10307C3030341800, // t
    0x0000CCCCCCCC7600, // u
    0x00006666663C1800, // v
    0x0000C6D6FEFE6C00, // w
    0x0000C66C386CC600, // x
    0x00006666663E067C, // y
    0x00007E4C18327E00, // z
    0x0E18187018180E00, // {
    0x1818180018181800, // |
    0x7018180E18187000, // }
    0x76DC000000000000, // ~
];

/// Hebrew letters, alef through tav (final forms in codepoint order)
static HEBREW: [u64; 27] = [
    0x00C66676DCCCC600, // א
    0x00F80C0C0C0CFE00, // ב
    0x00380C0C1C34E600, // ג
    0x00FE0C0C0C0C0C00, // ד
    0x00FC0606C6C6C600, // ה
    0x0070181818181800, // ו
    0x003C18180C183000, // ז
    0x00FC66C6C6C6C600, // ח
    0x00CCD6D6C6CC7800, // ט
    0x00380C0C18000000, // י
    0x00FC06060C0C0C0E, // ך
    0x00FC06060606FC00, // כ
    0xC0FC06060C181800, // ל
    0x00FC66C6C6C6FE00, // ם
    0x00DC7666C6C6DE00, // מ
    0x00380C181818181C, // ן
    0x00380C0C0C0C7C00, // נ
    0x00FC66C6C6CC7800, // ס
    0x006666666636FC00, // ע
    0x00F84CCCEC0C0C0E, // ף
    0x00FC46C6E606FE00, // פ
    0x006666667C606070, // ץ
    0x0066361C0C067E00, // צ
    0x00FC06666C6E6060, // ק
    0x00FC060606060600, // ר
    0x00D6D6D6F6C67C00, // ש
    0x00FC666666E6E600, // ת
];

/// Look up the bitmap for a character
///
/// Space is blank, printable ASCII and the Hebrew letters have glyphs,
/// everything else maps to [`UNKNOWN_GLYPH`].
pub fn glyph(ch: char) -> u64 {
    match ch {
        ' ' => 0,
        '!'..='~' => PRINTABLE_ASCII[ch as usize - '!' as usize],
        '\u{05D0}'..='\u{05EA}' => HEBREW[(ch as u32 - HEBREW_FIRST) as usize],
        _ => UNKNOWN_GLYPH,
    }
}

/// Look up the bitmap for a single byte
///
/// Bytes in `0x90..=0xAA` are taken as the trailing byte of a two-byte
/// UTF-8 Hebrew letter (the `0xD7` lead byte already stripped by the
/// caller). Other bytes follow [`glyph`].
pub fn glyph_byte(byte: u8) -> u64 {
    match byte {
        HEBREW_BYTE_FIRST..=HEBREW_BYTE_LAST => HEBREW[(byte - HEBREW_BYTE_FIRST) as usize],
        0x00..=0x7F => glyph(byte as char),
        _ => UNKNOWN_GLYPH,
    }
}

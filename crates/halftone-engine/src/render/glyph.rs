//! Built-in 5x7 bitmap glyphs for the ASCII shape.
//!
//! Glyphs are drawn as filled pixel blocks rather than through a font
//! stack, so output is identical on every machine.

/// Characters ordered from densest to sparsest.
pub const ASCII_GRADIENT: [char; 10] = ['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Pick the gradient character for a darkness value.
///
/// Index is `floor(darkness * (len - 1))`, clamped to the gradient.
pub fn gradient_char(darkness: f64) -> char {
    let last = ASCII_GRADIENT.len() - 1;
    let idx = (darkness * last as f64).floor();
    let idx = if idx.is_finite() && idx > 0.0 {
        (idx as usize).min(last)
    } else {
        0
    };
    ASCII_GRADIENT[idx]
}

/// Row bitmaps for a gradient character, MSB = leftmost column.
///
/// `None` for characters outside the gradient.
pub fn glyph_rows(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '@' => g!(0b01110,0b10001,0b10111,0b10101,0b10111,0b10000,0b01111),
        '%' => g!(0b11001,0b11010,0b00010,0b00100,0b01000,0b01011,0b10011),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '*' => g!(0b00000,0b10101,0b01110,0b11111,0b01110,0b10101,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        ':' => g!(0b00000,0b01100,0b01100,0b00000,0b01100,0b01100,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b01100,0b01100),
        ' ' => g!(0,0,0,0,0,0,0),
        _ => None,
    }
}

/// Iterate the `(column, row)` of every lit pixel of a glyph.
pub fn lit_pixels(rows: [u8; 7]) -> impl Iterator<Item = (u32, u32)> {
    (0..GLYPH_HEIGHT).flat_map(move |row| {
        let bits = rows[row as usize];
        (0..GLYPH_WIDTH)
            .filter(move |col| bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0)
            .map(move |col| (col, row))
    })
}

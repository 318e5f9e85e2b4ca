//! The 8b/10b code table.
//!
//! Codewords are held as sampled from the line: the first transmitted bit
//! (`a`) in bit 9 and the last (`j`) in bit 0. A K28.5 comma sent at negative
//! running disparity therefore reads `0b0011111010`.
//!
//! Decoded values are held as an [`Octet`], a byte plus a control flag in bit
//! 8, so K28.5 decodes to `0x1BC`.

use core::fmt;

use tartan_bitfield::bitfield;

use super::disparity::RunningDisparity;

bitfield! {
    struct SubBlocks(u16) {
        [0..4] fghj: u8,
        [4..10] abcdei: u8,
    }
}

bitfield! {
    struct OctetFields(u16) {
        [0..5] x: u8,
        [5..8] y: u8,
        [8] is_control,
    }
}

/// A ten-bit codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword(u16);

impl Codeword {
    /// K28.5 as sent at negative running disparity.
    pub const COMMA_MINUS: Self = Self(0b0011111010);
    /// K28.5 as sent at positive running disparity.
    pub const COMMA_PLUS: Self = Self(0b1100000101);

    /// Create a codeword, discarding bits above the lowest ten.
    pub const fn new(raw: u16) -> Self {
        Self(raw & 0x3FF)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Number of set bits.
    pub const fn ones(self) -> u32 {
        self.0.count_ones()
    }

    /// The 6-bit sub-block (`abcdei`).
    pub fn six_bit(self) -> u8 {
        SubBlocks(self.0).abcdei()
    }

    /// The 4-bit sub-block (`fghj`).
    pub fn four_bit(self) -> u8 {
        SubBlocks(self.0).fghj()
    }

    /// Whether this is either encoding of the K28.5 comma.
    pub fn is_comma(self) -> bool {
        self == Self::COMMA_MINUS || self == Self::COMMA_PLUS
    }
}

/// A decoded value: a byte, flagged as data or control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Octet(u16);

impl Octet {
    /// The comma character.
    pub const K28_5: Self = Self::control(0xBC);
    /// First idle data character.
    pub const D10_2: Self = Self::data(0x4A);
    /// Second idle data character.
    pub const D19_5: Self = Self::data(0xB3);

    pub const fn data(byte: u8) -> Self {
        Self(byte as u16)
    }

    pub const fn control(byte: u8) -> Self {
        Self(0x100 | byte as u16)
    }

    /// The value with the control flag in bit 8.
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn byte(self) -> u8 {
        self.0 as u8
    }

    pub fn is_control(self) -> bool {
        OctetFields(self.0).is_control()
    }

    /// The 5-bit half (`EDCBA`), the `x` of `Dx.y`.
    pub fn x(self) -> u8 {
        OctetFields(self.0).x()
    }

    /// The 3-bit half (`HGF`), the `y` of `Dx.y`.
    pub fn y(self) -> u8 {
        OctetFields(self.0).y()
    }
}

/// Which running disparity a codeword is sent at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disparity {
    /// Sent only at negative running disparity.
    Negative,
    /// Sent only at positive running disparity.
    Positive,
    /// Identical at either running disparity.
    Neutral,
}

/// A successful table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoded {
    pub octet: Octet,
    pub disparity: Disparity,
}

/// Decode a codeword, or `None` if it is not a legal 8b/10b symbol.
pub fn lookup(codeword: Codeword) -> Option<Decoded> {
    TABLE[codeword.0 as usize]
}

/// Encode an octet at a running disparity, or `None` for an undefined
/// control character.
pub fn encode(octet: Octet, running: RunningDisparity) -> Option<Codeword> {
    if !octet.is_control() {
        return Some(Codeword(encode_data(octet.byte(), running)));
    }

    CONTROL
        .iter()
        .find(|(byte, ..)| *byte == octet.byte())
        .map(|&(_, minus, plus)| match running {
            RunningDisparity::Negative => Codeword(minus),
            RunningDisparity::Positive => Codeword(plus),
        })
}

/// The conventional name of an octet, or `None` for an undefined control
/// character.
pub fn name(octet: Octet) -> Option<SymbolName> {
    let control = octet.is_control();

    if control && !CONTROL.iter().any(|(byte, ..)| *byte == octet.byte()) {
        return None;
    }

    Some(SymbolName {
        control,
        x: octet.x(),
        y: octet.y(),
    })
}

/// A symbol name, displayed as `Dx.y` or `Kx.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolName {
    control: bool,
    x: u8,
    y: u8,
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.control { 'K' } else { 'D' };
        write!(f, "{}{}.{}", prefix, self.x, self.y)
    }
}

/// 5b/6b sub-blocks (`abcdei`) indexed by `x`, as (RD-, RD+).
const FIVE_SIX: [(u8, u8); 32] = [
    (0b100111, 0b011000),
    (0b011101, 0b100010),
    (0b101101, 0b010010),
    (0b110001, 0b110001),
    (0b110101, 0b001010),
    (0b101001, 0b101001),
    (0b011001, 0b011001),
    (0b111000, 0b000111),
    (0b111001, 0b000110),
    (0b100101, 0b100101),
    (0b010101, 0b010101),
    (0b110100, 0b110100),
    (0b001101, 0b001101),
    (0b101100, 0b101100),
    (0b011100, 0b011100),
    (0b010111, 0b101000),
    (0b011011, 0b100100),
    (0b100011, 0b100011),
    (0b010011, 0b010011),
    (0b110010, 0b110010),
    (0b001011, 0b001011),
    (0b101010, 0b101010),
    (0b011010, 0b011010),
    (0b111010, 0b000101),
    (0b110011, 0b001100),
    (0b100110, 0b100110),
    (0b010110, 0b010110),
    (0b110110, 0b001001),
    (0b001110, 0b001110),
    (0b101110, 0b010001),
    (0b011110, 0b100001),
    (0b101011, 0b010100),
];

/// 3b/4b sub-blocks (`fghj`) indexed by `y`, as (RD-, RD+).
const THREE_FOUR: [(u8, u8); 8] = [
    (0b1011, 0b0100),
    (0b1001, 0b1001),
    (0b0101, 0b0101),
    (0b1100, 0b0011),
    (0b1101, 0b0010),
    (0b1010, 0b1010),
    (0b0110, 0b0110),
    (0b1110, 0b0001),
];

/// The A7 alternate for `Dx.7`, avoiding a run of five equal bits.
const ALTERNATE_SEVEN: (u8, u8) = (0b0111, 0b1000);

/// Control characters as (byte, RD- codeword, RD+ codeword).
const CONTROL: [(u8, u16, u16); 12] = [
    (0x1C, 0b0011110100, 0b1100001011), // K28.0
    (0x3C, 0b0011111001, 0b1100000110), // K28.1
    (0x5C, 0b0011110101, 0b1100001010), // K28.2
    (0x7C, 0b0011110011, 0b1100001100), // K28.3
    (0x9C, 0b0011110010, 0b1100001101), // K28.4
    (0xBC, 0b0011111010, 0b1100000101), // K28.5
    (0xDC, 0b0011110110, 0b1100001001), // K28.6
    (0xFC, 0b0011111000, 0b1100000111), // K28.7
    (0xF7, 0b1110101000, 0b0001010111), // K23.7
    (0xFB, 0b1101101000, 0b0010010111), // K27.7
    (0xFD, 0b1011101000, 0b0100010111), // K29.7
    (0xFE, 0b0111101000, 0b1000010111), // K30.7
];

static TABLE: [Option<Decoded>; 1024] = build_table();

const fn encode_data(byte: u8, running: RunningDisparity) -> u16 {
    let x = (byte & 0x1F) as usize;
    let y = (byte >> 5) as usize;

    let negative = matches!(running, RunningDisparity::Negative);

    let (minus, plus) = FIVE_SIX[x];
    let six = if negative { minus } else { plus };

    // An unbalanced 6-bit block flips the disparity the 4-bit block sees.
    let negative = if six.count_ones() == 3 {
        negative
    } else {
        !negative
    };

    let alternate = matches!((x, negative), (17 | 18 | 20, true) | (11 | 13 | 14, false));

    let (minus, plus) = if y == 7 && alternate {
        ALTERNATE_SEVEN
    } else {
        THREE_FOUR[y]
    };
    let four = if negative { minus } else { plus };

    (six as u16) << 4 | four as u16
}

const fn build_table() -> [Option<Decoded>; 1024] {
    let mut table = [None; 1024];

    let mut byte = 0;
    while byte < 256 {
        let octet = Octet::data(byte as u8);
        let minus = encode_data(byte as u8, RunningDisparity::Negative);
        let plus = encode_data(byte as u8, RunningDisparity::Positive);

        if minus == plus {
            table[minus as usize] = Some(Decoded {
                octet,
                disparity: Disparity::Neutral,
            });
        } else {
            table[minus as usize] = Some(Decoded {
                octet,
                disparity: Disparity::Negative,
            });
            table[plus as usize] = Some(Decoded {
                octet,
                disparity: Disparity::Positive,
            });
        }

        byte += 1;
    }

    let mut i = 0;
    while i < CONTROL.len() {
        let (byte, minus, plus) = CONTROL[i];
        let octet = Octet::control(byte);

        table[minus as usize] = Some(Decoded {
            octet,
            disparity: Disparity::Negative,
        });
        table[plus as usize] = Some(Decoded {
            octet,
            disparity: Disparity::Positive,
        });

        i += 1;
    }

    table
}

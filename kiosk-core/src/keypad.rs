//! Key codes and keypad layout
//!
//! The keypad is a 4-row by 3-column telephone matrix:
//!
//! ```text
//!        col1  col2  col3
//! row1    1     2     3
//! row2    4     5     6
//! row3    7     8     9
//! row4    *     0     #
//! ```

/// Number of driven row lines
pub const KEYPAD_ROWS: usize = 4;

/// Number of sensed column lines
pub const KEYPAD_COLS: usize = 3;

/// A recognized key
///
/// The numeric values are the key codes carried through the kiosk: digits
/// map to themselves, star is 10 and pound is 11. "No key pressed" is not a
/// variant; scanners return `Option<KeyCode>` and the numeric form of `None`
/// is [`KeyCode::NO_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum KeyCode {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    /// `*` key
    Star = 10,
    /// `#` key
    Pound = 11,
}

/// Row/column to key lookup, rows top to bottom, columns left to right
pub const KEYMAP: [[KeyCode; KEYPAD_COLS]; KEYPAD_ROWS] = [
    [KeyCode::One, KeyCode::Two, KeyCode::Three],
    [KeyCode::Four, KeyCode::Five, KeyCode::Six],
    [KeyCode::Seven, KeyCode::Eight, KeyCode::Nine],
    [KeyCode::Star, KeyCode::Zero, KeyCode::Pound],
];

impl KeyCode {
    /// Numeric code for "no key currently pressed"
    pub const NO_KEY: u8 = 12;

    /// All keys in code order
    pub const ALL: [KeyCode; 12] = [
        KeyCode::Zero,
        KeyCode::One,
        KeyCode::Two,
        KeyCode::Three,
        KeyCode::Four,
        KeyCode::Five,
        KeyCode::Six,
        KeyCode::Seven,
        KeyCode::Eight,
        KeyCode::Nine,
        KeyCode::Star,
        KeyCode::Pound,
    ];

    /// Create a key from its numeric code
    ///
    /// Returns `None` for [`KeyCode::NO_KEY`] and anything out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Get the numeric code
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Numeric code of a scan result, [`KeyCode::NO_KEY`] for `None`
    pub fn code_of(key: Option<Self>) -> u8 {
        key.map_or(Self::NO_KEY, Self::as_u8)
    }

    /// Key at a matrix position (zero-based)
    pub fn at(row: usize, col: usize) -> Option<Self> {
        KEYMAP.get(row)?.get(col).copied()
    }

    /// Matrix position (zero-based row, column) of this key
    pub fn position(self) -> (usize, usize) {
        match self {
            KeyCode::Star => (3, 0),
            KeyCode::Zero => (3, 1),
            KeyCode::Pound => (3, 2),
            digit => {
                let index = digit.as_u8() as usize - 1;
                (index / KEYPAD_COLS, index % KEYPAD_COLS)
            }
        }
    }

    /// Decimal value for digit keys
    pub fn digit(self) -> Option<u8> {
        match self {
            KeyCode::Star | KeyCode::Pound => None,
            digit => Some(digit.as_u8()),
        }
    }

    /// Character printed on the key cap
    pub fn label(self) -> char {
        match self {
            KeyCode::Star => '*',
            KeyCode::Pound => '#',
            digit => (b'0' + digit.as_u8()) as char,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_layout_matches_telephone_pad() {
        let expected: [[u8; 3]; 4] = [[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 0, 11]];
        for (row, codes) in expected.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                assert_eq!(KeyCode::at(row, col).map(KeyCode::as_u8), Some(code));
            }
        }
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(KeyCode::from_u8(0), Some(KeyCode::Zero));
        assert_eq!(KeyCode::from_u8(9), Some(KeyCode::Nine));
        assert_eq!(KeyCode::from_u8(10), Some(KeyCode::Star));
        assert_eq!(KeyCode::from_u8(11), Some(KeyCode::Pound));
        assert_eq!(KeyCode::from_u8(KeyCode::NO_KEY), None);
        assert_eq!(KeyCode::from_u8(200), None);
    }

    #[test]
    fn test_code_of_scan_result() {
        assert_eq!(KeyCode::code_of(Some(KeyCode::Seven)), 7);
        assert_eq!(KeyCode::code_of(None), 12);
    }

    #[test]
    fn test_out_of_range_position() {
        assert_eq!(KeyCode::at(4, 0), None);
        assert_eq!(KeyCode::at(0, 3), None);
    }

    #[test]
    fn test_labels_and_digits() {
        assert_eq!(KeyCode::Zero.label(), '0');
        assert_eq!(KeyCode::Nine.label(), '9');
        assert_eq!(KeyCode::Star.label(), '*');
        assert_eq!(KeyCode::Pound.label(), '#');

        assert_eq!(KeyCode::Five.digit(), Some(5));
        assert_eq!(KeyCode::Star.digit(), None);
        assert_eq!(KeyCode::Pound.digit(), None);
    }

    proptest! {
        #[test]
        fn prop_code_roundtrip(code in 0u8..12) {
            let key = KeyCode::from_u8(code).unwrap();
            prop_assert_eq!(key.as_u8(), code);
        }

        #[test]
        fn prop_position_maps_back(code in 0u8..12) {
            let key = KeyCode::from_u8(code).unwrap();
            let (row, col) = key.position();
            prop_assert_eq!(KeyCode::at(row, col), Some(key));
        }
    }
}

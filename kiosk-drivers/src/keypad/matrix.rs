//! 4x3 matrix keypad scanner
//!
//! Rows are outputs idling high, columns are pulled-up inputs. Driving a
//! row low pulls a column low through any pressed key on that row.
//!
//! Debounce is hold-to-release: once a press is seen the scanner waits for
//! that column to read high again before reporting the key, so a held key
//! is reported exactly once and the caller never sees key-down time.

use kiosk_core::keypad::{KeyCode, KEYMAP, KEYPAD_COLS, KEYPAD_ROWS};
use kiosk_core::traits::KeyScanner;
use kiosk_hal::gpio::{InputPin, OutputPin};
use kiosk_hal::wait::WaitPolicy;

/// Matrix keypad on four row outputs and three column inputs
pub struct MatrixKeypad<R, C, W> {
    rows: [R; KEYPAD_ROWS],
    cols: [C; KEYPAD_COLS],
    wait: W,
}

impl<R, C, W> MatrixKeypad<R, C, W>
where
    R: OutputPin,
    C: InputPin,
    W: WaitPolicy,
{
    /// Create a scanner; rows are listed top to bottom, columns left to right
    pub fn new(mut rows: [R; KEYPAD_ROWS], cols: [C; KEYPAD_COLS], wait: W) -> Self {
        for row in rows.iter_mut() {
            row.set_high();
        }
        Self { rows, cols, wait }
    }

    /// Scan every row once
    ///
    /// Returns the first pressed key in row-major order after it has been
    /// released, or `None` if nothing is pressed. Blocks for as long as
    /// the key is held.
    pub fn scan_once(&mut self) -> Result<Option<KeyCode>, W::Error> {
        for row in 0..KEYPAD_ROWS {
            self.select_row(row);

            for col in 0..KEYPAD_COLS {
                if self.cols[col].is_low() {
                    let column = &mut self.cols[col];
                    self.wait.wait_until(|| column.is_high())?;
                    return Ok(Some(KEYMAP[row][col]));
                }
            }
        }
        Ok(None)
    }

    /// Release the pins and wait policy
    pub fn release(self) -> ([R; KEYPAD_ROWS], [C; KEYPAD_COLS], W) {
        (self.rows, self.cols, self.wait)
    }

    /// Drive every row high, then the selected one low
    fn select_row(&mut self, selected: usize) {
        for row in self.rows.iter_mut() {
            row.set_high();
        }
        self.rows[selected].set_low();
    }
}

impl<R, C, W> KeyScanner for MatrixKeypad<R, C, W>
where
    R: OutputPin,
    C: InputPin,
    W: WaitPolicy,
{
    type Error = W::Error;

    fn scan(&mut self) -> Result<Option<KeyCode>, W::Error> {
        self.scan_once()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use kiosk_hal::wait::{Bounded, Forever, WaitTimeout};
    use proptest::prelude::*;

    /// Simulated key matrix
    ///
    /// A pressed key shorts its row to its column. It stays down for
    /// `hold_reads` low reads of its column, then releases.
    struct Matrix {
        rows: Cell<[bool; KEYPAD_ROWS]>,
        pressed: Cell<Option<(usize, usize)>>,
        hold_reads: Cell<u32>,
        col_reads: Cell<u32>,
    }

    impl Matrix {
        fn new() -> Self {
            Self {
                rows: Cell::new([true; KEYPAD_ROWS]),
                pressed: Cell::new(None),
                hold_reads: Cell::new(0),
                col_reads: Cell::new(0),
            }
        }

        fn press(&self, row: usize, col: usize, hold_reads: u32) {
            self.pressed.set(Some((row, col)));
            self.hold_reads.set(hold_reads);
        }
    }

    struct RowPin<'a> {
        matrix: &'a Matrix,
        index: usize,
    }

    impl OutputPin for RowPin<'_> {
        fn set_high(&mut self) {
            let mut rows = self.matrix.rows.get();
            rows[self.index] = true;
            self.matrix.rows.set(rows);
        }

        fn set_low(&mut self) {
            let mut rows = self.matrix.rows.get();
            rows[self.index] = false;
            self.matrix.rows.set(rows);
        }
    }

    struct ColPin<'a> {
        matrix: &'a Matrix,
        index: usize,
    }

    impl InputPin for ColPin<'_> {
        fn is_high(&mut self) -> bool {
            let m = self.matrix;
            m.col_reads.set(m.col_reads.get() + 1);

            match m.pressed.get() {
                Some((row, col)) if col == self.index && !m.rows.get()[row] => {
                    let hold = m.hold_reads.get();
                    if hold == 0 {
                        m.pressed.set(None);
                        true
                    } else {
                        m.hold_reads.set(hold - 1);
                        false
                    }
                }
                _ => true,
            }
        }
    }

    fn keypad<W: WaitPolicy>(
        matrix: &Matrix,
        wait: W,
    ) -> MatrixKeypad<RowPin<'_>, ColPin<'_>, W> {
        MatrixKeypad::new(
            core::array::from_fn(|index| RowPin { matrix, index }),
            core::array::from_fn(|index| ColPin { matrix, index }),
            wait,
        )
    }

    #[test]
    fn test_no_key() {
        let matrix = Matrix::new();
        let mut keypad = keypad(&matrix, Forever);

        assert_eq!(keypad.scan(), Ok(None));
        // Every column of every row sampled exactly once
        assert_eq!(matrix.col_reads.get(), 12);
        assert_eq!(KeyCode::code_of(None), 12);
    }

    #[test]
    fn test_every_cell_maps_to_its_key() {
        let expected: [[u8; 3]; 4] = [[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 0, 11]];
        for (row, codes) in expected.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                let matrix = Matrix::new();
                let mut keypad = keypad(&matrix, Bounded::default());
                matrix.press(row, col, 3);

                let key = keypad.scan().unwrap();

                assert_eq!(KeyCode::code_of(key), code);
            }
        }
    }

    #[test]
    fn test_waits_for_release() {
        let matrix = Matrix::new();
        let mut keypad = keypad(&matrix, Bounded::default());
        matrix.press(1, 2, 50);

        assert_eq!(keypad.scan(), Ok(Some(KeyCode::Six)));
        assert_eq!(matrix.pressed.get(), None);
        assert_eq!(matrix.hold_reads.get(), 0);
    }

    #[test]
    fn test_held_key_does_not_return() {
        let matrix = Matrix::new();
        let mut keypad = keypad(&matrix, Bounded::new(100));
        matrix.press(0, 0, u32::MAX);

        assert_eq!(keypad.scan(), Err(WaitTimeout));
        // Still held
        assert_eq!(matrix.pressed.get(), Some((0, 0)));
    }

    #[test]
    fn test_reported_once_per_press() {
        let matrix = Matrix::new();
        let mut keypad = keypad(&matrix, Bounded::default());
        matrix.press(3, 2, 10);

        assert_eq!(keypad.scan(), Ok(Some(KeyCode::Pound)));
        assert_eq!(keypad.scan(), Ok(None));
        assert_eq!(keypad.scan(), Ok(None));
    }

    #[test]
    fn test_stops_at_first_pressed_row() {
        let matrix = Matrix::new();
        let mut keypad = keypad(&matrix, Bounded::default());
        matrix.press(0, 1, 1);

        assert_eq!(keypad.scan(), Ok(Some(KeyCode::Two)));
        // col1 read, col2 read low, then the release poll
        assert_eq!(matrix.col_reads.get(), 3);
        // Row 1 was left selected; later rows were never driven
        assert_eq!(matrix.rows.get(), [false, true, true, true]);
    }

    #[test]
    fn test_rows_idle_high() {
        let matrix = Matrix::new();
        matrix.rows.set([false; KEYPAD_ROWS]);

        let _keypad = keypad(&matrix, Forever);

        assert_eq!(matrix.rows.get(), [true; KEYPAD_ROWS]);
    }

    proptest! {
        #[test]
        fn prop_press_maps_to_keymap(row in 0usize..4, col in 0usize..3, hold in 1u32..200) {
            let matrix = Matrix::new();
            let mut keypad = keypad(&matrix, Bounded::new(1_000));
            matrix.press(row, col, hold);

            prop_assert_eq!(keypad.scan(), Ok(Some(KEYMAP[row][col])));
            prop_assert_eq!(keypad.scan(), Ok(None));
        }

        #[test]
        fn prop_idle_scans_find_nothing(scans in 1usize..20) {
            let matrix = Matrix::new();
            let mut keypad = keypad(&matrix, Bounded::new(1));
            for _ in 0..scans {
                prop_assert_eq!(keypad.scan(), Ok(None));
            }
        }
    }
}

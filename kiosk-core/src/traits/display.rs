//! Character display trait

/// Display line selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayRow {
    /// Top line
    First,
    /// Bottom line
    Second,
}

/// Write-only two-line character display
///
/// Nothing is ever read back from the display, so a missing or faulty
/// display is indistinguishable from a working one.
pub trait CharacterDisplay {
    /// Error type for display operations
    type Error;

    /// Run the power-on instruction sequence
    ///
    /// Leaves the display on, cleared, cursor hidden, at the start of line 1.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Clear the whole display
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to the start of a line
    fn set_cursor(&mut self, row: DisplayRow) -> Result<(), Self::Error>;

    /// Write text at the cursor
    ///
    /// Text is not wrapped or clipped; the caller keeps it within the line.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Helper trait for drawing whole screens
pub trait DisplayExt: CharacterDisplay {
    /// Write two lines starting at the current cursor (line 1 after init)
    fn write_lines(&mut self, first: &str, second: &str) -> Result<(), Self::Error> {
        self.write_text(first)?;
        self.set_cursor(DisplayRow::Second)?;
        self.write_text(second)
    }

    /// Replace the screen contents with two lines
    fn show(&mut self, first: &str, second: &str) -> Result<(), Self::Error> {
        self.clear()?;
        self.set_cursor(DisplayRow::First)?;
        self.write_lines(first, second)
    }
}

// Blanket implementation for all CharacterDisplay types
impl<T: CharacterDisplay> DisplayExt for T {}

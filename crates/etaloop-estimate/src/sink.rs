//! Output destinations for auto-printed reports.

use std::fs::File;
use std::io::{self, Cursor, IsTerminal, Stderr, Stdout, Write};

/// Text destination for reports.
///
/// A sink that supports overwriting understands carriage returns and the
/// erase-line control sequence, so each report can replace the previous one
/// in place. Anything else gets one line per report.
pub trait Sink: Write {
    /// Returns true if reports may overwrite the previous line.
    fn supports_overwrite(&self) -> bool {
        false
    }
}

impl Sink for Stdout {
    fn supports_overwrite(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl Sink for Stderr {
    fn supports_overwrite(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl Sink for File {
    fn supports_overwrite(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl Sink for Vec<u8> {}

impl Sink for Cursor<Vec<u8>> {}

impl Sink for io::Sink {}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn supports_overwrite(&self) -> bool {
        (**self).supports_overwrite()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn supports_overwrite(&self) -> bool {
        (**self).supports_overwrite()
    }
}

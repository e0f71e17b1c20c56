//! Delimited feed printer

use crate::error::{Error, Result};
use crate::feed::Page;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Field delimiter for printed rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// Tab separated values
    #[default]
    Tsv,
    /// Comma separated values
    Csv,
}

impl Delimiter {
    /// The separator character
    pub fn as_char(self) -> char {
        match self {
            Self::Tsv => '\t',
            Self::Csv => ',',
        }
    }
}

/// Writes a feed as delimited rows
pub struct FeedPrinter<W: Write> {
    writer: W,
    delimiter: Delimiter,
}

impl FeedPrinter<BufWriter<File>> {
    /// Create a printer that writes to a file, truncating it
    pub fn to_file(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            Error::output(format!("Failed to create {}: {e}", path.display()))
        })?;
        Ok(Self::new(BufWriter::new(file), delimiter))
    }
}

impl FeedPrinter<io::Stdout> {
    /// Create a printer that writes to standard output
    pub fn to_stdout(delimiter: Delimiter) -> Self {
        Self::new(io::stdout(), delimiter)
    }
}

impl<W: Write> FeedPrinter<W> {
    /// Create a printer over any writer
    pub fn new(writer: W, delimiter: Delimiter) -> Self {
        Self { writer, delimiter }
    }

    /// Write the header row and one row per entry.
    ///
    /// Returns the number of data rows written. An empty feed writes nothing.
    pub fn print(&mut self, feed: &Page) -> Result<usize> {
        let Some(first) = feed.entries.first() else {
            return Ok(0);
        };

        self.write_row(&first.field_names())?;
        for entry in &feed.entries {
            self.write_row(&entry.field_values())?;
        }
        self.writer.flush()?;
        Ok(feed.len())
    }

    /// Consume the printer, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        let separator = self.delimiter.as_char();
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(separator);
            }
            push_field(&mut line, field, separator);
        }
        line.push_str("\r\n");
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Append a field, quoting it when it contains the separator, a quote or a
/// line break
fn push_field(line: &mut String, field: &str, separator: char) {
    let needs_quotes = field
        .chars()
        .any(|c| c == separator || c == '"' || c == '\r' || c == '\n');

    if needs_quotes {
        line.push('"');
        line.push_str(&field.replace('"', "\"\""));
        line.push('"');
    } else {
        line.push_str(field);
    }
}

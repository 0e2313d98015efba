use std::ops::Range;

use crate::helper_functions::trim_range;

/// A single non empty line of the input, with surrounding whitespace removed
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RawRecord<'a> {
    /// The zero based line index in the input
    pub line_index: usize,
    /// The byte offset of the start of `text` in the input
    pub offset: usize,
    /// The text of this record
    pub text: &'a str,
}

impl RawRecord<'_> {
    /// The byte range of this record in the input
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// Convert a range relative to this record into a range in the input
    pub const fn absolute(&self, local: Range<usize>) -> Range<usize> {
        self.offset + local.start..self.offset + local.end
    }
}

/// Split the input in records, one per non blank line. Both `\n` and `\r\n` line endings are
/// accepted.
pub fn split_records(text: &str) -> Vec<RawRecord<'_>> {
    let mut records = Vec::new();
    let mut start = 0;
    for (line_index, line) in text.split('\n').enumerate() {
        let range = trim_range(text, start..start + line.len());
        if !range.is_empty() {
            records.push(RawRecord {
                line_index,
                offset: range.start,
                text: &text[range],
            });
        }
        start += line.len() + 1;
    }
    records
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use crate::grammar::split_records;

    #[test]
    fn split() {
        let text = "first line\r\n\n   \n  second line  \nthird";
        let records = split_records(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "first line");
        assert_eq!(records[0].line_index, 0);
        assert_eq!(records[1].text, "second line");
        assert_eq!(records[1].line_index, 3);
        assert_eq!(&text[records[1].range()], "second line");
        assert_eq!(&text[records[1].absolute(0..6)], "second");
        assert_eq!(records[2].text, "third");
    }

    #[test]
    fn empty() {
        assert!(split_records("").is_empty());
        assert!(split_records("\n \r\n").is_empty());
    }
}

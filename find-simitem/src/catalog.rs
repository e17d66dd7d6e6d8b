//! Lookup from item ids to display names.

use std::io::BufRead;

use hashbrown::HashMap;

use crate::errors::{FindSimitemError, Result};

/// Item display names loaded from a pipe-delimited file of
/// `itemID|name|...` records, one per line.
///
/// Lines are decoded as Latin-1, so names outside 7-bit ASCII survive
/// without the file having to be valid UTF-8.
#[derive(Debug, Default)]
pub struct Catalog {
    names: HashMap<u32, String>,
    skipped: usize,
}

impl Catalog {
    /// Loads a catalog from a reader.
    ///
    /// A malformed record (missing fields, non-numeric id) is skipped and
    /// counted; a catalog with no parsable record at all is an error.
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut names = HashMap::new();
        let mut skipped = 0;
        let mut buf = vec![];
        loop {
            buf.clear();
            if rdr.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = decode_latin1(&buf);
            let line = line.trim_end_matches(|c| c == '\n' || c == '\r');
            if line.is_empty() {
                continue;
            }
            match parse_record(line) {
                Some((item_id, name)) => {
                    names.insert(item_id, name);
                }
                None => skipped += 1,
            }
        }
        if names.is_empty() {
            return Err(FindSimitemError::input(
                "The catalog contains no parsable records.",
            ));
        }
        Ok(Self { names, skipped })
    }

    /// Resolves an item id to its display name.
    ///
    /// An unknown id is a [`crate::errors::LookupError`], never a silent
    /// blank.
    pub fn name(&self, item_id: u32) -> Result<&str> {
        self.names
            .get(&item_id)
            .map(String::as_str)
            .ok_or(FindSimitemError::lookup(item_id))
    }

    /// Checks whether an item id is cataloged.
    pub fn contains(&self, item_id: u32) -> bool {
        self.names.contains_key(&item_id)
    }

    /// Gets the number of cataloged items.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Gets the number of malformed records skipped during loading.
    pub const fn num_skipped(&self) -> usize {
        self.skipped
    }
}

// Every byte maps to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn parse_record(line: &str) -> Option<(u32, String)> {
    let mut fields = line.split('|');
    let item_id = fields.next()?.parse().ok()?;
    let name = fields.next()?;
    Some((item_id, name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_catalog() {
        let data = "1|Toy Story (1995)|01-Jan-1995\n2|GoldenEye (1995)|01-Jan-1995\n";
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name(1).unwrap(), "Toy Story (1995)");
        assert_eq!(catalog.name(2).unwrap(), "GoldenEye (1995)");
        assert!(catalog.contains(1));
        assert!(!catalog.contains(3));
    }

    #[test]
    fn test_latin1_names() {
        // "Léon" with an ISO-8859-1 0xE9 byte, which is not valid UTF-8.
        let data = b"101|L\xe9on (1994)|\n";
        let catalog = Catalog::from_reader(&data[..]).unwrap();
        assert_eq!(catalog.name(101).unwrap(), "Léon (1994)");
    }

    #[test]
    fn test_unknown_id_is_a_lookup_error() {
        let catalog = Catalog::from_reader("1|Toy Story (1995)|\n".as_bytes()).unwrap();
        let err = catalog.name(50).unwrap_err();
        assert_eq!(
            err.to_string(),
            "LookupError: item id 50 is not in the catalog"
        );
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let data = "1|Toy Story (1995)\nno pipes here\nx|Bad Id\n2|GoldenEye (1995)\n";
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.num_skipped(), 2);
    }

    #[test]
    fn test_unparsable_catalog_is_an_error() {
        assert!(Catalog::from_reader("".as_bytes()).is_err());
        assert!(Catalog::from_reader("garbage\n".as_bytes()).is_err());
    }

    #[test]
    fn test_crlf_lines() {
        let data = "1|Toy Story (1995)|\r\n2|GoldenEye (1995)|\r\n";
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.name(2).unwrap(), "GoldenEye (1995)");
    }
}

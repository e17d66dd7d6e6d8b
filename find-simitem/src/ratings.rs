//! Ingestion of whitespace-delimited rating logs.

use std::io::BufRead;

use crate::errors::{FindSimitemError, Result};

/// A user-item rating that survived the quality filter.
///
/// The star value is dropped after filtering since nothing downstream
/// consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingEvent {
    /// Id of the rating user.
    pub user_id: u32,
    /// Id of the rated item.
    pub item_id: u32,
}

/// Counters describing how a rating log was consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RatingStats {
    /// Number of records that parsed and passed the quality filter.
    pub kept: usize,
    /// Number of records dropped for being at or below the quality threshold.
    pub filtered: usize,
    /// Number of malformed records that were skipped.
    pub skipped: usize,
}

/// Reads a rating log of `userID itemID rating [timestamp]` records,
/// one per line, keeping only events rated strictly above
/// `quality_threshold`.
///
/// Only the first three fields of a record are consumed. A malformed
/// record (missing fields, non-numeric values) is skipped and counted,
/// never fatal; an input with no parsable record at all is an error.
pub fn read_events<R>(rdr: R, quality_threshold: f64) -> Result<(Vec<RatingEvent>, RatingStats)>
where
    R: BufRead,
{
    let mut events = vec![];
    let mut stats = RatingStats::default();
    for line in rdr.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match parse_record(&line) {
            Some((user_id, item_id, stars)) => {
                if stars > quality_threshold {
                    events.push(RatingEvent { user_id, item_id });
                    stats.kept += 1;
                } else {
                    stats.filtered += 1;
                }
            }
            None => stats.skipped += 1,
        }
    }
    if stats.kept + stats.filtered == 0 {
        return Err(FindSimitemError::input(
            "The rating log contains no parsable records.",
        ));
    }
    Ok((events, stats))
}

fn parse_record(line: &str) -> Option<(u32, u32, f64)> {
    let mut fields = line.split_whitespace();
    let user_id = fields.next()?.parse().ok()?;
    let item_id = fields.next()?.parse().ok()?;
    let stars = fields.next()?.parse().ok()?;
    Some((user_id, item_id, stars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_log() {
        let log = "1 101 5 881250949\n1 102 4 881250950\n2 101 3\n";
        let (events, stats) = read_events(log.as_bytes(), 1.0).unwrap();
        assert_eq!(
            events,
            vec![
                RatingEvent {
                    user_id: 1,
                    item_id: 101
                },
                RatingEvent {
                    user_id: 1,
                    item_id: 102
                },
                RatingEvent {
                    user_id: 2,
                    item_id: 101
                },
            ]
        );
        assert_eq!(stats.kept, 3);
        assert_eq!(stats.filtered, 0);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_quality_filter_is_strict() {
        // A rating exactly at the threshold is noise, not signal.
        let log = "1 101 1\n1 102 1.0\n1 103 2\n";
        let (events, stats) = read_events(log.as_bytes(), 1.0).unwrap();
        assert_eq!(
            events,
            vec![RatingEvent {
                user_id: 1,
                item_id: 103
            }]
        );
        assert_eq!(stats.kept, 1);
        assert_eq!(stats.filtered, 2);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let log = "1 101 5\nnot a record\n2 oops 3\n3 103\n2 102 4\n";
        let (events, stats) = read_events(log.as_bytes(), 1.0).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.skipped, 3);
    }

    #[test]
    fn test_trailing_fields_are_ignored() {
        let log = "7 42 3.5 881250949 extra junk\n";
        let (events, _) = read_events(log.as_bytes(), 1.0).unwrap();
        assert_eq!(
            events,
            vec![RatingEvent {
                user_id: 7,
                item_id: 42
            }]
        );
    }

    #[test]
    fn test_unparsable_log_is_an_error() {
        assert!(read_events("".as_bytes(), 1.0).is_err());
        assert!(read_events("garbage\nmore garbage\n".as_bytes(), 1.0).is_err());
    }

    #[test]
    fn test_all_filtered_is_not_an_error() {
        // A readable log where everything is low quality is still a valid run.
        let (events, stats) = read_events("1 101 1\n".as_bytes(), 1.0).unwrap();
        assert!(events.is_empty());
        assert_eq!(stats.filtered, 1);
    }
}

//! Splitting a date range into seven-day chunks.
//!
//! Chunks are anchored to the start of the range, not to calendar weeks: a
//! range starting on a Wednesday yields Wednesday-to-Tuesday chunks. The final
//! chunk is clipped to the range end and may be shorter than seven days.

use std::iter::FusedIterator;

use chrono::{Days, NaiveDate};

use crate::models::WeekChunk;

/// Number of days in a full chunk.
pub const CHUNK_LENGTH_DAYS: u64 = 7;

/// Iterator over the [`WeekChunk`]s of a date range.
///
/// Created by [`partition_into_weeks`]. The iterator is consumed as it goes;
/// call [`partition_into_weeks`] again to walk the range a second time.
#[derive(Debug, Clone)]
pub struct WeekChunks {
    next_start: Option<NaiveDate>,
    range_end: NaiveDate,
}

impl Iterator for WeekChunks {
    type Item = WeekChunk;

    fn next(&mut self) -> Option<WeekChunk> {
        let start_date = self.next_start?;
        if start_date > self.range_end {
            self.next_start = None;
            return None;
        }

        let full_end = start_date
            .checked_add_days(Days::new(CHUNK_LENGTH_DAYS - 1))
            .unwrap_or(NaiveDate::MAX);
        let end_date = full_end.min(self.range_end);

        self.next_start = end_date.succ_opt();

        Some(WeekChunk {
            start_date,
            end_date,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next_start {
            Some(start) if start <= self.range_end => {
                let days = (self.range_end - start).num_days() as u64 + 1;
                days.div_ceil(CHUNK_LENGTH_DAYS) as usize
            }
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WeekChunks {}

impl FusedIterator for WeekChunks {}

/// Partitions the inclusive range `range_start..=range_end` into chunks of at
/// most seven days.
///
/// The chunks are contiguous, never overlap, and together cover exactly the
/// days of the range. An empty or inverted range (end before start) yields no
/// chunks.
///
/// # Arguments
///
/// * `range_start` - First day of the range (inclusive)
/// * `range_end` - Last day of the range (inclusive)
///
/// # Examples
///
/// ## Ten-day range
///
/// ```
/// use paycheck_engine::calculation::partition_into_weeks;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
///
/// let chunks: Vec<_> = partition_into_weeks(start, end).collect();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].end_date, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
/// assert_eq!(chunks[1].start_date, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
/// assert_eq!(chunks[1].length_days(), 3);
/// ```
///
/// ## Inverted range
///
/// ```
/// use paycheck_engine::calculation::partition_into_weeks;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(partition_into_weeks(start, end).count(), 0);
/// ```
pub fn partition_into_weeks(range_start: NaiveDate, range_end: NaiveDate) -> WeekChunks {
    WeekChunks {
        next_start: Some(range_start),
        range_end,
    }
}

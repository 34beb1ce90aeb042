//! Snapshot timeline generation with rollover arithmetic.
//!
//! Pure function of its inputs: walking the supplied date list by index,
//! it carries minute overflow into hours and hour overflow into the next
//! date, emitting exactly the requested number of normalized timestamps.

use chrono::NaiveDate;

use crate::app::models::TimeStep;
use crate::error::{Error, Result};

/// Build the ordered list of snapshot timestamps.
///
/// Starting at `(dates[0], start_hour, start_minute)`, emits `count`
/// timestamps spaced `step_minutes` apart. The date cursor advances
/// through `dates` by index; running past the last entry is a
/// configuration error, reported with the number of samples the list
/// could actually cover.
pub fn build_timeline(
    dates: &[NaiveDate],
    start_hour: u32,
    start_minute: u32,
    step_minutes: u32,
    count: usize,
) -> Result<Vec<TimeStep>> {
    let mut steps = Vec::with_capacity(count);
    let mut date_ix = 0usize;
    let mut hour = start_hour;
    let mut minute = start_minute;

    for _ in 0..count {
        // Bound check happens before the read so exhaustion can never
        // index past the list.
        let Some(date) = dates.get(date_ix) else {
            return Err(Error::ConfigurationExhausted {
                requested: count,
                available: steps.len(),
            });
        };
        steps.push(TimeStep {
            date: *date,
            hour,
            minute,
        });

        minute += step_minutes;
        while minute >= 60 {
            minute -= 60;
            hour += 1;
        }
        while hour >= 24 {
            hour -= 24;
            date_ix += 1;
        }
    }

    Ok(steps)
}

//! Span calculator: width of a multi-day bar within one week row.

use chrono::NaiveDate;

use crate::error::LayoutError;
use crate::models::layout::Span;
use crate::models::week::DAYS_PER_WEEK;
use crate::utils::date::calendar_day_difference;

/// Width of a bar drawn from `bar_start` through `last_day`, beginning at `column`.
///
/// The bar is clipped at the end of the row; `overflows_week` is set exactly
/// when the clipped days exist. A `last_day` before `bar_start` still yields
/// a one-column bar.
pub fn compute_span(
    bar_start: NaiveDate,
    last_day: NaiveDate,
    column: usize,
) -> Result<Span, LayoutError> {
    if column >= DAYS_PER_WEEK {
        return Err(LayoutError::ColumnOutOfRange(column));
    }

    let duration_days = calendar_day_difference(bar_start, last_day).max(0);
    let span_days = duration_days + 1;
    let remaining = (DAYS_PER_WEEK - column) as i64;

    let (width, overflows_week) = if span_days > remaining {
        (remaining, true)
    } else {
        (span_days, false)
    };

    Ok(Span {
        width: width as u8,
        overflows_week,
        starts_before_week: false,
    })
}

/// Span of an event inside the week starting at `week_start`.
///
/// Events that began in an earlier row are drawn from column 0 as a fresh
/// bar flagged with `starts_before_week`.
pub fn span_in_week(
    first_day: NaiveDate,
    last_day: NaiveDate,
    week_start: NaiveDate,
) -> Result<Span, LayoutError> {
    let starts_before_week = first_day < week_start;
    let bar_start = first_day.max(week_start);
    let column = calendar_day_difference(week_start, bar_start);
    let column = usize::try_from(column).map_err(|_| LayoutError::ColumnOutOfRange(0))?;

    let mut span = compute_span(bar_start, last_day, column)?;
    span.starts_before_week = starts_before_week;
    Ok(span)
}

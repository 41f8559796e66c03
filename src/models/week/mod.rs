// Week module
// Day buckets and 7-day week rows fed to the grid assembler

use chrono::{Duration, NaiveDate};

use crate::error::LayoutError;
use crate::models::event::Event;

pub const DAYS_PER_WEEK: usize = 7;

/// A calendar date and the events the resolver reported for it, in resolver order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

impl DayBucket {
    pub fn new(date: NaiveDate, events: Vec<Event>) -> Self {
        Self { date, events }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, Vec::new())
    }
}

/// Exactly seven consecutive day buckets in week-start order.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    days: Vec<DayBucket>,
}

impl Week {
    pub fn new(days: Vec<DayBucket>) -> Result<Self, LayoutError> {
        if days.len() != DAYS_PER_WEEK {
            return Err(LayoutError::InvalidWeek(format!("got {} days", days.len())));
        }

        for pair in days.windows(2) {
            if pair[1].date != pair[0].date + Duration::days(1) {
                return Err(LayoutError::InvalidWeek(format!(
                    "{} does not follow {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        Ok(Self { days })
    }

    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.days[DAYS_PER_WEEK - 1].date
    }

    pub fn days(&self) -> &[DayBucket] {
        &self.days
    }
}

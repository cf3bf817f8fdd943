use crate::models::itinerary::{Activity, NewActivity, NewStop, Stop};
use chrono::NaiveTime;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum StopFormError {
    #[error("city is required")]
    MissingCity,
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("activity #{index} has no name")]
    MissingActivityName { index: usize },
    #[error("activity '{name}' has an invalid time '{time}', expected HH:MM")]
    InvalidActivityTime { name: String, time: String },
    #[error("activity '{name}' has an invalid cost")]
    InvalidActivityCost { name: String },
}

pub struct StopFormService;

impl StopFormService {
    /// Check a submitted stop and turn it into a [`Stop`] with fresh ids.
    pub fn validate(form: NewStop) -> Result<Stop, StopFormError> {
        let city = form.city.trim();
        if city.is_empty() {
            return Err(StopFormError::MissingCity);
        }
        if form.start_date > form.end_date {
            return Err(StopFormError::InvalidDateRange {
                start: form.start_date,
                end: form.end_date,
            });
        }

        let activities = form
            .activities
            .into_iter()
            .enumerate()
            .map(|(index, activity)| Self::validate_activity(index, activity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Stop {
            id: Uuid::new_v4(),
            city: city.to_string(),
            start_date: form.start_date,
            end_date: form.end_date,
            activities,
            budget: form
                .budget
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
        })
    }

    fn validate_activity(index: usize, activity: NewActivity) -> Result<Activity, StopFormError> {
        let name = activity.name.trim().to_string();
        if name.is_empty() {
            return Err(StopFormError::MissingActivityName { index });
        }

        let time = match activity.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                NaiveTime::parse_from_str(raw, "%H:%M")
                    .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
                    .map_err(|_| StopFormError::InvalidActivityTime {
                        name: name.clone(),
                        time: raw.to_string(),
                    })?;
                Some(raw.to_string())
            }
        };

        if let Some(cost) = activity.cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(StopFormError::InvalidActivityCost { name });
            }
        }

        Ok(Activity {
            id: Uuid::new_v4(),
            name,
            time,
            cost: activity.cost,
        })
    }

    /// Existing stops for the same city whose ranges intersect `candidate`.
    pub fn find_overlaps<'a>(stops: &'a [Stop], candidate: &Stop) -> Vec<&'a Stop> {
        stops
            .iter()
            .filter(|stop| stop.id != candidate.id && stop.overlaps(candidate))
            .collect()
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f32>,
}

impl Activity {
    pub fn new(name: impl Into<String>, time: Option<&str>, cost: Option<f32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            time: time.map(str::to_string),
            cost,
        }
    }

    /// True when the activity carries a non-blank time of day. Zero-like
    /// values such as "00:00" count as present.
    pub fn has_time(&self) -> bool {
        self.time.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Stop {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub city: String,
    #[serde(alias = "startDate", deserialize_with = "deserialize_calendar_day")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate", deserialize_with = "deserialize_calendar_day")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl Stop {
    pub fn new(city: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            city: city.into(),
            start_date,
            end_date,
            activities: Vec::new(),
            budget: None,
        }
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Itinerary {
    pub id: Uuid,
    pub name: String,
    pub stops: Vec<Stop>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItinerarySubmission {
    pub name: String,
    #[serde(default)]
    pub stops: Vec<Stop>,
}

/// Partial update. `stops`, when present, replaces the whole stop list.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ItineraryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<Stop>>,
}

/// Payload of the add-stop form. Turned into a [`Stop`] by
/// `StopFormService::validate`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewStop {
    pub city: String,
    #[serde(alias = "startDate", deserialize_with = "deserialize_calendar_day")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate", deserialize_with = "deserialize_calendar_day")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<NewActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewActivity {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f32>,
}

// Blank or null times are stored as absent
fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|t| !t.trim().is_empty()))
}

// Accepts a plain date, a naive datetime or an RFC 3339 timestamp and keeps
// only the calendar day
fn deserialize_calendar_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_day(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid calendar day: {}", raw))
    })
}

pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|datetime| datetime.date())
        .ok()
}

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::base::{Activity, Itinerary, ItineraryPatch, Stop};

impl Stop {
    /// A stop ending before it starts is malformed and covers no day.
    pub fn is_well_formed(&self) -> bool {
        self.start_date <= self.end_date
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Same city with intersecting date ranges.
    pub fn overlaps(&self, other: &Stop) -> bool {
        self.city == other.city
            && self.is_well_formed()
            && other.is_well_formed()
            && self.start_date <= other.end_date
            && other.start_date <= self.end_date
    }

    pub fn timed_activities(&self) -> impl Iterator<Item = &Activity> + '_ {
        self.activities.iter().filter(|activity| activity.has_time())
    }
}

impl Itinerary {
    pub fn new(name: impl Into<String>, stops: Vec<Stop>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            stops,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_patch(&mut self, patch: ItineraryPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(stops) = patch.stops {
            self.stops = stops;
        }
    }

    pub fn stop(&self, stop_id: Uuid) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == stop_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_covers_is_inclusive() {
        let stop = Stop::new("Lisbon", day(3), day(5));
        assert!(!stop.covers(day(2)));
        assert!(stop.covers(day(3)));
        assert!(stop.covers(day(5)));
        assert!(!stop.covers(day(6)));
    }

    #[test]
    fn test_malformed_stop_covers_nothing() {
        let stop = Stop::new("Lisbon", day(5), day(3));
        assert!(!stop.is_well_formed());
        assert!(!stop.covers(day(4)));
    }

    #[test]
    fn test_overlap_requires_same_city() {
        let a = Stop::new("Lisbon", day(1), day(4));
        let b = Stop::new("Lisbon", day(4), day(6));
        let c = Stop::new("Porto", day(2), day(3));
        let d = Stop::new("Lisbon", day(5), day(6));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_apply_patch_replaces_stops() {
        let mut itinerary = Itinerary::new("Spring", vec![Stop::new("Lisbon", day(1), day(2))]);
        itinerary.apply_patch(ItineraryPatch {
            name: Some("  Spring break ".to_string()),
            stops: Some(vec![]),
        });
        assert_eq!(itinerary.name, "Spring break");
        assert!(itinerary.stops.is_empty());

        itinerary.apply_patch(ItineraryPatch::default());
        assert_eq!(itinerary.name, "Spring break");
    }
}

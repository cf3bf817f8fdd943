//! Itinerary Grid Service
//!
//! Joins the stops of an itinerary with the calendar into a date × city table.
//! Each cell holds the timed activities of the stop visiting that city on that
//! day. The functions here are pure: stops always come in as a parameter and
//! nothing is cached between calls.
//!
//! ## Rules
//! - Dates are the union of every stop's inclusive range, sorted ascending
//! - Cities appear in the order they are first seen in the stop list
//! - Activities without a time are left out of the grid
//! - When two stops for one city cover the same day the earlier stop wins
//! - A stop ending before it starts contributes no dates

use crate::models::itinerary::{Activity, ItineraryGrid, Stop};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

pub struct ItineraryGridService;

impl ItineraryGridService {
    /// Every calendar day from the stop's start to its end, both included.
    pub fn derive_date_range(stop: &Stop) -> Vec<NaiveDate> {
        if !stop.is_well_formed() {
            return Vec::new();
        }
        stop.start_date
            .iter_days()
            .take_while(|date| *date <= stop.end_date)
            .collect()
    }

    /// Deduplicated, ascending union of all stop ranges.
    pub fn collect_all_dates(stops: &[Stop]) -> Vec<NaiveDate> {
        stops
            .iter()
            .flat_map(Self::derive_date_range)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct city names in first-seen order. Comparison is exact.
    pub fn collect_all_cities(stops: &[Stop]) -> Vec<String> {
        let mut cities: Vec<String> = Vec::new();
        for stop in stops {
            if !cities.iter().any(|city| *city == stop.city) {
                cities.push(stop.city.clone());
            }
        }
        cities
    }

    pub fn build_grid(stops: &[Stop]) -> ItineraryGrid {
        let dates = Self::collect_all_dates(stops);
        let cities = Self::collect_all_cities(stops);

        // Stops per city, kept in input order so the first match wins
        let mut stops_by_city: HashMap<&str, Vec<&Stop>> = HashMap::new();
        for stop in stops {
            stops_by_city.entry(stop.city.as_str()).or_default().push(stop);
        }

        let cells = dates
            .iter()
            .map(|date| {
                cities
                    .iter()
                    .map(|city| {
                        stops_by_city
                            .get(city.as_str())
                            .and_then(|candidates| {
                                candidates.iter().find(|stop| stop.covers(*date))
                            })
                            .map(|stop| stop.timed_activities().cloned().collect())
                            .unwrap_or_default()
                    })
                    .collect::<Vec<Vec<Activity>>>()
            })
            .collect();

        ItineraryGrid::from_parts(dates, cities, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(activities: &[Activity]) -> Vec<&str> {
        activities.iter().map(|a| a.name.as_str()).collect()
    }

    fn paris_and_rome() -> Vec<Stop> {
        vec![
            Stop::new("Paris", day(2024, 1, 1), day(2024, 1, 2)).with_activity(Activity::new(
                "Museum",
                Some("10:00"),
                Some(20.0),
            )),
            Stop::new("Rome", day(2024, 1, 2), day(2024, 1, 3))
                .with_activity(Activity::new("Colosseum", Some("14:00"), None)),
        ]
    }

    #[test]
    fn test_date_range_length_and_spacing() {
        let stop = Stop::new("Oslo", day(2024, 1, 10), day(2024, 1, 16));
        let range = ItineraryGridService::derive_date_range(&stop);

        assert_eq!(range.len() as i64, (stop.end_date - stop.start_date).num_days() + 1);
        assert_eq!(range.first(), Some(&stop.start_date));
        assert_eq!(range.last(), Some(&stop.end_date));
        assert!(range.windows(2).all(|w| (w[1] - w[0]).num_days() == 1));
    }

    #[test]
    fn test_date_range_crosses_month_and_year() {
        let stop = Stop::new("Reykjavik", day(2023, 12, 30), day(2024, 1, 2));
        assert_eq!(
            ItineraryGridService::derive_date_range(&stop),
            vec![
                day(2023, 12, 30),
                day(2023, 12, 31),
                day(2024, 1, 1),
                day(2024, 1, 2)
            ]
        );

        let leap = Stop::new("Bern", day(2024, 2, 28), day(2024, 3, 1));
        assert_eq!(ItineraryGridService::derive_date_range(&leap).len(), 3);
    }

    #[test]
    fn test_single_day_stop() {
        let stop = Stop::new("Nice", day(2024, 6, 1), day(2024, 6, 1));
        assert_eq!(ItineraryGridService::derive_date_range(&stop), vec![day(2024, 6, 1)]);
    }

    #[test]
    fn test_malformed_stop_has_no_dates() {
        let stop = Stop::new("Nice", day(2024, 6, 3), day(2024, 6, 1));
        assert!(ItineraryGridService::derive_date_range(&stop).is_empty());

        let grid = ItineraryGridService::build_grid(&[stop]);
        assert!(grid.dates().is_empty());
        assert_eq!(grid.cities(), ["Nice"]);
    }

    #[test]
    fn test_collect_all_dates_is_order_independent() {
        let mut stops = paris_and_rome();
        stops.push(Stop::new("Milan", day(2023, 12, 31), day(2024, 1, 1)));
        let forward = ItineraryGridService::collect_all_dates(&stops);
        stops.reverse();
        let backward = ItineraryGridService::collect_all_dates(&stops);

        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            vec![
                day(2023, 12, 31),
                day(2024, 1, 1),
                day(2024, 1, 2),
                day(2024, 1, 3)
            ]
        );
    }

    #[test]
    fn test_collect_all_cities_first_seen_order() {
        let d = day(2024, 1, 1);
        let stops: Vec<Stop> = ["Paris", "Tokyo", "Paris", "Rome"]
            .iter()
            .map(|city| Stop::new(*city, d, d))
            .collect();
        assert_eq!(
            ItineraryGridService::collect_all_cities(&stops),
            vec!["Paris", "Tokyo", "Rome"]
        );
    }

    #[test]
    fn test_cities_are_case_sensitive() {
        let d = day(2024, 1, 1);
        let stops = vec![Stop::new("paris", d, d), Stop::new("Paris", d, d)];
        assert_eq!(ItineraryGridService::collect_all_cities(&stops).len(), 2);
    }

    #[test]
    fn test_two_stop_scenario() {
        let grid = ItineraryGridService::build_grid(&paris_and_rome());

        assert_eq!(grid.dates(), [day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3)]);
        assert_eq!(grid.cities(), ["Paris", "Rome"]);

        let cell = |d, city| names(grid.cell(day(2024, 1, d), city).unwrap());
        assert_eq!(cell(1, "Paris"), vec!["Museum"]);
        assert!(cell(1, "Rome").is_empty());
        assert_eq!(cell(2, "Paris"), vec!["Museum"]);
        assert_eq!(cell(2, "Rome"), vec!["Colosseum"]);
        assert!(cell(3, "Paris").is_empty());
        assert_eq!(cell(3, "Rome"), vec!["Colosseum"]);
    }

    #[test]
    fn test_untimed_activities_are_excluded() {
        let stop = Stop::new("Kyoto", day(2024, 4, 1), day(2024, 4, 2))
            .with_activity(Activity::new("Temple", Some("09:00"), None))
            .with_activity(Activity::new("Wander", None, None))
            .with_activity(Activity::new("Tea", Some(""), Some(8.0)));
        let grid = ItineraryGridService::build_grid(std::slice::from_ref(&stop));

        for (_, cells) in grid.rows() {
            assert_eq!(names(&cells[0]), vec!["Temple"]);
        }
        assert_eq!(stop.activities.len(), 3);
    }

    #[test]
    fn test_first_matching_stop_wins_on_overlap() {
        let stops = vec![
            Stop::new("Paris", day(2024, 1, 1), day(2024, 1, 3))
                .with_activity(Activity::new("Louvre", Some("10:00"), None)),
            Stop::new("Paris", day(2024, 1, 3), day(2024, 1, 4))
                .with_activity(Activity::new("Orsay", Some("11:00"), None)),
        ];
        let grid = ItineraryGridService::build_grid(&stops);

        assert_eq!(names(grid.cell(day(2024, 1, 3), "Paris").unwrap()), vec!["Louvre"]);
        assert_eq!(names(grid.cell(day(2024, 1, 4), "Paris").unwrap()), vec!["Orsay"]);
        assert_eq!(grid.cities().len(), 1);
    }

    #[test]
    fn test_build_grid_is_idempotent() {
        let stops = paris_and_rome();
        assert_eq!(
            ItineraryGridService::build_grid(&stops),
            ItineraryGridService::build_grid(&stops)
        );
    }

    #[test]
    fn test_empty_input_gives_empty_grid() {
        let grid = ItineraryGridService::build_grid(&[]);
        assert!(grid.is_empty());
        assert!(grid.dates().is_empty());
        assert!(grid.cities().is_empty());
        assert_eq!(serde_json::to_string(&grid).unwrap(), "{}");
    }
}

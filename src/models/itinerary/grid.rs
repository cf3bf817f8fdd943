use chrono::NaiveDate;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::base::Activity;

const DAY_LABEL_FORMAT: &str = "%a %b %d %Y";

/// Human-readable key for a calendar day, e.g. `Mon Jan 01 2024`.
pub fn day_label(date: NaiveDate) -> String {
    date.format(DAY_LABEL_FORMAT).to_string()
}

pub fn parse_day_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label, DAY_LABEL_FORMAT).ok()
}

/// Date × city table of timed activities.
///
/// Dates are kept sorted ascending and cities in the order they were first
/// seen. Every (date, city) pair has a cell, possibly empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItineraryGrid {
    dates: Vec<NaiveDate>,
    cities: Vec<String>,
    // cells[date_index][city_index]
    cells: Vec<Vec<Vec<Activity>>>,
}

impl ItineraryGrid {
    pub(crate) fn from_parts(
        dates: Vec<NaiveDate>,
        cities: Vec<String>,
        cells: Vec<Vec<Vec<Activity>>>,
    ) -> Self {
        debug_assert_eq!(dates.len(), cells.len());
        debug_assert!(cells.iter().all(|row| row.len() == cities.len()));
        Self {
            dates,
            cities,
            cells,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.cities.is_empty()
    }

    /// Activities for one cell, or `None` when the date or city is not part
    /// of the grid at all.
    pub fn cell(&self, date: NaiveDate, city: &str) -> Option<&[Activity]> {
        let row = self.dates.binary_search(&date).ok()?;
        let column = self.cities.iter().position(|c| c == city)?;
        Some(&self.cells[row][column])
    }

    /// Rows in chronological order, each with one cell per city.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &[Vec<Activity>])> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.cells.iter().map(Vec::as_slice))
    }
}

struct CityCells<'a> {
    cities: &'a [String],
    cells: &'a [Vec<Activity>],
}

impl Serialize for CityCells<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cities.len()))?;
        for (city, activities) in self.cities.iter().zip(self.cells) {
            map.serialize_entry(city, activities)?;
        }
        map.end()
    }
}

// Serialized as an ordered object: { "<day label>": { "<city>": [activity] } }
impl Serialize for ItineraryGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.dates.len()))?;
        for (date, cells) in self.rows() {
            map.serialize_entry(
                &day_label(date),
                &CityCells {
                    cities: &self.cities,
                    cells,
                },
            )?;
        }
        map.end()
    }
}

// A map read in document order, so city order survives the round trip
struct OrderedCells(Vec<(String, Vec<Activity>)>);

impl<'de> Deserialize<'de> for OrderedCells {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CellsVisitor;

        impl<'de> Visitor<'de> for CellsVisitor {
            type Value = OrderedCells;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of city name to activities")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = access.next_entry::<String, Vec<Activity>>()? {
                    entries.push(entry);
                }
                Ok(OrderedCells(entries))
            }
        }

        deserializer.deserialize_map(CellsVisitor)
    }
}

impl<'de> Deserialize<'de> for ItineraryGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GridVisitor;

        impl<'de> Visitor<'de> for GridVisitor {
            type Value = ItineraryGrid;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of day label to city cells")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rows: Vec<(NaiveDate, OrderedCells)> = Vec::new();
                while let Some((label, cells)) = access.next_entry::<String, OrderedCells>()? {
                    let date = parse_day_label(&label).ok_or_else(|| {
                        de::Error::custom(format!("invalid day label: {}", label))
                    })?;
                    if rows.iter().any(|(seen, _)| *seen == date) {
                        return Err(de::Error::custom(format!("duplicate day label: {}", label)));
                    }
                    rows.push((date, cells));
                }
                rows.sort_by_key(|(date, _)| *date);

                let mut cities: Vec<String> = Vec::new();
                for (_, OrderedCells(entries)) in &rows {
                    for (city, _) in entries {
                        if !cities.contains(city) {
                            cities.push(city.clone());
                        }
                    }
                }

                let mut dates = Vec::with_capacity(rows.len());
                let mut cells = Vec::with_capacity(rows.len());
                for (date, OrderedCells(mut entries)) in rows {
                    let row = cities
                        .iter()
                        .map(|city| {
                            entries
                                .iter()
                                .position(|(c, _)| c == city)
                                .map(|i| entries.swap_remove(i).1)
                                .unwrap_or_default()
                        })
                        .collect();
                    dates.push(date);
                    cells.push(row);
                }

                Ok(ItineraryGrid {
                    dates,
                    cities,
                    cells,
                })
            }
        }

        deserializer.deserialize_map(GridVisitor)
    }
}

//! In-memory itinerary store.
//!
//! Readers always receive owned snapshots; every change goes through an
//! explicit update call. Nothing here is persisted.

use crate::models::itinerary::{Itinerary, ItineraryPatch, Stop};
use crate::services::stop_form_service::StopFormService;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("itinerary {0} not found")]
    NotFound(Uuid),
    #[error("stop {stop_id} not found in itinerary {itinerary_id}")]
    StopNotFound { itinerary_id: Uuid, stop_id: Uuid },
    #[error("itinerary name is required")]
    MissingName,
    #[error("itinerary store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Default)]
pub struct ItineraryStore {
    itineraries: RwLock<HashMap<Uuid, Itinerary>>,
}

impl ItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Itinerary>>, StoreError> {
        self.itineraries.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Itinerary>>, StoreError> {
        self.itineraries.write().map_err(|_| StoreError::Poisoned)
    }

    pub fn create(&self, name: &str, stops: Vec<Stop>) -> Result<Itinerary, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingName);
        }
        let itinerary = Itinerary::new(name, stops);
        log::info!("Created itinerary {} ({})", itinerary.id, itinerary.name);
        self.write()?.insert(itinerary.id, itinerary.clone());
        Ok(itinerary)
    }

    pub fn get(&self, id: Uuid) -> Result<Itinerary, StoreError> {
        self.read()?.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// All itineraries, oldest first.
    pub fn list(&self) -> Result<Vec<Itinerary>, StoreError> {
        let mut itineraries: Vec<Itinerary> = self.read()?.values().cloned().collect();
        itineraries.sort_by_key(|itinerary| (itinerary.created_at, itinerary.id));
        Ok(itineraries)
    }

    /// Apply `f` to the stored itinerary and return the new snapshot. If `f`
    /// fails the stored itinerary is left untouched.
    pub fn update<F>(&self, id: Uuid, f: F) -> Result<Itinerary, StoreError>
    where
        F: FnOnce(&mut Itinerary) -> Result<(), StoreError>,
    {
        let mut itineraries = self.write()?;
        let current = itineraries.get(&id).ok_or(StoreError::NotFound(id))?;

        let mut next = current.clone();
        f(&mut next)?;
        next.updated_at = Utc::now();

        itineraries.insert(id, next.clone());
        Ok(next)
    }

    pub fn patch(&self, id: Uuid, patch: ItineraryPatch) -> Result<Itinerary, StoreError> {
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(StoreError::MissingName);
        }
        self.update(id, |itinerary| {
            itinerary.apply_patch(patch);
            Ok(())
        })
    }

    /// Append a stop. Same-city overlaps are allowed but logged, since the
    /// grid only shows the earlier of two overlapping stops.
    pub fn add_stop(&self, id: Uuid, stop: Stop) -> Result<Itinerary, StoreError> {
        self.update(id, |itinerary| {
            let overlaps = StopFormService::find_overlaps(&itinerary.stops, &stop);
            for existing in overlaps {
                log::warn!(
                    "Stop in {} ({} to {}) overlaps existing stop {} in itinerary {}",
                    stop.city,
                    stop.start_date,
                    stop.end_date,
                    existing.id,
                    itinerary.id
                );
            }
            itinerary.stops.push(stop);
            Ok(())
        })
    }

    pub fn remove_stop(&self, id: Uuid, stop_id: Uuid) -> Result<Itinerary, StoreError> {
        self.update(id, |itinerary| {
            let before = itinerary.stops.len();
            itinerary.stops.retain(|stop| stop.id != stop_id);
            if itinerary.stops.len() == before {
                return Err(StoreError::StopNotFound {
                    itinerary_id: id,
                    stop_id,
                });
            }
            Ok(())
        })
    }
}

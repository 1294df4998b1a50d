use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest facility `Facility::new` will build.
pub const MAX_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FacilityError {
    #[error("capacity must be between 1 and {} slots", MAX_CAPACITY)]
    InvalidCapacity,
    #[error("parking lot is full")]
    Full,
    #[error("slot number is out of range")]
    OutOfRange,
    #[error("slot is already vacant")]
    AlreadyVacant,
    #[error("no matching vehicle found")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    registration_number: String,
    color: String,
}

impl Vehicle {
    pub fn new(registration_number: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
            color: color.into(),
        }
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn has_registration(&self, registration_number: &str) -> bool {
        self.registration_number.eq_ignore_ascii_case(registration_number)
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.color.eq_ignore_ascii_case(color)
    }
}

#[derive(Debug, Clone)]
pub struct Slot {
    slot_number: usize,
    vehicle: Option<Vehicle>,
}

impl Slot {
    fn new(slot_number: usize) -> Self {
        Self {
            slot_number,
            vehicle: None,
        }
    }

    pub fn slot_number(&self) -> usize {
        self.slot_number
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.vehicle.is_some()
    }
}

/// One row of a facility snapshot: an occupied slot and who is in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub slot_number: usize,
    pub registration_number: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyStats {
    pub capacity: usize,
    pub occupied: usize,
    pub available: usize,
}

/// A fixed-capacity parking facility.
///
/// Slots are numbered `1..=capacity` and live at index `slot_number - 1` for
/// the lifetime of the facility. Every query walks the slots in ascending
/// order, so results are always ordered by slot number.
#[derive(Debug, Clone)]
pub struct Facility {
    slots: Vec<Slot>,
}

impl Facility {
    pub fn new(capacity: usize) -> Result<Self, FacilityError> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(FacilityError::InvalidCapacity);
        }

        let slots = (1..=capacity).map(Slot::new).collect();
        Ok(Self { slots })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Park `vehicle` in the lowest-numbered empty slot.
    pub fn allocate(&mut self, vehicle: Vehicle) -> Result<usize, FacilityError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| !slot.is_occupied())
            .ok_or(FacilityError::Full)?;

        slot.vehicle = Some(vehicle);
        Ok(slot.slot_number)
    }

    /// Vacate `slot_number`. The departing vehicle is dropped, so callers
    /// that need it must look it up first.
    pub fn release(&mut self, slot_number: usize) -> Result<(), FacilityError> {
        let slot = self.slot_mut(slot_number)?;
        if slot.vehicle.take().is_none() {
            return Err(FacilityError::AlreadyVacant);
        }
        Ok(())
    }

    pub fn vehicle_at(&self, slot_number: usize) -> Option<&Vehicle> {
        self.slot(slot_number).ok().and_then(Slot::vehicle)
    }

    pub fn find_by_color(&self, color: &str) -> Vec<&Vehicle> {
        self.occupied()
            .filter(|(_, vehicle)| vehicle.has_color(color))
            .map(|(_, vehicle)| vehicle)
            .collect()
    }

    pub fn find_slots_by_color(&self, color: &str) -> Vec<usize> {
        self.occupied()
            .filter(|(_, vehicle)| vehicle.has_color(color))
            .map(|(slot_number, _)| slot_number)
            .collect()
    }

    /// Lowest-numbered slot holding `registration_number`. Duplicate
    /// registrations are allowed; only the first is reported.
    pub fn find_slot_by_registration(&self, registration_number: &str) -> Result<usize, FacilityError> {
        self.occupied()
            .find(|(_, vehicle)| vehicle.has_registration(registration_number))
            .map(|(slot_number, _)| slot_number)
            .ok_or(FacilityError::NotFound)
    }

    pub fn snapshot(&self) -> Vec<SlotEntry> {
        self.occupied()
            .map(|(slot_number, vehicle)| SlotEntry {
                slot_number,
                registration_number: vehicle.registration_number.clone(),
                color: vehicle.color.clone(),
            })
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn available_count(&self) -> usize {
        self.capacity() - self.occupied_count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Slot::is_occupied)
    }

    pub fn occupancy(&self) -> OccupancyStats {
        let occupied = self.occupied_count();
        OccupancyStats {
            capacity: self.capacity(),
            occupied,
            available: self.capacity() - occupied,
        }
    }

    fn occupied(&self) -> impl Iterator<Item = (usize, &Vehicle)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.vehicle.as_ref().map(|vehicle| (slot.slot_number, vehicle)))
    }

    fn slot(&self, slot_number: usize) -> Result<&Slot, FacilityError> {
        slot_number
            .checked_sub(1)
            .and_then(|index| self.slots.get(index))
            .ok_or(FacilityError::OutOfRange)
    }

    fn slot_mut(&mut self, slot_number: usize) -> Result<&mut Slot, FacilityError> {
        slot_number
            .checked_sub(1)
            .and_then(|index| self.slots.get_mut(index))
            .ok_or(FacilityError::OutOfRange)
    }
}

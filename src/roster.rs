//! The technicians who can be assigned issues and appointments.

use serde::{Deserialize, Serialize};
use time::Weekday;

use crate::errors::DeskError;
use crate::normalization;
use crate::record::RecordId;

/// The service areas technicians are based in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum District {
    North,
    South,
    East,
    West,
}

/// A day of the week on which a technician works.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => Day::Monday,
            Weekday::Tuesday => Day::Tuesday,
            Weekday::Wednesday => Day::Wednesday,
            Weekday::Thursday => Day::Thursday,
            Weekday::Friday => Day::Friday,
            Weekday::Saturday => Day::Saturday,
            Weekday::Sunday => Day::Sunday,
        }
    }
}

/// A technician as submitted, before being given an ID.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewTechnician {
    #[serde(deserialize_with = "normalization::deserialize")]
    pub name: String,

    pub district: District,

    #[serde(default)]
    pub availability: Vec<Day>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Technician {
    pub id: RecordId,
    pub name: String,
    pub district: District,

    /// The days of the week the technician works.
    pub availability: Vec<Day>,
}

impl Technician {
    pub fn works_on(&self, day: Day) -> bool {
        self.availability.contains(&day)
    }
}

/// The technicians, in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    technicians: Vec<Technician>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a technician under a fresh ID and returns it.
    pub fn add(&mut self, new: NewTechnician) -> Technician {
        let id = loop {
            let id = RecordId::generate();

            if self.get(&id).is_none() {
                break id;
            }
        };

        let technician = Technician {
            id,
            name: new.name,
            district: new.district,
            availability: new.availability,
        };

        self.technicians.push(technician.clone());

        technician
    }

    /// Adds a technician that already carries its ID.
    pub fn insert(&mut self, technician: Technician) -> Result<(), DeskError> {
        if self.get(&technician.id).is_some() {
            return Err(DeskError::DuplicateId(technician.id));
        }

        self.technicians.push(technician);

        Ok(())
    }

    pub fn get(&self, id: &RecordId) -> Option<&Technician> {
        self.technicians.iter().find(|t| &t.id == id)
    }

    pub fn name_of(&self, id: &RecordId) -> Option<&str> {
        self.get(id).map(|t| t.name.as_str())
    }

    /// The technicians based in `district`, or all of them.
    pub fn in_district(&self, district: Option<District>) -> Vec<Technician> {
        self.technicians
            .iter()
            .filter(|t| district.map_or(true, |d| t.district == d))
            .cloned()
            .collect()
    }

    pub fn available_on(&self, day: Day) -> Vec<Technician> {
        self.technicians
            .iter()
            .filter(|t| t.works_on(day))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.technicians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technicians.is_empty()
    }
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One declared slot entry: a day label and the exact instants bookable on
/// that day. This is also the JSONB shape stored on the availability row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub day: String,
    pub times: Vec<DateTime<Utc>>,
}

/// Raw slot entry as submitted over HTTP, times still unparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotInput {
    pub day: String,
    pub times: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAvailabilityModel {
    pub available_slots: Vec<SlotInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityModel {
    pub trainer_id: Uuid,
    pub slots: Vec<AvailabilitySlot>,
    pub updated_at: DateTime<Utc>,
}

/// Validates and normalizes a submitted slot set. The whole set is rejected
/// on the first malformed entry; callers never persist a partial result.
pub fn parse_slots(inputs: &[SlotInput]) -> Result<Vec<AvailabilitySlot>, String> {
    if inputs.is_empty() {
        return Err("available slots are required".to_string());
    }

    let mut seen = HashSet::new();
    let mut slots = Vec::with_capacity(inputs.len());

    for input in inputs {
        let day = input.day.trim();
        if day.is_empty() {
            return Err("slot day must not be empty".to_string());
        }
        if input.times.is_empty() {
            return Err(format!("slot for {} has no times", day));
        }

        let mut times = Vec::with_capacity(input.times.len());
        for raw in &input.times {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .map_err(|_| format!("invalid time format: {}", raw))?
                .with_timezone(&Utc);
            if !seen.insert((day.to_string(), parsed)) {
                return Err(format!("duplicate slot: {} at {}", day, raw));
            }
            times.push(parsed);
        }

        slots.push(AvailabilitySlot {
            day: day.to_string(),
            times,
        });
    }

    Ok(slots)
}

/// Exact-instant membership test used by the booking engine. Day labels are
/// display metadata; the instant itself decides availability.
pub fn contains_instant(slots: &[AvailabilitySlot], at: DateTime<Utc>) -> bool {
    slots.iter().any(|slot| slot.times.contains(&at))
}

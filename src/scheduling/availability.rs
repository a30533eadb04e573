use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Day of the week, serialized as its lowercase English name.
///
/// Ordered Monday-first so availability listings read the way a weekly
/// timetable does.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Unknown weekday: {}", s)),
        }
    }
}

impl From<time::Weekday> for Weekday {
    fn from(day: time::Weekday) -> Self {
        match day {
            time::Weekday::Monday => Weekday::Monday,
            time::Weekday::Tuesday => Weekday::Tuesday,
            time::Weekday::Wednesday => Weekday::Wednesday,
            time::Weekday::Thursday => Weekday::Thursday,
            time::Weekday::Friday => Weekday::Friday,
            time::Weekday::Saturday => Weekday::Saturday,
            time::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

/// A recurring weekly pattern of free time, keyed by weekday.
///
/// Slots are kept as the time-of-day strings the caller supplied
/// ("10:00", "14:30"), ordered within each day. Historic producers
/// stored either a single time string or a list of them per day; both
/// shapes deserialize into this one canonical form, a single string
/// becoming a singleton set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Availability {
    slots: BTreeMap<Weekday, BTreeSet<String>>,
}

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a time slot for a weekday.
    pub fn add_slot(&mut self, day: Weekday, slot: impl Into<String>) {
        self.slots.entry(day).or_default().insert(slot.into());
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of distinct weekdays with at least one slot.
    pub fn day_count(&self) -> usize {
        self.slots.len()
    }

    pub fn contains_day(&self, day: Weekday) -> bool {
        self.slots.contains_key(&day)
    }

    pub fn slots_for(&self, day: Weekday) -> Option<&BTreeSet<String>> {
        self.slots.get(&day)
    }

    /// Restrict to the weekdays and time slots present on both sides.
    ///
    /// A weekday survives only if at least one slot overlaps, and the
    /// result keeps a single representative slot per day (the earliest
    /// of the overlapping ones). An empty result means no shared
    /// availability; callers are expected to abort whatever they were
    /// doing rather than treat it as an error.
    pub fn intersect(&self, other: &Availability) -> Availability {
        let mut shared = Availability::new();
        for (day, slots) in &self.slots {
            let Some(other_slots) = other.slots.get(day) else {
                continue;
            };
            if let Some(slot) = slots.intersection(other_slots).next() {
                shared.add_slot(*day, slot.clone());
            }
        }
        shared
    }
}

/// Accepts both the single-string and list-of-strings per-day shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum SlotSpec {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<Weekday, SlotSpec>::deserialize(deserializer)?;
        let slots = raw
            .into_iter()
            .map(|(day, shape)| {
                let times = match shape {
                    SlotSpec::One(slot) => BTreeSet::from([slot]),
                    SlotSpec::Many(slots) => slots.into_iter().collect(),
                };
                (day, times)
            })
            .filter(|(_, times): &(_, BTreeSet<String>)| !times.is_empty())
            .collect();
        Ok(Availability { slots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn availability(entries: &[(Weekday, &[&str])]) -> Availability {
        let mut a = Availability::new();
        for (day, slots) in entries {
            for slot in *slots {
                a.add_slot(*day, *slot);
            }
        }
        a
    }

    #[test]
    fn intersect_keeps_one_representative_slot_per_shared_day() {
        let student = availability(&[(Weekday::Monday, &["09:00", "10:00"])]);
        let tutor = availability(&[(Weekday::Monday, &["10:00", "11:00"])]);

        let shared = student.intersect(&tutor);

        assert_eq!(shared.day_count(), 1);
        assert_eq!(
            shared.slots_for(Weekday::Monday),
            Some(&BTreeSet::from(["10:00".to_string()]))
        );
    }

    #[test]
    fn intersect_is_symmetric() {
        let a = availability(&[
            (Weekday::Monday, &["09:00", "10:00"]),
            (Weekday::Wednesday, &["14:00"]),
        ]);
        let b = availability(&[
            (Weekday::Monday, &["10:00"]),
            (Weekday::Thursday, &["16:00"]),
        ]);

        assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    #[test]
    fn intersect_with_empty_is_empty() {
        let a = availability(&[(Weekday::Friday, &["12:00"])]);

        assert!(a.intersect(&Availability::new()).is_empty());
        assert!(Availability::new().intersect(&a).is_empty());
    }

    #[test]
    fn intersect_drops_days_without_overlapping_slots() {
        let a = availability(&[(Weekday::Monday, &["09:00"])]);
        let b = availability(&[(Weekday::Monday, &["10:00"])]);

        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn deserializes_list_of_times_per_day() {
        let parsed: Availability =
            serde_json::from_str(r#"{"monday": ["09:00", "10:00"], "wednesday": ["14:00"]}"#)
                .unwrap();

        assert_eq!(parsed.day_count(), 2);
        assert_eq!(
            parsed.slots_for(Weekday::Monday),
            Some(&BTreeSet::from(["09:00".to_string(), "10:00".to_string()]))
        );
    }

    #[test]
    fn deserializes_single_time_per_day_as_singleton_set() {
        let parsed: Availability =
            serde_json::from_str(r#"{"tuesday": "15:00"}"#).unwrap();

        assert_eq!(
            parsed.slots_for(Weekday::Tuesday),
            Some(&BTreeSet::from(["15:00".to_string()]))
        );
    }

    #[test]
    fn rejects_unknown_weekday_keys() {
        assert!(serde_json::from_str::<Availability>(r#"{"funday": "10:00"}"#).is_err());
    }

    #[test]
    fn serializes_with_lowercase_weekday_keys() {
        let a = availability(&[(Weekday::Saturday, &["11:00"])]);

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            r#"{"saturday":["11:00"]}"#
        );
    }
}

//! Pickup schedule: the canteen's counter windows.

use chrono::NaiveDate;
use std::sync::Arc;

/// The discrete windows during which an order may be collected. Slots are
/// opaque labels; checkout only asks whether a label is on the schedule.
#[derive(Clone, Debug)]
pub struct PickupSchedule {
    slots: Arc<Vec<String>>,
}

impl PickupSchedule {
    pub fn new(slots: Vec<String>) -> Self {
        Self { slots: Arc::new(slots) }
    }

    pub fn is_valid_slot(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s == slot)
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }
}

/// Orders are for today or a future school day, never the past.
pub fn is_valid_pickup_date(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> PickupSchedule {
        PickupSchedule::new(vec!["09:30-09:50".into(), "12:00-12:40".into()])
    }

    #[test]
    fn test_slot_membership() {
        let schedule = schedule();
        assert!(schedule.is_valid_slot("09:30-09:50"));
        assert!(schedule.is_valid_slot("12:00-12:40"));
        assert!(!schedule.is_valid_slot("18:00-18:30"));
        assert!(!schedule.is_valid_slot("09:30"));
    }

    #[test]
    fn test_pickup_date_not_in_the_past() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(is_valid_pickup_date(today, today));
        assert!(is_valid_pickup_date(today.succ_opt().unwrap(), today));
        assert!(!is_valid_pickup_date(today.pred_opt().unwrap(), today));
    }
}

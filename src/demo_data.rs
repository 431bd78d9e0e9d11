//! Default roster names and floors for demos and manual testing.

use rand::Rng;

use crate::models::{Difficulty, Room};
use crate::proximity;

const NURSE_NAMES: [&str; 7] = [
    "Nurse Adams",
    "Nurse Brown",
    "Nurse Chen",
    "Nurse Davis",
    "Nurse Evans",
    "Nurse Foster",
    "Nurse Garcia",
];

/// The first `count` default nurse names, at most seven.
pub fn default_nurse_names(count: usize) -> Vec<String> {
    NURSE_NAMES
        .iter()
        .take(count)
        .map(|name| (*name).to_string())
        .collect()
}

/// The unit's 30 rooms, all occupied, easy, and without chemo.
pub fn default_floor() -> Vec<Room> {
    proximity::room_numbers()
        .enumerate()
        .map(|(i, number)| Room::new(format!("room-{i}"), number))
        .collect()
}

/// The unit's 30 rooms with about 80% occupancy, uniform difficulty, and
/// about 20% chemo.
pub fn random_floor<R: Rng + ?Sized>(rng: &mut R) -> Vec<Room> {
    default_floor()
        .into_iter()
        .map(|mut room| {
            room.is_occupied = rng.random_bool(0.8);
            room.difficulty = match rng.random_range(0..3) {
                0 => Difficulty::Easy,
                1 => Difficulty::Medium,
                _ => Difficulty::Hard,
            };
            room.is_chemo = rng.random_bool(0.2);
            room
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_nurse_names() {
        assert_eq!(
            default_nurse_names(5),
            vec!["Nurse Adams", "Nurse Brown", "Nurse Chen", "Nurse Davis", "Nurse Evans"]
        );
        assert_eq!(default_nurse_names(7).last().map(String::as_str), Some("Nurse Garcia"));
        assert_eq!(default_nurse_names(10).len(), 7);
    }

    #[test]
    fn test_default_floor() {
        let floor = default_floor();
        assert_eq!(floor.len(), 30);
        assert_eq!(floor[0].id, "room-0");
        assert_eq!(floor[5].number, "605A");
        assert!(floor
            .iter()
            .all(|r| r.is_occupied && !r.is_chemo && r.difficulty == Difficulty::Easy));
    }

    #[test]
    fn test_random_floor_is_seedable() {
        let a = random_floor(&mut SmallRng::seed_from_u64(42));
        let b = random_floor(&mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert!(a.iter().all(|r| r.assigned_nurse.is_none() && r.previous_nurse.is_none()));
    }

    #[test]
    fn test_random_floor_mixes_rooms() {
        let mut rng = SmallRng::seed_from_u64(7);
        let rooms: Vec<Room> = (0..20).flat_map(|_| random_floor(&mut rng)).collect();
        let occupied = rooms.iter().filter(|r| r.is_occupied).count();
        assert!(occupied > rooms.len() / 2 && occupied < rooms.len());
        assert!(rooms.iter().any(|r| r.is_chemo));
        assert!(rooms.iter().any(|r| r.difficulty == Difficulty::Hard));
    }
}

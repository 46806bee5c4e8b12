//! Procedural level layout
//!
//! A level is built from two coordinate pools that grow with the level
//! number: x positions sweep the world width in 50-unit columns, y positions
//! start around the floor and stack upward in 50-unit rows. Both pools are
//! shuffled independently and consumed pairwise, so every level is a random
//! scatter of objects whose vertical spacing never exceeds what a jump can
//! climb.

use rand::Rng;
use rand::seq::SliceRandom;

use super::object::{Rect, WorldObject};
use crate::consts::*;

/// One full sweep of x columns across the world width
const X_SWEEP: [i32; 8] = [0, 50, 100, 150, 200, 250, 300, 350];

/// Level 1 rows: mostly below the starting line, three above it
const BASE_Y: [i32; 16] = [
    0, 50, 100, 150, 200, 250, 300, 350, 400, 450, 500, 550, 600, -50, -100, -150,
];

/// Rows added per extra level
const ROWS_PER_LEVEL: i32 = 16;
/// Vertical spacing between generated rows
const ROW_SPACING: i32 = 50;

/// X coordinate pool for a level (`16 * level` entries)
pub fn generate_x_pool(level: u32) -> Vec<i32> {
    let level = level.max(1);
    let mut pool = Vec::with_capacity(16 * level as usize);
    // Two sweeps on level 1, two more for every level above it
    for _ in 0..(2 * level) {
        pool.extend_from_slice(&X_SWEEP);
    }
    pool
}

/// Y coordinate pool for a level (`16 * level` entries).
///
/// Each extra level stacks 16 new rows above the current highest one.
pub fn generate_y_pool(level: u32) -> Vec<i32> {
    let level = level.max(1);
    let mut pool = Vec::with_capacity(16 * level as usize);
    pool.extend_from_slice(&BASE_Y);
    for _ in 1..level {
        let top = pool.iter().copied().min().unwrap_or(0);
        pool.extend((1..=ROWS_PER_LEVEL).map(|i| top - ROW_SPACING * i));
    }
    pool
}

/// Build the full object collection for a level.
///
/// Object ids are allocated sequentially starting at `first_id`, in
/// collection order.
pub fn build_level<R: Rng + ?Sized>(level: u32, rng: &mut R, first_id: u32) -> Vec<WorldObject> {
    let mut xs = generate_x_pool(level);
    let mut ys = generate_y_pool(level);
    xs.shuffle(rng);
    ys.shuffle(rng);

    // Highest row in the pool; the goal sits just above it
    let top_y = ys.iter().copied().min().unwrap_or(0);

    let mut next_id = first_id;
    let mut alloc = || {
        let id = next_id;
        next_id += 1;
        id
    };

    // One pair stays in reserve
    let placements = xs.len().saturating_sub(1);
    let mut objects = Vec::with_capacity(placements + 3);
    for _ in 0..placements {
        let (Some(x), Some(y)) = (xs.pop(), ys.pop()) else {
            break;
        };

        let roll: u8 = rng.random_range(0..=10);
        let object = match roll {
            4..=10 => WorldObject::platform(alloc(), x, y), // ~64%
            3 => WorldObject::power_up(alloc(), x, y),      // ~9%
            _ => WorldObject::enemy(alloc(), x, y),         // ~27%
        };
        objects.push(object);
    }

    // Floor, plus a second one underneath so a reset can't fall through
    objects.push(WorldObject::floor(
        alloc(),
        Rect::new(0, WORLD_HEIGHT - 100, WORLD_WIDTH, WORLD_HEIGHT),
    ));
    objects.push(WorldObject::floor(
        alloc(),
        Rect::new(0, WORLD_HEIGHT - 50, WORLD_WIDTH, WORLD_HEIGHT),
    ));

    objects.push(WorldObject::goal(alloc(), GOAL_X, top_y - GOAL_SIZE.1));

    log::info!(
        "Level {}: {} placements, goal at y={}",
        level,
        placements,
        top_y - GOAL_SIZE.1
    );

    objects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::object::ObjectKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_level_one_pools() {
        let xs = generate_x_pool(1);
        assert_eq!(xs.len(), 16);
        assert_eq!(xs.iter().filter(|&&x| x == 350).count(), 2);

        let ys = generate_y_pool(1);
        assert_eq!(ys, BASE_Y.to_vec());
    }

    #[test]
    fn test_y_pool_climbs_per_level() {
        let ys = generate_y_pool(3);
        assert_eq!(ys.len(), 48);
        // Level 2 rows start 50 above -150, level 3 rows 50 above level 2's top
        assert_eq!(ys[16], -200);
        assert_eq!(ys[31], -950);
        assert_eq!(ys[32], -1000);
        assert_eq!(ys.iter().copied().min(), Some(-1750));
    }

    #[test]
    fn test_build_level_composition() {
        let mut rng = Pcg32::seed_from_u64(7);
        let objects = build_level(2, &mut rng, 1);

        // 32 pool pairs minus one reserved, two floors, one goal
        assert_eq!(objects.len(), 31 + 3);
        assert_eq!(objects.iter().filter(|o| o.is_floor()).count(), 2);
        assert_eq!(objects.iter().filter(|o| o.is_goal()).count(), 1);

        // Ids are sequential in collection order
        for (i, obj) in objects.iter().enumerate() {
            assert_eq!(obj.id, 1 + i as u32);
        }
    }

    #[test]
    fn test_goal_above_every_placement() {
        let mut rng = Pcg32::seed_from_u64(42);
        let objects = build_level(4, &mut rng, 1);
        let goal = objects.iter().find(|o| o.is_goal()).unwrap();

        assert_eq!(goal.bounds.y2, generate_y_pool(4).into_iter().min().unwrap());
        for obj in objects.iter().filter(|o| !o.is_goal()) {
            assert!(obj.bounds.y1 >= goal.bounds.y2);
        }
    }

    #[test]
    fn test_generated_sizes_match_kind() {
        let mut rng = Pcg32::seed_from_u64(3);
        for obj in build_level(3, &mut rng, 1) {
            let size = (obj.bounds.width(), obj.bounds.height());
            match obj.kind {
                ObjectKind::Platform => assert_eq!(size, PLATFORM_SIZE),
                ObjectKind::PowerUp => assert_eq!(size, POWERUP_SIZE),
                ObjectKind::Enemy => assert_eq!(size, ENEMY_SIZE),
                ObjectKind::Goal => assert_eq!(size, GOAL_SIZE),
                ObjectKind::Floor => assert_eq!(obj.bounds.width(), WORLD_WIDTH),
            }
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = build_level(2, &mut Pcg32::seed_from_u64(99), 1);
        let b = build_level(2, &mut Pcg32::seed_from_u64(99), 1);
        assert_eq!(a, b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pool_sizes_scale_with_level(level in 1u32..30) {
                prop_assert_eq!(generate_x_pool(level).len(), 16 * level as usize);
                prop_assert_eq!(generate_y_pool(level).len(), 16 * level as usize);
            }

            #[test]
            fn placements_stay_on_grid(seed in 0u64..500, level in 1u32..5) {
                let mut rng = Pcg32::seed_from_u64(seed);
                for obj in build_level(level, &mut rng, 1) {
                    prop_assert_eq!(obj.bounds.x1.rem_euclid(50), 0);
                    prop_assert_eq!(obj.bounds.y1.rem_euclid(50), 0);
                    prop_assert!(obj.bounds.x2 <= WORLD_WIDTH);
                }
            }
        }
    }
}

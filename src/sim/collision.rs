//! Edge-exact contact detection between the player and world objects
//!
//! Contacts are equality tests on the touching edge plus a strict overlap on
//! the other axis. This only works because the world moves in whole ministeps
//! of `JUMP_HEIGHT` and the player side-steps by its half-size, so every edge
//! the player can reach lands exactly on an object boundary.

use serde::{Deserialize, Serialize};

use super::object::Rect;

/// Which side of the object the player is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Player's feet rest on the object's top edge
    Top,
    /// Player's head touches the object's underside
    Bottom,
    /// Player's left edge touches the object's right edge
    Left,
    /// Player's right edge touches the object's left edge
    Right,
}

#[inline]
fn overlaps_x(player: &Rect, obj: &Rect) -> bool {
    player.x1 < obj.x2 && player.x2 > obj.x1
}

#[inline]
fn overlaps_y(player: &Rect, obj: &Rect) -> bool {
    player.y1 < obj.y2 && player.y2 > obj.y1
}

/// Player landed on top of the object
#[inline]
pub fn top_touch(player: &Rect, obj: &Rect) -> bool {
    player.y2 == obj.y1 && overlaps_x(player, obj)
}

/// Player's head hit the object's underside
#[inline]
pub fn bottom_touch(player: &Rect, obj: &Rect) -> bool {
    player.y1 == obj.y2 && overlaps_x(player, obj)
}

/// Object is directly to the player's left
#[inline]
pub fn left_touch(player: &Rect, obj: &Rect) -> bool {
    player.x1 == obj.x2 && overlaps_y(player, obj)
}

/// Object is directly to the player's right
#[inline]
pub fn right_touch(player: &Rect, obj: &Rect) -> bool {
    player.x2 == obj.x1 && overlaps_y(player, obj)
}

/// Classify the contact between the player and an object, if any.
///
/// At most one direction can hold for non-degenerate rectangles.
pub fn classify_contact(player: &Rect, obj: &Rect) -> Option<Contact> {
    if top_touch(player, obj) {
        Some(Contact::Top)
    } else if bottom_touch(player, obj) {
        Some(Contact::Bottom)
    } else if left_touch(player, obj) {
        Some(Contact::Left)
    } else if right_touch(player, obj) {
        Some(Contact::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Player box centered at (200, 690) with half-size 10
    fn player() -> Rect {
        Rect::new(190, 680, 210, 700)
    }

    #[test]
    fn test_top_touch() {
        let floor = Rect::new(0, 700, 400, 800);
        assert!(top_touch(&player(), &floor));
        assert_eq!(classify_contact(&player(), &floor), Some(Contact::Top));

        // One unit lower is not a touch
        let below = Rect::new(0, 701, 400, 800);
        assert!(!top_touch(&player(), &below));
    }

    #[test]
    fn test_top_touch_requires_strict_overlap() {
        // Platform ends exactly at the player's left edge
        let platform = Rect::new(140, 700, 190, 710);
        assert!(!top_touch(&player(), &platform));

        // Platform starts exactly at the player's right edge
        let platform = Rect::new(210, 700, 260, 710);
        assert!(!top_touch(&player(), &platform));

        let platform = Rect::new(150, 700, 200, 710);
        assert!(top_touch(&player(), &platform));
    }

    #[test]
    fn test_bottom_touch() {
        let ceiling = Rect::new(175, 630, 225, 680);
        assert!(bottom_touch(&player(), &ceiling));
        assert_eq!(classify_contact(&player(), &ceiling), Some(Contact::Bottom));
    }

    #[test]
    fn test_side_touches() {
        let left = Rect::new(140, 650, 190, 700);
        assert!(left_touch(&player(), &left));
        assert!(!right_touch(&player(), &left));

        let right = Rect::new(210, 650, 260, 700);
        assert!(right_touch(&player(), &right));
        assert_eq!(classify_contact(&player(), &right), Some(Contact::Right));
    }

    #[test]
    fn test_side_touch_needs_vertical_overlap() {
        // Enemy sitting entirely below the player's feet
        let low = Rect::new(210, 700, 260, 750);
        assert!(!right_touch(&player(), &low));
        assert_eq!(classify_contact(&player(), &low), None);
    }

    #[test]
    fn test_no_contact_at_distance() {
        let far = Rect::new(0, 0, 50, 10);
        assert_eq!(classify_contact(&player(), &far), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn contact_directions_are_exclusive(
                px in -100i32..100,
                py in -100i32..100,
                half in 1i32..20,
                ox in -100i32..100,
                oy in -100i32..100,
                w in 1i32..60,
                h in 1i32..60,
            ) {
                let player = Rect::new(px - half, py - half, px + half, py + half);
                let obj = Rect::new(ox, oy, ox + w, oy + h);
                let hits = [
                    top_touch(&player, &obj),
                    bottom_touch(&player, &obj),
                    left_touch(&player, &obj),
                    right_touch(&player, &obj),
                ];
                prop_assert!(hits.iter().filter(|&&h| h).count() <= 1);
            }
        }
    }
}

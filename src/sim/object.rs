//! World objects: platforms, enemies, power-ups, floors and the goal
//!
//! Every object is an axis-aligned rectangle in world units with
//! `y` growing downward (top edge = `y1`, bottom edge = `y2`).

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle (left, top, right, bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        debug_assert!(x1 < x2 && y1 < y2, "degenerate rect");
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle from its top-left corner and size
    pub fn from_origin(x: i32, y: i32, (w, h): (i32, i32)) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Square centered on `center` with the given half-extent
    pub fn centered(center: IVec2, half: i32) -> Self {
        Self::new(center.x - half, center.y - half, center.x + half, center.y + half)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width(), self.height())
    }

    /// Shift both edges on each axis together (shape never changes)
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x1 += dx;
        self.x2 += dx;
        self.y1 += dy;
        self.y2 += dy;
    }
}

/// Object category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Platform,
    Enemy,
    PowerUp,
    Floor,
    Goal,
}

/// A positioned object in the active level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: u32,
    pub bounds: Rect,
    pub kind: ObjectKind,
    /// Set on first top contact; gates one-time awards
    touched: bool,
    /// Stomps for enemies, landings for the goal
    touch_count: u32,
}

impl WorldObject {
    pub fn new(id: u32, kind: ObjectKind, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            kind,
            touched: false,
            touch_count: 0,
        }
    }

    pub fn platform(id: u32, x: i32, y: i32) -> Self {
        Self::new(id, ObjectKind::Platform, Rect::from_origin(x, y, PLATFORM_SIZE))
    }

    pub fn enemy(id: u32, x: i32, y: i32) -> Self {
        Self::new(id, ObjectKind::Enemy, Rect::from_origin(x, y, ENEMY_SIZE))
    }

    pub fn power_up(id: u32, x: i32, y: i32) -> Self {
        Self::new(id, ObjectKind::PowerUp, Rect::from_origin(x, y, POWERUP_SIZE))
    }

    /// Floors start touched so standing on them never awards points
    pub fn floor(id: u32, bounds: Rect) -> Self {
        let mut floor = Self::new(id, ObjectKind::Floor, bounds);
        floor.mark_touched();
        floor
    }

    /// The goal starts touched as well; reaching it is tracked by touch count
    pub fn goal(id: u32, x: i32, y: i32) -> Self {
        let mut goal = Self::new(id, ObjectKind::Goal, Rect::from_origin(x, y, GOAL_SIZE));
        goal.mark_touched();
        goal
    }

    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.bounds.translate(dx, dy);
    }

    #[inline]
    pub fn is_enemy(&self) -> bool {
        self.kind == ObjectKind::Enemy
    }

    #[inline]
    pub fn is_power_up(&self) -> bool {
        self.kind == ObjectKind::PowerUp
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self.kind == ObjectKind::Goal
    }

    #[inline]
    pub fn is_floor(&self) -> bool {
        self.kind == ObjectKind::Floor
    }

    #[inline]
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn increment_touch(&mut self, n: u32) {
        self.touch_count += n;
    }

    #[inline]
    pub fn touch_count(&self) -> u32 {
        self.touch_count
    }
}

//! Fixed ministep simulation
//!
//! The player never moves vertically. A jump translates every world object
//! down by `JUMP_HEIGHT` per ministep, a fall translates them back up, and the
//! score follows the world's displacement. The engine advances exactly one
//! ministep per [`Engine::step`] call; the host decides how long to wait
//! between calls and redraws in between.

use std::collections::BTreeSet;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{bottom_touch, left_touch, right_touch, top_touch};
use super::level::build_level;
use super::object::{ObjectKind, Rect, WorldObject};
use super::state::{GameEvent, GamePhase, Motion, Outcome, Player, RngState, SimulationState};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::scaled_points;

/// Side-step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// What a single [`Engine::step`] did; the host maps this to a tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ministep {
    /// Nothing to simulate
    Idle,
    /// World moved down (player rising)
    Rising,
    /// World moved up (player falling)
    Falling,
    /// Player settled on an object
    Landed,
    /// Not playing (menu, won or lost)
    Halted,
}

/// The simulation: player, active objects, scores and the jump/fall machine
#[derive(Debug, Clone)]
pub struct Engine {
    state: SimulationState,
    player: Player,
    /// Active objects in creation order (collision ties resolve by this order)
    objects: Vec<WorldObject>,
    /// Object ids to drop at the next ministep boundary
    pending_deletion: BTreeSet<u32>,
    /// Re-run gravity once pending deletions are applied
    gravity_recheck: bool,
    rng_state: RngState,
    rng: Pcg32,
    next_id: u32,
    events: Vec<GameEvent>,
    high_scores: HighScores,
    closed: bool,
}

impl Engine {
    /// Create an engine sitting in the start menu
    pub fn new(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            state: SimulationState::default(),
            player: Player::default(),
            objects: Vec::new(),
            pending_deletion: BTreeSet::new(),
            gravity_recheck: false,
            rng: rng_state.to_rng(),
            rng_state,
            next_id: 1,
            events: Vec::new(),
            high_scores: HighScores::new(),
            closed: false,
        }
    }

    // === Commands ===

    /// Start `level` with a freshly generated layout
    pub fn start_level(&mut self, level: u32) {
        let level = level.max(1);
        let objects = build_level(level, &mut self.rng, self.next_id);
        self.install_level(level, objects);
    }

    /// Start `level` with a caller-supplied layout (editors, tests)
    pub fn start_level_with(&mut self, level: u32, objects: Vec<WorldObject>) {
        self.install_level(level.max(1), objects);
    }

    fn install_level(&mut self, level: u32, objects: Vec<WorldObject>) {
        self.next_id = objects
            .iter()
            .map(|o| o.id + 1)
            .max()
            .unwrap_or(1)
            .max(self.next_id);

        self.player = Player::default();
        self.objects = objects;
        self.pending_deletion.clear();
        self.gravity_recheck = false;

        self.state.level = level;
        self.state.jump_size = DEFAULT_JUMP_SIZE;
        self.state.max_score_this_run = 0;
        self.state.phase = GamePhase::Playing;
        self.state.motion = Motion::Idle;
        self.state.last_action_was_jump = false;

        log::info!(
            "Starting level {} ({} objects, score {})",
            level,
            self.objects.len(),
            self.state.score
        );
    }

    /// Start over from level 1 with a zero score
    pub fn restart(&mut self) {
        // Lost runs were recorded when the player died
        if matches!(self.state.phase, GamePhase::Playing | GamePhase::Won) {
            self.record_run();
        }
        self.state.level = 1;
        self.state.score = 0;
        self.start_level(1);
    }

    /// The "click to play" command from a menu.
    ///
    /// After a win this replays at the next level; after a loss it restarts.
    pub fn start(&mut self) {
        match (self.state.phase, self.state.outcome) {
            (GamePhase::Playing, _) => {}
            (_, Some(Outcome::Won { level, .. })) => self.start_level(level + 1),
            (_, Some(Outcome::Lost { .. })) => self.restart(),
            (_, None) => self.start_level(self.state.level),
        }
    }

    /// Begin a jump. Ignored while airborne or outside gameplay.
    pub fn request_jump(&mut self) {
        if self.state.phase != GamePhase::Playing || self.state.in_motion() {
            return;
        }
        self.state.motion = Motion::Jumping { ministeps: 0 };
        self.state.last_action_was_jump = true;
    }

    /// Side-step by the player's half-size unless something is in the way.
    ///
    /// Walking into an enemy is fatal; any other object just blocks.
    pub fn request_move_side(&mut self, dir: Direction) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        if !self.state.in_motion() {
            self.state.last_action_was_jump = false;
        }

        let bbox = self.player.bbox();
        let touches: fn(&Rect, &Rect) -> bool = match dir {
            Direction::Left => left_touch,
            Direction::Right => right_touch,
        };

        match self.first_live(|o| touches(&bbox, &o.bounds)) {
            Some(idx) if self.objects[idx].is_enemy() => {
                self.die();
                return;
            }
            Some(_) => {}
            None => self.player.step_side(dir.sign()),
        }

        self.gravity_check();
    }

    /// Queue an object for removal at the next ministep boundary.
    ///
    /// Unknown or already-queued ids are ignored when the queue is applied.
    pub fn delete_object(&mut self, id: u32) {
        self.pending_deletion.insert(id);
        self.gravity_recheck = true;
    }

    pub fn close_game(&mut self) {
        log::info!("Closing game");
        self.closed = true;
    }

    // === Stepping ===

    /// Advance one ministep
    pub fn step(&mut self) -> Ministep {
        if self.state.phase != GamePhase::Playing {
            return Ministep::Halted;
        }

        self.apply_deletions();

        let result = match self.state.motion {
            Motion::Idle => Ministep::Idle,
            Motion::Jumping { ministeps } => {
                self.shift_world(JUMP_HEIGHT);
                let ministeps = ministeps + 1;
                let head_hit = self.check_head_contact();
                if self.state.phase == GamePhase::Playing {
                    self.state.motion = if head_hit || ministeps >= self.state.jump_size {
                        // Jump over; settle via gravity
                        Motion::Falling
                    } else {
                        Motion::Jumping { ministeps }
                    };
                }
                Ministep::Rising
            }
            Motion::Falling => {
                if self.resolve_landing() {
                    if self.state.phase == GamePhase::Playing {
                        self.state.motion = Motion::Idle;
                    }
                    Ministep::Landed
                } else {
                    self.shift_world(-JUMP_HEIGHT);
                    Ministep::Falling
                }
            }
        };

        self.state.record_score();

        if self.state.phase == GamePhase::Playing {
            result
        } else {
            Ministep::Halted
        }
    }

    /// True when stepping would change nothing until the next command
    pub fn is_settled(&self) -> bool {
        self.state.phase != GamePhase::Playing
            || (self.state.motion == Motion::Idle && self.pending_deletion.is_empty())
    }

    /// Step until settled or `max_ministeps` have run; returns the count
    pub fn run_until_settled(&mut self, max_ministeps: usize) -> usize {
        let mut count = 0;
        while count < max_ministeps && !self.is_settled() {
            self.step();
            count += 1;
        }
        count
    }

    fn gravity_check(&mut self) {
        // A jump in progress ends in its own gravity check
        if self.state.in_motion() {
            return;
        }
        self.state.motion = Motion::Falling;
    }

    fn apply_deletions(&mut self) {
        if self.pending_deletion.is_empty() {
            return;
        }
        let before = self.objects.len();
        let pending = std::mem::take(&mut self.pending_deletion);
        self.objects.retain(|o| !pending.contains(&o.id));
        let removed = before - self.objects.len();

        let recheck = std::mem::take(&mut self.gravity_recheck);
        if removed > 0 && recheck {
            log::debug!("Removed {} object(s), rechecking gravity", removed);
            self.gravity_check();
        }
    }

    /// Translate every object vertically and score the climb (or the drop)
    fn shift_world(&mut self, dy: i32) {
        for obj in &mut self.objects {
            obj.translate(0, dy);
        }
        self.state.score += scaled_points(dy as i64, self.state.level);
    }

    /// Index of the first object not queued for deletion matching `pred`
    fn first_live(&self, pred: impl Fn(&WorldObject) -> bool) -> Option<usize> {
        self.objects
            .iter()
            .position(|o| !self.pending_deletion.contains(&o.id) && pred(o))
    }

    /// Head contact ends a jump; hitting an enemy from below is fatal
    fn check_head_contact(&mut self) -> bool {
        let bbox = self.player.bbox();
        match self.first_live(|o| bottom_touch(&bbox, &o.bounds)) {
            Some(idx) => {
                if self.objects[idx].is_enemy() {
                    self.die();
                }
                true
            }
            None => false,
        }
    }

    /// Resolve the first object under the player's feet, if any
    fn resolve_landing(&mut self) -> bool {
        let bbox = self.player.bbox();
        let Some(idx) = self.first_live(|o| top_touch(&bbox, &o.bounds)) else {
            return false;
        };

        let (id, kind, first_touch) = {
            let obj = &mut self.objects[idx];
            let first_touch = !obj.touched();
            obj.mark_touched();
            (obj.id, obj.kind, first_touch)
        };
        self.events.push(GameEvent::Landed { object_id: id });

        match kind {
            ObjectKind::Enemy => {
                if first_touch {
                    self.award(id, ENEMY_STOMP_POINTS);
                }
                if self.state.last_action_was_jump {
                    let obj = &mut self.objects[idx];
                    obj.increment_touch(1);
                    let touches = obj.touch_count();
                    self.events.push(GameEvent::EnemyStomped {
                        object_id: id,
                        touches,
                    });

                    if touches == ENEMY_DESTROY_TOUCHES {
                        self.award(id, ENEMY_DESTROY_POINTS);
                        self.delete_object(id);
                        self.events.push(GameEvent::EnemyDestroyed { object_id: id });
                        log::info!("Enemy {} destroyed", id);
                    }
                }
            }
            ObjectKind::PowerUp => {
                if first_touch {
                    self.award(id, POWERUP_POINTS);
                    self.state.jump_size += POWERUP_JUMP_BONUS;
                    self.events.push(GameEvent::PowerUp {
                        object_id: id,
                        jump_size: self.state.jump_size,
                    });
                }
            }
            ObjectKind::Platform | ObjectKind::Floor | ObjectKind::Goal => {
                if first_touch {
                    self.award(id, PLATFORM_POINTS);
                }
            }
        }

        if kind == ObjectKind::Goal {
            let obj = &mut self.objects[idx];
            obj.increment_touch(1);
            if obj.touch_count() == 1 {
                self.win();
            }
        }

        true
    }

    fn award(&mut self, object_id: u32, base: i64) {
        let points = scaled_points(base, self.state.level);
        self.state.score += points;
        self.events.push(GameEvent::Scored { object_id, points });
        log::debug!("+{} from object {} (score {})", points, object_id, self.state.score);
    }

    fn die(&mut self) {
        let level = self.state.level;
        self.state.record_score();
        self.state.phase = GamePhase::Lost;
        self.state.motion = Motion::Idle;
        self.state.outcome = Some(Outcome::Lost {
            level,
            score: self.state.max_score_this_run,
        });
        self.events.push(GameEvent::Died { level });
        self.record_run();
        log::info!("Lost on level {} with score {}", level, self.state.score);
    }

    fn win(&mut self) {
        let level = self.state.level;
        self.state.record_score();
        self.state.phase = GamePhase::Won;
        self.state.motion = Motion::Idle;
        self.state.outcome = Some(Outcome::Won {
            level,
            score: self.state.max_score_this_run,
        });
        self.events.push(GameEvent::LevelComplete { level });
        log::info!("Beat level {} with score {}", level, self.state.score);
    }

    fn record_run(&mut self) {
        let best = self.state.max_score_this_run.max(self.state.score);
        if let Some(rank) = self.high_scores.add_score(best, self.state.level) {
            log::info!("Run scored {} (rank {})", best, rank);
        }
    }

    // === Accessors ===

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn motion(&self) -> Motion {
        self.state.motion
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn max_score_this_run(&self) -> i64 {
        self.state.max_score_this_run
    }

    pub fn top_score_ever(&self) -> i64 {
        self.state.top_score_ever
    }

    pub fn jump_size(&self) -> u32 {
        self.state.jump_size
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_bbox(&self) -> Rect {
        self.player.bbox()
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

//! Host loop: input events in, one frame out per ministep
//!
//! Rendering and windowing live outside this crate. A front end implements
//! [`FrameSink`] to draw, feeds [`InputEvent`]s to a [`Host`], and lets the
//! host pace the simulation with the tick intervals from [`Settings`].

use crate::settings::Settings;
use crate::sim::{Direction, Engine, GamePhase, GameEvent, Ministep, Outcome, Rect, WorldObject};

/// Safety cap on ministeps per [`Host::pump`] call
const MAX_PUMP_MINISTEPS: usize = 10_000;

/// Discrete input from the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    MoveLeft,
    MoveRight,
    /// Click-to-play from a menu
    Start,
    Restart,
    Quit,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: i64,
    pub max_score: i64,
    pub top_score: i64,
    pub player: Rect,
    pub objects: &'a [WorldObject],
    pub outcome: Option<Outcome>,
    /// Events since the previous frame (sounds, effects)
    pub events: &'a [GameEvent],
}

impl<'a> FrameView<'a> {
    pub fn of(engine: &'a Engine, events: &'a [GameEvent]) -> Self {
        Self {
            phase: engine.phase(),
            level: engine.level(),
            score: engine.score(),
            max_score: engine.max_score_this_run(),
            top_score: engine.top_score_ever(),
            player: engine.player_bbox(),
            objects: engine.objects(),
            outcome: engine.outcome(),
            events,
        }
    }
}

/// Redraw target, invoked after every mutation batch
pub trait FrameSink {
    fn frame(&mut self, view: FrameView<'_>);
}

/// Owns the engine and drives it on behalf of a front end
pub struct Host<S: FrameSink> {
    engine: Engine,
    settings: Settings,
    sink: S,
}

impl<S: FrameSink> Host<S> {
    pub fn new(engine: Engine, settings: Settings, sink: S) -> Self {
        Self {
            engine,
            settings,
            sink,
        }
    }

    /// Apply one input event. Returns false once the game is closed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Jump => self.engine.request_jump(),
            InputEvent::MoveLeft => self.engine.request_move_side(Direction::Left),
            InputEvent::MoveRight => self.engine.request_move_side(Direction::Right),
            InputEvent::Start => self.engine.start(),
            InputEvent::Restart => self.engine.restart(),
            InputEvent::Quit => self.engine.close_game(),
        }
        // Commands can change the scene without a ministep (menus, side steps)
        self.redraw();
        !self.engine.is_closed()
    }

    /// Run a single ministep and redraw. The caller waits
    /// `settings().tick_interval(step)` before the next one.
    pub fn tick(&mut self) -> Ministep {
        let step = self.engine.step();
        self.redraw();
        step
    }

    /// Hand the sink a frame along with everything that happened since the last one
    fn redraw(&mut self) {
        let events = self.engine.drain_events();
        self.sink.frame(FrameView::of(&self.engine, &events));
    }

    /// Step until the engine settles, sleeping between ministeps when realtime.
    /// Returns the number of ministeps run.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while count < MAX_PUMP_MINISTEPS && !self.engine.is_settled() {
            let step = self.tick();
            count += 1;
            if self.settings.realtime {
                std::thread::sleep(self.settings.tick_interval(step));
            }
        }
        count
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

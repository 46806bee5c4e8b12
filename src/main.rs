//! Retro Climb entry point
//!
//! Runs a headless demo: the autopilot jumps repeatedly and steers toward
//! the goal column while airborne. Pass a settings JSON path as the first
//! argument; set `RUST_LOG=info` to follow along.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use retro_climb::consts::*;
use retro_climb::sim::{GamePhase, Ministep};
use retro_climb::{Engine, FrameSink, FrameView, Host, InputEvent, Settings};

/// Logs frames instead of drawing them
#[derive(Default)]
struct LogSink {
    frames: u64,
}

impl FrameSink for LogSink {
    fn frame(&mut self, view: FrameView<'_>) {
        self.frames += 1;
        log::trace!(
            "frame {}: player {:?}, {} objects, score {}",
            self.frames,
            view.player,
            view.objects.len(),
            view.score
        );
        for event in view.events {
            log::debug!("{:?}", event);
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Side-step toward the goal column, if there is one
fn steer(host: &mut Host<LogSink>) {
    let goal_x = host
        .engine()
        .objects()
        .iter()
        .find(|o| o.is_goal())
        .map(|g| (g.bounds.x1 + g.bounds.x2) / 2);
    let Some(goal_x) = goal_x else {
        return;
    };

    let x = host.engine().player().pos.x;
    if x < goal_x - PLAYER_HALF_SIZE {
        host.handle(InputEvent::MoveRight);
    } else if x > goal_x + PLAYER_HALF_SIZE {
        host.handle(InputEvent::MoveLeft);
    }
}

fn main() {
    env_logger::init();

    let settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Retro Climb (headless) starting with seed {}", seed);

    let jumps = settings.demo_jumps;
    let mut host = Host::new(Engine::new(seed), settings, LogSink::default());
    host.handle(InputEvent::Start);

    for _ in 0..jumps {
        if host.engine().phase() != GamePhase::Playing {
            break;
        }
        host.handle(InputEvent::Jump);

        while !host.engine().is_settled() {
            let step = host.tick();
            if step == Ministep::Falling {
                steer(&mut host);
            }
            if host.settings().realtime {
                std::thread::sleep(host.settings().tick_interval(step));
            }
        }
    }
    host.handle(InputEvent::Quit);

    let engine = host.engine();
    println!("Level:      {}", engine.level());
    println!("Phase:      {:?}", engine.phase());
    if let Some(outcome) = engine.outcome() {
        println!("Result:     {}", outcome);
    }
    println!("Score:      {}", engine.score());
    println!("Best (run): {}", engine.max_score_this_run());
    println!("Highscore:  {}", engine.top_score_ever());
    println!("Frames:     {}", host.sink().frames);
}

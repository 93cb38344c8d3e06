//! Fixed-timestep driver
//!
//! Both front ends feed wall-clock frames and input events through a
//! `Runner`. It turns variable frame times into whole simulation ticks and
//! reports when a session has just finished so the caller can record it.

use crate::consts::*;
use crate::sim::{
    EndReason, GamePhase, GameState, InputEvent, SliceReport, Theme, choose_target, handle_input,
    tick,
};

/// Longest frame gap fed to the accumulator, in seconds
const MAX_FRAME_DT: f32 = 0.1;
const FPS_WINDOW: usize = 60;

/// A session that reached game-over since the last report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishedSession {
    pub score: u64,
    pub theme: Theme,
    pub reason: Option<EndReason>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Simulation ticks run this frame
    pub ticks: u32,
    pub finished: Option<FinishedSession>,
}

pub struct Runner {
    pub state: GameState,
    /// Let `choose_target` play while a session is running
    pub demo: bool,
    accumulator: f32,
    last_time: Option<f64>,
    last_phase: GamePhase,
    pending: Option<FinishedSession>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Runner {
    pub fn new(state: GameState) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            demo: false,
            accumulator: 0.0,
            last_time: None,
            last_phase,
            pending: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Frames per second over the last `FPS_WINDOW` frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forward one input event to the simulation
    pub fn input(&mut self, event: InputEvent, now_ms: f64) -> SliceReport {
        let report = handle_input(&mut self.state, event, now_ms);
        self.check_transition();
        report
    }

    /// Advance by the wall time since the previous frame
    pub fn update(&mut self, now_ms: f64) -> FrameReport {
        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            if self.demo {
                self.demo_swipe(now_ms);
            }
            tick(&mut self.state, now_ms);
            self.check_transition();
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        // Drop the backlog instead of carrying it into the next frame
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.track_fps(now_ms);

        FrameReport {
            ticks,
            finished: self.pending.take(),
        }
    }

    /// Tap the demo player's target, if it has one
    fn demo_swipe(&mut self, now_ms: f64) {
        if let Some(target) = choose_target(&self.state) {
            handle_input(&mut self.state, InputEvent::PointerDown(target), now_ms);
            handle_input(&mut self.state, InputEvent::PointerUp, now_ms);
        }
    }

    fn check_transition(&mut self) {
        let phase = self.state.phase;
        if phase == self.last_phase {
            return;
        }
        if phase == GamePhase::GameOver {
            self.pending = Some(FinishedSession {
                score: self.state.session.score,
                theme: self.state.theme,
                reason: self.state.session.end_reason,
            });
        }
        self.last_phase = phase;
    }

    fn track_fps(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 && now_ms > oldest {
            self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / (now_ms - oldest)).round() as u32;
        }
    }
}

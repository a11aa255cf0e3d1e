//! Fixed-timestep clock with a dynamic step rate.
//!
//! Wall-clock time feeds an accumulator; `should_step()` hands out
//! simulation slices of `1 / step rate` seconds each, so the snake moves
//! at its speed factor regardless of the render rate, with catch-up when
//! frames run long. The step rate changes mid-session as the score-driven
//! speed ramp kicks in.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct TimeState {
    /// Seconds per simulation step (`1 / steps-per-second`).
    pub step_interval: f64,
    /// Catch-up ceiling; deltas above this are clamped so one stalled
    /// frame cannot trigger an unbounded burst of steps.
    pub max_accumulator: f64,
    accumulator: f64,
    pub total_time: f64,
    pub step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self {
            step_interval: 1.0 / 60.0,
            max_accumulator: 0.25,
            accumulator: 0.0,
            total_time: 0.0,
            step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    /// Set the simulation rate in steps per second.
    pub fn set_step_rate(&mut self, steps_per_second: f64) {
        if steps_per_second > 0.0 {
            self.step_interval = 1.0 / steps_per_second;
        }
    }

    pub fn steps_per_second(&self) -> f64 {
        1.0 / self.step_interval
    }

    /// Drop any banked time. Called when (re)entering play so time spent
    /// on menu screens does not replay as a burst of movement.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.steps_this_frame = 0;
        self.last_instant = Instant::now();
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.accumulate(dt);
    }

    fn accumulate(&mut self, mut dt: f64) {
        // Spiral-of-death cap
        if dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms — capping accumulator to {}ms",
                dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            dt = self.max_accumulator;
        }

        self.real_dt = dt;
        self.accumulator += dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.step_interval {
            self.accumulator -= self.step_interval;
            self.total_time += self.step_interval;
            self.step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

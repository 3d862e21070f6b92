#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnimationMode {
    Running,
    Paused,
}

pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

const SPINNER_FRAME_SECONDS: f64 = 0.1;
const ANIMATION_MAX_FRAME_DELTA: f64 = 0.25;
const SPINNER_CYCLE: f64 = SPINNER_FRAMES.len() as f64 * SPINNER_FRAME_SECONDS;

/// Advances the spinner clock; a missing `last_tick` only records the time.
pub fn advance_animation_counter(
    counter: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: AnimationMode,
) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).max(0.0).min(ANIMATION_MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next_counter = match mode {
        AnimationMode::Running => (counter + delta).rem_euclid(SPINNER_CYCLE),
        AnimationMode::Paused => counter.rem_euclid(SPINNER_CYCLE),
    };

    (next_counter, Some(now_seconds))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn spinner_frame(counter: f64) -> &'static str {
    let index = (counter.rem_euclid(SPINNER_CYCLE) / SPINNER_FRAME_SECONDS) as usize;
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}

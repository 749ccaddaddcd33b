//! Scroll Runner Demo
//!
//! Plays the built-in level with a scripted input sequence, logging
//! progress and an ASCII view, then replays the recorded inputs and checks
//! the final state hash.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scroll_runner::{
    TICK_RATE, VERSION, DEFAULT_LEVEL,
    game::{
        config::GameConfig,
        events::GameEventData,
        input::{InputRecording, InputState},
        state::Session,
        tick::{tick, replay_session},
    },
    render::{AsciiRenderer, Frame, Renderer},
};

/// Demo length cap (20 seconds)
const DEMO_TICKS: u32 = 20 * TICK_RATE;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Scroll Runner v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    demo_session()
}

/// Scripted input: run right, hopping at a fixed cadence.
fn scripted_input(t: u32) -> InputState {
    match t % 45 {
        0..=3 => InputState::right().with_jump(),
        _ => InputState::right(),
    }
}

fn demo_session() -> Result<()> {
    info!("=== Starting Demo Session ===");

    let config = GameConfig::default();
    let mut session = Session::new(&DEFAULT_LEVEL, config.clone()).context("failed to load level")?;
    let mut renderer = AsciiRenderer::new(session.tuning.tile_size);
    let mut recording = InputRecording::new();

    let mut total_events = 0;
    let mut ticks_run = 0;

    for t in 0..DEMO_TICKS {
        let input = scripted_input(t);
        recording.record(t, input);

        let result = tick(&mut session, &input);
        ticks_run = t + 1;
        total_events += result.events.len();

        for event in &result.events {
            match &event.data {
                GameEventData::CoinCollected { coin_id, new_score } => {
                    info!("Tick {}: coin {} collected (score {})", event.tick, coin_id, new_score);
                }
                GameEventData::SessionEnded { reason, score } => {
                    info!("Tick {}: session ended ({:?}), final score {}", event.tick, reason, score);
                }
                _ => {}
            }
        }

        // Report every 2 seconds
        if session.tick % (2 * TICK_RATE) == 0 || result.session_ended {
            renderer.present(&Frame::capture(&session, result.camera_offset));
            let (x, y) = session.level.player.rect.position().to_floats();
            info!(
                "Tick {}: player at ({:.1}, {:.1}), {} coins left\n{}",
                session.tick,
                x,
                y,
                session.level.coins.len(),
                renderer.output()
            );
        }

        if result.session_ended {
            break;
        }
    }

    // Print final results
    info!("=== Session Results ===");
    match session.end_reason() {
        Some(reason) => info!("End reason: {:?}", reason),
        None => info!("Still running after {} ticks", session.tick),
    }
    info!("Score: {}", session.score);
    info!("Total events: {}", total_events);
    info!("Frames rendered: {}", renderer.frames_presented());

    let hash = session.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    let bytes = recording.to_bytes().context("failed to encode input recording")?;
    info!(
        "Input recording: {} deltas, {} bytes, hash {}",
        recording.delta_count(),
        bytes.len(),
        hex::encode(&recording.compute_hash()[..8])
    );

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let restored = InputRecording::from_bytes(&bytes).context("failed to decode input recording")?;
    let (replayed, _) = replay_session(&DEFAULT_LEVEL, config, &restored, ticks_run)
        .context("failed to replay session")?;
    let replay_hash = replayed.compute_hash();

    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("determinism failure: replay hash differs");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");

    Ok(())
}

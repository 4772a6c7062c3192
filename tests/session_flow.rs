//! End-to-end retiming sessions over synthetic playback

use futures::StreamExt;
use splitframe::{
    Config, FailureReason, FrameTick, PlaybackEvent, RetimeError, RetimeSession, TimelineProvider,
    UpdateRate,
};
use std::time::Duration;

/// 30 fps playback where the window loses focus early and the viewer skips
/// ahead ten seconds at frame 100
fn disturbed_recording() -> Vec<PlaybackEvent> {
    let mut events = Vec::new();
    for frame in 0..200u64 {
        if frame == 100 {
            events.push(PlaybackEvent::Seeked);
        }
        let jump = if frame >= 100 { 10.0 } else { 0.0 };
        let tick = FrameTick::new(frame, frame as f64 / 30.0 + jump).with_focus(frame != 3);
        events.push(tick.into());
    }
    events
}

#[tokio::test(start_paused = true)]
async fn full_retime_produces_mod_note() -> anyhow::Result<()> {
    let provider = TimelineProvider::new(disturbed_recording(), Duration::from_millis(33));
    let clock = provider.timeline_clock();
    let mut session = RetimeSession::start(provider)?;

    let fps = session.wait_until_ready_timeout(Duration::from_secs(30)).await?;
    assert_eq!(fps, 30);
    assert!(session.is_ready());

    clock.seek(1.0);
    session.mark_start();
    clock.seek(12.5);
    session.mark_end();

    session.insert_split();
    clock.seek(20.0);
    session.mark_start();
    clock.seek(45.0);
    session.mark_end();

    session.set_extra_time(0.5);

    let retime = session.retime().retime().expect("splits are ordered");
    assert_eq!(retime.igt, 37.0);
    assert_eq!(retime.rta, 44.0);

    let note = session.mod_note().expect("note for a valid ledger");
    assert_eq!(
        note.to_string(),
        "Mod Note: Retimed (Start Frame: 30, End Frame: 375, \
         Start Frame #2: 600, End Frame #2: 1350, FPS: 30, \
         Extra time: 0:00.500, RTA: 0:44.000, IGT: 0:37.000)"
    );

    session.close();
    assert!(session.is_closed());
    // The ledger outlives sampling
    assert_eq!(session.ledger().len(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn editing_an_earlier_split_revalidates_order() -> anyhow::Result<()> {
    let provider = TimelineProvider::constant_rate(60, 120);
    let clock = provider.timeline_clock();
    let mut session = RetimeSession::start(provider)?;
    session.wait_until_ready().await?;

    for (start, end) in [(0.0, 1.0), (2.0, 3.0), (4.0, 5.0)] {
        if session.ledger().current().end != 0.0 {
            session.insert_split();
        }
        clock.seek(start);
        session.mark_start();
        clock.seek(end);
        session.mark_end();
    }
    assert_eq!(session.ledger().position(), (3, 3));
    assert!(session.retime().is_success());

    // Drag the middle split's end past the third split's start
    assert!(session.prev_split());
    clock.seek(4.5);
    session.mark_end();

    let failure = session.retime().failure().expect("overlap is reported");
    assert_eq!(failure.reason, FailureReason::OutOfOrder);
    assert_eq!(failure.split_index, 3);
    assert_eq!(failure.to_string(), "split 3 is out of order");

    // Put it back and the run retimes again
    clock.seek(3.0);
    session.mark_end();
    assert!(session.next_split());
    assert!(!session.next_split());
    let retime = session.retime().retime().expect("order restored");
    assert_eq!((retime.igt, retime.rta), (3.0, 5.0));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn yaml_config_shrinks_the_window() -> anyhow::Result<()> {
    let config = Config::from_yaml_str("sampler:\n  capacity: 10\n")?;
    config.validate()?;

    let provider = TimelineProvider::constant_rate(24, 40);
    let session = RetimeSession::start_with_config(provider, config.sampler)?;
    let mut progress = Box::pin(session.progress(UpdateRate::Native));

    let mut seen = Vec::new();
    while let Some(snapshot) = progress.next().await {
        seen.push(snapshot.samples);
        if snapshot.ready {
            assert_eq!(snapshot.fps, 24);
            assert_eq!(snapshot.capacity, 10);
            break;
        }
    }

    assert_eq!(seen.last(), Some(&10));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "samples only grow: {seen:?}");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_stops_sampling() -> anyhow::Result<()> {
    let provider = TimelineProvider::constant_rate(60, 100_000);
    let clock = provider.timeline_clock();
    let session = RetimeSession::start(provider)?;
    session.wait_until_ready().await?;
    drop(session);

    // Give the driver a chance to observe cancellation, then confirm the
    // timeline stopped advancing
    tokio::time::sleep(Duration::from_millis(100)).await;
    let parked = clock.position();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(clock.position(), parked);
    Ok(())
}

#[tokio::test]
async fn empty_player_is_an_environment_error() {
    let provider = TimelineProvider::new(Vec::new(), Duration::ZERO);
    match RetimeSession::start(provider) {
        Err(err @ RetimeError::EnvironmentPrecondition { .. }) => {
            assert!(!err.recovery_suggestions().is_empty());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("session started without media"),
    }
}

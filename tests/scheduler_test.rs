//! Debounced regeneration driving a session.

use std::time::Duration;

use halftone::models::JobConfig;
use halftone::services::{debounced, HalftoneSession, JobChange, DEFAULT_DEBOUNCE};
use halftone_engine::{DitherPattern, HalftoneParams, SourceImage};
use pretty_assertions::assert_eq;
use tokio::time::{advance, Instant};

fn job_with_cell(cell_size: f64) -> JobConfig {
    JobConfig {
        params: HalftoneParams::new()
            .pattern(DitherPattern::Variable)
            .cell_size(cell_size)
            .angle(0.0),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_slider_drag_renders_only_final_value() {
    let mut session =
        HalftoneSession::new(SourceImage::solid(40, 40, [0, 0, 0, 255]), job_with_cell(10.0));
    session.render();

    let (queue, mut pending) = debounced(DEFAULT_DEBOUNCE);
    let producer = tokio::spawn(async move {
        for cell in [9.0, 8.0, 7.0, 6.0, 5.0] {
            queue.request(job_with_cell(cell));
            advance(Duration::from_millis(20)).await;
        }
    });

    let mut renders = 0;
    while let Some(job) = pending.next().await {
        session.apply(job).unwrap();
        renders += 1;
    }
    producer.await.unwrap();

    assert_eq!(renders, 1);
    assert_eq!(session.job().params.cell_size, 5.0);
    // 40 px canvas with 5 px cells: 8 centers per axis
    assert_eq!(session.last_stats().unwrap().visited, 64);
}

#[tokio::test(start_paused = true)]
async fn test_separated_requests_each_render() {
    let mut session =
        HalftoneSession::new(SourceImage::solid(20, 20, [0, 0, 0, 255]), job_with_cell(10.0));
    session.render();

    let (queue, mut pending) = debounced(Duration::from_millis(100));

    queue.request(job_with_cell(5.0));
    let first = pending.next().await.unwrap();
    assert_eq!(session.apply(first).unwrap(), JobChange::Regenerated);

    queue.request(job_with_cell(5.0));
    let second = pending.next().await.unwrap();
    assert_eq!(session.apply(second).unwrap(), JobChange::Unchanged);

    queue.request(job_with_cell(4.0));
    drop(queue);
    let third = pending.next().await.unwrap();
    assert_eq!(session.apply(third).unwrap(), JobChange::Regenerated);
    assert!(pending.next().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_debounce_waits_for_quiet_period() {
    let (queue, mut pending) = debounced(Duration::from_millis(150));
    let start = Instant::now();
    queue.request(1u32);
    assert_eq!(pending.next().await, Some(1));
    assert!(start.elapsed() >= Duration::from_millis(150));
    assert!(start.elapsed() < Duration::from_millis(300));
}

//! Job file to PNG output, end to end.

mod common;

use std::time::{Duration, SystemTime};

use common::{fixtures, read_output, Workspace};
use halftone::error::RenderError;
use halftone::models::{JobConfig, UploadLimits};
use halftone::services::{HalftoneSession, JobChange};
use pretty_assertions::assert_eq;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn open(job_path: &std::path::Path) -> HalftoneSession {
    let job = JobConfig::load(job_path).expect("load job");
    HalftoneSession::open(job, UploadLimits::default()).expect("open session")
}

#[test]
fn test_job_renders_to_output() {
    let ws = Workspace::new();
    ws.write_solid("in.png", 40, 40, 0);
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("in.png", "out.png", 10));

    let mut session = open(&job_path);
    let stats = session.render();
    assert_eq!(stats.visited, 16);
    assert_eq!(stats.drawn, 16);

    let written = session.write_output().unwrap();
    assert_eq!(written, ws.join("out.png"));

    let image = read_output(&written);
    assert_eq!((image.width(), image.height()), (40, 40));
    // Cell centers sit at 0, 10, 20, 30; squares have a half-side of 3.75
    assert_eq!(image.pixel(0, 0), Some(BLACK));
    assert_eq!(image.pixel(10, 30), Some(BLACK));
    assert_eq!(image.pixel(5, 5), Some(WHITE));
    assert_eq!(image.pixel(15, 25), Some(WHITE));
}

#[test]
fn test_erase_points_are_replayed() {
    let ws = Workspace::new();
    ws.write_solid("in.png", 40, 40, 0);
    let yaml = format!(
        "{}erase:\n  - {{ x: 10, y: 10, radius: 5 }}\n",
        fixtures::variable_job("in.png", "out.png", 10)
    );
    let job_path = ws.write_job("job.yaml", &yaml);

    let mut session = open(&job_path);
    session.render();
    let image = read_output(&session.write_output().unwrap());

    assert_eq!(image.pixel(10, 10), Some(WHITE));
    assert_eq!(image.pixel(30, 30), Some(BLACK));
}

#[test]
fn test_light_image_draws_nothing() {
    let ws = Workspace::new();
    ws.write_solid("in.png", 30, 30, 255);
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("in.png", "out.png", 10));

    let mut session = open(&job_path);
    let stats = session.render();
    // Zero darkness still places a zero-sized shape
    assert_eq!(stats.drawn, 9);

    let image = read_output(&session.write_output().unwrap());
    assert_eq!(common::ink_pixels(&image, WHITE), 0);
}

#[test]
fn test_gradient_ink_follows_darkness() {
    let ws = Workspace::new();
    let rgba = fixtures::horizontal_ramp(64, 16);
    ws.write_png("ramp.png", 64, 16, &rgba);
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("ramp.png", "out.png", 8));

    let mut session = open(&job_path);
    session.render();
    let image = read_output(&session.write_output().unwrap());

    let ink_in = |x0: u32, x1: u32| {
        (0..16)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| image.pixel(x, y) != Some(WHITE))
            .count()
    };
    assert!(ink_in(0, 16) > ink_in(48, 64));
}

#[test]
fn test_oversized_input_rejected() {
    let ws = Workspace::new();
    ws.write_solid("in.png", 40, 40, 0);
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("in.png", "out.png", 10));
    let job = JobConfig::load(&job_path).unwrap();

    let limits = UploadLimits {
        max_width: 32,
        max_height: 32,
        ..Default::default()
    };
    let err = HalftoneSession::open(job, limits).err().unwrap();
    assert!(matches!(
        err,
        RenderError::UnsupportedDimensions {
            width: 40,
            height: 40,
            ..
        }
    ));
}

#[test]
fn test_non_png_input_rejected() {
    let ws = Workspace::new();
    std::fs::write(ws.join("in.png"), b"definitely not a png").unwrap();
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("in.png", "out.png", 10));
    let job = JobConfig::load(&job_path).unwrap();

    let err = HalftoneSession::open(job, UploadLimits::default()).err().unwrap();
    assert!(matches!(err, RenderError::UnsupportedFormat));
}

#[test]
fn test_optimized_export_has_same_pixels() {
    let ws = Workspace::new();
    ws.write_png("ramp.png", 48, 48, &fixtures::horizontal_ramp(48, 48));
    let plain_path = ws.write_job("plain.yaml", &fixtures::variable_job("ramp.png", "a.png", 6));
    let optimized_yaml = format!(
        "{}optimize: true\n",
        fixtures::variable_job("ramp.png", "b.png", 6)
    );
    let optimized_path = ws.write_job("optimized.yaml", &optimized_yaml);

    let mut plain = open(&plain_path);
    plain.render();
    let mut optimized = open(&optimized_path);
    optimized.render();

    let a = common::assert_png(&plain.export_png().unwrap());
    let b = common::assert_png(&optimized.export_png().unwrap());
    assert_eq!(a.data(), b.data());
}

#[test]
fn test_new_input_path_reloads_image() {
    let ws = Workspace::new();
    ws.write_solid("dark.png", 20, 20, 0);
    ws.write_solid("light.png", 20, 20, 255);
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("dark.png", "out.png", 10));

    let mut session = open(&job_path);
    session.render();
    let dark = common::assert_png(&session.export_png().unwrap());
    assert!(common::ink_pixels(&dark, WHITE) > 0);

    ws.write_job("job.yaml", &fixtures::variable_job("light.png", "out.png", 10));
    let next = JobConfig::load(&job_path).unwrap();
    assert_eq!(session.apply(next).unwrap(), JobChange::Reloaded);
    let light = common::assert_png(&session.export_png().unwrap());
    assert_eq!(common::ink_pixels(&light, WHITE), 0);
}

#[test]
fn test_reload_input_picks_up_new_pixels() {
    let ws = Workspace::new();
    let input = ws.write_solid("in.png", 20, 20, 0);
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("in.png", "out.png", 10));

    let mut session = open(&job_path);
    assert_eq!(session.render().drawn, 4);
    let before = common::assert_png(&session.export_png().unwrap());
    assert!(common::ink_pixels(&before, WHITE) > 0);

    std::fs::write(
        &input,
        halftone::rendering::encode_png(20, 20, &fixtures::solid_rgba(20, 20, 255)).unwrap(),
    )
    .unwrap();
    session.reload_input().unwrap();
    let after = common::assert_png(&session.export_png().unwrap());
    assert_eq!(common::ink_pixels(&after, WHITE), 0);
}

#[test]
fn test_rewritten_input_and_new_params_apply_together() {
    let ws = Workspace::new();
    let input = ws.write_solid("in.png", 20, 20, 0);
    let job_path = ws.write_job("job.yaml", &fixtures::variable_job("in.png", "out.png", 10));

    let mut session = open(&job_path);
    session.render();

    ws.write_solid("in.png", 20, 20, 255);
    // Coarse filesystem timestamps could otherwise hide the rewrite
    std::fs::File::options()
        .write(true)
        .open(&input)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(10))
        .unwrap();
    ws.write_job("job.yaml", &fixtures::variable_job("in.png", "out.png", 5));

    let next = JobConfig::load(&job_path).unwrap();
    assert_eq!(session.apply(next).unwrap(), JobChange::Reloaded);
    assert_eq!(session.last_stats().unwrap().visited, 16);
    let image = common::assert_png(&session.export_png().unwrap());
    assert_eq!(common::ink_pixels(&image, WHITE), 0);

    let again = JobConfig::load(&job_path).unwrap();
    assert_eq!(session.apply(again).unwrap(), JobChange::Unchanged);
}

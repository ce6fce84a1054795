use easel_core::Rectangle;
use easel_render::{RecordingSurface, SurfaceCommand};
use easel_runtime::{dashed_rect_timer, AnchorTextScene, HostConfig, HostError, RenderHost};

fn default_host() -> RenderHost<RecordingSurface> {
    let config = HostConfig::default();
    let surface = RecordingSurface::new(config.canvas.width, config.canvas.height).discarding_history();
    let mut host = RenderHost::new(surface).with_scene(config.scene().unwrap());
    let rect = config.dashed_rect().unwrap().unwrap();
    host.register_timer(dashed_rect_timer(rect), config.dashed_rect.interval)
        .unwrap();
    host
}

#[test]
fn test_ten_seconds_fire_about_303_times() {
    let mut host = default_host();
    let stats = host.run_simulated(10.0, 1.0 / 60.0).unwrap();

    assert_eq!(stats.skipped_frames, 0);
    assert!((302..=304).contains(&stats.timer_fires), "fired {}", stats.timer_fires);
}

#[test]
fn test_final_frame_holds_scene_and_dashed_rect() {
    let mut host = default_host();
    host.run_simulated(1.0, 1.0 / 60.0).unwrap();

    // Top up the clock so the dashed rect lands in the newest frame.
    let report = host.tick(0.034).unwrap();
    assert!(report.timers_fired >= 1);

    let frame = host.surface().current_frame();
    let labels = frame
        .iter()
        .filter(|command| matches!(command, SurfaceCommand::FillText { .. }))
        .count();
    let dashed = frame
        .iter()
        .filter(|command| matches!(command, SurfaceCommand::StrokePath { line_dash, .. } if !line_dash.is_empty()))
        .count();

    assert_eq!(labels, 9);
    assert!(dashed >= 1);
    assert_eq!(host.surface().commands().len(), frame.len());
    assert_eq!(host.surface().state_depth(), 0);
}

#[test]
fn test_dash_offset_is_owned_by_the_host() {
    let mut host = default_host();
    host.run_simulated(1.0, 1.0 / 60.0).unwrap();
    let fires = host.stats().timer_fires;
    assert_eq!(host.frame().state.dash_offset(), fires as f32);
}

#[test]
fn test_detached_host_never_draws() {
    let mut host = RenderHost::new(RecordingSurface::uninitialized(800.0, 600.0)).with_scene(AnchorTextScene::new());
    host.register_timer(dashed_rect_timer(Rectangle::new(10.0, 10.0, 100.0, 100.0).unwrap()), 0.033)
        .unwrap();

    assert!(matches!(host.run_simulated(1.0, 0.1), Err(HostError::SurfaceNotReady)));
    assert!(host.surface().commands().is_empty());
}

#[test]
fn test_config_file_round_trip_through_the_host() {
    let config = HostConfig::from_toml_str(
        r#"
        [canvas]
        width = 300.0
        height = 200.0

        [dashed_rect]
        enabled = false
        "#,
    )
    .unwrap();

    let surface = RecordingSurface::new(config.canvas.width, config.canvas.height);
    let mut host = RenderHost::new(surface).with_scene(config.scene().unwrap());
    assert!(config.dashed_rect().unwrap().is_none());

    let report = host.tick(config.frame_step()).unwrap();
    assert!(report.rendered);
    assert_eq!(report.timers_fired, 0);
}

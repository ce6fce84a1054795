// crates/easel-runtime/src/host.rs
use easel_render::{DrawingSurface, RenderResult, TextMetricsProbe};

use crate::{FrameContext, HostError, HostResult, Scene, TimerId, TimerRegistry, TimerTick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// No usable rendering context; nothing is drawn and timers do not run.
    Detached,
    Attached,
}

/// Outcome of a single scheduler step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub rendered: bool,
    pub timers_fired: usize,
}

/// Running totals since the host was created.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostStats {
    pub ticks: u64,
    pub frames: u64,
    pub skipped_frames: u64,
    pub timer_fires: u64,
    pub elapsed: f64,
}

/// Owns a drawing surface and drives a scene plus interval timers over it.
pub struct RenderHost<S: DrawingSurface> {
    frame: FrameContext<S>,
    timers: TimerRegistry<FrameContext<S>>,
    scene: Option<Box<dyn Scene<S>>>,
    state: HostState,
    stats: HostStats,
}

impl<S: DrawingSurface> RenderHost<S> {
    /// The host is attached for its whole lifetime if `surface` is ready now,
    /// and detached otherwise.
    pub fn new(surface: S) -> Self {
        let state = if surface.is_ready() {
            HostState::Attached
        } else {
            tracing::warn!("drawing surface has no rendering context; host is detached");
            HostState::Detached
        };

        Self {
            frame: FrameContext::new(surface),
            timers: TimerRegistry::new(),
            scene: None,
            state,
            stats: HostStats::default(),
        }
    }

    pub fn with_probe(mut self, probe: TextMetricsProbe) -> Self {
        self.frame.probe = probe;
        self
    }

    pub fn with_scene(mut self, scene: impl Scene<S> + 'static) -> Self {
        self.set_scene(scene);
        self
    }

    pub fn set_scene(&mut self, scene: impl Scene<S> + 'static) {
        tracing::debug!("scene set to '{}'", scene.name());
        self.scene = Some(Box::new(scene));
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn frame(&self) -> &FrameContext<S> {
        &self.frame
    }

    pub fn surface(&self) -> &S {
        &self.frame.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.frame.surface
    }

    pub fn into_surface(self) -> S {
        self.frame.surface
    }

    /// Registers a repeating timer. Timers can be registered while detached
    /// but only run once the host ticks attached.
    pub fn register_timer<F>(&mut self, callback: F, interval_seconds: f32) -> HostResult<TimerId>
    where
        F: FnMut(&TimerTick, &mut FrameContext<S>) -> RenderResult<()> + 'static,
    {
        self.timers.register(callback, interval_seconds, false)
    }

    /// Registers a timer that fires once and then removes itself.
    pub fn register_timer_once<F>(&mut self, callback: F, interval_seconds: f32) -> HostResult<TimerId>
    where
        F: FnMut(&TimerTick, &mut FrameContext<S>) -> RenderResult<()> + 'static,
    {
        self.timers.register(callback, interval_seconds, true)
    }

    pub fn remove_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(id)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    fn ensure_attached(&self) -> HostResult<()> {
        match self.state {
            HostState::Attached => Ok(()),
            HostState::Detached => Err(HostError::SurfaceNotReady),
        }
    }

    /// Clears the surface and draws the current scene.
    pub fn render(&mut self) -> HostResult<()> {
        self.ensure_attached()?;

        self.frame.state.begin_frame();
        self.frame.surface.clear();
        if let Some(scene) = self.scene.as_mut() {
            scene.draw(&mut self.frame)?;
        }
        Ok(())
    }

    /// One scheduler step: render a frame, then advance timers by `dt_seconds`.
    ///
    /// A frame that fails to render is logged and counted as skipped; it does
    /// not fail the tick.
    pub fn tick(&mut self, dt_seconds: f32) -> HostResult<TickReport> {
        self.ensure_attached()?;
        if !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return Err(HostError::InvalidInterval(dt_seconds));
        }

        self.stats.ticks += 1;
        let rendered = match self.render() {
            Ok(()) => {
                self.stats.frames += 1;
                true
            }
            Err(err) => {
                self.stats.skipped_frames += 1;
                tracing::warn!("skipping frame {}: {}", self.frame.state.frame_number(), err);
                false
            }
        };

        self.frame.elapsed += f64::from(dt_seconds);
        self.stats.elapsed = self.frame.elapsed;
        let timers_fired = self.timers.advance(dt_seconds, &mut self.frame);
        self.stats.timer_fires += timers_fired as u64;

        tracing::trace!(rendered, timers_fired, "tick");
        Ok(TickReport {
            rendered,
            timers_fired,
        })
    }

    /// Ticks with a fixed `step` until `seconds` of simulated time have passed.
    pub fn run_simulated(&mut self, seconds: f32, step: f32) -> HostResult<HostStats> {
        if !step.is_finite() || step <= 0.0 {
            return Err(HostError::InvalidInterval(step));
        }
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(HostError::InvalidInterval(seconds));
        }

        let steps = (f64::from(seconds) / f64::from(step)).round() as u64;
        tracing::debug!("simulating {} ticks of {}s", steps, step);
        for _ in 0..steps {
            self.tick(step)?;
        }
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dashed_rect_timer, scene_fn, AnchorTextScene};
    use easel_core::Rectangle;
    use easel_render::{RecordingSurface, RenderError, SurfaceCommand};

    fn host() -> RenderHost<RecordingSurface> {
        RenderHost::new(RecordingSurface::new(200.0, 200.0))
    }

    #[test]
    fn test_state_is_fixed_at_construction() {
        assert_eq!(host().state(), HostState::Attached);
        let detached = RenderHost::new(RecordingSurface::uninitialized(200.0, 200.0));
        assert_eq!(detached.state(), HostState::Detached);
    }

    #[test]
    fn test_detached_host_refuses_to_draw() {
        let mut detached = RenderHost::new(RecordingSurface::uninitialized(200.0, 200.0));
        detached
            .register_timer(|_, _: &mut FrameContext<RecordingSurface>| Ok(()), 0.1)
            .unwrap();

        assert!(matches!(detached.render(), Err(HostError::SurfaceNotReady)));
        assert!(matches!(detached.tick(0.5), Err(HostError::SurfaceNotReady)));
        assert_eq!(detached.stats().timer_fires, 0);
        assert_eq!(detached.timer_count(), 1);
    }

    #[test]
    fn test_ten_seconds_of_dashed_rect_timer() {
        let mut host = host();
        let rect = Rectangle::new(10.0, 10.0, 100.0, 100.0).unwrap();
        host.register_timer(dashed_rect_timer(rect), 0.033).unwrap();

        let stats = host.run_simulated(10.0, 1.0 / 60.0).unwrap();
        assert_eq!(stats.ticks, 600);
        assert_eq!(stats.frames, 600);
        assert!((302..=304).contains(&stats.timer_fires), "fired {}", stats.timer_fires);
        assert_eq!(host.frame().state.dash_offset(), stats.timer_fires as f32);
    }

    #[test]
    fn test_timer_drawing_lands_after_the_scene() {
        let mut host = host().with_scene(AnchorTextScene::new());
        let rect = Rectangle::new(10.0, 10.0, 100.0, 100.0).unwrap();
        host.register_timer(dashed_rect_timer(rect), 0.01).unwrap();
        host.tick(0.01).unwrap();

        let frame = host.surface().current_frame();
        assert!(matches!(frame.first(), Some(SurfaceCommand::Clear { .. })));
        assert!(matches!(
            frame.last(),
            Some(SurfaceCommand::StrokePath { line_dash, .. }) if line_dash == &vec![10.0, 5.0]
        ));
    }

    #[test]
    fn test_failing_scene_skips_the_frame() {
        let mut host = host().with_scene(scene_fn("broken", |_: &mut FrameContext<RecordingSurface>| {
            Err(RenderError::RenderFailed("boom".to_string()))
        }));
        host.register_timer(|_, _: &mut FrameContext<RecordingSurface>| Ok(()), 0.1)
            .unwrap();

        let report = host.tick(0.1).unwrap();
        assert!(!report.rendered);
        assert_eq!(report.timers_fired, 1);
        assert_eq!(host.stats().skipped_frames, 1);
        assert_eq!(host.stats().frames, 0);
    }

    #[test]
    fn test_once_timer_and_removal_through_the_host() {
        let mut host = host();
        let once = host
            .register_timer_once(|_, _: &mut FrameContext<RecordingSurface>| Ok(()), 0.05)
            .unwrap();
        let repeating = host
            .register_timer(|_, _: &mut FrameContext<RecordingSurface>| Ok(()), 0.05)
            .unwrap();

        assert_eq!(host.tick(0.05).unwrap().timers_fired, 2);
        assert_eq!(host.timer_count(), 1);
        assert!(!host.remove_timer(once));
        assert!(host.remove_timer(repeating));
        assert_eq!(host.tick(0.05).unwrap().timers_fired, 0);
    }

    #[test]
    fn test_invalid_steps_are_rejected() {
        let mut host = host();
        assert!(matches!(host.tick(-1.0), Err(HostError::InvalidInterval(_))));
        assert!(matches!(host.run_simulated(1.0, 0.0), Err(HostError::InvalidInterval(_))));
        assert!(matches!(
            host.register_timer(|_, _: &mut FrameContext<RecordingSurface>| Ok(()), 0.0),
            Err(HostError::InvalidInterval(_))
        ));
    }
}

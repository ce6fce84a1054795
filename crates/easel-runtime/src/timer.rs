// crates/easel-runtime/src/timer.rs
use easel_render::RenderResult;

use crate::{HostError, HostResult};

/// Handle to a registered timer. Ids of removed timers may be handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) usize);

impl TimerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Passed to a timer callback each time it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerTick {
    pub id: TimerId,
    pub interval: f32,
    /// How many times this timer has fired, including this call.
    pub count: u64,
    /// Seconds the registry has been advanced by, up to the end of this step.
    pub elapsed: f64,
}

pub type TimerCallback<C> = Box<dyn FnMut(&TimerTick, &mut C) -> RenderResult<()>>;

struct Timer<C> {
    callback: TimerCallback<C>,
    interval: f64,
    elapsed: f64,
    once: bool,
    count: u64,
}

/// Interval timers over a callback context `C`.
///
/// Each timer accumulates the time it is advanced by and fires once for
/// every whole interval contained in it, keeping the remainder for the next
/// advance.
pub struct TimerRegistry<C> {
    slots: Vec<Option<Timer<C>>>,
    clock: f64,
}

impl<C> Default for TimerRegistry<C> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            clock: 0.0,
        }
    }
}

impl<C> TimerRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, callback: F, interval_seconds: f32, once: bool) -> HostResult<TimerId>
    where
        F: FnMut(&TimerTick, &mut C) -> RenderResult<()> + 'static,
    {
        if !interval_seconds.is_finite() || interval_seconds <= 0.0 {
            return Err(HostError::InvalidInterval(interval_seconds));
        }

        let timer = Timer {
            callback: Box::new(callback),
            interval: f64::from(interval_seconds),
            elapsed: 0.0,
            once,
            count: 0,
        };

        let index = match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(timer);
                free
            }
            None => {
                self.slots.push(Some(timer));
                self.slots.len() - 1
            }
        };
        tracing::debug!("registered timer {} every {}s (once: {})", index, interval_seconds, once);
        Ok(TimerId(index))
    }

    pub fn remove(&mut self, id: TimerId) -> bool {
        let removed = self.slots.get_mut(id.0).and_then(Option::take).is_some();
        if removed {
            tracing::debug!("removed timer {}", id.0);
        }
        removed
    }

    pub fn contains(&self, id: TimerId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total seconds passed to [`advance`](Self::advance) so far.
    pub fn elapsed(&self) -> f64 {
        self.clock
    }

    /// Advances every timer by `dt_seconds` and runs the due callbacks.
    /// Returns how many callbacks ran. A failing callback is logged and its
    /// timer stays registered.
    pub fn advance(&mut self, dt_seconds: f32, context: &mut C) -> usize {
        let dt = f64::from(dt_seconds.max(0.0));
        self.clock += dt;
        let clock = self.clock;
        let mut fired = 0;

        for index in 0..self.slots.len() {
            let Some(timer) = self.slots[index].as_mut() else {
                continue;
            };

            let mut expired = false;
            timer.elapsed += dt;
            while timer.elapsed >= timer.interval {
                timer.elapsed -= timer.interval;
                timer.count += 1;
                fired += 1;

                let tick = TimerTick {
                    id: TimerId(index),
                    interval: timer.interval as f32,
                    count: timer.count,
                    elapsed: clock,
                };
                if let Err(err) = (timer.callback)(&tick, context) {
                    tracing::warn!("timer {} callback failed: {}", index, err);
                }
                if timer.once {
                    expired = true;
                    break;
                }
            }

            if expired {
                self.slots[index] = None;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_render::RenderError;

    #[test]
    fn test_carry_over_fire_count() {
        let mut timers = TimerRegistry::<u32>::new();
        timers
            .register(|_, fires: &mut u32| {
                *fires += 1;
                Ok(())
            }, 0.033, false)
            .unwrap();

        let mut fires = 0;
        for _ in 0..600 {
            timers.advance(1.0 / 60.0, &mut fires);
        }
        assert!((302..=304).contains(&fires), "fired {} times", fires);
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut timers = TimerRegistry::<u32>::new();
        timers
            .register(|_, fires: &mut u32| {
                *fires += 1;
                Ok(())
            }, 0.25, false)
            .unwrap();

        let mut fires = 0;
        assert_eq!(timers.advance(1.0, &mut fires), 4);
        assert_eq!(fires, 4);
    }

    #[test]
    fn test_tick_reports_registry_clock() {
        let mut timers = TimerRegistry::<Vec<(u64, f64)>>::new();
        timers
            .register(|tick, log: &mut Vec<(u64, f64)>| {
                log.push((tick.count, tick.elapsed));
                Ok(())
            }, 0.5, false)
            .unwrap();

        let mut log = Vec::new();
        timers.advance(0.25, &mut log);
        timers.advance(0.5, &mut log);
        timers.advance(1.0, &mut log);
        assert_eq!(log, vec![(1, 0.75), (2, 1.75), (3, 1.75)]);
        assert_eq!(timers.elapsed(), 1.75);
    }

    #[test]
    fn test_once_timer_fires_once_and_frees_its_slot() {
        let mut timers = TimerRegistry::<Vec<u64>>::new();
        let id = timers
            .register(|tick, log: &mut Vec<u64>| {
                log.push(tick.count);
                Ok(())
            }, 0.1, true)
            .unwrap();

        let mut log = Vec::new();
        timers.advance(1.0, &mut log);
        timers.advance(1.0, &mut log);
        assert_eq!(log, vec![1]);
        assert!(!timers.contains(id));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_removed_timer_stops_and_slot_is_reused() {
        let mut timers = TimerRegistry::<u32>::new();
        let first = timers.register(|_, _: &mut u32| Ok(()), 0.1, false).unwrap();
        let second = timers.register(|_, _: &mut u32| Ok(()), 0.1, false).unwrap();
        assert_ne!(first, second);

        assert!(timers.remove(first));
        assert!(!timers.remove(first));
        assert_eq!(timers.len(), 1);

        let mut fires = 0;
        assert_eq!(timers.advance(0.1, &mut fires), 1);

        let third = timers.register(|_, _: &mut u32| Ok(()), 0.5, false).unwrap();
        assert_eq!(third, first);
        assert_eq!(timers.len(), 2);
    }

    #[test]
    fn test_failing_callback_keeps_running() {
        let mut timers = TimerRegistry::<u32>::new();
        let id = timers
            .register(|_, calls: &mut u32| {
                *calls += 1;
                Err(RenderError::NoRenderingContext)
            }, 0.5, false)
            .unwrap();

        let mut calls = 0;
        timers.advance(0.5, &mut calls);
        timers.advance(0.5, &mut calls);
        assert_eq!(calls, 2);
        assert!(timers.contains(id));
    }

    #[test]
    fn test_invalid_intervals_are_rejected() {
        let mut timers = TimerRegistry::<()>::new();
        for interval in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = timers.register(|_, _: &mut ()| Ok(()), interval, false);
            assert!(matches!(result, Err(HostError::InvalidInterval(_))));
        }
        assert!(timers.is_empty());
    }
}

//! The gauge: value state, rendering updates and animated transitions.

use crate::animation::{sanitize_duration, Tween};
use crate::error::Result;
use crate::geometry::{arc_path, large_arc_flag};
use crate::options::{GaugeConfig, GaugeOptions, ResolveWarning, Resolved};
use crate::render::{self, color_style, RenderHandles};
use crate::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
use crate::surface::{Surface, SvgDocument};
use crate::value::{dial_span, is_degenerate, normalize, safe_percentage, sweep_angle};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

struct Inner<S: Surface> {
    surface: S,
    handles: RenderHandles<S::Node>,
    /// Resolved options; `value`, `min` and `max` are live.
    options: GaugeOptions,
    warnings: Vec<ResolveWarning>,
    /// Bumped whenever a running animation must stop writing.
    generation: u64,
    pending: Option<FrameHandle>,
}

impl<S: Surface> Inner<S> {
    /// Write path and label for `value` against the live range.
    fn render(&mut self, value: f64) -> Result<()> {
        let GaugeOptions {
            dial_start_angle: start,
            dial_end_angle: end,
            dial_radius,
            min,
            max,
            ..
        } = self.options;

        let angle = sweep_angle(safe_percentage(value, min, max), dial_span(start, end));
        let flag = large_arc_flag(angle);

        if self.options.show_value {
            let text = self.options.label.render(value, min, max);
            self.surface.set_text(&self.handles.value_text, &text)?;
        }
        self.surface.set_attribute(
            &self.handles.value_path,
            "d",
            &arc_path(dial_radius, start, start + angle, Some(flag)),
        )
    }

    fn paint_color(&mut self, duration_secs: f64) -> Result<()> {
        let Some(colorizer) = &self.options.color else {
            return Ok(());
        };
        let color = colorizer.color(self.options.value, self.options.max);
        self.surface.set_attribute(
            &self.handles.value_path,
            "style",
            &color_style(&color, duration_secs),
        )
    }

    /// Paint color and draw the stored value.
    fn redraw(&mut self) -> Result<()> {
        self.paint_color(0.0)?;
        let v = self.options.value;
        self.render(v)
    }

    /// Stop any running animation. Returns the frame to cancel, if any.
    fn supersede(&mut self) -> Option<FrameHandle> {
        self.generation += 1;
        self.pending.take()
    }
}

/// An SVG arc gauge mounted on a [`Surface`].
///
/// ```
/// use arcgauge_core::{Gauge, GaugeConfig, ManualScheduler, SvgDocument};
/// use std::rc::Rc;
///
/// let mut doc = SvgDocument::new();
/// let mount = doc.mount_point();
/// let gauge = Gauge::new(doc, &mount, GaugeConfig::new(), Rc::new(ManualScheduler::new())).unwrap();
///
/// gauge.set_value(50.0).unwrap();
/// let handles = gauge.handles();
/// assert_eq!(gauge.surface().text(handles.value_text), Some("50"));
/// ```
pub struct Gauge<S: Surface + 'static> {
    inner: Rc<RefCell<Inner<S>>>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl<S: Surface + 'static> fmt::Debug for Gauge<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Gauge")
            .field("value", &inner.options.value)
            .field("min", &inner.options.min)
            .field("max", &inner.options.max)
            .field("animating", &inner.pending.is_some())
            .finish()
    }
}

impl<S: Surface + 'static> Gauge<S> {
    /// Build a gauge under `mount` and render its initial value.
    pub fn new(
        mut surface: S,
        mount: &S::Node,
        config: GaugeConfig,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Result<Self> {
        let Resolved {
            mut options,
            warnings,
        } = config.resolve();
        let handles = render::build(&mut surface, mount, &options)?;
        options.value = normalize(options.value, options.min, options.max);
        let value = options.value;

        let gauge = Self {
            inner: Rc::new(RefCell::new(Inner {
                surface,
                handles,
                options,
                warnings,
                generation: 0,
                pending: None,
            })),
            scheduler,
        };
        gauge.set_value(value)?;
        Ok(gauge)
    }

    /// Set the value immediately, clamped to `[min, max]`.
    ///
    /// Stops any running animation.
    pub fn set_value(&self, value: f64) -> Result<()> {
        let (stale, result) = {
            let mut inner = self.inner.borrow_mut();
            let stale = inner.supersede();
            let old = inner.options.value;
            inner.options.value = normalize(value, inner.options.min, inner.options.max);
            let result = inner.redraw();
            if result.is_err() {
                inner.options.value = old;
            }
            (stale, result)
        };
        self.cancel_frame(stale);
        result
    }

    /// Change the upper bound and re-render the current value against it.
    ///
    /// The stored value is clamped into the new range and the color is
    /// repainted for it. A running animation keeps going and picks up the
    /// new bound on its next frame.
    pub fn set_max_value(&self, max: f64) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.options.max = max;
        if is_degenerate(inner.options.min, max) {
            tracing::debug!(min = inner.options.min, max, "gauge range is empty");
        }
        inner.options.value = normalize(inner.options.value, inner.options.min, max);
        if inner.pending.is_some() {
            return inner.paint_color(0.0);
        }
        inner.redraw()
    }

    /// Animate from the current value to `value` over `duration` seconds.
    ///
    /// Does nothing when the clamped target equals the current value. A
    /// zero or invalid duration means one second. Supersedes any running
    /// animation.
    pub fn set_value_animated(&self, value: f64, duration: f64) -> Result<()> {
        let duration = sanitize_duration(duration);
        let (tween, generation, stale) = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.options.value;
            let new = normalize(value, inner.options.min, inner.options.max);
            if new == old {
                return Ok(());
            }

            let stale = inner.supersede();
            inner.options.value = new;
            if let Err(err) = inner.paint_color(duration) {
                inner.options.value = old;
                drop(inner);
                self.cancel_frame(stale);
                return Err(err);
            }

            let tween = Tween::new(old, new, duration).with_easing(inner.options.easing);
            tracing::debug!(
                from = old,
                to = new,
                frames = tween.iterations(),
                "gauge animation started"
            );
            (tween, inner.generation, stale)
        };
        self.cancel_frame(stale);

        let handle = schedule(
            Rc::downgrade(&self.inner),
            self.scheduler.clone(),
            generation,
            tween,
        );
        let mut inner = self.inner.borrow_mut();
        if inner.generation == generation {
            inner.pending = Some(handle);
        }
        Ok(())
    }

    /// Set the value, animated when the options ask for it.
    pub fn update(&self, value: f64) -> Result<()> {
        let (animated, duration) = {
            let inner = self.inner.borrow();
            (inner.options.animated, inner.options.animation_duration)
        };
        if animated {
            self.set_value_animated(value, duration)
        } else {
            self.set_value(value)
        }
    }

    /// Stop a running animation where it is. Returns whether one was running.
    pub fn cancel_animation(&self) -> bool {
        let stale = self.inner.borrow_mut().supersede();
        let was_running = stale.is_some();
        if was_running {
            tracing::debug!("gauge animation cancelled");
        }
        self.cancel_frame(stale);
        was_running
    }

    /// Whether an animation has frames left to run.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    /// Current (target) value.
    #[must_use]
    pub fn get_value(&self) -> f64 {
        self.inner.borrow().options.value
    }

    /// A copy of the options, with the live value and bounds.
    #[must_use]
    pub fn get_options(&self) -> GaugeOptions {
        self.inner.borrow().options.clone()
    }

    /// Problems repaired while resolving the configuration.
    #[must_use]
    pub fn warnings(&self) -> Vec<ResolveWarning> {
        self.inner.borrow().warnings.clone()
    }

    /// The nodes the gauge writes to.
    #[must_use]
    pub fn handles(&self) -> RenderHandles<S::Node> {
        self.inner.borrow().handles.clone()
    }

    /// Borrow the surface, e.g. to inspect an [`SvgDocument`].
    ///
    /// # Panics
    ///
    /// Panics if called from inside a label or color function.
    #[must_use]
    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.inner.borrow(), |inner| &inner.surface)
    }

    fn cancel_frame(&self, handle: Option<FrameHandle>) {
        if let Some(handle) = handle {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl<S: Surface + 'static> Drop for Gauge<S> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            let stale = inner.supersede();
            drop(inner);
            self.cancel_frame(stale);
        }
    }
}

/// Queue the next frame of `tween`. Each frame re-queues itself until the
/// tween finishes, the gauge is dropped, or a newer generation takes over.
fn schedule<S: Surface + 'static>(
    inner: Weak<RefCell<Inner<S>>>,
    scheduler: Rc<dyn FrameScheduler>,
    generation: u64,
    mut tween: Tween,
) -> FrameHandle {
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move || {
        let Some(strong) = inner.upgrade() else {
            return;
        };

        {
            let mut state = strong.borrow_mut();
            if state.generation != generation {
                return;
            }
            let Some(frame) = tween.next_frame() else {
                state.pending = None;
                return;
            };
            // the range may have shrunk since the tween started
            let value = normalize(frame.value, state.options.min, state.options.max);
            if let Err(err) = state.render(value) {
                tracing::warn!(%err, "gauge frame failed, stopping animation");
                state.pending = None;
                return;
            }
            if frame.last {
                tracing::debug!(frames = frame.iteration, "gauge animation finished");
                state.pending = None;
                return;
            }
        }

        let handle = schedule(inner, next, generation, tween);
        let mut state = strong.borrow_mut();
        if state.generation == generation {
            state.pending = Some(handle);
        }
    }))
}

/// Render a gauge for `config` and serialize it as standalone SVG markup.
///
/// ```
/// use arcgauge_core::{render_svg, GaugeConfig};
///
/// let svg = render_svg(GaugeConfig::new().value(50.0)).unwrap();
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains(">50</text>"));
/// ```
pub fn render_svg(config: GaugeConfig) -> Result<String> {
    let doc = Rc::new(RefCell::new(SvgDocument::new()));
    let mount = doc.borrow_mut().mount_point();
    let _gauge = Gauge::new(doc.clone(), &mount, config, Rc::new(ManualScheduler::new()))?;

    let doc = doc.borrow();
    Ok(doc
        .children(mount)
        .first()
        .map(|root| doc.to_markup(*root))
        .unwrap_or_default())
}

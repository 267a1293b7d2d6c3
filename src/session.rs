//! The dispatch core: one struct owning the renderer, the canvas and the
//! single live text surface, consuming one [`InputEvent`] at a time.
//!
//! Key reports go to stdout; render and blit failures during the loop are
//! reported and survived. Failures during the initial render are propagated
//! by the caller as fatal.

use tracing::error;

use crate::error::Result;
use crate::event::InputEvent;
use crate::geom::Rect;
use crate::render::{Canvas, TextRender, TextSurface};
use crate::report;

/// Whether the loop keeps running after a dispatch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<R: TextRender, C: Canvas> {
    renderer: R,
    canvas: C,
    shown: Option<R::Surface>,
}

impl<R: TextRender, C: Canvas> Session<R, C> {
    pub fn new(renderer: R, canvas: C) -> Self {
        Self {
            renderer,
            canvas,
            shown: None,
        }
    }

    /// Renders `text` centered on a cleared canvas and installs it as the
    /// current surface. The previous surface is released before the new one
    /// is blitted; on failure nothing stays installed.
    pub fn show_message(&mut self, text: &str) -> Result<()> {
        self.canvas.clear();
        let surface = self.renderer.render(text)?;
        self.shown = None;
        let origin = Rect::centered_in(self.canvas.size(), surface.view().size).origin;
        self.canvas.blit(surface.view(), origin)?;
        self.canvas.present()?;
        self.shown = Some(surface);
        Ok(())
    }

    /// Re-blits the current surface, e.g. after an expose or a resize.
    pub fn redraw(&mut self) -> Result<()> {
        self.canvas.clear();
        if let Some(surface) = &self.shown {
            let origin = Rect::centered_in(self.canvas.size(), surface.view().size).origin;
            self.canvas.blit(surface.view(), origin)?;
        }
        self.canvas.present()
    }

    pub fn resize(&mut self, size: crate::geom::Size) -> Result<()> {
        self.canvas.resize(size)?;
        self.redraw()
    }

    /// One dispatch step. Every arm finishes its own handling; nothing falls
    /// through to another arm.
    pub fn handle(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => Flow::Quit,
            InputEvent::KeyPress(key) => {
                println!("{}", report::describe_key(&key, true));
                Flow::Continue
            }
            InputEvent::KeyRelease(key) => {
                // A blank line closes each press/release pair.
                println!("{}\n", report::describe_key(&key, false));
                Flow::Continue
            }
            InputEvent::TextInput(text) => {
                println!("Printing character {text}");
                if let Err(err) = self.show_message(&text) {
                    error!("couldn't display {text:?}: {err}");
                }
                Flow::Continue
            }
            InputEvent::Exposed => {
                if let Err(err) = self.redraw() {
                    error!("couldn't redraw the window: {err}");
                }
                Flow::Continue
            }
            InputEvent::Other => Flow::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::error::Error;
    use crate::event::{InputEvent, KeySnapshot, ModState};
    use crate::geom::{Point, Size};
    use crate::render::{IndexedSurface, SurfaceView};

    /// A text surface that reports its own death.
    struct TrackedSurface {
        inner: IndexedSurface,
        live: Arc<AtomicIsize>,
    }

    impl TextSurface for TrackedSurface {
        fn view(&self) -> SurfaceView<'_> {
            self.inner.view()
        }
    }

    impl Drop for TrackedSurface {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Instrumented font service: counts allocations, optionally fails.
    struct CountingRender {
        live: Arc<AtomicIsize>,
        created: usize,
        fail: bool,
    }

    impl CountingRender {
        fn new(live: Arc<AtomicIsize>) -> Self {
            Self {
                live,
                created: 0,
                fail: false,
            }
        }
    }

    impl TextRender for CountingRender {
        type Surface = TrackedSurface;

        fn render(&mut self, text: &str) -> Result<TrackedSurface> {
            if self.fail {
                return Err(Error::Render(format!("synthetic failure for {text:?}")));
            }
            self.created += 1;
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(TrackedSurface {
                inner: IndexedSurface::new(Size::new(2, 1), vec![0, 4]),
                live: self.live.clone(),
            })
        }
    }

    /// Instrumented display service: counts calls, optionally fails blits.
    #[derive(Default)]
    struct CountingCanvas {
        clears: Arc<AtomicUsize>,
        blits: Arc<AtomicUsize>,
        presents: Arc<AtomicUsize>,
        fail_blit: bool,
    }

    impl Canvas for CountingCanvas {
        fn size(&self) -> Size {
            Size::new(400, 300)
        }

        fn clear(&mut self) {
            self.clears.fetch_add(1, Ordering::SeqCst);
        }

        fn blit(&mut self, _view: SurfaceView<'_>, _origin: Point) -> Result<()> {
            if self.fail_blit {
                return Err(Error::Blit("synthetic blit failure".into()));
            }
            self.blits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn present(&mut self) -> Result<()> {
            self.presents.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn resize(&mut self, _size: Size) -> Result<()> {
            Ok(())
        }
    }

    fn session(
        live: &Arc<AtomicIsize>,
    ) -> Session<CountingRender, CountingCanvas> {
        Session::new(CountingRender::new(live.clone()), CountingCanvas::default())
    }

    fn key() -> KeySnapshot {
        KeySnapshot {
            scancode: Some(30),
            physical: "KeyA".into(),
            keycode: 'a' as u32,
            name: "a".into(),
            text: Some("a".into()),
            identified: true,
            mods: ModState::empty(),
        }
    }

    #[test]
    fn test_quit_is_terminal() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        assert_eq!(session.handle(InputEvent::Quit), Flow::Quit);
    }

    #[test]
    fn test_text_input_keeps_exactly_one_surface_live() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        session.show_message("ϻ").unwrap();
        assert_eq!(live.load(Ordering::SeqCst), 1);

        for text in ["a", "b", "ç", "語", "🦀"] {
            let flow = session.handle(InputEvent::TextInput(text.into()));
            assert_eq!(flow, Flow::Continue);
            assert_eq!(live.load(Ordering::SeqCst), 1);
        }
        assert_eq!(session.renderer.created, 6);

        drop(session);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clean_quit_after_startup_releases_everything() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        session.show_message("ϻ").unwrap();
        assert_eq!(session.handle(InputEvent::Quit), Flow::Quit);
        assert_eq!(session.renderer.created, 1);
        drop(session);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_render_failure_is_non_fatal_mid_loop() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        session.show_message("ϻ").unwrap();
        session.renderer.fail = true;
        let flow = session.handle(InputEvent::TextInput("x".into()));
        assert_eq!(flow, Flow::Continue);
        // The failed render allocated nothing and the loop carries on.
        assert_eq!(session.renderer.created, 1);
        drop(session);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blit_failure_is_non_fatal_and_leaks_nothing() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        session.show_message("ϻ").unwrap();
        session.canvas.fail_blit = true;
        let flow = session.handle(InputEvent::TextInput("x".into()));
        assert_eq!(flow, Flow::Continue);
        // Old surface was released, the new one died with the failed blit.
        assert_eq!(live.load(Ordering::SeqCst), 0);
        assert_eq!(session.renderer.created, 2);
    }

    #[test]
    fn test_key_events_do_not_touch_the_canvas() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        let presents = session.canvas.presents.clone();
        assert_eq!(session.handle(InputEvent::KeyPress(key())), Flow::Continue);
        assert_eq!(session.handle(InputEvent::KeyRelease(key())), Flow::Continue);
        assert_eq!(session.handle(InputEvent::Other), Flow::Continue);
        assert_eq!(presents.load(Ordering::SeqCst), 0);
        assert_eq!(session.renderer.created, 0);
    }

    #[test]
    fn test_expose_reblits_current_surface() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        session.show_message("ϻ").unwrap();
        let blits = session.canvas.blits.clone();
        let before = blits.load(Ordering::SeqCst);
        assert_eq!(session.handle(InputEvent::Exposed), Flow::Continue);
        assert_eq!(blits.load(Ordering::SeqCst), before + 1);
        assert_eq!(live.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_startup_failure_installs_nothing() {
        let live = Arc::new(AtomicIsize::new(0));
        let mut session = session(&live);
        session.renderer.fail = true;
        assert!(session.show_message("ϻ").is_err());
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }
}

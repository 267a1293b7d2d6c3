//! winit glue: window creation, IME enablement, and translation of window
//! events into the dispatch loop's [`InputEvent`]s.

use std::sync::Arc;

use tracing::{info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Ime, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::{Config, WINDOW_TITLE};
use crate::error::Result;
use crate::event::{InputEvent, KeySnapshot, ModState};
use crate::geom::Size;
use crate::render::{FontFace, Palette, SoftCanvas, TextRasterizer};
use crate::session::{Flow, Session};

/// Runs the diagnostic to completion. The font is opened before the event
/// loop exists, so a missing or broken font fails without ever dispatching
/// an event.
pub fn run(config: Config) -> Result<()> {
    let font_path = config.resolve_font()?;
    let face = FontFace::load(&font_path, config.point_size, config.style)?;
    info!(
        "loaded {}px font from {}",
        config.point_size,
        font_path.display()
    );
    let renderer = TextRasterizer::new(face);
    let palette = Palette::ramp(config.foreground, config.background);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = TeclaApp {
        config,
        boot: Some((renderer, palette)),
        session: None,
        mods: ModState::empty(),
        preedit_active: false,
        failure: None,
    };
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct TeclaApp {
    config: Config,
    /// Renderer and palette built before the loop, consumed on first resume.
    boot: Option<(TextRasterizer, Palette)>,
    session: Option<Session<TextRasterizer, SoftCanvas>>,
    mods: ModState,
    preedit_active: bool,
    /// A fatal error carried out of the loop for `run` to return.
    failure: Option<crate::error::Error>,
}

impl TeclaApp {
    fn open_window(
        &self,
        event_loop: &ActiveEventLoop,
        renderer: TextRasterizer,
        palette: Palette,
    ) -> Result<Session<TextRasterizer, SoftCanvas>> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                self.config.window_size.width as f64,
                self.config.window_size.height as f64,
            ))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);
        window.set_ime_allowed(true);
        println!("Enabled Unicode text input");

        let physical = window.inner_size();
        let size = Size::new(physical.width.max(1), physical.height.max(1));
        let canvas = SoftCanvas::new(window, palette, size)?;

        let mut session = Session::new(renderer, canvas);
        session.show_message(&self.config.message)?;
        Ok(session)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: crate::error::Error) {
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for TeclaApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        let Some((renderer, palette)) = self.boot.take() else {
            return;
        };
        match self.open_window(event_loop, renderer, palette) {
            Ok(session) => self.session = Some(session),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                if session.handle(InputEvent::Quit) == Flow::Quit {
                    event_loop.exit();
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.mods = ModState::from_winit(&modifiers) | (self.mods & ModState::LOCKS);
            }
            WindowEvent::KeyboardInput { event: key, .. } => {
                let pressed = key.state == ElementState::Pressed;
                if pressed {
                    self.mods.toggle_lock(&key.logical_key);
                }
                let snapshot = KeySnapshot::new(
                    &key.physical_key,
                    &key.logical_key,
                    key.text.as_deref(),
                    self.mods,
                );
                let input = if pressed {
                    InputEvent::KeyPress(snapshot)
                } else {
                    InputEvent::KeyRelease(snapshot)
                };
                if session.handle(input) == Flow::Quit {
                    event_loop.exit();
                    return;
                }
                // Composed text rides on the press unless an IME preedit is
                // in flight; control translations (Enter, Escape) are raw key
                // events, not text input.
                if pressed && !self.preedit_active {
                    if let Some(text) = key
                        .text
                        .as_deref()
                        .filter(|t| t.chars().any(|ch| ch as u32 >= 0x20))
                    {
                        session.handle(InputEvent::TextInput(text.to_string()));
                    }
                }
            }
            WindowEvent::Ime(ime) => match ime {
                Ime::Preedit(preedit, _) => self.preedit_active = !preedit.is_empty(),
                Ime::Commit(text) => {
                    self.preedit_active = false;
                    session.handle(InputEvent::TextInput(text));
                }
                Ime::Enabled | Ime::Disabled => {}
            },
            WindowEvent::RedrawRequested => {
                session.handle(InputEvent::Exposed);
            }
            WindowEvent::Resized(physical) => {
                let size = Size::new(physical.width.max(1), physical.height.max(1));
                if let Err(err) = session.resize(size) {
                    warn!("couldn't resize the canvas: {err}");
                }
            }
            _ => {}
        }
    }
}

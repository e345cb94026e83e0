use std::time::Instant;

use ratatui::layout::Rect;

use crate::command::{ActionId, CommandOutcome, dispatch};
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::ui::{draw_app, split_layout};

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::terminal_session::{TerminalSession, TerminalSurface};

pub(crate) enum LoopControl {
    Continue { redraw: bool, clear: bool },
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        let (mut loop_event_rx, mut loop_event_runtime) =
            EventBusRuntime::spawn(self.config.sync.frame_interval());

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.render_frame(&mut session, Instant::now())?;
                needs_redraw = false;
            }

            let Some(event) = loop_event_rx.recv().await else {
                break;
            };
            match self.handle_domain_event(event, Instant::now()) {
                LoopControl::Continue { redraw, clear } => {
                    if clear {
                        session.clear()?;
                    }
                    needs_redraw |= redraw;
                }
                LoopControl::Break => break,
            }
        }

        loop_event_runtime.shutdown();
        self.shutdown();
        session.restore()?;
        Ok(())
    }

    pub(crate) fn handle_domain_event(&mut self, event: DomainEvent, now: Instant) -> LoopControl {
        match event {
            DomainEvent::Input(event) => {
                let outcome = self.handle_input_event(event);
                let mut redraw = outcome.redraw;
                let clear = outcome.resized.is_some();
                if let Some((width, height)) = outcome.resized {
                    self.fit_viewport(Rect::new(0, 0, width, height));
                }
                if let Some(command) = outcome.command {
                    tracing::debug!(action = command.action_id().as_str(), "command");
                    match dispatch(self, command, now) {
                        CommandOutcome::QuitRequested => return LoopControl::Break,
                        CommandOutcome::Applied | CommandOutcome::Noop => redraw = true,
                    }
                }
                LoopControl::Continue { redraw, clear }
            }
            DomainEvent::InputError(message) => {
                tracing::warn!(error = %message, "terminal input error");
                self.state
                    .report(ActionId::Input, format!("input error: {message}"));
                LoopControl::Continue {
                    redraw: true,
                    clear: false,
                }
            }
            DomainEvent::FrameTick => LoopControl::Continue {
                redraw: self.on_frame(now),
                clear: false,
            },
        }
    }

    pub(crate) fn render_frame(
        &mut self,
        session: &mut impl TerminalSurface,
        now: Instant,
    ) -> AppResult<()> {
        let size = session.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let layout = self.fit_viewport(area);
        let app: &App = self;
        session.draw(|frame| draw_app(frame, layout, app, now))?;
        Ok(())
    }

    fn fit_viewport(&mut self, area: Rect) -> crate::ui::UiLayout {
        let layout = split_layout(area, self.state.debug_status_visible);
        self.set_viewport_height(u32::from(layout.viewer.height));
        layout
    }
}

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::tui::{App, AppId, Command, Subscription, Theme};

/// Type-erased runtime operations, so the driver can hold whichever app is
/// active behind one trait object.
pub trait AppRuntime {
    fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool>;
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
    fn poll_async(&mut self) -> Pin<Box<dyn Future<Output = Result<bool>> + '_>>;
    fn take_navigation(&mut self) -> Option<(AppId, Box<dyn Any + Send>)>;
    fn title(&self) -> &'static str;
    fn status(&self, theme: &Theme) -> Option<Line<'static>>;
    fn key_bindings(&self) -> Vec<(KeyCode, String)>;
}

/// Runs one app: routes events, executes commands, drives pending futures.
pub struct Runtime<A: App> {
    state: A::State,

    /// Pending navigation request for the driver to pick up
    navigation_target: Option<(AppId, Box<dyn Any + Send>)>,

    /// Pending async commands
    pending_async: Vec<Pin<Box<dyn Future<Output = A::Msg> + Send>>>,
}

impl<A: App> Runtime<A> {
    pub fn new() -> Self {
        Self::with_params(A::InitParams::default())
    }

    pub fn with_params(params: A::InitParams) -> Self {
        let (state, init_command) = A::init(params);

        let mut runtime = Self {
            state,
            navigation_target: None,
            pending_async: Vec::new(),
        };

        runtime.execute_command(init_command).ok();
        runtime
    }

    /// Rebuild this runtime from the boxed params of a Navigate command.
    /// A type mismatch falls back to defaults instead of crashing the UI.
    pub fn from_any_params(params: Box<dyn Any + Send>) -> Self {
        match params.downcast::<A::InitParams>() {
            Ok(typed) => Self::with_params(*typed),
            Err(_) => {
                log::warn!("Navigation params had unexpected type, using defaults");
                Self::new()
            }
        }
    }

    /// Handle a keyboard event. Subscriptions are rebuilt from current
    /// state on every press; catch-all handlers (focused-field routing)
    /// run before the plain key map.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        let subscriptions = A::subscriptions(&self.state);

        let mut chosen: Option<A::Msg> = None;
        for sub in &subscriptions {
            if let Subscription::AnyKey { handler } = sub {
                if let Some(msg) = handler(key_event.code) {
                    chosen = Some(msg);
                    break;
                }
            }
        }
        if chosen.is_none() {
            for sub in subscriptions {
                if let Subscription::Keyboard { key, msg, .. } = sub {
                    if key == key_event.code {
                        chosen = Some(msg);
                        break;
                    }
                }
            }
        }

        match chosen {
            Some(msg) => {
                let command = A::update(&mut self.state, msg);
                self.execute_command(command)
            }
            None => Ok(true),
        }
    }

    /// Poll pending async commands and apply completed ones.
    pub async fn poll_async(&mut self) -> Result<bool> {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);

        let mut completed = Vec::new();
        for (i, future) in self.pending_async.iter_mut().enumerate() {
            if let Poll::Ready(msg) = future.as_mut().poll(&mut cx) {
                completed.push((i, msg));
            }
        }

        // Remove in reverse order to keep indices valid
        completed.sort_by(|a, b| b.0.cmp(&a.0));
        for (i, msg) in completed {
            self.pending_async.remove(i);
            let command = A::update(&mut self.state, msg);
            if !self.execute_command(command)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    pub fn take_navigation(&mut self) -> Option<(AppId, Box<dyn Any + Send>)> {
        self.navigation_target.take()
    }

    /// Keyboard bindings for the footer hint bar.
    pub fn key_bindings(&self) -> Vec<(KeyCode, String)> {
        A::subscriptions(&self.state)
            .into_iter()
            .filter_map(|sub| match sub {
                Subscription::Keyboard {
                    key, description, ..
                } => Some((key, description)),
                _ => None,
            })
            .collect()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        A::view(&mut self.state, frame, area, theme);
    }

    fn execute_command(&mut self, command: Command<A::Msg>) -> Result<bool> {
        match command {
            Command::None => Ok(true),

            Command::Batch(commands) => {
                for cmd in commands {
                    if !self.execute_command(cmd)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Command::Quit => Ok(false),

            Command::Navigate { app, params } => {
                self.navigation_target = Some((app, params));
                Ok(true)
            }

            Command::Perform(future) => {
                self.pending_async.push(future);
                Ok(true)
            }
        }
    }
}

impl<A: App> AppRuntime for Runtime<A> {
    fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        Runtime::handle_key(self, key_event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        Runtime::render(self, frame, area, theme)
    }

    fn poll_async(&mut self) -> Pin<Box<dyn Future<Output = Result<bool>> + '_>> {
        Box::pin(Runtime::poll_async(self))
    }

    fn take_navigation(&mut self) -> Option<(AppId, Box<dyn Any + Send>)> {
        Runtime::take_navigation(self)
    }

    fn title(&self) -> &'static str {
        A::title()
    }

    fn status(&self, theme: &Theme) -> Option<Line<'static>> {
        A::status(&self.state, theme)
    }

    fn key_bindings(&self) -> Vec<(KeyCode, String)> {
        Runtime::key_bindings(self)
    }
}

// App state and main event loop.
// Owns the selected post and swaps the mounted screen when it changes.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tracing::info;

use crate::cache::QueryCache;
use crate::graphql::PostsApi;
use crate::state::{PostScreen, PostsScreen, View};
use crate::ui;

const TICK: Duration = Duration::from_millis(100);

/// The mounted screen. Dropping it releases its query subscription.
pub enum Screen {
    Posts(PostsScreen),
    Post(PostScreen),
}

/// Main application state.
pub struct App {
    cache: QueryCache,
    api: Arc<dyn PostsApi>,
    /// Selected post; `None` shows the list.
    selection: Option<u64>,
    screen: Screen,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(cache: QueryCache, api: Arc<dyn PostsApi>) -> Self {
        let screen = Screen::Posts(PostsScreen::mount(&cache, &api, None));
        Self {
            cache,
            api,
            selection: None,
            screen,
            should_quit: false,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn selection(&self) -> Option<u64> {
        self.selection
    }

    pub fn view(&self) -> View {
        View::from_selection(self.selection())
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Change the selection and mount the matching screen.
    pub fn select(&mut self, selection: Option<u64>) {
        if self.selection == selection {
            return;
        }

        let previous = self.selection;
        self.selection = selection;
        self.screen = match selection {
            Some(id) => {
                info!(post_id = id, "opening post");
                Screen::Post(PostScreen::mount(&self.cache, &self.api, Some(id)))
            }
            None => {
                info!("back to posts");
                Screen::Posts(PostsScreen::mount(&self.cache, &self.api, previous))
            }
        };
    }

    /// Return to the list.
    pub fn back(&mut self) {
        self.select(None);
    }

    /// Force a refresh of the visible query.
    pub fn refresh(&mut self) {
        let started = match &self.screen {
            Screen::Posts(screen) => screen.query.refetch(),
            Screen::Post(screen) => screen.query.refetch(),
        };
        info!(started, "manual refresh");
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
            self.cache.gc();
        }
        Ok(())
    }

    /// Poll for input; returns after one tick so fetched data gets redrawn.
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.refresh(),
            _ => match &mut self.screen {
                Screen::Posts(screen) => match code {
                    KeyCode::Up | KeyCode::Char('k') => screen.select_prev(),
                    KeyCode::Down | KeyCode::Char('j') => screen.select_next(),
                    KeyCode::Enter => {
                        if let Some(id) = screen.selected_id() {
                            self.select(Some(id));
                        }
                    }
                    _ => {}
                },
                Screen::Post(screen) => match code {
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.back(),
                    KeyCode::Up | KeyCode::Char('k') => screen.scroll_up(),
                    KeyCode::Down | KeyCode::Char('j') => screen.scroll_down(),
                    _ => {}
                },
            },
        }
    }
}

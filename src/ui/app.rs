//! Terminal frontend
//!
//! Maps key events to movement intent and composites the world through
//! each cell's displayed opacity.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::config::{MAX_SCREEN_COL, MAX_SCREEN_ROW};
use crate::game::{Direction, Game};

/// Frontend state: the pending movement intent and the quit flag.
pub struct App {
    intent: Option<Direction>,
    quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            intent: None,
            quit: false,
        }
    }

    /// Translate a key event. Arrows and hjkl move; q or Esc quits.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.intent = Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.intent = Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('h') => self.intent = Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => self.intent = Some(Direction::Right),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// This tick's movement intent. Consumed: a tap yields one tick of
    /// intent and the observer coasts the rest of the tile.
    pub fn take_intent(&mut self) -> Option<Direction> {
        self.intent.take()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Draw the view window centered on the observer, each cell's colors
    /// scaled by its displayed opacity.
    pub fn render(&self, frame: &mut Frame, game: &Game) {
        let area = frame.area();
        let block = Block::default().borders(Borders::ALL).title(" duskmere ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let map = game.map();
        let tiles = game.tiles();
        let observer = game.observer();

        let view_width = (MAX_SCREEN_COL).min(inner.width as i32);
        let view_height = (MAX_SCREEN_ROW).min(inner.height as i32);
        let cam_x = observer.col() - view_width / 2;
        let cam_y = observer.row() - view_height / 2;

        let buf = frame.buffer_mut();
        for screen_y in 0..view_height {
            for screen_x in 0..view_width {
                let map_x = cam_x + screen_x;
                let map_y = cam_y + screen_y;

                let cell_x = inner.x + screen_x as u16;
                let cell_y = inner.y + screen_y as u16;

                match map.get(map_x, map_y) {
                    Some(cell) => {
                        let def = tiles.get(cell.kind);
                        let lit = cell.display_opacity;
                        buf[(cell_x, cell_y)].set_char(def.glyph);
                        buf[(cell_x, cell_y)].set_fg(scale_rgb(def.fg, lit));
                        buf[(cell_x, cell_y)].set_bg(scale_rgb(def.bg, lit));
                    }
                    None => {
                        // Beyond the world's edge.
                        buf[(cell_x, cell_y)].set_char(' ');
                        buf[(cell_x, cell_y)].set_bg(Color::Rgb(0, 0, 0));
                    }
                }
            }
        }

        // The observer, drawn over its cell.
        let screen_x = observer.col() - cam_x;
        let screen_y = observer.row() - cam_y;
        if screen_x >= 0 && screen_x < view_width && screen_y >= 0 && screen_y < view_height {
            let cell_x = inner.x + screen_x as u16;
            let cell_y = inner.y + screen_y as u16;
            buf[(cell_x, cell_y)].set_char('@');
            buf[(cell_x, cell_y)].set_fg(Color::Rgb(255, 235, 170));
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale an RGB triple by a [0, 1] light level.
fn scale_rgb((r, g, b): (u8, u8, u8), lit: f32) -> Color {
    let lit = lit.clamp(0.0, 1.0);
    Color::Rgb(
        (r as f32 * lit) as u8,
        (g as f32 * lit) as u8,
        (b as f32 * lit) as u8,
    )
}

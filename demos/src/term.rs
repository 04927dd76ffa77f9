//! Crossterm view of a [`Session`].

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use mazestep_core::CellKind;
use mazestep_paths::SearchStatus;

use crate::session::{Overlay, Session};

const COL_WALL: Color = Color::Rgb { r: 30, g: 58, b: 95 };
const COL_FREE: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const COL_START: Color = Color::Rgb { r: 76, g: 175, b: 80 };
const COL_END: Color = Color::Rgb { r: 244, g: 67, b: 54 };
const COL_FRONTIER: Color = Color::Rgb { r: 174, g: 214, b: 241 };
const COL_VISITED: Color = Color::Rgb { r: 214, g: 234, b: 248 };
const COL_PATH: Color = Color::Rgb { r: 255, g: 215, b: 0 };
const COL_TEXT: Color = Color::Rgb { r: 200, g: 200, b: 200 };

/// Keys the animated view reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Restart the search with the same algorithm.
    Restart,
    /// Regenerate the maze and restart.
    NewMaze,
    /// Restart with the n-th algorithm (0-based).
    Pick(usize),
}

fn to_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('n') => Some(Command::NewMaze),
        KeyCode::Char(c @ '1'..='4') => Some(Command::Pick(c as usize - '1' as usize)),
        _ => None,
    }
}

/// Background colour and glyph for a cell. Endpoints win over any overlay.
fn paint(kind: CellKind, overlay: Overlay) -> (Color, char) {
    match (kind, overlay) {
        (CellKind::Start, _) => (COL_START, 'S'),
        (CellKind::End, _) => (COL_END, 'E'),
        (CellKind::Wall, _) => (COL_WALL, ' '),
        (CellKind::Free, Overlay::None) => (COL_FREE, ' '),
        (CellKind::Free, Overlay::Frontier) => (COL_FRONTIER, ' '),
        (CellKind::Free, Overlay::Visited) => (COL_VISITED, ' '),
        (CellKind::Free, Overlay::Path) => (COL_PATH, ' '),
    }
}

/// Raw-mode terminal in the alternate screen. Restored on drop.
pub struct Terminal {
    out: io::Stdout,
    open: bool,
}

impl Terminal {
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out, open: true })
    }

    /// Wait up to `timeout` for a key and map it to a [`Command`].
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(to_command(code)),
            _ => Ok(None),
        }
    }

    /// Redraw the whole maze plus a status panel below it.
    ///
    /// Each cell is two columns wide so the maze keeps a roughly square
    /// aspect.
    pub fn draw(&mut self, session: &Session) -> io::Result<()> {
        let bounds = session.bounds();
        for c in bounds {
            let kind = session.grid().get(c).unwrap_or_default();
            let (bg, ch) = paint(kind, session.overlay_at(c));
            queue!(
                self.out,
                cursor::MoveTo(2 * c.col as u16, c.row as u16),
                SetForegroundColor(Color::Black),
                SetBackgroundColor(bg),
                Print(ch),
                Print(' ')
            )?;
        }
        queue!(self.out, ResetColor)?;

        let status = match session.status() {
            SearchStatus::Idle => "idle",
            SearchStatus::Running => "running",
            SearchStatus::Found => "found",
            SearchStatus::NotFound => "no path",
        };
        let algorithm = session
            .algorithm()
            .map_or_else(|| "-".to_string(), |a| a.to_string());
        let mut lines = vec![format!(
            "{algorithm}: {status}, {} nodes expanded",
            session.nodes_expanded()
        )];
        if let Some(stats) = session.stats() {
            lines.extend(stats.to_string().lines().map(str::to_string));
        }
        lines.push("q quit  r restart  n new maze  1-4 BFS/DFS/Dijkstra/A*".to_string());

        let top = bounds.rows as u16 + 1;
        for (i, line) in lines.iter().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, top + i as u16),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(COL_TEXT),
                Print(line)
            )?;
        }
        queue!(
            self.out,
            cursor::MoveTo(0, top + lines.len() as u16),
            terminal::Clear(ClearType::FromCursorDown),
            ResetColor
        )?;
        self.out.flush()
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}

//! Draws frames to the terminal.

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use ocean_world::Census;
use std::io::{self, Write};

pub struct Terminal<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    /// Replace whatever is on screen with `frame`
    pub fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

/// Rendered grid followed by a one-line population summary
pub fn frame(grid: &str, tick: u64, census: &Census) -> String {
    format!(
        "{}tick {}  F {}  P {}  A {}  # {}  R {}\n",
        grid,
        tick,
        census.prey,
        census.predators,
        census.apex_predators,
        census.stones,
        census.reefs
    )
}

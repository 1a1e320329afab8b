use std::io::{stdout, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use log::{debug, info};

use crate::{
    editor::{editor_action, sim_action, Editor, EditorOutcome, SimAction},
    proc::{update_game, Grid, NeighborCounts},
};

type Err = Box<dyn std::error::Error>;
type Result<T> = std::result::Result<T, Err>;

const TITLE: &str = "Conway's Game of Life";

/// Owns the grid for the whole run.
pub struct App {
    grid: Grid,
    counts: NeighborCounts,
    generation: u64,
}

impl App {
    #[inline]
    pub fn new(grid: Grid) -> Self {
        let counts = NeighborCounts::new(&grid);
        App {
            grid,
            counts,
            generation: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn step(&mut self) {
        update_game(&mut self.grid, &mut self.counts);
        self.generation += 1;
        debug!("generation {} population {}", self.generation, self.grid.population());
    }
}

/// Terminal size as `(columns, rows)`.
#[inline]
pub fn term_size() -> Result<(u16, u16)> {
    Ok(terminal::size()?)
}

pub fn run(a: App) -> Result<()> {
    let mut out = stdout();
    runup(&mut out)?;
    let r = play(&mut out, a);
    shutdown(&mut out)?;
    r
}

fn runup(out: &mut Stdout) -> Result<()> {
    execute!(out, EnterAlternateScreen, SetTitle(TITLE))?;
    enable_raw_mode()?;
    Ok(())
}

fn shutdown(out: &mut Stdout) -> Result<()> {
    execute!(out, ResetColor, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn play(out: &mut Stdout, mut a: App) -> Result<()> {
    banner(out)?;
    if !edit(out, &mut a)? {
        info!("quit while editing");
        return Ok(());
    }
    info!("editing done, {} live cells", a.grid().population());

    execute!(out, Hide)?;
    loop {
        paint(out, a.grid())?;
        execute!(
            out,
            SetTitle(format!(
                "{TITLE} - generation {} ({} alive)",
                a.generation(),
                a.grid().population()
            ))
        )?;
        a.step();

        let action = loop {
            if let Some(act) = sim_action(&next_key()?) {
                break act;
            }
        };
        if action == SimAction::Exit {
            info!("exit after {} generations", a.generation());
            return Ok(());
        }
    }
}

fn banner(out: &mut Stdout) -> Result<()> {
    queue!(
        out,
        SetBackgroundColor(Color::Black),
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetForegroundColor(Color::Red),
        Print("PRESS 0 TO EXIT USER MANUAL CELL INSERTION"),
        MoveToNextLine(1),
        Print("PRESS E/e INVERT A CELL'S STATE"),
        ResetColor,
    )?;
    out.flush()?;
    next_key()?;
    Ok(())
}

/// Returns false when the user quit instead of finishing the edit.
fn edit(out: &mut Stdout, a: &mut App) -> Result<bool> {
    let mut ed = Editor::new(a.grid());
    execute!(out, Show)?;
    loop {
        paint(out, a.grid())?;
        let c = ed.cursor();
        execute!(out, MoveTo(c.left(), c.top()))?;

        let Some(action) = editor_action(&next_key()?) else {
            continue;
        };
        match ed.apply(action, &mut a.grid)? {
            EditorOutcome::Continue => {}
            EditorOutcome::Done => return Ok(true),
            EditorOutcome::Quit => return Ok(false),
        }
    }
}

/// Each cell is `" #"`: white when alive, black on black when dead.
fn paint(out: &mut Stdout, grid: &Grid) -> Result<()> {
    queue!(out, SetBackgroundColor(Color::Black), Clear(ClearType::All), MoveTo(0, 0))?;
    for (y, r) in grid.rows().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        for c in r {
            let fg = if *c { Color::White } else { Color::Black };
            queue!(out, SetForegroundColor(fg), Print(" #"))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Blocks until the next key event.
fn next_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            return Ok(key);
        }
    }
}

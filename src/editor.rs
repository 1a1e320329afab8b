use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::proc::{Grid, GridError};

/// Terminal columns taken by one grid column.
pub const CELL_COLS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Move(Direction),
    Toggle,
    Done,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Continue,
    Done,
    Quit,
}

/// Cursor position in terminal coordinates. `left` always sits on the
/// `#` of a cell, which is an odd column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    left: u16,
    top: u16,
}

impl Cursor {
    #[inline]
    pub fn left(&self) -> u16 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> u16 {
        self.top
    }

    /// Grid `(row, col)` under the cursor.
    #[inline]
    pub fn cell(&self) -> (usize, usize) {
        (self.top as usize, grid_col(self.left))
    }
}

/// Grid column for a terminal column.
#[inline]
pub fn grid_col(terminal_col: u16) -> usize {
    (terminal_col.saturating_sub(1) / CELL_COLS) as usize
}

/// Keeps `top` on a grid row.
pub fn clamp_top(top: i32, height: usize) -> u16 {
    top.clamp(0, height as i32 - 1) as u16
}

/// Keeps `left` on the odd column of a grid cell, snapping even columns
/// down to the cell they belong to.
pub fn clamp_left(left: i32, width: usize) -> u16 {
    let last = width as i32 * CELL_COLS as i32 - 1;
    let left = left.clamp(1, last);
    (if left % 2 == 0 { left - 1 } else { left }) as u16
}

pub struct Editor {
    width: usize,
    height: usize,
    cursor: Cursor,
}

impl Editor {
    pub fn new(grid: &Grid) -> Self {
        Editor {
            width: grid.width(),
            height: grid.height(),
            cursor: Cursor { left: 1, top: 0 },
        }
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn step(&mut self, d: Direction) {
        let (left, top) = (self.cursor.left as i32, self.cursor.top as i32);
        let step = CELL_COLS as i32;
        let (left, top) = match d {
            Direction::Up => (left, top - 1),
            Direction::Down => (left, top + 1),
            Direction::Left => (left - step, top),
            Direction::Right => (left + step, top),
        };
        self.cursor = Cursor {
            left: clamp_left(left, self.width),
            top: clamp_top(top, self.height),
        };
    }

    pub fn apply(&mut self, action: EditorAction, grid: &mut Grid) -> Result<EditorOutcome, GridError> {
        match action {
            EditorAction::Move(d) => self.step(d),
            EditorAction::Toggle => {
                let (row, col) = self.cursor.cell();
                let alive = grid.toggle(row, col)?;
                debug!("toggled ({row}, {col}) -> {alive}");
            }
            EditorAction::Done => return Ok(EditorOutcome::Done),
            EditorAction::Quit => return Ok(EditorOutcome::Quit),
        }
        Ok(EditorOutcome::Continue)
    }
}

#[inline]
fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

pub fn editor_action(key: &KeyEvent) -> Option<EditorAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if is_ctrl_c(key) {
        return Some(EditorAction::Quit);
    }
    match key.code {
        KeyCode::Up => Some(EditorAction::Move(Direction::Up)),
        KeyCode::Down => Some(EditorAction::Move(Direction::Down)),
        KeyCode::Left => Some(EditorAction::Move(Direction::Left)),
        KeyCode::Right => Some(EditorAction::Move(Direction::Right)),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(EditorAction::Toggle),
        KeyCode::Char('0') => Some(EditorAction::Done),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAction {
    Step,
    Exit,
}

/// Any key press advances one generation except the exit keys.
pub fn sim_action(key: &KeyEvent) -> Option<SimAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if is_ctrl_c(key) {
        return Some(SimAction::Exit);
    }
    match key.code {
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => Some(SimAction::Exit),
        _ => Some(SimAction::Step),
    }
}

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{axis}: {input:?} is not a number")]
    NotANumber { axis: char, input: String },
    #[error("{axis}: grid size must be positive")]
    NotPositive { axis: char },
    #[error("stdin closed before the grid size was read")]
    MissingInput,
    #[error("{width}x{height} grid needs {need_w}x{need_h} terminal cells, have {have_w}x{have_h}")]
    TooLarge {
        width: usize,
        height: usize,
        need_w: usize,
        need_h: usize,
        have_w: u16,
        have_h: u16,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gridlife")]
#[command(about = "Conway's Game of Life in the terminal, one generation per key press")]
pub struct Args {
    /// grid width in cells (asked on stdin when omitted)
    #[arg(requires = "height", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// grid height in cells (asked on stdin when omitted)
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub height: Option<u16>,

    /// start the editor from a text pattern; its size is the grid size
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub pattern: Option<PathBuf>,

    /// write log records to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// One dimension typed by the user.
pub fn parse_dimension(axis: char, input: &str) -> Result<usize, ConfigError> {
    let input = input.trim();
    let n: i64 = input.parse().map_err(|_| ConfigError::NotANumber {
        axis,
        input: input.to_string(),
    })?;
    if n <= 0 {
        return Err(ConfigError::NotPositive { axis });
    }
    usize::try_from(n).map_err(|_| ConfigError::NotANumber {
        axis,
        input: input.to_string(),
    })
}

/// Asks for the size the way the console version did: `X: ` then `Y: `.
pub fn prompt_size<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(usize, usize), ConfigError> {
    writeln!(out, "enter the game's grid size: ")?;
    let width = prompt_one(input, out, 'X')?;
    let height = prompt_one(input, out, 'Y')?;
    Ok((width, height))
}

fn prompt_one<R: BufRead, W: Write>(input: &mut R, out: &mut W, axis: char) -> Result<usize, ConfigError> {
    write!(out, "{axis}: ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConfigError::MissingInput);
    }
    parse_dimension(axis, &line)
}

/// The grid is drawn two columns per cell, one row per cell.
pub fn check_fits(width: usize, height: usize, term: (u16, u16)) -> Result<(), ConfigError> {
    let (need_w, need_h) = (width.saturating_mul(2), height);
    let (have_w, have_h) = term;
    if need_w > have_w as usize || need_h > have_h as usize {
        return Err(ConfigError::TooLarge {
            width,
            height,
            need_w,
            need_h,
            have_w,
            have_h,
        });
    }
    Ok(())
}

use gridlife::{
    config::{self, Args},
    draw::{self, App},
    logging,
    proc::Grid,
};

use clap::Parser;
use log::{error, info};
use std::io::{stdin, stdout};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let grid = initial_grid(&args, draw::term_size()?)?;
    info!("grid {}x{}", grid.width(), grid.height());

    if let Err(e) = draw::run(App::new(grid)) {
        error!("{e}");
        return Err(e);
    }
    Ok(())
}

/// The size is checked against the terminal before any cells are allocated.
fn initial_grid(args: &Args, term: (u16, u16)) -> Result<Grid, Box<dyn std::error::Error>> {
    if let Some(path) = &args.pattern {
        let grid = Grid::from_pattern(&std::fs::read_to_string(path)?)?;
        config::check_fits(grid.width(), grid.height(), term)?;
        return Ok(grid);
    }
    let (w, h) = match (args.width, args.height) {
        (Some(w), Some(h)) => (w as usize, h as usize),
        _ => config::prompt_size(&mut stdin().lock(), &mut stdout())?,
    };
    config::check_fits(w, h, term)?;
    Ok(Grid::new(w, h)?)
}

use std::{fs::File, path::Path};

use env_logger::{Builder, Env, Target};

/// With a log file everything from `info` up goes there. Without one,
/// stderr only gets records when `RUST_LOG` asks for them, since the
/// screen belongs to the grid.
pub fn init(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut b = match log_file {
        Some(path) => {
            let f = File::create(path)?;
            let mut b = Builder::from_env(Env::default().default_filter_or("info"));
            b.target(Target::Pipe(Box::new(f)));
            b
        }
        None => Builder::from_env(Env::default().default_filter_or("off")),
    };
    b.format_timestamp_millis();
    b.try_init()?;
    Ok(())
}

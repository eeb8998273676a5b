/// rcube - a tumbling cube in the terminal
///
/// Controls:
///   - Q / ESC / Ctrl-C: Quit

use clap::Parser;
use simplelog::{Config, WriteLogger};
use std::fs::File;

use rcube_terminal::{Cli, Result, TerminalApp};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut app = TerminalApp::new(cli.scene_config(), cli.fps)?;
    app.run()?;

    println!("rcube: {} frames drawn", app.scene().frame_count());
    Ok(())
}

/// Logs go to a file when asked for; stderr would tear the alternate screen
fn init_logging(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        WriteLogger::init(cli.log_level, Config::default(), File::create(path)?)?;
    }
    Ok(())
}

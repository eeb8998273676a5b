/// Terminal front end for the tumbling cube
use crossterm::{
    cursor, execute,
    terminal::{self, Clear, ClearType},
};
use log::{info, warn};
use rcube_core::{FrameOutcome, Scene, SceneConfig};
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

pub mod canvas;
pub mod cli;
pub mod error;
pub mod raster;

pub use canvas::TerminalCanvas;
pub use cli::Cli;
pub use error::{Error, Result};

pub const MIN_COLS: u16 = 10;
pub const MIN_ROWS: u16 = 4;

/// Main application struct for terminal cube rendering
pub struct TerminalApp {
    scene: Scene,
    canvas: TerminalCanvas<Stdout>,
    target_frame_time: Duration,
    last_fps_update: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: SceneConfig, fps: u32) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(Error::TerminalTooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }
        info!(
            "starting: {}x{} surface, {}x{} terminal, mode {}, theta {}",
            config.width, config.height, cols, rows, config.mode, config.theta
        );

        Ok(Self {
            scene: Scene::new(config),
            canvas: TerminalCanvas::new(config.width, config.height, (cols, rows), stdout()),
            target_frame_time: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last_fps_update: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take over the terminal, animate until quit, then hand it back.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        let setup = execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        );

        let result = match setup {
            Ok(()) => self.main_loop(),
            Err(e) => Err(e.into()),
        };

        // Cleanup runs even if the loop failed
        let cleanup = restore_terminal();
        if let Err(e) = &cleanup {
            warn!("failed to restore terminal: {e}");
        }
        let turned = self.scene.rotation();
        info!(
            "stopped after {} frames, turned ({:.3}, {:.3}, {:.3}) rad",
            self.scene.frame_count(),
            turned.x,
            turned.y,
            turned.z
        );

        result.and(cleanup)
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            let frame_start = Instant::now();

            self.canvas.set_status(format!(
                "rcube | {} | FPS: {:.1} | q/Esc to quit",
                self.scene.mode(),
                self.fps
            ));
            if self.scene.frame(&mut self.canvas)? == FrameOutcome::Quit {
                return Ok(());
            }

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let since = self.last_fps_update.elapsed();
            if since >= Duration::from_secs(1) {
                self.fps = self.frame_count as f32 / since.as_secs_f32();
                self.frame_count = 0;
                self.last_fps_update = Instant::now();
            }
        }
    }
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

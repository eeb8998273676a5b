/// Terminal-backed canvas: draws into a raster and presents it with half blocks
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use log::info;
use nalgebra::Point2;
use rcube_core::{Canvas, CanvasEvent, Rgb};
use std::io::Write;
use std::time::Duration;

use crate::error::Error;
use crate::raster::Raster;

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Rows reserved above the image for the status line
const STATUS_ROWS: u16 = 1;

const BORDER: Rgb = Rgb::BLACK;

/// A [`Canvas`] that renders into a fixed-size raster and scales it to fit
/// the terminal on every `present`.
///
/// Each terminal cell shows two vertically stacked pixels, which keeps
/// pixels roughly square on common terminal fonts.
pub struct TerminalCanvas<W: Write> {
    raster: Raster,
    writer: W,
    cols: u16,
    rows: u16,
    status: String,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(width: u32, height: u32, terminal_size: (u16, u16), writer: W) -> Self {
        Self {
            raster: Raster::new(width as usize, height as usize),
            writer,
            cols: terminal_size.0,
            rows: terminal_size.1,
            status: String::new(),
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Text shown on the top row at the next `present`
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Terminal was resized: drop whatever the old layout left behind
    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), Error> {
        info!("terminal resized to {cols}x{rows}");
        self.cols = cols;
        self.rows = rows;
        self.writer.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn layout(&self) -> Option<Viewport> {
        Viewport::fit(
            (self.raster.width(), self.raster.height()),
            (self.cols as usize, self.rows.saturating_sub(STATUS_ROWS) as usize * 2),
        )
    }

    fn draw_status(&mut self) -> Result<(), Error> {
        let line: String = self.status.chars().take(self.cols as usize).collect();
        self.writer
            .queue(cursor::MoveTo(0, 0))?
            .queue(SetForegroundColor(Color::Yellow))?
            .queue(Print(line))?
            .queue(ResetColor)?;
        Ok(())
    }

    fn draw_image(&mut self, viewport: &Viewport) -> Result<(), Error> {
        let image_rows = self.rows.saturating_sub(STATUS_ROWS);
        for row in 0..image_rows {
            self.writer.queue(cursor::MoveTo(0, row + STATUS_ROWS))?;
            let mut current: Option<(Rgb, Rgb)> = None;
            for col in 0..self.cols as usize {
                let top = viewport.sample(&self.raster, col, row as usize * 2);
                let bottom = viewport.sample(&self.raster, col, row as usize * 2 + 1);
                if current != Some((top, bottom)) {
                    self.writer
                        .queue(SetForegroundColor(to_color(top)))?
                        .queue(SetBackgroundColor(to_color(bottom)))?;
                    current = Some((top, bottom));
                }
                self.writer.queue(Print(HALF_BLOCK))?;
            }
        }
        self.writer.queue(ResetColor)?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    type Error = Error;

    fn clear(&mut self, color: Rgb) {
        self.raster.clear(color);
    }

    fn draw_polygon(&mut self, color: Rgb, points: &[Point2<f32>], filled: bool) {
        if filled {
            self.raster.fill_polygon(points, color);
        } else {
            self.raster.stroke_polygon(points, color);
        }
    }

    fn draw_line(&mut self, color: Rgb, from: Point2<f32>, to: Point2<f32>, width: u32) {
        self.raster.draw_line(from, to, color, width);
    }

    fn draw_circle(&mut self, color: Rgb, center: Point2<f32>, radius: f32) {
        self.raster.fill_circle(center, radius, color);
    }

    fn present(&mut self) -> Result<(), Error> {
        self.draw_status()?;
        if let Some(viewport) = self.layout() {
            self.draw_image(&viewport)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<CanvasEvent>, Error> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(cols, rows) = event {
                self.resize(cols, rows)?;
            }
            events.push(translate_event(&event));
        }
        Ok(events)
    }
}

/// Map a terminal event onto what the frame loop understands
pub fn translate_event(event: &Event) -> CanvasEvent {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => CanvasEvent::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => CanvasEvent::Quit,
            _ => CanvasEvent::Other,
        },
        _ => CanvasEvent::Other,
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Where the scaled raster sits inside the terminal's pixel grid
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    width: f32,
    height: f32,
}

impl Viewport {
    /// Largest uniform scale that fits `source` into `target`, centred
    fn fit(source: (usize, usize), target: (usize, usize)) -> Option<Self> {
        if source.0 == 0 || source.1 == 0 || target.0 == 0 || target.1 == 0 {
            return None;
        }
        let scale = (target.0 as f32 / source.0 as f32).min(target.1 as f32 / source.1 as f32);
        let width = source.0 as f32 * scale;
        let height = source.1 as f32 * scale;
        Some(Self {
            scale,
            offset_x: (target.0 as f32 - width) / 2.0,
            offset_y: (target.1 as f32 - height) / 2.0,
            width,
            height,
        })
    }

    /// Nearest raster pixel under the centre of terminal pixel `(x, y)`
    fn sample(&self, raster: &Raster, x: usize, y: usize) -> Rgb {
        let u = x as f32 + 0.5 - self.offset_x;
        let v = y as f32 + 0.5 - self.offset_y;
        if u < 0.0 || v < 0.0 || u >= self.width || v >= self.height {
            return BORDER;
        }
        raster
            .pixel((u / self.scale) as usize, (v / self.scale) as usize)
            .unwrap_or(BORDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            translate_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            CanvasEvent::Quit
        );
        assert_eq!(
            translate_event(&key(KeyCode::Esc, KeyModifiers::NONE)),
            CanvasEvent::Quit
        );
        assert_eq!(
            translate_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            CanvasEvent::Quit
        );
        assert_eq!(
            translate_event(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            CanvasEvent::Other
        );
        assert_eq!(translate_event(&Event::Resize(80, 24)), CanvasEvent::Other);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate_event(&release), CanvasEvent::Other);
    }

    #[test]
    fn test_viewport_letterboxes() {
        // Square image into a wide grid: scaled by height, centred horizontally.
        let viewport = Viewport::fit((800, 800), (200, 100)).unwrap();
        assert_eq!(viewport.scale, 0.125);
        assert_eq!(viewport.offset_x, 50.0);
        assert_eq!(viewport.offset_y, 0.0);
        assert!(Viewport::fit((800, 800), (0, 10)).is_none());
    }

    #[test]
    fn test_viewport_sampling() {
        let mut raster = Raster::new(4, 4);
        raster.clear(Rgb::WHITE);
        raster.set_pixel(3, 0, Rgb::grey(9));
        let viewport = Viewport::fit((4, 4), (16, 8)).unwrap();
        assert_eq!(viewport.scale, 2.0);
        // Left border, then the image starting at x = 4.
        assert_eq!(viewport.sample(&raster, 0, 0), BORDER);
        assert_eq!(viewport.sample(&raster, 4, 0), Rgb::WHITE);
        assert_eq!(viewport.sample(&raster, 10, 1), Rgb::grey(9));
        assert_eq!(viewport.sample(&raster, 12, 0), BORDER);
    }

    #[test]
    fn test_present_writes_frame() {
        let mut canvas = TerminalCanvas::new(40, 40, (20, 11), Vec::new());
        canvas.clear(Rgb::WHITE);
        canvas.draw_polygon(
            Rgb::grey(100),
            &[
                Point2::new(10.0, 10.0),
                Point2::new(30.0, 10.0),
                Point2::new(30.0, 30.0),
                Point2::new(10.0, 30.0),
            ],
            true,
        );
        canvas.set_status("rcube test");
        canvas.present().unwrap();

        assert_eq!(canvas.raster().pixel(20, 20), Some(Rgb::grey(100)));
        let output = String::from_utf8(canvas.into_writer()).unwrap();
        assert!(output.contains("rcube test"));
        assert_eq!(output.matches(HALF_BLOCK).count(), 20 * 10);
    }

    #[test]
    fn test_present_on_tiny_terminal() {
        let mut canvas = TerminalCanvas::new(40, 40, (20, 1), Vec::new());
        canvas.clear(Rgb::WHITE);
        canvas.present().unwrap();
        let output = String::from_utf8(canvas.into_writer()).unwrap();
        assert_eq!(output.matches(HALF_BLOCK).count(), 0);
    }
}

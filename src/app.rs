use crate::config::Config;
use crate::demo::{build, Demo, DemoScene};
use crate::error::{Error, Result};
use crate::places::Place;
use crate::state::AppState;
use crate::surface::{RecordingSurface, Surface};
use crate::terminal::{terminal_size, TerminalSurface};
use crate::widget::SceneWidget;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fmt;
use std::io;
use std::time::{Duration, Instant};

/// Raw mode, alternate screen and mouse capture for as long as it lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().map_err(Error::Terminal)?;
        let guard = TerminalGuard;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
        .map_err(Error::Terminal)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Builds a demo sized for `surface`, with hit boxes matching its text
fn build_for(
    demo: Demo,
    config: &Config,
    surface: &dyn Surface,
    places: &[Place],
) -> Result<DemoScene> {
    let (width, height) = surface.size();
    let mut built = build(demo, config, width, height, places)?;
    built.scene.fit_text_to(surface);
    Ok(built)
}

/// Runs a demo interactively until the user quits
pub fn run_terminal(demo: Demo, config: &Config, places: &[Place]) -> Result<()> {
    let (cols, rows) = terminal_size().map_err(Error::Terminal)?;
    log::info!("terminal is {cols}x{rows} cells");

    let mut surface = TerminalSurface::new(cols, rows);
    let mut widget = SceneWidget::new(build_for(demo, config, &surface, places)?);
    let mut state = AppState::new(demo);

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    let frame = Duration::from_secs_f64(1.0 / config.scene.frame_rate as f64);
    let mut last = Instant::now();

    while state.running {
        let deadline = last + frame;
        while state.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout).map_err(Error::Terminal)? {
                break;
            }
            match event::read().map_err(Error::Terminal)? {
                Event::Resize(cols, rows) => {
                    log::debug!("resized to {cols}x{rows}");
                    surface.resize(cols, rows);
                    widget.demo = build_for(demo, config, &surface, places)?;
                }
                other => widget.event(&other, &mut state),
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64();
        last = now;
        widget.tick(&state, dt);
        widget.paint(&mut surface, &state);
        surface.present(&mut stdout).map_err(Error::Terminal)?;
    }
    Ok(())
}

/// Summary of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub frames: u64,
    pub draw_commands: usize,
    pub visible_last_frame: usize,
    pub entities: usize,
}

impl fmt::Display for HeadlessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let HeadlessReport {
            frames,
            draw_commands,
            visible_last_frame,
            entities,
        } = self;
        write!(
            f,
            "{frames} frames, {draw_commands} draw commands, {visible_last_frame}/{entities} shown"
        )
    }
}

/// Steps a demo at a fixed rate against a recording surface
pub fn run_headless(
    demo: Demo,
    config: &Config,
    places: &[Place],
    frames: u64,
    width: f64,
    height: f64,
) -> Result<HeadlessReport> {
    let mut surface = RecordingSurface::new(width, height);
    let mut widget = SceneWidget::new(build_for(demo, config, &surface, places)?);
    let state = AppState::new(demo);
    let dt = 1.0 / config.scene.frame_rate as f64;

    let mut draw_commands = 0;
    for frame in 0..frames {
        surface.reset();
        widget.tick(&state, dt);
        widget.paint(&mut surface, &state);
        draw_commands += surface.commands.len();
        log::trace!("frame {frame}: {} commands", surface.commands.len());
    }

    let report = HeadlessReport {
        frames,
        draw_commands,
        visible_last_frame: widget.demo.scene.visible_count(),
        entities: widget.demo.scene.entities.len(),
    };
    log::info!("headless run finished: {report:?}");
    Ok(report)
}

use crate::demo::DemoScene;
use crate::state::{AppState, FrameStats};
use crate::style::{Color, Fill};
use crate::surface::Surface;
use crate::terminal::TerminalSurface;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::Instant;

const OVERLAY_TEXT: Color = Color::WHITE;
const GLOBE_RIM: Color = Color::rgb(90, 140, 200);

/// Interactive view of one demo scene
pub struct SceneWidget {
    pub demo: DemoScene,
    stats: FrameStats,
}

impl SceneWidget {
    pub fn new(demo: DemoScene) -> Self {
        SceneWidget {
            demo,
            stats: FrameStats::new(),
        }
    }

    /// Advances the animation unless paused, then refreshes the hover target
    pub fn tick(&mut self, state: &AppState, dt: f64) {
        if !state.paused {
            self.demo.update(dt);
        }
        self.demo.scene.hover(state.pointer);
    }

    /// Handle terminal events for the widget
    pub fn event(&mut self, event: &Event, state: &mut AppState) {
        match event {
            Event::Key(key_event) => self.key(key_event, state),
            Event::Mouse(mouse_event) => {
                let point = TerminalSurface::pixel_of(mouse_event.column, mouse_event.row);
                state.pointer = Some(point);
                if state.paused {
                    return;
                }
                let Some(globe) = self.demo.globe.as_mut() else {
                    return;
                };
                match mouse_event.kind {
                    MouseEventKind::Down(MouseButton::Left) => globe.press(point),
                    MouseEventKind::Drag(MouseButton::Left) => globe.drag(point),
                    MouseEventKind::Up(MouseButton::Left) => globe.release(),
                    _ => {}
                }
            }
            Event::FocusLost => state.pointer = None,
            _ => {}
        }
    }

    fn key(&mut self, key_event: &KeyEvent, state: &mut AppState) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                state.running = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                state.debug = !state.debug;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                state.paused = !state.paused;
                // Drop any drag that was in progress
                if let Some(globe) = self.demo.globe.as_mut() {
                    globe.release();
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                state.running = false;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if !state.paused {
                    self.demo.reset();
                }
            }
            _ => {}
        }
    }

    /// Paint the scene and overlays
    pub fn paint(&mut self, surface: &mut dyn Surface, state: &AppState) {
        self.stats.tick(Instant::now());
        self.demo.scene.paint(surface);

        if let Some(globe) = &self.demo.globe {
            let c = globe.arcball.center;
            surface.stroke_circle(c[0], c[1], globe.arcball.radius, GLOBE_RIM);
        }

        if state.debug {
            let scene = &self.demo.scene;
            let mut lines = vec![
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!("Demo: {:?}", state.demo),
                format!("FPS: {:.2}", self.stats.fps()),
                format!("Focal length: {:.1}", scene.projection.focal_length()),
                format!(
                    "Visible: {}/{}",
                    scene.visible_count(),
                    scene.entities.len()
                ),
            ];
            if let Some(globe) = &self.demo.globe {
                let e = globe.controller.euler();
                lines.push(format!(
                    "Orientation ({}): {:.2} {:.2} {:.2}",
                    globe.controller.name(),
                    e.x,
                    e.y,
                    e.z
                ));
            }
            surface.set_fill(Fill::Solid(OVERLAY_TEXT));
            for (i, line) in lines.iter().enumerate() {
                let half = line.chars().count() as f64 / 2.0;
                surface.fill_text(line, 1.0 + half, 1.0 + i as f64 * 2.0, 1.0);
            }
        }

        // Display 'Paused' if the simulation is paused
        if state.paused {
            let (width, height) = surface.size();
            surface.set_fill(Fill::Solid(OVERLAY_TEXT));
            surface.fill_text("Paused", width / 2.0, height / 2.0, 2.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo::{build, Demo};
    use crate::surface::RecordingSurface;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn widget(demo: Demo) -> SceneWidget {
        SceneWidget::new(build(demo, &Config::default(), 80.0, 48.0, &[]).unwrap())
    }

    #[test]
    fn keys_toggle_state() {
        let mut w = widget(Demo::Spheres);
        let mut state = AppState::new(Demo::Spheres);
        w.event(&key('d'), &mut state);
        w.event(&key('p'), &mut state);
        assert!(state.debug && state.paused);
        w.event(&key('q'), &mut state);
        assert!(!state.running);
    }

    #[test]
    fn paused_scene_does_not_move() {
        let mut w = widget(Demo::Spheres);
        let mut state = AppState::new(Demo::Spheres);
        state.paused = true;
        let positions = |w: &SceneWidget| -> Vec<[f64; 3]> {
            let entities = &w.demo.scene.entities;
            entities.iter().map(|e| e.body.position).collect()
        };
        let before = positions(&w);
        w.tick(&state, 0.5);
        let after = positions(&w);
        assert_eq!(before, after);
    }

    #[test]
    fn mouse_drag_rotates_globe() {
        let mut w = widget(Demo::Globe);
        let mut state = AppState::new(Demo::Globe);
        let left = MouseButton::Left;
        w.event(&mouse(MouseEventKind::Down(left), 40, 12), &mut state);
        assert!(w.demo.globe.as_ref().unwrap().controller.is_dragging());
        w.event(&mouse(MouseEventKind::Drag(left), 50, 12), &mut state);
        w.event(&mouse(MouseEventKind::Up(left), 50, 12), &mut state);
        let globe = w.demo.globe.as_ref().unwrap();
        assert!(!globe.controller.is_dragging());
        assert!(globe.controller.euler().y.abs() > 0.01);
    }

    #[test]
    fn debug_and_pause_overlays_are_drawn() {
        let mut w = widget(Demo::Globe);
        let mut state = AppState::new(Demo::Globe);
        state.debug = true;
        state.paused = true;
        let mut surface = RecordingSurface::new(80.0, 48.0);
        w.paint(&mut surface, &state);
        let texts = surface.texts();
        let heading = "Orientation (quaternion)";
        assert!(texts.iter().any(|t| t.starts_with(heading)));
        assert_eq!(texts.last(), Some(&"Paused"));
    }
}

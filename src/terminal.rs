//! Keyboard input and a minimal text view

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use runner_core::{Action, Cue, CueError, CueSink, GameConfig, ObstacleKind, Result, Round};
use runner_pose::GestureReading;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

const ROWS: u16 = 20;
const LANE_WIDTH: u16 = 9;

/// Keys read during one tick
#[derive(Debug, Default)]
pub struct Input {
    pub actions: Vec<Action>,
    pub quit: bool,
}

/// Pose input state shown under the play field
#[derive(Debug, Clone, Copy)]
pub struct CameraStatus {
    pub frames: u64,
    pub reading: Option<GestureReading>,
}

/// Raw-mode alternate screen, restored on drop
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn enter() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        Ok(Self { out })
    }

    /// Drain pending key events without blocking
    pub fn poll_input(&mut self) -> Result<Input> {
        let mut input = Input::default();

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Left => input.actions.push(Action::Left),
                KeyCode::Right => input.actions.push(Action::Right),
                KeyCode::Up | KeyCode::Char(' ') => input.actions.push(Action::Jump),
                KeyCode::Down => input.actions.push(Action::Duck),
                KeyCode::Esc | KeyCode::Char('q') => input.quit = true,
                _ => {}
            }
        }

        Ok(input)
    }

    pub fn draw(
        &mut self,
        config: &GameConfig,
        round: &Round,
        camera: Option<&CameraStatus>,
    ) -> Result<()> {
        let lanes = config.lane_count() as u16;
        let scale = ROWS as f32 / config.field.height;
        let row_of = |y: f32| -> Option<u16> {
            let row = (y * scale).floor();
            (row >= 0.0 && row < ROWS as f32).then_some(row as u16)
        };

        queue!(self.out, terminal::Clear(ClearType::All))?;

        for row in 0..ROWS {
            for lane in 0..=lanes {
                queue!(self.out, cursor::MoveTo(lane * LANE_WIDTH, row), Print('|'))?;
            }
        }

        for obstacle in round.engine().live() {
            let glyph = match obstacle.kind {
                ObstacleKind::NeedJump => "=====",
                ObstacleKind::MustAvoid => "#####",
            };
            if let Some(row) = row_of(obstacle.position_y + obstacle.height / 2.0) {
                let column = obstacle.lane as u16 * LANE_WIDTH + 2;
                queue!(self.out, cursor::MoveTo(column, row), Print(glyph))?;
            }
        }

        let player = round.player();
        let player_glyph = if player.is_airborne() { " \\o/ " } else { "  o  " };
        if let Some(row) = row_of(player.rect().center().1) {
            queue!(
                self.out,
                cursor::MoveTo(player.current_lane() as u16 * LANE_WIDTH + 2, row),
                Print(player_glyph)
            )?;
        }

        let camera = match camera {
            Some(CameraStatus { frames, reading: Some(r) }) => format!(
                "camera frames: {}  tilt {:+.2} (avg {:+.2}){}",
                frames,
                r.tilt,
                r.tilt_avg,
                if r.debounced { "  [debounce]" } else { "" }
            ),
            Some(status) => format!("camera frames: {}  no pose", status.frames),
            None => "keyboard only".to_string(),
        };
        queue!(
            self.out,
            cursor::MoveTo(0, ROWS + 1),
            Print(format!(
                "score: {}  collisions: {}/{} (left {})  {}",
                round.score(),
                round.collisions(),
                config.scoring.max_collisions,
                round.remaining_collisions(),
                camera
            )),
            cursor::MoveTo(0, ROWS + 2),
            Print("arrows: move/jump/duck   q/esc: quit")
        )?;

        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Nothing useful to do if restoring fails
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Rings the terminal bell on collisions
pub struct BellCues;

impl CueSink for BellCues {
    fn play(&mut self, cue: Cue) -> std::result::Result<(), CueError> {
        if cue == Cue::Collision {
            let mut out = stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

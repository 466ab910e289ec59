use arboard::Clipboard;
use macroquad::prelude::*;

use rustmaze::config::Config;
use rustmaze::event_log::{Event, EventLog};
use rustmaze::selection::SelectionPhase;
use rustmaze::{Cell, Maze, Phase};

/// Host-side state: the engine plus render and tick bookkeeping
struct App {
    maze: Maze,
    config: Config,
    event_log: EventLog,
    last_update: f64,
    click_latch: bool,

    // One-shot flags so each milestone is logged once per cycle
    generation_logged: bool,
    start_logged: bool,
    end_logged: bool,
    solve_logged: bool,
    path_logged: bool,
}

impl App {
    fn new(config: Config) -> Self {
        let maze = Maze::new(
            config.grid.cols,
            config.grid.rows,
            config.grid.cell_half_size,
            config.simulation.seed,
        );

        App {
            maze,
            config,
            event_log: EventLog::new(),
            last_update: 0.0,
            click_latch: false,
            generation_logged: false,
            start_logged: false,
            end_logged: false,
            solve_logged: false,
            path_logged: false,
        }
    }

    fn cell_size(&self) -> f32 {
        self.config.grid.cell_half_size * 2.0
    }

    /// Mouse position in grid-local world coordinates; cell (i, j) is
    /// centered at (i, j) * cell size
    fn pointer_world(&self) -> (f32, f32) {
        let (mouse_x, mouse_y) = mouse_position();
        let half = self.cell_size() / 2.0;
        (mouse_x - half, mouse_y - half)
    }

    fn update(&mut self) {
        // Clicks between engine ticks must not be dropped by the tick gate
        if is_mouse_button_pressed(MouseButton::Left) {
            self.click_latch = true;
        }

        if is_key_pressed(KeyCode::Space) && self.maze.is_phase_complete() {
            let from = self.maze.phase();
            self.maze.advance_phase();
            let to = self.maze.phase();
            self.event_log.log(Event::PhaseChanged { from, to });

            if to == Phase::Generation {
                self.generation_logged = false;
                self.start_logged = false;
                self.end_logged = false;
                self.solve_logged = false;
                self.path_logged = false;
            }
        }

        let now = get_time();
        if now - self.last_update >= self.config.simulation.update_interval {
            let (world_x, world_y) = self.pointer_world();
            self.maze.update(world_x, world_y, self.click_latch);
            self.click_latch = false;
            self.last_update = now;
            self.record_progress();
        }
    }

    /// Emit events for milestones crossed since the previous tick
    fn record_progress(&mut self) {
        match self.maze.phase() {
            Phase::Generation => {
                if self.maze.is_generation_complete() && !self.generation_logged {
                    self.generation_logged = true;
                    self.event_log.log(Event::GenerationFinished {
                        passages: self.maze.grid.passage_count(),
                    });
                }
            }
            Phase::CellSelection => {
                if let Some(start) = self.maze.solve_start_cell() {
                    if !self.start_logged {
                        self.start_logged = true;
                        self.event_log.log(Event::StartSelected {
                            x: start.x,
                            y: start.y,
                        });
                    }
                }
                if let Some(end) = self.maze.solve_end_cell() {
                    if !self.end_logged {
                        self.end_logged = true;
                        self.event_log.log(Event::EndSelected { x: end.x, y: end.y });
                    }
                }
            }
            Phase::Solving => {
                if self.maze.is_solving_complete() && !self.solve_logged {
                    self.solve_logged = true;
                    self.event_log.log(Event::SolveFinished {
                        steps: self.maze.solve_steps(),
                        junctions: self.maze.junction_count(),
                    });
                }
            }
            Phase::Completed => {
                if self.maze.is_completion_complete() && !self.path_logged {
                    self.path_logged = true;
                    self.event_log.log(Event::PathTraced {
                        length: self.maze.solve_path().len(),
                    });
                }
            }
            Phase::Idle => {}
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        // Wall cells; passages stay background-colored
        for y in 0..self.maze.grid.height {
            for x in 0..self.maze.grid.width {
                if self.maze.grid.is_wall_at(x, y) {
                    self.fill_cell(Cell::new(x, y), WHITE);
                }
            }
        }

        // Entrance pass counts: once is a candidate path edge, twice is an
        // abandoned branch
        if let Some(entrances) = self.maze.entrance_pass_counts() {
            for (&cell, &count) in entrances {
                let color = if count == 1 { SKYBLUE } else { GRAY };
                self.fill_cell(cell, color);
            }
        }

        for &cell in self.maze.solve_path() {
            self.fill_cell(cell, DARKBLUE);
        }

        if let Some(head) = self.maze.generation_head() {
            self.fill_cell(head, GREEN);
        }
        if let Some(pointed) = self.maze.pointed_cell() {
            self.fill_cell(pointed, RED);
        }
        if let Some(start) = self.maze.solve_start_cell() {
            self.fill_cell(start, BLUE);
        }
        if let Some(end) = self.maze.solve_end_cell() {
            self.fill_cell(end, YELLOW);
        }
        if let Some(token) = self.maze.solver_token() {
            self.fill_cell(token, MAGENTA);
        }
        if let Some(token) = self.maze.tracer_token() {
            self.fill_cell(token, MAROON);
        }

        let status = match self.maze.phase() {
            Phase::CellSelection if !self.maze.is_selection_complete() => {
                match self.maze.selection_phase() {
                    SelectionPhase::SelectingStart => " - click a start cell",
                    SelectionPhase::SelectingEnd => " - click an end cell",
                }
            }
            _ if self.maze.is_phase_complete() => " (done, Space for next)",
            _ => "",
        };
        let info = format!(
            "Phase: {:?}{}\nSpace: next phase\nC: copy maze as text\nP: print event log\nEsc: quit",
            self.maze.phase(),
            status
        );
        draw_text(
            &info,
            10.0,
            self.maze.grid.height as f32 * self.cell_size() + 20.0,
            20.0,
            WHITE,
        );
    }

    fn fill_cell(&self, cell: Cell, color: Color) {
        let cell_size = self.cell_size();
        draw_rectangle(
            cell.x as f32 * cell_size,
            cell.y as f32 * cell_size,
            cell_size - 1.0,
            cell_size - 1.0,
            color,
        );
    }

    fn copy_to_clipboard(&self) {
        let ascii = self.maze.to_ascii();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&ascii) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Maze copied to clipboard!");
                    // Keep clipboard alive for a moment to ensure clipboard
                    // managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }
}

#[macroquad::main("RustMaze - Maze Generator and Solver")]
async fn main() {
    let config = Config::load();
    let mut app = App::new(config);

    loop {
        app.update();

        if is_key_pressed(KeyCode::C) {
            app.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::P) {
            app.event_log.print();
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.draw();

        next_frame().await
    }

    if app.config.logging.enable_event_log {
        if let Err(e) = app.event_log.save_to_file(&app.config.logging.event_log_path) {
            eprintln!("Failed to write event log: {}", e);
        }
    }
    println!("{}", app.event_log.summary());
}

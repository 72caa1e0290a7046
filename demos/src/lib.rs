//! Terminal front end for the pathviz search engine.
//!
//! This is the presentation collaborator: it builds a board with random
//! walls, maps cell states to terminal colors, and drives a search with an
//! observer that redraws after every step and cancels on `q` or `Esc`.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use rand::Rng;

use pathviz_core::{Board, CellState, EditError, Grid, GridConfig, Pos};
use pathviz_search::{Algorithm, Flow, Observer, Outcome, ParseAlgorithmError, SearchError, Step};

pub const USAGE: &str = "\
Usage: pathviz [options]

  --size N           side length of the square grid (default 40)
  --algorithm NAME   bfs | dijkstra | astar, or 1 | 2 | 3 (default astar)
  --walls FRACTION   chance of each cell being a wall, 0.0-0.9 (default 0.3)
  --seed N           random seed for the wall layout (default 42)
  --start ROW,COL    start cell (default: random free cell)
  --end ROW,COL      end cell (default: random free cell)
  --delay MS         pause between frames (default 10)
  --no-animate       run without drawing frames, print the result only

While animating press q or Esc to stop the search.";

// Colours
const COL_FREE: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const COL_WALL: Color = Color::Rgb { r: 30, g: 63, b: 102 };
const COL_START: Color = Color::Rgb { r: 172, g: 223, b: 135 };
const COL_END: Color = Color::Rgb { r: 250, g: 107, b: 132 };
const COL_FRONTIER: Color = Color::Rgb { r: 169, g: 238, b: 209 };
const COL_VISITED: Color = Color::Rgb { r: 143, g: 221, b: 223 };
const COL_PATH: Color = Color::Rgb { r: 255, g: 255, b: 0 };

/// Terminal color for a cell state.
pub fn palette(state: CellState) -> Color {
    match state {
        CellState::Free => COL_FREE,
        CellState::Wall => COL_WALL,
        CellState::Start => COL_START,
        CellState::End => COL_END,
        CellState::Frontier => COL_FRONTIER,
        CellState::Visited => COL_VISITED,
        CellState::Path => COL_PATH,
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Demo settings, filled from command-line flags.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub grid: GridConfig,
    pub algorithm: Algorithm,
    pub wall_density: f64,
    pub seed: u64,
    pub start: Option<Pos>,
    pub end: Option<Pos>,
    pub frame_delay: Duration,
    pub animate: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            algorithm: Algorithm::default(),
            wall_density: 0.3,
            seed: 42,
            start: None,
            end: None,
            frame_delay: Duration::from_millis(10),
            animate: true,
        }
    }
}

/// Errors from command-line parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `--help` was given.
    HelpRequested,
    UnknownFlag(String),
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    Algorithm(ParseAlgorithmError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HelpRequested => f.write_str(USAGE),
            Self::UnknownFlag(s) => write!(f, "unknown option {s}"),
            Self::MissingValue(s) => write!(f, "option {s} needs a value"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value {value:?} for {flag}"),
            Self::Algorithm(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ParseAlgorithmError> for ConfigError {
    fn from(e: ParseAlgorithmError) -> Self {
        Self::Algorithm(e)
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn parse_pos(flag: &str, value: &str) -> Result<Pos, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    };
    let (r, c) = value.split_once(',').ok_or_else(invalid)?;
    let row = r.trim().parse().map_err(|_| invalid())?;
    let col = c.trim().parse().map_err(|_| invalid())?;
    Ok(Pos::new(row, col))
}

impl DemoConfig {
    /// Parse `--flag value` pairs (program name already stripped).
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cfg = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(flag) = args.next() {
            if flag == "--help" || flag == "-h" {
                return Err(ConfigError::HelpRequested);
            }
            if flag == "--no-animate" {
                cfg.animate = false;
                continue;
            }
            let known = [
                "--size",
                "--algorithm",
                "--walls",
                "--seed",
                "--start",
                "--end",
                "--delay",
            ];
            if !known.contains(&flag.as_str()) {
                return Err(ConfigError::UnknownFlag(flag));
            }
            let value = args
                .next()
                .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;
            match flag.as_str() {
                "--size" => {
                    let size: i32 = parse_value(&flag, &value)?;
                    if size < 2 {
                        return Err(ConfigError::InvalidValue { flag, value });
                    }
                    cfg.grid.size = size;
                }
                "--algorithm" => cfg.algorithm = value.parse()?,
                "--walls" => {
                    let d: f64 = parse_value(&flag, &value)?;
                    if !(0.0..=0.9).contains(&d) {
                        return Err(ConfigError::InvalidValue { flag, value });
                    }
                    cfg.wall_density = d;
                }
                "--seed" => cfg.seed = parse_value(&flag, &value)?,
                "--start" => cfg.start = Some(parse_pos(&flag, &value)?),
                "--end" => cfg.end = Some(parse_pos(&flag, &value)?),
                _ => cfg.frame_delay = Duration::from_millis(parse_value(&flag, &value)?),
            }
        }
        Ok(cfg)
    }
}

// ---------------------------------------------------------------------------
// Board setup
// ---------------------------------------------------------------------------

fn random_cell<R: Rng>(board: &Board, rng: &mut R, taken: Option<Pos>) -> Pos {
    let size = board.grid().size();
    loop {
        let p = Pos::new(rng.random_range(0..size), rng.random_range(0..size));
        if Some(p) != taken {
            return p;
        }
    }
}

/// Build a board with endpoints placed first and walls scattered over the
/// remaining cells.
pub fn build_board<R: Rng>(cfg: &DemoConfig, rng: &mut R) -> Result<Board, EditError> {
    let mut board = Board::new(&cfg.grid);
    let start = match cfg.start {
        Some(p) => p,
        None => random_cell(&board, rng, cfg.end),
    };
    let end = match cfg.end {
        Some(p) if p != start => p,
        _ => random_cell(&board, rng, Some(start)),
    };
    board.paint(start)?;
    board.paint(end)?;
    let walls = scatter_walls(&mut board, cfg.wall_density, rng);
    log::debug!("board: start {start}, end {end}, {walls} walls");
    Ok(board)
}

/// Turn each Free cell into a wall with probability `density`. Returns the
/// number of walls placed.
pub fn scatter_walls<R: Rng>(board: &mut Board, density: f64, rng: &mut R) -> usize {
    let free: Vec<Pos> = board.grid().positions(CellState::Free).collect();
    let mut placed = 0;
    for p in free {
        if rng.random_bool(density) && board.paint(p) == Ok(Some(CellState::Wall)) {
            placed += 1;
        }
    }
    placed
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw `grid` at the top-left of the terminal, two columns per cell,
/// followed by a status line.
pub fn draw<W: Write>(out: &mut W, grid: &Grid, status: &str) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0))?;
    let size = grid.size().max(0) as usize;
    for (i, cell) in grid.iter().enumerate() {
        queue!(out, SetBackgroundColor(palette(cell.state())), Print("  "))?;
        if size > 0 && (i + 1) % size == 0 {
            queue!(out, ResetColor, Print("\r\n"))?;
        }
    }
    queue!(
        out,
        ResetColor,
        terminal::Clear(ClearType::CurrentLine),
        Print(status)
    )?;
    out.flush()
}

/// An observer that redraws the grid after every step.
///
/// With key polling enabled it waits up to the frame delay for input and
/// cancels on `q` or `Esc`; otherwise it just sleeps. An I/O error while
/// drawing also cancels the search and is kept for the caller.
pub struct TerminalView<W: Write> {
    out: W,
    title: &'static str,
    delay: Duration,
    poll_keys: bool,
    frames: usize,
    error: Option<io::Error>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, algorithm: Algorithm, delay: Duration) -> Self {
        Self {
            out,
            title: algorithm.title(),
            delay,
            poll_keys: false,
            frames: 0,
            error: None,
        }
    }

    /// Read the keyboard between frames.
    pub fn with_keys(mut self, enabled: bool) -> Self {
        self.poll_keys = enabled;
        self
    }

    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The drawing error that stopped the search, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn quit_requested(&self) -> io::Result<bool> {
        if !self.poll_keys {
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            return Ok(false);
        }
        if !event::poll(self.delay)? {
            return Ok(false);
        }
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn frame(&mut self, step: Step, grid: &Grid) -> io::Result<Flow> {
        self.frames += 1;
        let status = match step {
            Step::Expanded(p) => format!("{}: expanded {p}  (q to stop)", self.title),
            Step::Path(p) => format!("{}: path {p}", self.title),
        };
        draw(&mut self.out, grid, &status)?;
        if self.quit_requested()? {
            return Ok(Flow::Cancel);
        }
        Ok(Flow::Continue)
    }
}

impl<W: Write> Observer for TerminalView<W> {
    fn observe(&mut self, step: Step, grid: &Grid) -> Flow {
        match self.frame(step, grid) {
            Ok(flow) => flow,
            Err(e) => {
                log::warn!("drawing failed: {e}");
                self.error = Some(e);
                Flow::Cancel
            }
        }
    }
}

/// Run the configured search on `board` inside the alternate screen,
/// restoring the terminal afterwards.
pub fn animate(cfg: &DemoConfig, board: &mut Board) -> Result<Outcome, Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All)
    )?;

    let mut view = TerminalView::new(io::stdout(), cfg.algorithm, cfg.frame_delay).with_keys(true);
    let result = cfg.algorithm.run_board(board, &mut view);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Some(e) = view.take_error() {
        return Err(e.into());
    }
    log::debug!("animated {} frames", view.frames());
    Ok(result?)
}

/// One-line summary of a finished search.
pub fn summary(algorithm: Algorithm, outcome: &Result<Outcome, SearchError>) -> String {
    match outcome {
        Ok(Outcome::Found(path)) => format!(
            "{}: path of {} steps ({} cells)",
            algorithm.title(),
            path.cost(),
            path.len()
        ),
        Ok(Outcome::Unreachable) => format!("{}: no path exists", algorithm.title()),
        Ok(Outcome::Cancelled) => format!("{}: stopped", algorithm.title()),
        Err(e) => format!("{}: {e}", algorithm.title()),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn default_config() {
        let cfg = DemoConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(cfg, DemoConfig::default());
        assert_eq!(cfg.grid.size, 40);
        assert!(cfg.animate);
    }

    #[test]
    fn parse_all_flags() {
        let cfg = DemoConfig::from_args([
            "--size", "12", "--algorithm", "1", "--walls", "0.2", "--seed", "9", "--start",
            "0,0", "--end", "11, 11", "--delay", "0", "--no-animate",
        ])
        .unwrap();
        assert_eq!(cfg.grid.size, 12);
        assert_eq!(cfg.algorithm, Algorithm::Bfs);
        assert_eq!(cfg.wall_density, 0.2);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.start, Some(Pos::new(0, 0)));
        assert_eq!(cfg.end, Some(Pos::new(11, 11)));
        assert_eq!(cfg.frame_delay, Duration::ZERO);
        assert!(!cfg.animate);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            DemoConfig::from_args(["--help"]),
            Err(ConfigError::HelpRequested)
        );
        assert_eq!(
            DemoConfig::from_args(["--bogus"]),
            Err(ConfigError::UnknownFlag("--bogus".into()))
        );
        assert_eq!(
            DemoConfig::from_args(["--size"]),
            Err(ConfigError::MissingValue("--size".into()))
        );
        assert!(matches!(
            DemoConfig::from_args(["--walls", "1.5"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            DemoConfig::from_args(["--start", "3"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            DemoConfig::from_args(["--algorithm", "greedy"]),
            Err(ConfigError::Algorithm(_))
        ));
    }

    #[test]
    fn board_has_one_start_and_end() {
        let cfg = DemoConfig {
            grid: GridConfig { size: 15 },
            wall_density: 0.5,
            ..DemoConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let board = build_board(&cfg, &mut rng).unwrap();
        assert!(board.ready());
        assert_ne!(board.start(), board.end());
        assert_eq!(board.grid().count(CellState::Start), 1);
        assert_eq!(board.grid().count(CellState::End), 1);
        assert!(board.grid().count(CellState::Wall) > 0);
    }

    #[test]
    fn board_respects_given_endpoints() {
        let cfg = DemoConfig {
            grid: GridConfig { size: 8 },
            start: Some(Pos::new(1, 2)),
            end: Some(Pos::new(6, 5)),
            ..DemoConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let board = build_board(&cfg, &mut rng).unwrap();
        assert_eq!(board.start(), Some(Pos::new(1, 2)));
        assert_eq!(board.end(), Some(Pos::new(6, 5)));
    }

    #[test]
    fn board_rejects_out_of_range_start() {
        let cfg = DemoConfig {
            grid: GridConfig { size: 4 },
            start: Some(Pos::new(9, 9)),
            ..DemoConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            build_board(&cfg, &mut rng).err(),
            Some(EditError::OutOfBounds(Pos::new(9, 9)))
        );
    }

    #[test]
    fn palette_is_distinct() {
        for a in CellState::ALL {
            for b in CellState::ALL {
                if a != b {
                    assert_ne!(palette(a), palette(b), "{a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn view_draws_every_frame_into_buffer() {
        let cfg = DemoConfig {
            grid: GridConfig { size: 6 },
            wall_density: 0.0,
            start: Some(Pos::new(0, 0)),
            end: Some(Pos::new(5, 5)),
            ..DemoConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = build_board(&cfg, &mut rng).unwrap();
        let mut view = TerminalView::new(Vec::new(), Algorithm::AStar, Duration::ZERO);
        let out = Algorithm::AStar.run_board(&mut board, &mut view);
        assert_eq!(out.as_ref().map(Outcome::is_found), Ok(true));
        // expansions plus the nine interior path cells
        assert!(view.frames() > 9);
        assert!(view.take_error().is_none());
        let text = String::from_utf8_lossy(&view.out).into_owned();
        assert!(text.contains("A* Search: path"));
        assert!(summary(Algorithm::AStar, &out).contains("10 steps"));
    }

    #[test]
    fn summaries() {
        assert_eq!(
            summary(Algorithm::Bfs, &Ok(Outcome::Unreachable)),
            "Breadth-first Search: no path exists"
        );
        assert_eq!(
            summary(Algorithm::Dijkstra, &Ok(Outcome::Cancelled)),
            "Dijkstra's Algorithm: stopped"
        );
        assert!(summary(Algorithm::AStar, &Err(SearchError::StaleNeighbors)).contains("stale"));
    }
}

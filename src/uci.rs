// src/uci.rs
//
// UCI (Universal Chess Interface) protocol handler: one struct owning
// the game state and the searcher, dispatching on the first token of
// each input line.

use shakmaty::uci::UciMove;
use shakmaty::{fen::Fen, CastlingMode, Color, EnPassantMode, Position};
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

use crate::constants::{DEFAULT_MOVES_TO_GO, DEFAULT_TIME_BUDGET_MS};
use crate::game::evaluation;
use crate::game::search::tt::TranspositionTable;
use crate::game::search::window::sign;
use crate::game::search::{SearchConfig, Searcher};
use crate::game::{perft, GameState};

#[derive(Debug, Error)]
pub enum UciError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid fen: {0}")]
    InvalidFen(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("missing or invalid {0} value")]
    InvalidParameter(&'static str),
}

pub struct UciHandler {
    game: GameState,
    searcher: Searcher,
    max_depth: i32,
}

impl UciHandler {
    pub fn new(config: SearchConfig, hash_mb: Option<usize>, max_depth: i32) -> Self {
        let mut searcher = Searcher::new(config);
        searcher.set_verbose(true);
        if let Some(megabytes) = hash_mb {
            searcher.tt = TranspositionTable::from_megabytes(megabytes);
        }
        Self {
            game: GameState::new(),
            searcher,
            max_depth,
        }
    }

    /// Handles one input line. Returns true when the engine should
    /// quit. Bad input produces a diagnostic, never a crash.
    pub fn handle_command(&mut self, line: &str) -> bool {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let result = match parts.first() {
            None => Ok(()),
            Some(&"uci") => {
                self.handle_uci();
                Ok(())
            }
            Some(&"isready") => {
                println!("readyok");
                Ok(())
            }
            Some(&"ucinewgame") => {
                self.handle_new_game();
                Ok(())
            }
            Some(&"setoption") => self.handle_setoption(&parts[1..]),
            Some(&"position") => self.handle_position(&parts[1..]),
            Some(&"go") => self.handle_go(&parts[1..]),
            Some(&"perft") => self.handle_perft(&parts[1..]),
            Some(&"print") => {
                self.handle_print();
                Ok(())
            }
            Some(&"eval") => {
                self.handle_eval();
                Ok(())
            }
            Some(&"ischeck") => {
                println!("{}", self.game.chess.is_check());
                Ok(())
            }
            Some(&"showallmoves") => {
                self.handle_show_all_moves();
                Ok(())
            }
            Some(&"quit") => return true,
            Some(other) => Err(UciError::UnknownCommand((*other).to_string())),
        };
        if let Err(error) = result {
            println!("info string error: {error}");
        }
        false
    }

    fn handle_uci(&self) {
        println!("id name Griddle {}", env!("CARGO_PKG_VERSION"));
        println!("id author the Griddle developers");
        println!();
        println!("option name Hash type spin default 64 min 1 max 4096");
        println!("uciok");
    }

    fn handle_new_game(&mut self) {
        self.searcher.reset();
        self.game = GameState::new();
    }

    fn handle_setoption(&mut self, parts: &[&str]) -> Result<(), UciError> {
        let name_index = parts.iter().position(|&p| p == "name");
        let value_index = parts.iter().position(|&p| p == "value");
        if let (Some(ni), Some(vi)) = (name_index, value_index) {
            if ni >= vi {
                return Err(UciError::InvalidParameter("setoption"));
            }
            let name = parts[ni + 1..vi].join(" ");
            let value = parts.get(vi + 1).copied().unwrap_or("");
            if name == "Hash" {
                let megabytes: usize = value
                    .parse()
                    .map_err(|_| UciError::InvalidParameter("Hash"))?;
                self.searcher.tt = TranspositionTable::from_megabytes(megabytes);
            }
        }
        Ok(())
    }

    fn handle_position(&mut self, parts: &[&str]) -> Result<(), UciError> {
        let mut game = match parts.first() {
            Some(&"startpos") => GameState::new(),
            Some(&"fen") => {
                let fen_fields: Vec<&str> = parts
                    .iter()
                    .skip(1)
                    .take_while(|&&p| p != "moves")
                    .copied()
                    .collect();
                let fen_string = fen_fields.join(" ");
                GameState::from_fen(&fen_string).ok_or(UciError::InvalidFen(fen_string))?
            }
            _ => return Err(UciError::InvalidParameter("position")),
        };

        if let Some(moves_index) = parts.iter().position(|&p| p == "moves") {
            for move_str in &parts[moves_index + 1..] {
                let uci: UciMove = move_str
                    .parse()
                    .map_err(|_| UciError::IllegalMove((*move_str).to_string()))?;
                if !game.make_move(&uci) {
                    return Err(UciError::IllegalMove((*move_str).to_string()));
                }
            }
        }

        // Committed only after the whole command parsed and replayed.
        self.game = game;
        Ok(())
    }

    fn handle_go(&mut self, parts: &[&str]) -> Result<(), UciError> {
        let mut wtime: Option<u64> = None;
        let mut btime: Option<u64> = None;
        let mut movestogo: Option<u64> = None;
        let mut movetime: Option<u64> = None;
        let mut depth: Option<i32> = None;
        let mut nodes: Option<u64> = None;

        let mut i = 0;
        while i < parts.len() {
            match parts[i] {
                "wtime" => {
                    wtime = Some(parse_value(parts.get(i + 1), "wtime")?);
                    i += 2;
                }
                "btime" => {
                    btime = Some(parse_value(parts.get(i + 1), "btime")?);
                    i += 2;
                }
                "movestogo" => {
                    movestogo = Some(parse_value(parts.get(i + 1), "movestogo")?);
                    i += 2;
                }
                "movetime" => {
                    movetime = Some(parse_value(parts.get(i + 1), "movetime")?);
                    i += 2;
                }
                "depth" => {
                    depth = Some(parse_value(parts.get(i + 1), "depth")?);
                    i += 2;
                }
                "nodes" => {
                    nodes = Some(parse_value(parts.get(i + 1), "nodes")?);
                    i += 2;
                }
                _ => i += 1,
            }
        }

        let side_time = match self.game.chess.turn() {
            Color::White => wtime,
            Color::Black => btime,
        };
        let budget_ms = if let Some(movetime) = movetime {
            movetime.max(1)
        } else if let Some(remaining) = side_time {
            (remaining / (3 * movestogo.unwrap_or(DEFAULT_MOVES_TO_GO))).max(1)
        } else {
            DEFAULT_TIME_BUDGET_MS
        };

        self.searcher.draw_set = self.game.draw_set().clone();
        let best = self.searcher.find_best_move(
            &self.game.chess,
            budget_ms,
            nodes.unwrap_or(u64::MAX),
            depth.unwrap_or(self.max_depth),
        );
        match best {
            Some(m) => println!("bestmove {}", m.to_uci(CastlingMode::Standard)),
            None => println!("bestmove 0000"),
        }
        Ok(())
    }

    fn handle_perft(&self, parts: &[&str]) -> Result<(), UciError> {
        let depth: u32 = parse_value(parts.first(), "perft depth")?;
        let started = Instant::now();
        let nodes = perft(&self.game.chess, depth);
        println!(
            "perft({depth}) = {nodes} in {} ms",
            started.elapsed().as_millis()
        );
        Ok(())
    }

    fn handle_print(&self) {
        let fen = Fen::from_position(self.game.chess.clone(), EnPassantMode::Legal);
        println!("fen {fen}");
        let side = match self.game.chess.turn() {
            Color::White => "white",
            Color::Black => "black",
        };
        let check = if self.game.chess.is_check() {
            " (in check)"
        } else {
            ""
        };
        println!("{side} to move{check}");
    }

    fn handle_eval(&self) {
        let score = evaluation::evaluate(&self.game.chess);
        let relative = score as i32 * sign(self.game.chess.turn());
        println!("info string static eval {relative} cp (side to move)");
    }

    fn handle_show_all_moves(&self) {
        let moves = self
            .game
            .chess
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{moves}");
    }
}

fn parse_value<T: FromStr>(part: Option<&&str>, name: &'static str) -> Result<T, UciError> {
    part.and_then(|s| s.parse().ok())
        .ok_or(UciError::InvalidParameter(name))
}

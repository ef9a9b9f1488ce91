use std::io::{self, BufRead, Write};

use shakmaty::Position;

use crate::board::parse_promotion;
use crate::engine::evaluate;
use crate::session::GameSession;

const HELP: &str = "\
commands:
  <from><to>[q|r|b|n]   play a move, e.g. e2e4 or e7e8q (also: move e2e4)
  undo                  take back your last move and the engine reply
  new                   start a new game
  flip                  swap colors with the engine
  analyze               search the current position
  level <1-5>           set the engine difficulty
  show | d              print the board and status
  json                  print the session snapshot as JSON
  pgn                   print the game as PGN
  fen                   print the current FEN
  eval                  print the static evaluation
  help                  this text
  quit";

pub struct Console<W: Write> {
    session: GameSession,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(session: GameSession, out: W) -> Self {
        Console { session, out }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Starts the session and processes `input` until it ends or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.session.start();
        writeln!(
            self.out,
            "You play {:?} at {}. Type 'help' for commands.",
            self.session.player_color(),
            self.session.difficulty()
        )?;
        self.await_engine()?;
        self.out.flush()?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !self.handle_line(line)? {
                break;
            }
            self.out.flush()?;
        }
        Ok(())
    }

    /// Executes one command. Returns `false` on `quit`.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = parts.first() else {
            return Ok(true);
        };

        match first {
            "quit" | "exit" => return Ok(false),
            "help" => writeln!(self.out, "{HELP}")?,
            "move" => match parts.get(1) {
                Some(mv) => self.cmd_move(mv)?,
                None => writeln!(self.out, "usage: move <from><to>[promotion]")?,
            },
            "undo" => self.cmd_undo()?,
            "new" => self.cmd_new()?,
            "flip" => self.cmd_flip()?,
            "analyze" => self.cmd_analyze()?,
            "level" => self.cmd_level(parts.get(1).copied())?,
            "show" | "d" => self.cmd_show()?,
            "json" => self.cmd_json()?,
            "pgn" => write!(self.out, "{}", self.session.export_pgn())?,
            "fen" => writeln!(self.out, "{}", self.session.board().fen())?,
            "eval" => self.cmd_eval()?,
            other => self.cmd_move(other)?,
        }
        Ok(true)
    }

    fn cmd_move(&mut self, text: &str) -> io::Result<()> {
        let Some((from, to, promo)) = split_move(text) else {
            return writeln!(self.out, "unknown command or move: {text}");
        };
        let promotion = match promo.map(parse_promotion).transpose() {
            Ok(promotion) => promotion,
            Err(err) => return writeln!(self.out, "rejected: {err}"),
        };
        match self.session.try_move(from, to, promotion) {
            Ok(played) => {
                writeln!(self.out, "you: {}", played.san)?;
                self.await_engine()?;
                self.report_game_over()
            }
            Err(err) => writeln!(self.out, "rejected: {err}"),
        }
    }

    fn cmd_undo(&mut self) -> io::Result<()> {
        if self.session.undo_move() {
            writeln!(self.out, "took back two half-moves")?;
            self.await_engine()
        } else {
            writeln!(self.out, "nothing to undo")
        }
    }

    fn cmd_new(&mut self) -> io::Result<()> {
        self.session.reset_game();
        writeln!(self.out, "new game")?;
        self.await_engine()
    }

    fn cmd_flip(&mut self) -> io::Result<()> {
        self.session.flip_board();
        writeln!(self.out, "you now play {:?}", self.session.player_color())?;
        self.await_engine()?;
        self.report_game_over()
    }

    fn cmd_analyze(&mut self) -> io::Result<()> {
        match self.session.analyze_position() {
            Some(analysis) => {
                let best = if analysis.best_move.is_empty() {
                    "-"
                } else {
                    analysis.best_move.as_str()
                };
                writeln!(
                    self.out,
                    "analysis: {:+.2} best {} depth {}",
                    analysis.score, best, analysis.depth
                )
            }
            None => writeln!(self.out, "analysis unavailable"),
        }
    }

    fn cmd_level(&mut self, arg: Option<&str>) -> io::Result<()> {
        match arg.and_then(|s| s.parse::<u8>().ok()) {
            Some(level) => {
                let difficulty = self.session.set_difficulty(level);
                writeln!(self.out, "difficulty: {difficulty}")
            }
            None => writeln!(self.out, "difficulty: {}", self.session.difficulty()),
        }
    }

    fn cmd_show(&mut self) -> io::Result<()> {
        let view = self.session.view();
        writeln!(self.out, "\n{:?}", self.session.board().position().board())?;
        writeln!(self.out, "fen: {}", view.fen)?;
        if !view.move_history.is_empty() {
            writeln!(self.out, "moves: {}", view.move_history.join(" "))?;
        }
        if view.in_check {
            writeln!(self.out, "check")?;
        }
        writeln!(self.out, "{}", view.status_message)
    }

    fn cmd_json(&mut self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self.session.view()).map_err(io::Error::other)?;
        writeln!(self.out, "{json}")
    }

    fn cmd_eval(&mut self) -> io::Result<()> {
        let score = evaluate(self.session.board());
        writeln!(self.out, "evaluation: {score} cp (positive = White better)")?;
        writeln!(
            self.out,
            "{:?} to move",
            self.session.board().position().turn()
        )
    }

    /// Waits for a scheduled engine move and prints it.
    fn await_engine(&mut self) -> io::Result<()> {
        if !self.session.is_thinking() {
            return Ok(());
        }
        writeln!(self.out, "engine is thinking...")?;
        self.out.flush()?;
        if self.session.wait_for_engine() {
            if let Some(analysis) = self.session.analysis() {
                writeln!(
                    self.out,
                    "engine: {} ({:+.2}, depth {})",
                    analysis.best_move, analysis.score, analysis.depth
                )?;
            }
        }
        Ok(())
    }

    fn report_game_over(&mut self) -> io::Result<()> {
        let view = self.session.view();
        if view.game_over {
            writeln!(self.out, "game over: {}", view.status_message)?;
        }
        Ok(())
    }
}

/// Splits `e2e4` / `e7e8q` into squares and an optional promotion letter.
fn split_move(text: &str) -> Option<(&str, &str, Option<char>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return None;
    }
    let (from, rest) = text.split_at(2);
    let (to, promo) = rest.split_at(2);
    Some((from, to, promo.chars().next()))
}

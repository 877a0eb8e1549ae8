/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{self, BufRead},
    time::Instant,
};

use anyhow::{anyhow, bail, Context, Result};

use crate::{
    perft, splitperft, AttackTables, Board, Color, Evaluator, GenerationMode, Move,
    MoveGenerator, MoveList, ShellCommand, Square, SwapScratch, FEN_KIWIPETE, FEN_STARTPOS,
};

/// What the shell should do after executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A line-driven shell for inspecting move generation and evaluation.
pub struct Shell {
    /// The current position.
    board: Board,

    tables: &'static AttackTables,

    evaluator: Evaluator<'static>,

    swap: SwapScratch,
}

impl Shell {
    /// Constructs a new [`Shell`] on the starting position.
    pub fn new() -> Self {
        let tables = AttackTables::get();
        Self {
            board: Board::default(),
            tables,
            evaluator: Evaluator::new(tables),
            swap: SwapScratch::new(),
        }
    }

    /// Returns a string of the shell's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reads commands from `stdin`, one per line, until `exit` or the end of input.
    ///
    /// Errors from individual commands are printed and do not stop the loop.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();

        for line in stdin.lock().lines() {
            let line = line.context("Failed to read line from stdin")?;

            // Ignore empty lines
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<ShellCommand>() {
                Ok(cmd) => match self.execute(cmd) {
                    Ok(Flow::Exit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("Error: {e}"),
                },

                Err(err) => eprintln!("{err}"),
            }
        }

        Ok(())
    }

    /// Execute a single [`ShellCommand`].
    pub fn execute(&mut self, cmd: ShellCommand) -> Result<Flow> {
        match cmd {
            ShellCommand::Attackers { square } => self.attackers(square),

            ShellCommand::Display => println!("{}", self.board),

            ShellCommand::Eval => {
                self.evaluator.set_root(&self.board);
                println!("{}", self.evaluator.evaluate(&self.board));
            }

            ShellCommand::Exit => return Ok(Flow::Exit),

            ShellCommand::Fen => println!("{}", self.board.to_fen()),

            ShellCommand::Make { mv_string } => self.make_move(&mv_string)?,

            ShellCommand::Moves { mode, pseudo, sort } => {
                let mut moves = self.moves(mode, pseudo)
                    .into_iter()
                    .map(|mv| mv.to_string())
                    .collect::<Vec<_>>();

                if sort {
                    moves.sort();
                }

                // If there are none, print "(none)"
                if moves.is_empty() {
                    println!("(none)");
                } else {
                    println!("{}", moves.join(", "));
                }
            }

            ShellCommand::Perft { depth } => {
                self.timed(depth, |board, tables| perft(board, tables, depth));
            }

            ShellCommand::Position { fen } => self.position(&fen.join(" "))?,

            ShellCommand::See { from, to } => println!("{}", self.see(from, to)?),

            ShellCommand::Splitperft { depth } => {
                self.timed(depth, |board, tables| splitperft(board, tables, depth));
            }
        }

        Ok(Flow::Continue)
    }

    /// Replaces the current position with `startpos`, `kiwipete`, or a FEN string.
    pub fn position(&mut self, fen: &str) -> Result<()> {
        let fen = match fen.trim() {
            "startpos" => FEN_STARTPOS,
            "kiwipete" => FEN_KIWIPETE,
            fen => fen,
        };

        self.board = Board::from_fen(fen).with_context(|| format!("Invalid position {fen:?}"))?;
        self.evaluator.clear_root();
        Ok(())
    }

    /// Plays `uci` on the current position, provided it is legal.
    pub fn make_move(&mut self, uci: &str) -> Result<()> {
        let mv = Move::from_uci(&self.board, self.tables, uci)?;
        if !self.board.is_legal_after(self.tables, mv) {
            bail!("{mv} leaves the {} King in check", self.board.side_to_move().name());
        }

        self.board.make_move(mv);
        Ok(())
    }

    /// The moves `mode` generates on the current position, optionally filtered for legality.
    pub fn moves(&self, mode: GenerationMode, pseudo: bool) -> MoveList {
        let generator = MoveGenerator::new(self.tables);
        let mut moves = MoveList::new();

        match mode {
            GenerationMode::Full => generator.generate_moves(&self.board, &mut moves),
            GenerationMode::Captures => generator.generate_captures(&self.board, &mut moves),
            GenerationMode::Qmoves => generator.generate_qmoves(&self.board, &mut moves),
            GenerationMode::Evasions => generator.generate_evasions(&self.board, &mut moves),
        };

        if !pseudo {
            moves.retain(|mv| self.board.is_legal_after(self.tables, *mv));
        }

        moves
    }

    /// Exchange score of moving the piece on `from` to `to`, from the mover's perspective.
    pub fn see(&mut self, from: Square, to: Square) -> Result<i32> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or_else(|| anyhow!("There is no piece on {from}"))?;
        let taken = self
            .board
            .piece_at(to)
            .map_or(0, |victim| victim.kind().exchange_value());

        Ok(self.swap.swap(
            self.tables,
            &self.board,
            from,
            to,
            piece.color(),
            piece.kind().exchange_value(),
            taken,
        ))
    }

    fn attackers(&self, square: Square) {
        for color in Color::all() {
            let attackers = self.tables.all_attackers(&self.board, square, color);
            let squares = attackers
                .into_iter()
                .map(|square| square.to_string())
                .collect::<Vec<_>>();
            println!("{}: {}", color.name(), squares.join(", "));
        }

        let checking = self.board.side_to_move().opponent();
        let vectors = self.tables.attack_vectors_to(&self.board, square, checking);
        println!("{} attack vectors:\n{vectors}", checking.name());
    }

    /// Runs a perft function, printing its node count and speed.
    fn timed(&self, depth: usize, count: impl FnOnce(&Board, &AttackTables) -> u64) {
        let now = Instant::now();
        let nodes = count(&self.board, self.tables);
        let elapsed = now.elapsed();

        let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
        println!("\nDepth {depth}: {nodes} nodes in {elapsed:.1?} ({nps:.0} nodes/sec)");
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(shell: &mut Shell, line: &str) -> Result<Flow> {
        shell.execute(line.parse()?)
    }

    #[test]
    fn test_position_and_make() {
        let mut shell = Shell::new();
        run(&mut shell, "position kiwipete").unwrap();
        assert_eq!(shell.board().to_fen(), FEN_KIWIPETE);

        run(&mut shell, "make e1g1").unwrap();
        assert_eq!(shell.board().side_to_move(), Color::Black);

        assert!(run(&mut shell, "position 8/8/8").is_err());
        assert!(run(&mut shell, "make e2e4").is_err());
        assert_eq!(run(&mut shell, "exit").unwrap(), Flow::Exit);
    }

    #[test]
    fn test_make_rejects_illegal_moves() {
        let mut shell = Shell::new();
        run(&mut shell, "position 4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert!(run(&mut shell, "make e1d2").is_err());
        assert!(run(&mut shell, "make e1e2").is_ok());
    }

    #[test]
    fn test_moves_by_mode() {
        let mut shell = Shell::new();
        assert_eq!(shell.moves(GenerationMode::Full, false).len(), 20);
        assert_eq!(shell.moves(GenerationMode::Captures, false).len(), 0);

        run(&mut shell, "position r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(shell.moves(GenerationMode::Qmoves, true).len(), 2);
    }

    #[test]
    fn test_see_command() {
        let mut shell = Shell::new();
        run(&mut shell, "position 4k3/8/3p4/4p3/8/8/4Q3/4K3 w - - 0 1").unwrap();
        assert_eq!(shell.see(Square::E2, Square::E5).unwrap(), -800);
        assert!(shell.see(Square::A1, Square::A2).is_err());
    }
}

/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::Square;

/// Which move generator the `moves` command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GenerationMode {
    /// Every move.
    #[default]
    Full,

    /// Captures only, with every promotion kind.
    Captures,

    /// Captures and Queen promotions.
    #[value(alias = "q")]
    Qmoves,

    /// Moves out of check. Only meaningful while in check.
    Evasions,
}

/// A command to be sent to the shell.
#[derive(Debug, Clone, Parser)]
#[command(multicall = true, about, rename_all = "lower")]
pub enum ShellCommand {
    /// Print the attackers of both colors on the provided square.
    Attackers { square: Square },

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print an evaluation of the current position, term by term.
    Eval,

    /// Quit the shell.
    #[command(alias = "quit")]
    Exit,

    /// Generate and print a FEN string for the current position.
    Fen,

    /// Apply the provided move to the board, if it is legal.
    #[command(alias = "move")]
    Make { mv_string: String },

    /// Shows the moves of the selected generator in the current position.
    Moves {
        #[arg(short, long, value_enum, default_value_t)]
        mode: GenerationMode,

        /// If set, moves that leave the King in check are shown too.
        #[arg(short, long, default_value = "false")]
        pseudo: bool,

        /// If set, moves will be sorted in alphabetical order.
        ///
        /// By default, moves are printed in generation order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Set up a new position: `startpos`, `kiwipete`, or a FEN string.
    #[command(alias = "pos")]
    Position {
        #[arg(num_args = 1.., required = true)]
        fen: Vec<String>,
    },

    /// Static exchange evaluation of moving the piece on `from` to `to`.
    See { from: Square, to: Square },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },
}

impl FromStr for ShellCommand {
    type Err = clap::Error;

    /// Attempt to parse a [`ShellCommand`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!("d".parse::<ShellCommand>(), Ok(ShellCommand::Display)));
        assert!(matches!(
            "see e2 e4".parse::<ShellCommand>(),
            Ok(ShellCommand::See {
                from: Square::E2,
                to: Square::E4
            })
        ));
        assert!(matches!(
            "moves --mode qmoves".parse::<ShellCommand>(),
            Ok(ShellCommand::Moves {
                mode: GenerationMode::Qmoves,
                pseudo: false,
                sort: false
            })
        ));
        assert!(matches!(
            "moves".parse::<ShellCommand>(),
            Ok(ShellCommand::Moves {
                mode: GenerationMode::Full,
                ..
            })
        ));
        assert!(matches!("perft 3".parse::<ShellCommand>(), Ok(ShellCommand::Perft { depth: 3 })));

        let input = "position 8/8/8/8/8/8/8/K6k w - - 0 1";
        let Ok(ShellCommand::Position { fen }) = input.parse::<ShellCommand>() else {
            panic!("position did not parse");
        };
        assert_eq!(fen.join(" "), "8/8/8/8/8/8/8/K6k w - - 0 1");
    }

    #[test]
    fn test_reject_bad_input() {
        assert!("see e2".parse::<ShellCommand>().is_err());
        assert!("attackers z9".parse::<ShellCommand>().is_err());
        assert!("frobnicate".parse::<ShellCommand>().is_err());
    }
}

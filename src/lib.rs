/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, attack tables, move generation, and attack queries.
mod board;

/// Commands understood by the interactive shell.
mod cli;

/// Evaluation of chess positions.
mod eval;

/// The interactive shell that executes commands against a position.
mod shell;

/// Misc utility functions, constants, and types.
mod utils;

pub use board::*;
pub use cli::*;
pub use eval::*;
pub use shell::*;
pub use utils::*;

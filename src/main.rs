/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{error::ErrorKind, Parser};
use tadpole::{Flow, Shell, ShellCommand};

fn main() {
    let mut shell = Shell::new();

    // Skip the executable name
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    // Commands given on the command line run before the shell starts, longest prefix first
    let mut arg_idx = args.len();
    let mut parsed_idx = 0;
    while parsed_idx < arg_idx {
        let slice = &args[parsed_idx..arg_idx];

        match ShellCommand::try_parse_from(slice) {
            Ok(cmd) => {
                match shell.execute(cmd) {
                    Ok(Flow::Exit) => return,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("Error: {e}"),
                }
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // `--help` and `--version` are both "error" cases according to Clap
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                println!("{e}");
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // Nothing parses starting here, so skip the offending argument
            Err(e) if arg_idx == parsed_idx + 1 => {
                eprintln!("{e}");
                parsed_idx += 1;
                arg_idx = args.len();
            }

            Err(_) => arg_idx -= 1,
        }
    }

    if let Err(e) = shell.run() {
        eprintln!("{} encountered an error: {e}", shell.name());
    }
}

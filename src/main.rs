// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;

use macro_lightning::MacroLightning;

fn main() {
    // Run macro-lightning, only returning an error if one happened. If one did,
    // print it and exit with a non-zero code.
    if let Err(e) = MacroLightning::parse().run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

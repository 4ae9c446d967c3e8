//! rCompanion main entrypoint.

use rcompanion::run;
use rcompanion::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

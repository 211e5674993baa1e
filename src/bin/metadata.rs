use std::process::ExitCode;

use bevy_isstrack::metadata::FrameEmbed;

// prints the frame embed descriptor for the page's meta tag
fn main() -> ExitCode {
    match FrameEmbed::default().render_escaped() {
        Ok(escaped) => {
            println!("{escaped}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing metadata: {e}");
            ExitCode::FAILURE
        }
    }
}

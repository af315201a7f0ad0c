use std::process::ExitCode;

fn main() -> ExitCode {
    match xau_dxy_bot::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

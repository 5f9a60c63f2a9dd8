use std::process::ExitCode;

fn main() -> ExitCode {
    clinica_lib::run()
}

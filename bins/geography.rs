use std::process::ExitCode;

use server::ServiceKind;

fn main() -> ExitCode {
    server::bootstrap::run_blocking(ServiceKind::Geography)
}

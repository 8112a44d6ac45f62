//! Explain command - describe what the app shows for an error code.

use std::io::Write;

use common::catalog::{catalog, GENERIC_MESSAGE};
use common::{FailureExt, FailureResult, IntoFailure};
use domain::{Failure, FailureInfo, FailureKind};

use crate::cli::args::ExplainArgs;

/// Execute the explain command. Returns `Ok(false)` for an unknown code.
pub fn execute(args: &ExplainArgs, out: &mut impl Write) -> FailureResult<bool> {
    let code = args.code.trim().to_uppercase();

    let Some(kind) = kind_for_code(&code) else {
        tracing::debug!(code = %code, "Code not found in any table");
        writeln!(out, "{}: unknown code", code).into_failure()?;
        writeln!(out, "  message: {}", GENERIC_MESSAGE).into_failure()?;
        return Ok(false);
    };

    let failure = Failure::from_info(
        kind,
        FailureInfo {
            message: code.clone(),
            code: Some(code.clone()),
            original_error: None,
        },
    );
    write_explanation(&failure, args.attempts, out).into_failure()?;
    Ok(true)
}

/// The failure kind whose table lists `code`.
pub fn kind_for_code(code: &str) -> Option<FailureKind> {
    FailureKind::ALL
        .into_iter()
        .find(|kind| catalog(*kind).knows(code))
}

fn write_explanation(failure: &Failure, attempts: u32, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{} ({})", failure.code().unwrap_or_default(), failure.kind())?;
    writeln!(out, "  message: {}", failure.user_message())?;

    let recoverable = failure.is_recoverable();
    writeln!(out, "  recoverable: {}", if recoverable { "yes" } else { "no" })?;
    if recoverable {
        let delays: Vec<String> = (1..=attempts)
            .map(|n| format!("{:?}", failure.retry_delay(n)))
            .collect();
        writeln!(out, "  retry after: {}", delays.join(", "))?;
    }

    for suggestion in failure.recovery_suggestions() {
        writeln!(out, "  - {}", suggestion)?;
    }
    Ok(())
}

//! Validate command - check a JSON submission against one of the forms.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use common::{AppConfig, FailureExt, FailureResult, IntoFailure, SystemError};
use domain::forms;
use domain::{form_data_from_json, FormValidationResult};
use serde_json::{json, Value};

use crate::cli::args::ValidateArgs;

/// Execute the validate command. Returns `Ok(false)` when the form is invalid.
pub fn execute(args: &ValidateArgs, config: &AppConfig, out: &mut impl Write) -> FailureResult<bool> {
    execute_with_stdin(args, config, io::stdin().lock(), out)
}

/// Like [`execute`], reading `-` input from `stdin`.
pub fn execute_with_stdin(
    args: &ValidateArgs,
    config: &AppConfig,
    stdin: impl Read,
    out: &mut impl Write,
) -> FailureResult<bool> {
    let validator = forms::by_name_as_of(&args.form, config.validation_today)
        .ok_or_else(|| SystemError::invalid_argument(format!("unknown form '{}'", args.form)))
        .into_failure()?;

    let raw = read_input(&args.input, stdin).into_failure()?;
    let value: Value = serde_json::from_str(&raw).into_failure()?;
    let data = form_data_from_json(value).into_failure()?;

    tracing::info!(form = %args.form, fields = data.len(), "Validating submission");
    let result = validator.validate_form(&data);

    if args.json {
        render_json(&result, out).into_failure()?;
    } else {
        render_text(&args.form, &result, out).into_failure()?;
    }
    Ok(result.is_valid())
}

fn read_input(path: &Path, mut stdin: impl Read) -> io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        stdin.read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn render_text(form: &str, result: &FormValidationResult, out: &mut impl Write) -> io::Result<()> {
    let Some(failure) = result.to_failure() else {
        return writeln!(out, "{}: valid", form);
    };

    writeln!(out, "{}: invalid", form)?;
    for (field, message) in result.field_errors().iter() {
        writeln!(out, "  {}: {}", field, message)?;
    }
    for message in result.general_errors() {
        writeln!(out, "  form: {}", message)?;
    }
    for suggestion in failure.recovery_suggestions() {
        writeln!(out, "hint: {}", suggestion)?;
    }
    Ok(())
}

fn render_json(result: &FormValidationResult, out: &mut impl Write) -> io::Result<()> {
    let body = match result.to_failure() {
        None => json!({ "valid": true }),
        Some(failure) => json!({
            "valid": false,
            "failure": failure,
            "general_errors": result.general_errors(),
            "user_message": failure.user_message(),
        }),
    };
    serde_json::to_writer_pretty(&mut *out, &body)?;
    writeln!(out)
}

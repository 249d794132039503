use jsview_schema::GenerationError;
use serde_json::Value;

/// Exit code when only part of an example could be generated.
pub const EXIT_PARTIAL: u8 = 2;

pub fn to_json(value: &Value, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

pub fn print_generation_errors(errors: &[GenerationError]) {
    for error in errors {
        eprintln!("warning: {error}");
    }
}

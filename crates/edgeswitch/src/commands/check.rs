//! Connectivity self-test.

use edgeswitch_core::{ConnectionTestResult, ControllerConfig, Coordinator};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(result: &ConnectionTestResult) -> String {
    if result.success {
        return "✓ Connection OK".into();
    }
    let mut lines = vec!["✗ Connection failed".to_owned()];
    if let Some(ref kind) = result.error_kind {
        lines.push(format!("Kind:  {kind}"));
    }
    if let Some(ref message) = result.error_message {
        lines.push(format!("Error: {message}"));
    }
    lines.join("\n")
}

pub async fn handle(config: ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let result = match Coordinator::new(config) {
        Ok(coordinator) => {
            let result = coordinator.test_connection().await;
            coordinator.shutdown().await;
            result
        }
        Err(e) => ConnectionTestResult {
            success: false,
            error_message: Some(e.to_string()),
            error_kind: Some(e.failure_kind()),
        },
    };

    let out = output::render_single(&global.output, &result, detail)?;
    output::print_output(&out, global.quiet);

    match result.error_kind {
        Some(kind) if !result.success => Err(CliError::CheckFailed { kind }),
        _ => Ok(()),
    }
}

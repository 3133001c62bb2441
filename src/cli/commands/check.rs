use std::path::PathBuf;

use anyhow::Result;

use super::super::{
    args::{CommonArgs, OutputFormat},
    exit_status::ExitStatus,
    json, report,
};
use crate::core::AuditContext;

/// Audit `paths` and print the result in the requested format.
pub fn check(paths: &[PathBuf], common: &CommonArgs) -> Result<ExitStatus> {
    let ctx = AuditContext::new(paths, common)?;
    let result = ctx.run();

    match common.format {
        OutputFormat::Text => report::print(&result, common.verbose),
        OutputFormat::Json => json::print(&result)?,
    }

    Ok(ExitStatus::from_audit(
        result.violation_count(),
        ctx.fail_on_violations(),
    ))
}

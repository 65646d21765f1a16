//! Static-site deployment via the MkDocs CLI.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Deploys the site with `mkdocs gh-deploy -f <mkdocs file>`.
///
/// # Errors
///
/// Returns an error if `mkdocs` cannot be invoked or exits non-zero.
pub fn deploy_site(mkdocs_path: &Path) -> Result<()> {
    info!("Deploying site from {}", mkdocs_path.display());

    let output = Command::new("mkdocs")
        .args(["gh-deploy", "-f"])
        .arg(mkdocs_path)
        .output()
        .map_err(|e| Error::command("mkdocs", e.to_string()))?;

    if !output.status.success() {
        return Err(Error::command(
            "mkdocs",
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    info!("Site deployed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deploy_fails_cleanly_without_site() {
        // Either mkdocs is absent or it rejects the bogus config; both
        // must surface as a Command error, never a panic.
        let result = deploy_site(&PathBuf::from("/nonexistent/mkdocs.yml"));
        assert!(matches!(result, Err(Error::Command { .. })));
    }
}

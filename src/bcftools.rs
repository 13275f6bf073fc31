//! External bcftools invocation
//!
//! bcftools is an opaque external collaborator. Every call is a blocking
//! subprocess with captured stdout/stderr; a non-zero exit status is
//! reported as an error carrying the tool's stderr. No shell is involved,
//! arguments are passed directly to the process.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::info;

/// Format string handed to `bcftools query -f`. The escapes are interpreted
/// by bcftools itself, so they are passed through literally.
pub const QUERY_FORMAT: &str = "%CHROM\\t%POS\\t%QUAL\\t%INFO/AF\\t%INFO/DP\\n";

/// Errors that can occur when invoking bcftools
#[derive(Error, Debug)]
pub enum BcftoolsError {
    #[error("Failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} {subcommand} exited with status {code}: {stderr}")]
    CommandFailed {
        tool: String,
        subcommand: String,
        code: String,
        stderr: String,
    },
}

type Result<T> = core::result::Result<T, BcftoolsError>;

/// Handle for invoking a bcftools executable by name or path.
#[derive(Debug, Clone)]
pub struct Bcftools {
    tool: String,
}

impl Bcftools {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// Runs `bcftools stats <vcf>` and returns the captured report text.
    pub fn stats(&self, vcf: &Path) -> Result<String> {
        self.run("stats", &[vcf.as_os_str()])
    }

    /// Runs `bcftools query` extracting CHROM, POS, QUAL, INFO/AF and
    /// INFO/DP as one tab-separated line per variant.
    pub fn query(&self, vcf: &Path) -> Result<String> {
        self.run(
            "query",
            &[OsStr::new("-f"), OsStr::new(QUERY_FORMAT), vcf.as_os_str()],
        )
    }

    fn run(&self, subcommand: &str, args: &[&OsStr]) -> Result<String> {
        info!(
            "Running: {} {} {}",
            self.tool,
            subcommand,
            args.iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.tool)
            .arg(subcommand)
            .args(args)
            .output()
            .map_err(|source| BcftoolsError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BcftoolsError::CommandFailed {
                tool: self.tool.clone(),
                subcommand: subcommand.to_string(),
                code: output
                    .status
                    .code()
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

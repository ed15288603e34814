pub mod cli;

/// Captured output of a finished CLI subprocess.
#[derive(Debug, Clone, Default)]
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
}

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate a protocol document without installing it.
    Validate(ValidateArgs),
    /// Validate a protocol and install it as a new draft project.
    Install(InstallArgs),
    /// Show an installed project and everything provisioned for it.
    Show(ShowArgs),
    /// List the reports an installed project declares.
    Reports(ReportsArgs),
    /// Print the JSON Schemas for protocols and stored entities.
    Schema(SchemaArgs),
}

/// Arguments for `sift validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Protocol document (JSON).
    pub file: PathBuf,
    /// Fill a missing category list or exclusion criteria from config defaults.
    #[arg(long)]
    pub with_defaults: bool,
}

/// Arguments for `sift install`.
#[derive(Clone, Debug, Args)]
pub struct InstallArgs {
    /// Protocol document (JSON).
    pub file: PathBuf,
    /// User id recorded as the project's creator and first administrator.
    #[arg(long)]
    pub user: String,
    /// Fill a missing category list or exclusion criteria from config defaults.
    #[arg(long)]
    pub with_defaults: bool,
}

/// Arguments for `sift show`.
#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Project label (case-insensitive).
    pub label: String,
}

/// Arguments for `sift reports`.
#[derive(Clone, Debug, Args)]
pub struct ReportsArgs {
    /// Project label (case-insensitive).
    pub label: String,
}

/// Arguments for `sift schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Print one schema instead of the list of names.
    #[arg(long)]
    pub name: Option<String>,
}

use std::path::Path;

use anyhow::Context;
use sift_config::{DatabaseConfig, SiftConfig};
use sift_core::entities::Project;
use sift_db::service::SiftService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: SiftService,
    pub config: SiftConfig,
}

impl AppContext {
    /// Open the database named by `--db` or `database.path`.
    pub async fn init(config: SiftConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let database = flags.db.as_ref().map_or_else(
            || config.database.clone(),
            |path| DatabaseConfig { path: path.clone() },
        );

        if !database.is_in_memory()
            && let Some(parent) = Path::new(&database.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let service = SiftService::new_local(&database.path)
            .await
            .with_context(|| format!("failed to open database at {}", database.path))?;
        tracing::debug!(path = %database.path, "sift context ready");

        Ok(Self { service, config })
    }

    /// Look up a project by label, failing when none exists.
    pub async fn require_project(&self, label: &str) -> anyhow::Result<Project> {
        self.service
            .find_project_by_label(label)
            .await?
            .with_context(|| format!("no project labelled `{label}`"))
    }
}

use anyhow::bail;
use sift_core::identity::AuthIdentity;
use sift_db::error::InstallError;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InstallArgs;
use crate::commands::document;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift install`.
pub async fn handle(args: &InstallArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.user.trim().is_empty() {
        bail!("--user must not be empty");
    }

    let defaults = args.with_defaults.then_some(&ctx.config.defaults);
    let document = document::load(&args.file, defaults)?;
    let creator = AuthIdentity::new(args.user.trim());

    match ctx.service.install_document(&document, &creator).await {
        Ok(result) => output(&result, flags.format),
        Err(InstallError::Validation(errors)) => {
            output(&errors, flags.format)?;
            Err(errors.into())
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;
    use sift_config::SiftConfig;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            db: Some(":memory:".into()),
        }
    }

    async fn test_ctx() -> AppContext {
        AppContext::init(SiftConfig::default(), &flags()).await.unwrap()
    }

    fn args(file: PathBuf, with_defaults: bool) -> InstallArgs {
        InstallArgs {
            file,
            user: "user-1".into(),
            with_defaults,
        }
    }

    fn write(dir: &tempfile::TempDir, document: &serde_json::Value) -> PathBuf {
        let path = dir.path().join("protocol.json");
        std::fs::write(&path, document.to_string()).unwrap();
        path
    }

    #[tokio::test]
    async fn installs_then_rejects_duplicate_label() {
        let ctx = test_ctx().await;
        let dir = tempfile::TempDir::new().unwrap();
        let file = write(
            &dir,
            &json!({
                "project": {"short_name": "Demo_SLR", "name": "Demo SLR"},
                "category": [{"category_type": "Simple", "name": "notes", "type": "text", "mandatory": false}]
            }),
        );

        handle(&args(file.clone(), false), &ctx, &flags()).await.unwrap();
        assert!(ctx.require_project("demo_slr").await.is_ok());

        let err = handle(&args(file, false), &ctx, &flags()).await.unwrap_err();
        assert_eq!(err.to_string(), "a project labelled `demo_slr` already exists");
    }

    #[tokio::test]
    async fn with_defaults_fills_screening_and_categories() {
        let ctx = test_ctx().await;
        let dir = tempfile::TempDir::new().unwrap();
        let file = write(
            &dir,
            &json!({
                "project": {"short_name": "Sparse", "name": "Sparse review"},
                "screening": {
                    "review_per_paper": 2,
                    "conflict_type": "Decision",
                    "conflict_resolution": "Unanimity"
                }
            }),
        );

        assert!(handle(&args(file.clone(), false), &ctx, &flags()).await.is_err());
        assert!(ctx.service.find_project_by_label("sparse").await.unwrap().is_none());

        handle(&args(file, true), &ctx, &flags()).await.unwrap();
        let project = ctx.require_project("sparse").await.unwrap();
        let criteria = ctx.service.list_exclusion_criteria(&project.id).await.unwrap();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].name, "Out of scope");
    }

    #[tokio::test]
    async fn blank_user_is_rejected() {
        let ctx = test_ctx().await;
        let mut install = args(PathBuf::from("unused.json"), false);
        install.user = "  ".into();
        let err = handle(&install, &ctx, &flags()).await.unwrap_err();
        assert!(err.to_string().contains("--user"));
    }
}

//! Transactional installation of a protocol.
//!
//! Protocol:
//! 1. Advisory label pre-check (no transaction opened on conflict)
//! 2. Build the `InstallPlan`
//! 3. Begin transaction
//! 4. Insert every planned row, parents before children
//! 5. Commit, or roll back and classify the failure

use serde_json::Value;
use sift_core::identity::AuthIdentity;
use sift_core::protocol::ReviewProtocol;
use sift_core::responses::InstallResult;

use crate::constraint::is_label_conflict;
use crate::error::{DatabaseError, InstallError};
use crate::plan::InstallPlan;
use crate::service::SiftService;

use super::extraction::{insert_extraction_field, insert_extraction_form};
use super::project::{insert_project, insert_project_config, insert_project_member};
use super::quality::{insert_qa_option, insert_qa_question, insert_qa_template};
use super::screening::{insert_exclusion_criterion, insert_screening_phase};

impl SiftService {
    /// Validate a raw protocol document, then install it.
    ///
    /// # Errors
    ///
    /// `InstallError::Validation` with every violation if the document is
    /// invalid; otherwise as [`Self::install_protocol`].
    pub async fn install_document(
        &self,
        raw: &Value,
        creator: &AuthIdentity,
    ) -> Result<InstallResult, InstallError> {
        let protocol = self.validator().validate(raw)?;
        self.install_protocol(&protocol, creator).await
    }

    /// Install a validated protocol as a new draft project owned by `creator`.
    ///
    /// Either every row is written or none is.
    ///
    /// # Errors
    ///
    /// `InstallError::Conflict` if the label is taken (before or during the
    /// write), `InstallError::Internal` for any other failure.
    pub async fn install_protocol(
        &self,
        protocol: &ReviewProtocol,
        creator: &AuthIdentity,
    ) -> Result<InstallResult, InstallError> {
        let label = protocol.label();
        tracing::info!(label = %label, user = %creator.user_id, "installing protocol");

        if self.find_project_by_label(&label).await?.is_some() {
            tracing::warn!(label = %label, "project label already taken");
            return Err(InstallError::Conflict { label });
        }

        let plan = InstallPlan::build(protocol, creator).map_err(|e| {
            tracing::error!(label = %label, error = %e, "failed to plan installation");
            InstallError::Internal(e)
        })?;
        self.apply_plan(&plan).await
    }

    /// Write a prepared plan inside one transaction.
    ///
    /// Skips the advisory label pre-check; a label collision is still caught
    /// by the `UNIQUE` constraint and reported as `InstallError::Conflict`.
    ///
    /// # Errors
    ///
    /// `InstallError::Conflict` on a label collision, `InstallError::Internal`
    /// for any other failure. Nothing is written in either case.
    pub async fn apply_plan(&self, plan: &InstallPlan) -> Result<InstallResult, InstallError> {
        let tx = self
            .db()
            .conn()
            .transaction()
            .await
            .map_err(|e| classify(plan.label(), e.into()))?;

        if let Err(error) = write_plan(&tx, plan).await {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(label = plan.label(), error = %rollback, "rollback failed");
            }
            return Err(classify(plan.label(), error));
        }

        tx.commit()
            .await
            .map_err(|e| classify(plan.label(), e.into()))?;

        tracing::info!(
            label = plan.label(),
            project_id = %plan.project.id,
            rows = plan.row_count(),
            "project installed"
        );
        Ok(plan.result())
    }
}

fn classify(label: &str, error: DatabaseError) -> InstallError {
    if is_label_conflict(&error) {
        tracing::warn!(label, "project label claimed concurrently");
        return InstallError::Conflict {
            label: label.to_string(),
        };
    }
    tracing::error!(label, error = ?error, "project installation rolled back");
    InstallError::Internal(error)
}

async fn write_plan(conn: &libsql::Connection, plan: &InstallPlan) -> Result<(), DatabaseError> {
    insert_project(conn, &plan.project).await?;
    insert_project_member(conn, &plan.member).await?;
    insert_project_config(conn, &plan.config).await?;
    tracing::debug!(project_id = %plan.project.id, "project, member and config written");

    for criterion in &plan.criteria {
        insert_exclusion_criterion(conn, criterion).await?;
    }
    for phase in &plan.phases {
        insert_screening_phase(conn, phase).await?;
    }
    tracing::debug!(
        criteria = plan.criteria.len(),
        phases = plan.phases.len(),
        "screening rows written"
    );

    if let Some(qa) = &plan.qa {
        insert_qa_template(conn, &qa.template).await?;
        for question in &qa.questions {
            insert_qa_question(conn, question).await?;
        }
        for option in &qa.options {
            insert_qa_option(conn, option).await?;
        }
        tracing::debug!(
            questions = qa.questions.len(),
            options = qa.options.len(),
            "quality assessment rows written"
        );
    }

    if let Some(form) = &plan.form {
        insert_extraction_form(conn, form).await?;
        for field in &plan.fields {
            insert_extraction_field(conn, field).await?;
        }
        tracing::debug!(fields = plan.fields.len(), "extraction rows written");
    }

    Ok(())
}

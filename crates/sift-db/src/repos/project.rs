//! Project, membership and configuration rows, plus per-project summaries.

use sift_core::entities::{Project, ProjectConfig, ProjectMember};
use sift_core::enums::EntityType;
use sift_core::protocol::Report;
use sift_core::responses::ProjectSummary;

use crate::error::DatabaseError;
use crate::helpers::{
    entity_type_to_table, get_bool, get_count, get_opt_string, get_u32, parse_datetime,
    parse_enum, parse_json, to_json,
};
use crate::service::SiftService;

const PROJECT_COLS: &str = "id, label, title, description, status, created_by, created_at";

const CONFIG_COLS: &str = "id, project_id, screening_enabled, qa_enabled, extraction_enabled, \
     conflict_type, conflict_resolution, review_per_paper, validation_percentage, \
     validation_enabled, validation_assignment_mode, source_papers_enabled, \
     search_strategy_enabled, protocol, created_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get::<String>(0)?,
        label: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        created_by: row.get::<String>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn row_to_member(row: &libsql::Row) -> Result<ProjectMember, DatabaseError> {
    Ok(ProjectMember {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_config(row: &libsql::Row) -> Result<ProjectConfig, DatabaseError> {
    Ok(ProjectConfig {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        screening_enabled: get_bool(row, 2)?,
        qa_enabled: get_bool(row, 3)?,
        extraction_enabled: get_bool(row, 4)?,
        conflict_type: parse_enum(&row.get::<String>(5)?)?,
        conflict_resolution: parse_enum(&row.get::<String>(6)?)?,
        review_per_paper: get_u32(row, 7)?,
        validation_percentage: get_u32(row, 8)?,
        validation_enabled: get_bool(row, 9)?,
        validation_assignment_mode: parse_enum(&row.get::<String>(10)?)?,
        source_papers_enabled: get_bool(row, 11)?,
        search_strategy_enabled: get_bool(row, 12)?,
        protocol: parse_json(&row.get::<String>(13)?)?,
        created_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

pub(crate) async fn insert_project(
    conn: &libsql::Connection,
    project: &Project,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO projects (id, label, title, description, status, created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            project.id.as_str(),
            project.label.as_str(),
            project.title.as_str(),
            project.description.as_deref(),
            project.status.as_str(),
            project.created_by.as_str(),
            project.created_at.to_rfc3339(),
        ],
    )
    .await?;
    Ok(())
}

pub(crate) async fn insert_project_member(
    conn: &libsql::Connection,
    member: &ProjectMember,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO project_members (id, project_id, user_id, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            member.id.as_str(),
            member.project_id.as_str(),
            member.user_id.as_str(),
            member.role.as_str(),
            member.created_at.to_rfc3339(),
        ],
    )
    .await?;
    Ok(())
}

pub(crate) async fn insert_project_config(
    conn: &libsql::Connection,
    config: &ProjectConfig,
) -> Result<(), DatabaseError> {
    let protocol = to_json(&config.protocol)?;
    conn.execute(
        &format!(
            "INSERT INTO project_configs ({CONFIG_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        ),
        libsql::params![
            config.id.as_str(),
            config.project_id.as_str(),
            i64::from(config.screening_enabled),
            i64::from(config.qa_enabled),
            i64::from(config.extraction_enabled),
            config.conflict_type.as_str(),
            config.conflict_resolution.as_str(),
            i64::from(config.review_per_paper),
            i64::from(config.validation_percentage),
            i64::from(config.validation_enabled),
            config.validation_assignment_mode.as_str(),
            i64::from(config.source_papers_enabled),
            i64::from(config.search_strategy_enabled),
            protocol,
            config.created_at.to_rfc3339(),
        ],
    )
    .await?;
    Ok(())
}

impl SiftService {
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PROJECT_COLS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    /// Look up a project by its (lowercase) label.
    pub async fn find_project_by_label(&self, label: &str) -> Result<Option<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PROJECT_COLS} FROM projects WHERE label = ?1"),
                [label.to_lowercase()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PROJECT_COLS} FROM projects ORDER BY label"),
                (),
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    pub async fn list_members(&self, project_id: &str) -> Result<Vec<ProjectMember>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, project_id, user_id, role, created_at
                 FROM project_members WHERE project_id = ?1 ORDER BY created_at, id",
                [project_id],
            )
            .await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_member(&row)?);
        }
        Ok(members)
    }

    /// The project's configuration, with the stored protocol parsed back.
    pub async fn get_project_config(&self, project_id: &str) -> Result<ProjectConfig, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {CONFIG_COLS} FROM project_configs WHERE project_id = ?1"),
                [project_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_config(&row)
    }

    /// Reports declared by the stored protocol. Reports have no rows of their own.
    pub async fn list_reports(&self, project_id: &str) -> Result<Vec<Report>, DatabaseError> {
        let config = self.get_project_config(project_id).await?;
        Ok(config.protocol.reporting.unwrap_or_default())
    }

    /// Row counts for everything installed under one project.
    pub async fn project_summary(&self, project_id: &str) -> Result<ProjectSummary, DatabaseError> {
        let project = self.get_project(project_id).await?;
        let config = self.get_project_config(project_id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT
                    (SELECT COUNT(*) FROM exclusion_criteria WHERE project_id = ?1),
                    (SELECT COUNT(*) FROM screening_phases WHERE project_id = ?1),
                    (SELECT COUNT(*) FROM qa_questions q
                        JOIN qa_templates t ON t.id = q.template_id WHERE t.project_id = ?1),
                    (SELECT COUNT(*) FROM qa_options o
                        JOIN qa_questions q ON q.id = o.question_id
                        JOIN qa_templates t ON t.id = q.template_id WHERE t.project_id = ?1),
                    (SELECT COUNT(*) FROM extraction_fields f
                        JOIN extraction_forms m ON m.id = f.form_id WHERE m.project_id = ?1)",
                [project_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(ProjectSummary {
            project_id: project.id,
            label: project.label,
            title: project.title,
            status: project.status.to_string(),
            screening_enabled: config.screening_enabled,
            qa_enabled: config.qa_enabled,
            extraction_enabled: config.extraction_enabled,
            exclusion_criteria: get_count(&row, 0)?,
            screening_phases: get_count(&row, 1)?,
            qa_questions: get_count(&row, 2)?,
            qa_options: get_count(&row, 3)?,
            extraction_fields: get_count(&row, 4)?,
            reports: config.protocol.reports().len() as u64,
        })
    }

    /// Total rows in the table backing `entity`, across all projects.
    pub async fn count_rows(&self, entity: EntityType) -> Result<u64, DatabaseError> {
        let table = entity_type_to_table(entity);
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}

//! Exclusion criteria and screening phases.

use sift_core::entities::{ExclusionCriterion, ScreeningPhase};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime, parse_json, to_json};
use crate::service::SiftService;

fn row_to_criterion(row: &libsql::Row) -> Result<ExclusionCriterion, DatabaseError> {
    Ok(ExclusionCriterion {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        position: get_u32(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_phase(row: &libsql::Row) -> Result<ScreeningPhase, DatabaseError> {
    Ok(ScreeningPhase {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        fields: get_opt_string(row, 4)?
            .map(|raw| parse_json(&raw))
            .transpose()?,
        position: get_u32(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

pub(crate) async fn insert_exclusion_criterion(
    conn: &libsql::Connection,
    criterion: &ExclusionCriterion,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO exclusion_criteria (id, project_id, name, position, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            criterion.id.as_str(),
            criterion.project_id.as_str(),
            criterion.name.as_str(),
            i64::from(criterion.position),
            criterion.created_at.to_rfc3339(),
        ],
    )
    .await?;
    Ok(())
}

pub(crate) async fn insert_screening_phase(
    conn: &libsql::Connection,
    phase: &ScreeningPhase,
) -> Result<(), DatabaseError> {
    let fields = phase.fields.as_ref().map(to_json).transpose()?;
    conn.execute(
        "INSERT INTO screening_phases (id, project_id, title, description, fields, position, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            phase.id.as_str(),
            phase.project_id.as_str(),
            phase.title.as_str(),
            phase.description.as_deref(),
            fields,
            i64::from(phase.position),
            phase.created_at.to_rfc3339(),
        ],
    )
    .await?;
    Ok(())
}

impl SiftService {
    pub async fn list_exclusion_criteria(
        &self,
        project_id: &str,
    ) -> Result<Vec<ExclusionCriterion>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, project_id, name, position, created_at
                 FROM exclusion_criteria WHERE project_id = ?1 ORDER BY position",
                [project_id],
            )
            .await?;
        let mut criteria = Vec::new();
        while let Some(row) = rows.next().await? {
            criteria.push(row_to_criterion(&row)?);
        }
        Ok(criteria)
    }

    pub async fn list_screening_phases(
        &self,
        project_id: &str,
    ) -> Result<Vec<ScreeningPhase>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, project_id, title, description, fields, position, created_at
                 FROM screening_phases WHERE project_id = ?1 ORDER BY position",
                [project_id],
            )
            .await?;
        let mut phases = Vec::new();
        while let Some(row) = rows.next().await? {
            phases.push(row_to_phase(&row)?);
        }
        Ok(phases)
    }
}

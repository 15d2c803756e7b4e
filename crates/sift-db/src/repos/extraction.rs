//! Extraction form and its flattened fields.

use sift_core::entities::{ExtractionField, ExtractionForm};

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, get_u32, parse_datetime, parse_enum, parse_json,
    parse_optional_datetime, to_json,
};
use crate::service::SiftService;

const FIELD_COLS: &str =
    "id, form_id, name, label, field_type, is_required, position, config, parent_id";

fn row_to_form(row: &libsql::Row) -> Result<ExtractionForm, DatabaseError> {
    Ok(ExtractionForm {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        published: get_bool(row, 2)?,
        published_at: parse_optional_datetime(get_opt_string(row, 3)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_field(row: &libsql::Row) -> Result<ExtractionField, DatabaseError> {
    Ok(ExtractionField {
        id: row.get::<String>(0)?,
        form_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        label: row.get::<String>(3)?,
        field_type: parse_enum(&row.get::<String>(4)?)?,
        is_required: get_bool(row, 5)?,
        position: get_u32(row, 6)?,
        config: parse_json(&row.get::<String>(7)?)?,
        parent_id: get_opt_string(row, 8)?,
    })
}

pub(crate) async fn insert_extraction_form(
    conn: &libsql::Connection,
    form: &ExtractionForm,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO extraction_forms (id, project_id, published, published_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            form.id.as_str(),
            form.project_id.as_str(),
            i64::from(form.published),
            form.published_at.map(|t| t.to_rfc3339()),
            form.created_at.to_rfc3339(),
        ],
    )
    .await?;
    Ok(())
}

pub(crate) async fn insert_extraction_field(
    conn: &libsql::Connection,
    field: &ExtractionField,
) -> Result<(), DatabaseError> {
    let config = to_json(&field.config)?;
    conn.execute(
        &format!(
            "INSERT INTO extraction_fields ({FIELD_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ),
        libsql::params![
            field.id.as_str(),
            field.form_id.as_str(),
            field.name.as_str(),
            field.label.as_str(),
            field.field_type.as_str(),
            i64::from(field.is_required),
            i64::from(field.position),
            config,
            field.parent_id.as_deref(),
        ],
    )
    .await?;
    Ok(())
}

impl SiftService {
    /// The project's extraction form, `None` when extraction is disabled.
    pub async fn get_extraction_form(
        &self,
        project_id: &str,
    ) -> Result<Option<ExtractionForm>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, project_id, published, published_at, created_at
                 FROM extraction_forms WHERE project_id = ?1",
                [project_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_form(&row)?)),
            None => Ok(None),
        }
    }

    /// Fields of a form in flattened (pre-order) position order.
    pub async fn list_extraction_fields(
        &self,
        form_id: &str,
    ) -> Result<Vec<ExtractionField>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {FIELD_COLS} FROM extraction_fields WHERE form_id = ?1 ORDER BY position"
                ),
                [form_id],
            )
            .await?;
        let mut fields = Vec::new();
        while let Some(row) = rows.next().await? {
            fields.push(row_to_field(&row)?);
        }
        Ok(fields)
    }
}

//! Quality-assessment template, questions and options.

use sift_core::entities::{QaOption, QaQuestion, QaTemplate};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_u32, parse_datetime};
use crate::service::SiftService;

fn row_to_template(row: &libsql::Row) -> Result<QaTemplate, DatabaseError> {
    Ok(QaTemplate {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        min_score: row.get::<f64>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn row_to_question(row: &libsql::Row) -> Result<QaQuestion, DatabaseError> {
    Ok(QaQuestion {
        id: row.get::<String>(0)?,
        template_id: row.get::<String>(1)?,
        text: row.get::<String>(2)?,
        position: get_u32(row, 3)?,
    })
}

fn row_to_option(row: &libsql::Row) -> Result<QaOption, DatabaseError> {
    Ok(QaOption {
        id: row.get::<String>(0)?,
        question_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        score: row.get::<f64>(3)?,
        is_positive: get_bool(row, 4)?,
        position: get_u32(row, 5)?,
    })
}

pub(crate) async fn insert_qa_template(
    conn: &libsql::Connection,
    template: &QaTemplate,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO qa_templates (id, project_id, min_score, created_at) VALUES (?1, ?2, ?3, ?4)",
        libsql::params![
            template.id.as_str(),
            template.project_id.as_str(),
            template.min_score,
            template.created_at.to_rfc3339(),
        ],
    )
    .await?;
    Ok(())
}

pub(crate) async fn insert_qa_question(
    conn: &libsql::Connection,
    question: &QaQuestion,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO qa_questions (id, template_id, text, position) VALUES (?1, ?2, ?3, ?4)",
        libsql::params![
            question.id.as_str(),
            question.template_id.as_str(),
            question.text.as_str(),
            i64::from(question.position),
        ],
    )
    .await?;
    Ok(())
}

pub(crate) async fn insert_qa_option(
    conn: &libsql::Connection,
    option: &QaOption,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO qa_options (id, question_id, title, score, is_positive, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        libsql::params![
            option.id.as_str(),
            option.question_id.as_str(),
            option.title.as_str(),
            option.score,
            i64::from(option.is_positive),
            i64::from(option.position),
        ],
    )
    .await?;
    Ok(())
}

impl SiftService {
    /// The project's QA template, `None` when quality assessment is disabled.
    pub async fn get_qa_template(&self, project_id: &str) -> Result<Option<QaTemplate>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, project_id, min_score, created_at FROM qa_templates WHERE project_id = ?1",
                [project_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_template(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_qa_questions(&self, template_id: &str) -> Result<Vec<QaQuestion>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, template_id, text, position
                 FROM qa_questions WHERE template_id = ?1 ORDER BY position",
                [template_id],
            )
            .await?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions)
    }

    pub async fn list_qa_options(&self, question_id: &str) -> Result<Vec<QaOption>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, question_id, title, score, is_positive, position
                 FROM qa_options WHERE question_id = ?1 ORDER BY position",
                [question_id],
            )
            .await?;
        let mut options = Vec::new();
        while let Some(row) = rows.next().await? {
            options.push(row_to_option(&row)?);
        }
        Ok(options)
    }
}

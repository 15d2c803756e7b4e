//! Installation plan: every row a protocol installs, built before any write.
//!
//! [`InstallPlan::build`] is pure apart from id generation and the clock. It
//! maps protocol vocabulary to storage vocabulary, applies the
//! provisioning defaults, flattens the category tree, and links children to
//! parents by pre-generated id. The service then writes the plan inside a
//! single transaction (see `repos::install`).

use chrono::{DateTime, Utc};
use sift_core::entities::{
    ExclusionCriterion, ExtractionField, ExtractionForm, Project, ProjectConfig, ProjectMember,
    QaOption, QaQuestion, QaTemplate, ScreeningPhase,
};
use sift_core::enums::{ConflictMode, MemberRole, ProjectStatus, ResolutionRule};
use sift_core::flatten::flatten;
use sift_core::identity::AuthIdentity;
use sift_core::ids::{
    PREFIX_CONFIG, PREFIX_CRITERION, PREFIX_FIELD, PREFIX_FORM, PREFIX_MEMBER, PREFIX_PHASE,
    PREFIX_PROJECT, PREFIX_QA_OPTION, PREFIX_QA_QUESTION, PREFIX_QA_TEMPLATE, generate_id,
};
use sift_core::protocol::{QaConfig, ReviewProtocol, ScreeningConfig};
use sift_core::responses::InstallResult;

use crate::error::DatabaseError;

/// Reviewers per paper when screening does not say.
pub const DEFAULT_REVIEWERS: u32 = 2;
/// Share of papers double-checked when screening does not say.
pub const DEFAULT_VALIDATION_PERCENTAGE: u32 = 20;
/// Title of the phase created when screening declares none.
pub const DEFAULT_PHASE_TITLE: &str = "Phase 1";

/// Quality-assessment rows: one template, its questions, and every option.
#[derive(Debug, Clone)]
pub struct QaPlan {
    pub template: QaTemplate,
    pub questions: Vec<QaQuestion>,
    /// Grouped by question, in question order.
    pub options: Vec<QaOption>,
}

/// All rows for one project installation, in write order.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    pub project: Project,
    pub member: ProjectMember,
    pub config: ProjectConfig,
    pub criteria: Vec<ExclusionCriterion>,
    pub phases: Vec<ScreeningPhase>,
    pub qa: Option<QaPlan>,
    pub form: Option<ExtractionForm>,
    /// Pre-order; every parent precedes its children.
    pub fields: Vec<ExtractionField>,
}

impl InstallPlan {
    /// Build the plan for `protocol`, owned by `creator`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if an id cannot be generated.
    pub fn build(protocol: &ReviewProtocol, creator: &AuthIdentity) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        let project_id = generate_id(PREFIX_PROJECT)?;
        let screening = protocol.screening.as_ref();

        let project = Project {
            id: project_id.clone(),
            label: protocol.label(),
            title: protocol.project.name.to_string(),
            description: protocol.project.description.clone(),
            status: ProjectStatus::Draft,
            created_by: creator.user_id.clone(),
            created_at: now,
        };

        let member = ProjectMember {
            id: generate_id(PREFIX_MEMBER)?,
            project_id: project_id.clone(),
            user_id: creator.user_id.clone(),
            role: MemberRole::Admin,
            created_at: now,
        };

        let config = build_config(protocol, &project_id, now)?;

        let criteria = screening
            .map(|s| build_criteria(s, &project_id, now))
            .transpose()?
            .unwrap_or_default();
        let phases = screening
            .map(|s| build_phases(s, &project_id, now))
            .transpose()?
            .unwrap_or_default();
        let qa = protocol
            .quality_assess
            .as_ref()
            .map(|qa| build_qa(qa, &project_id, now))
            .transpose()?;

        let (form, fields) = if protocol.extraction_enabled() {
            let form = ExtractionForm {
                id: generate_id(PREFIX_FORM)?,
                project_id,
                published: true,
                published_at: Some(now),
                created_at: now,
            };
            let fields = build_fields(protocol, &form.id)?;
            (Some(form), fields)
        } else {
            (None, Vec::new())
        };

        Ok(Self {
            project,
            member,
            config,
            criteria,
            phases,
            qa,
            form,
            fields,
        })
    }

    /// The label this plan claims.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.project.label
    }

    /// Result reported to the caller once the plan is committed.
    #[must_use]
    pub fn result(&self) -> InstallResult {
        InstallResult {
            project_id: self.project.id.clone(),
            label: self.project.label.clone(),
            title: self.project.title.clone(),
        }
    }

    /// Total number of rows the plan writes.
    #[must_use]
    pub fn row_count(&self) -> usize {
        let qa = self
            .qa
            .as_ref()
            .map_or(0, |qa| 1 + qa.questions.len() + qa.options.len());
        3 + self.criteria.len()
            + self.phases.len()
            + qa
            + usize::from(self.form.is_some())
            + self.fields.len()
    }
}

fn build_config(
    protocol: &ReviewProtocol,
    project_id: &str,
    now: DateTime<Utc>,
) -> Result<ProjectConfig, DatabaseError> {
    let screening = protocol.screening.as_ref();
    let validation_percentage = screening
        .and_then(|s| s.validation_percentage)
        .unwrap_or(DEFAULT_VALIDATION_PERCENTAGE);

    Ok(ProjectConfig {
        id: generate_id(PREFIX_CONFIG)?,
        project_id: project_id.to_string(),
        screening_enabled: protocol.screening_enabled(),
        qa_enabled: protocol.qa_enabled(),
        extraction_enabled: protocol.extraction_enabled(),
        conflict_type: ConflictMode::from_protocol(screening.map(|s| s.conflict_type)),
        conflict_resolution: ResolutionRule::from_protocol(
            screening.map(|s| s.conflict_resolution),
        ),
        review_per_paper: screening.map_or(DEFAULT_REVIEWERS, |s| s.review_per_paper),
        validation_percentage,
        validation_enabled: validation_percentage > 0,
        validation_assignment_mode: screening
            .and_then(|s| s.validation_assignment_mode)
            .unwrap_or_default(),
        source_papers_enabled: screening.is_some_and(ScreeningConfig::has_source_papers),
        search_strategy_enabled: screening.is_some_and(ScreeningConfig::has_search_strategy),
        protocol: protocol.clone(),
        created_at: now,
    })
}

fn build_criteria(
    screening: &ScreeningConfig,
    project_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ExclusionCriterion>, DatabaseError> {
    screening
        .exclusion_criteria
        .iter()
        .enumerate()
        .map(|(i, criterion)| {
            Ok(ExclusionCriterion {
                id: generate_id(PREFIX_CRITERION)?,
                project_id: project_id.to_string(),
                name: criterion.as_str().to_string(),
                position: position(i),
                created_at: now,
            })
        })
        .collect()
}

fn build_phases(
    screening: &ScreeningConfig,
    project_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ScreeningPhase>, DatabaseError> {
    let declared = screening.declared_phases();
    if declared.is_empty() {
        return Ok(vec![ScreeningPhase {
            id: generate_id(PREFIX_PHASE)?,
            project_id: project_id.to_string(),
            title: DEFAULT_PHASE_TITLE.to_string(),
            description: None,
            fields: None,
            position: 0,
            created_at: now,
        }]);
    }

    declared
        .iter()
        .enumerate()
        .map(|(i, phase)| {
            Ok(ScreeningPhase {
                id: generate_id(PREFIX_PHASE)?,
                project_id: project_id.to_string(),
                title: phase.title.to_string(),
                description: phase.description.clone(),
                fields: phase
                    .fields
                    .as_ref()
                    .map(|fields| fields.iter().map(ToString::to_string).collect()),
                position: position(i),
                created_at: now,
            })
        })
        .collect()
}

fn build_qa(qa: &QaConfig, project_id: &str, now: DateTime<Utc>) -> Result<QaPlan, DatabaseError> {
    let template = QaTemplate {
        id: generate_id(PREFIX_QA_TEMPLATE)?,
        project_id: project_id.to_string(),
        min_score: qa.min_score,
        created_at: now,
    };

    let mut questions = Vec::with_capacity(qa.question.len());
    let mut options = Vec::with_capacity(qa.question.len() * qa.response.len());
    for (q, text) in qa.question.iter().enumerate() {
        let question = QaQuestion {
            id: generate_id(PREFIX_QA_QUESTION)?,
            template_id: template.id.clone(),
            text: text.to_string(),
            position: position(q),
        };
        for (r, response) in qa.response.iter().enumerate() {
            options.push(QaOption {
                id: generate_id(PREFIX_QA_OPTION)?,
                question_id: question.id.clone(),
                title: response.title.to_string(),
                score: response.score,
                is_positive: response.is_positive(),
                position: position(r),
            });
        }
        questions.push(question);
    }

    Ok(QaPlan {
        template,
        questions,
        options,
    })
}

fn build_fields(
    protocol: &ReviewProtocol,
    form_id: &str,
) -> Result<Vec<ExtractionField>, DatabaseError> {
    let descriptors = flatten(&protocol.category);
    let ids = descriptors
        .iter()
        .map(|_| generate_id(PREFIX_FIELD))
        .collect::<Result<Vec<_>, _>>()?;

    descriptors
        .into_iter()
        .zip(&ids)
        .map(|(descriptor, id)| {
            let parent_id = match descriptor.parent_index {
                Some(index) => Some(ids.get(index).cloned().ok_or_else(|| {
                    DatabaseError::InvalidState(format!(
                        "field {} has no parent at index {index}",
                        descriptor.name
                    ))
                })?),
                None => None,
            };
            Ok(ExtractionField {
                id: id.clone(),
                form_id: form_id.to_string(),
                name: descriptor.name,
                label: descriptor.label,
                field_type: descriptor.field_type,
                is_required: descriptor.is_required,
                position: position(descriptor.order),
                config: descriptor.config,
                parent_id,
            })
        })
        .collect()
}

fn position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sift_core::enums::FieldKind;
    use sift_core::protocol::ValidationAssignmentMode;

    use super::*;

    fn protocol(value: serde_json::Value) -> ReviewProtocol {
        serde_json::from_value(value).unwrap()
    }

    fn creator() -> AuthIdentity {
        AuthIdentity::new("user_1")
    }

    #[test]
    fn minimal_protocol_uses_defaults() {
        let plan = InstallPlan::build(
            &protocol(json!({
                "project": {"short_name": "Demo_SLR", "name": "Demo SLR"},
                "category": [{"category_type": "Simple", "name": "notes", "type": "text", "mandatory": false}]
            })),
            &creator(),
        )
        .unwrap();

        assert_eq!(plan.label(), "demo_slr");
        assert_eq!(plan.project.created_by, "user_1");
        assert_eq!(plan.member.role, MemberRole::Admin);
        assert_eq!(plan.member.project_id, plan.project.id);

        let config = &plan.config;
        assert!(!config.screening_enabled);
        assert!(!config.qa_enabled);
        assert!(config.extraction_enabled);
        assert_eq!(config.conflict_type, ConflictMode::IncludeExclude);
        assert_eq!(config.conflict_resolution, ResolutionRule::Unanimity);
        assert_eq!(config.review_per_paper, DEFAULT_REVIEWERS);
        assert_eq!(config.validation_percentage, DEFAULT_VALIDATION_PERCENTAGE);
        assert!(config.validation_enabled);
        assert_eq!(config.validation_assignment_mode, ValidationAssignmentMode::Normal);

        assert!(plan.criteria.is_empty());
        assert!(plan.phases.is_empty());
        assert!(plan.qa.is_none());
        assert_eq!(plan.fields.len(), 1);
        assert_eq!(plan.fields[0].field_type, FieldKind::Text);
        // project, member, config, form, one field
        assert_eq!(plan.row_count(), 5);
    }

    #[test]
    fn screening_without_phases_gets_one_default_phase() {
        let plan = InstallPlan::build(
            &protocol(json!({
                "project": {"short_name": "p", "name": "P"},
                "screening": {
                    "review_per_paper": 1,
                    "conflict_type": "Decision",
                    "conflict_resolution": "Majority",
                    "exclusion_criteria": [{"name": "a"}, {"name": "b"}],
                    "validation_percentage": 0
                },
                "category": [{"category_type": "Simple", "name": "n", "type": "int", "mandatory": true}]
            })),
            &creator(),
        )
        .unwrap();

        assert_eq!(plan.phases.len(), 1);
        assert_eq!(plan.phases[0].title, DEFAULT_PHASE_TITLE);
        assert_eq!(plan.phases[0].fields, None);
        let names: Vec<&str> = plan.criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(!plan.config.validation_enabled);
        assert_eq!(plan.config.conflict_resolution, ResolutionRule::Majority);
    }

    #[test]
    fn qa_options_are_cross_product_of_questions_and_responses() {
        let plan = InstallPlan::build(
            &protocol(json!({
                "project": {"short_name": "p", "name": "P"},
                "quality_assess": {
                    "question": ["q1", "q2", "q3"],
                    "response": [{"title": "Yes", "score": 1}, {"title": "Partly", "score": 0}],
                    "min_score": 2
                },
                "category": [{"category_type": "Simple", "name": "n", "type": "int", "mandatory": true}]
            })),
            &creator(),
        )
        .unwrap();

        let qa = plan.qa.unwrap();
        assert_eq!(qa.questions.len(), 3);
        assert_eq!(qa.options.len(), 6);
        for (i, option) in qa.options.iter().enumerate() {
            assert_eq!(option.question_id, qa.questions[i / 2].id);
            assert_eq!(option.is_positive, option.score > 0.0);
        }
    }

    #[test]
    fn child_fields_point_at_parent_ids() {
        let plan = InstallPlan::build(
            &protocol(json!({
                "project": {"short_name": "p", "name": "P"},
                "category": [
                    {"category_type": "Simple", "name": "a", "type": "int", "mandatory": true,
                     "sub_categories": [
                        {"category_type": "Simple", "name": "a", "type": "int", "mandatory": true}
                     ]}
                ]
            })),
            &creator(),
        )
        .unwrap();

        assert_eq!(plan.fields[0].parent_id, None);
        assert_eq!(plan.fields[1].parent_id.as_deref(), Some(plan.fields[0].id.as_str()));
        assert_eq!(plan.fields[1].position, 1);
        let form = plan.form.as_ref().unwrap();
        assert!(plan.fields.iter().all(|f| f.form_id == form.id));
    }
}

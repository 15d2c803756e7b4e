use serde::Serialize;
use sift_core::entities::{
    ExclusionCriterion, ExtractionField, ExtractionForm, ProjectMember, QaOption, QaQuestion,
    QaTemplate, ScreeningPhase,
};
use sift_core::responses::ProjectSummary;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProjectDetailResponse {
    summary: ProjectSummary,
    members: Vec<ProjectMember>,
    exclusion_criteria: Vec<ExclusionCriterion>,
    screening_phases: Vec<ScreeningPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<QualityDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction: Option<ExtractionDetail>,
}

#[derive(Debug, Serialize)]
struct QualityDetail {
    template: QaTemplate,
    questions: Vec<QuestionDetail>,
}

#[derive(Debug, Serialize)]
struct QuestionDetail {
    #[serde(flatten)]
    question: QaQuestion,
    options: Vec<QaOption>,
}

#[derive(Debug, Serialize)]
struct ExtractionDetail {
    form: ExtractionForm,
    fields: Vec<ExtractionField>,
}

/// Handle `sift show`.
pub async fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = load_detail(&args.label, ctx).await?;
    output(&response, flags.format)
}

async fn load_detail(label: &str, ctx: &AppContext) -> anyhow::Result<ProjectDetailResponse> {
    let project = ctx.require_project(label).await?;
    let service = &ctx.service;

    let quality = match service.get_qa_template(&project.id).await? {
        Some(template) => {
            let mut questions = Vec::new();
            for question in service.list_qa_questions(&template.id).await? {
                let options = service.list_qa_options(&question.id).await?;
                questions.push(QuestionDetail { question, options });
            }
            Some(QualityDetail { template, questions })
        }
        None => None,
    };

    let extraction = match service.get_extraction_form(&project.id).await? {
        Some(form) => {
            let fields = service.list_extraction_fields(&form.id).await?;
            Some(ExtractionDetail { form, fields })
        }
        None => None,
    };

    Ok(ProjectDetailResponse {
        summary: service.project_summary(&project.id).await?,
        members: service.list_members(&project.id).await?,
        exclusion_criteria: service.list_exclusion_criteria(&project.id).await?,
        screening_phases: service.list_screening_phases(&project.id).await?,
        quality,
        extraction,
    })
}

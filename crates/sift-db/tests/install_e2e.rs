//! End-to-end installation tests against in-memory and on-disk databases.
//!
//! - Full protocol: every table populated, stored protocol reads back equal
//! - Defaults: synthetic phase, mapped policy codes, minimal scenario
//! - Conflicts: pre-check, case folding, commit-time collision
//! - Atomicity: a failure in the last row leaves every table untouched

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

use sift_core::enums::{ConflictMode, EntityType, FieldKind, ResolutionRule};
use sift_core::identity::AuthIdentity;
use sift_core::protocol::{Report, ReviewProtocol, ValidationAssignmentMode};
use sift_db::error::InstallError;
use sift_db::plan::{DEFAULT_PHASE_TITLE, InstallPlan};
use sift_db::service::SiftService;

async fn test_service() -> SiftService {
    SiftService::new_local(":memory:").await.unwrap()
}

fn creator() -> AuthIdentity {
    AuthIdentity::new("user_2abc")
}

fn demo_slr() -> Value {
    json!({
        "project": {"short_name": "Demo_SLR", "name": "Demo SLR"},
        "category": [
            {"category_type": "Simple", "name": "notes", "title": "Notes", "type": "text", "mandatory": false}
        ]
    })
}

fn full_protocol() -> Value {
    json!({
        "project": {"short_name": "Covid_SLR", "name": "COVID review", "description": "Living review"},
        "screening": {
            "review_per_paper": 3,
            "conflict_type": "Criteria",
            "conflict_resolution": "Majority",
            "exclusion_criteria": [
                {"name": "Not peer reviewed"},
                {"name": "Wrong population"},
                {"name": "Not in English"}
            ],
            "source_papers": [{"name": "Scopus"}],
            "validation_percentage": 0,
            "validation_assignment_mode": "Veto",
            "phases": [
                {"title": "Title and abstract"},
                {"title": "Full text", "description": "Read everything", "fields": ["design", "country"]}
            ]
        },
        "quality_assess": {
            "question": ["Is the sample adequate?", "Is the method sound?", "Are results reported?"],
            "response": [
                {"title": "Yes", "score": 1},
                {"title": "Partly", "score": 0.5},
                {"title": "No", "score": 0},
                {"title": "Harmful", "score": -1}
            ],
            "min_score": 1.5
        },
        "category": [
            {"category_type": "List", "name": "design", "title": "Study design",
             "values": [{"name": "RCT"}, {"name": "Cohort"}], "mandatory": true,
             "sub_categories": [
                {"category_type": "Simple", "name": "sample_size", "type": "int",
                 "mandatory": false, "numberOfValues": 1},
                {"category_type": "Simple", "name": "duration", "type": "real", "mandatory": false}
             ]},
            {"category_type": "DynamicList", "dynamic_subtype": "Independent",
             "name": "country", "reference_name": "countries",
             "initial_values": [{"name": "France"}], "mandatory": false, "numberOfValues": -1,
             "sub_categories": [
                {"category_type": "DynamicList", "dynamic_subtype": "Dependent",
                 "name": "city", "depends_on": "country", "mandatory": false}
             ]}
        ],
        "reporting": [
            {"report_type": "Simple", "name": "designs", "value": "design", "chart": ["pie"]},
            {"report_type": "Compared", "name": "design_by_country", "value": "design",
             "reference": "country", "chart": ["bar", "line"]}
        ]
    })
}

fn validated(svc: &SiftService, raw: &Value) -> ReviewProtocol {
    svc.validator().validate(raw).expect("fixture should validate")
}

async fn row_counts(svc: &SiftService) -> Vec<(EntityType, u64)> {
    let mut counts = Vec::new();
    for entity in EntityType::ALL {
        counts.push((entity, svc.count_rows(entity).await.unwrap()));
    }
    counts
}

fn all_zero() -> Vec<(EntityType, u64)> {
    EntityType::ALL.iter().map(|e| (*e, 0)).collect()
}

// ---------------------------------------------------------------------------
// Full installation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_protocol_populates_every_table() {
    let svc = test_service().await;
    let protocol = validated(&svc, &full_protocol());

    let result = svc.install_protocol(&protocol, &creator()).await.unwrap();
    assert_eq!(result.label, "covid_slr");
    assert_eq!(result.title, "COVID review");
    assert!(result.project_id.starts_with("prj-"));

    let project = svc.get_project(&result.project_id).await.unwrap();
    assert_eq!(project.label, "covid_slr");
    assert_eq!(project.description.as_deref(), Some("Living review"));
    assert_eq!(project.status.as_str(), "DRAFT");
    assert_eq!(project.created_by, "user_2abc");

    let members = svc.list_members(&result.project_id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, "user_2abc");
    assert_eq!(members[0].role.as_str(), "ADMIN");

    let config = svc.get_project_config(&result.project_id).await.unwrap();
    assert!(config.screening_enabled);
    assert!(config.qa_enabled);
    assert!(config.extraction_enabled);
    assert_eq!(config.conflict_type, ConflictMode::AllCriteria);
    assert_eq!(config.conflict_resolution, ResolutionRule::Majority);
    assert_eq!(config.review_per_paper, 3);
    assert_eq!(config.validation_percentage, 0);
    assert!(!config.validation_enabled);
    assert_eq!(config.validation_assignment_mode, ValidationAssignmentMode::Veto);
    assert!(config.source_papers_enabled);
    assert!(!config.search_strategy_enabled);

    let summary = svc.project_summary(&result.project_id).await.unwrap();
    assert_eq!(summary.exclusion_criteria, 3);
    assert_eq!(summary.screening_phases, 2);
    assert_eq!(summary.qa_questions, 3);
    assert_eq!(summary.qa_options, 12);
    assert_eq!(summary.extraction_fields, 5);
    assert_eq!(summary.reports, 2);
}

#[tokio::test]
async fn stored_protocol_reads_back_equal() {
    let svc = test_service().await;
    let protocol = validated(&svc, &full_protocol());

    let result = svc.install_protocol(&protocol, &creator()).await.unwrap();
    let config = svc.get_project_config(&result.project_id).await.unwrap();
    assert_eq!(config.protocol, protocol);

    let reports = svc.list_reports(&result.project_id).await.unwrap();
    let names: Vec<&str> = reports.iter().map(Report::name).collect();
    assert_eq!(names, ["designs", "design_by_country"]);
}

#[tokio::test]
async fn criteria_and_declared_phases_keep_document_order() {
    let svc = test_service().await;
    let result = svc
        .install_document(&full_protocol(), &creator())
        .await
        .unwrap();

    let criteria = svc.list_exclusion_criteria(&result.project_id).await.unwrap();
    let names: Vec<&str> = criteria.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Not peer reviewed", "Wrong population", "Not in English"]);
    let positions: Vec<u32> = criteria.iter().map(|c| c.position).collect();
    assert_eq!(positions, [0, 1, 2]);

    let phases = svc.list_screening_phases(&result.project_id).await.unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0].title, "Title and abstract");
    assert_eq!(phases[0].fields, None);
    assert_eq!(phases[1].title, "Full text");
    assert_eq!(phases[1].description.as_deref(), Some("Read everything"));
    assert_eq!(
        phases[1].fields,
        Some(vec!["design".to_string(), "country".to_string()])
    );
}

#[tokio::test]
async fn every_question_gets_every_response() {
    let svc = test_service().await;
    let result = svc
        .install_document(&full_protocol(), &creator())
        .await
        .unwrap();

    let template = svc
        .get_qa_template(&result.project_id)
        .await
        .unwrap()
        .expect("qa template");
    assert!((template.min_score - 1.5).abs() < f64::EPSILON);

    let questions = svc.list_qa_questions(&template.id).await.unwrap();
    let texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(
        texts,
        ["Is the sample adequate?", "Is the method sound?", "Are results reported?"]
    );

    for question in &questions {
        let options = svc.list_qa_options(&question.id).await.unwrap();
        let titles: Vec<&str> = options.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["Yes", "Partly", "No", "Harmful"]);
        for option in &options {
            assert_eq!(option.is_positive, option.score > 0.0, "{}", option.title);
        }
    }
}

#[tokio::test]
async fn extraction_fields_are_flattened_in_pre_order() {
    let svc = test_service().await;
    let result = svc
        .install_document(&full_protocol(), &creator())
        .await
        .unwrap();

    let form = svc
        .get_extraction_form(&result.project_id)
        .await
        .unwrap()
        .expect("extraction form");
    assert!(form.published);
    assert!(form.published_at.is_some());

    let fields = svc.list_extraction_fields(&form.id).await.unwrap();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["design", "sample_size", "duration", "country", "city"]);
    let positions: Vec<u32> = fields.iter().map(|f| f.position).collect();
    assert_eq!(positions, [0, 1, 2, 3, 4]);

    let kinds: Vec<FieldKind> = fields.iter().map(|f| f.field_type).collect();
    assert_eq!(
        kinds,
        [
            FieldKind::List,
            FieldKind::Int,
            FieldKind::Real,
            FieldKind::DynamicList,
            FieldKind::DynamicList
        ]
    );

    let parents: Vec<Option<&str>> = fields.iter().map(|f| f.config.parent.as_deref()).collect();
    assert_eq!(
        parents,
        [None, Some("design"), Some("design"), None, Some("country")]
    );
    assert_eq!(fields[1].parent_id.as_deref(), Some(fields[0].id.as_str()));
    assert_eq!(fields[4].parent_id.as_deref(), Some(fields[3].id.as_str()));

    assert_eq!(fields[0].label, "Study design");
    assert!(fields[0].is_required);
    assert_eq!(
        fields[0].config.values,
        Some(vec!["RCT".to_string(), "Cohort".to_string()])
    );
    assert_eq!(fields[3].config.reference_name.as_deref(), Some("countries"));
    assert_eq!(fields[3].config.number_of_values, Some(-1));
    assert_eq!(fields[4].config.depends_on.as_deref(), Some("country"));
    assert_eq!(fields[4].config.dynamic_subtype.as_deref(), Some("Dependent"));
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demo_slr_installs_with_screening_and_qa_disabled() {
    let svc = test_service().await;
    let result = svc.install_document(&demo_slr(), &creator()).await.unwrap();
    assert_eq!(result.label, "demo_slr");

    let config = svc.get_project_config(&result.project_id).await.unwrap();
    assert!(!config.screening_enabled);
    assert!(!config.qa_enabled);
    assert!(config.extraction_enabled);

    assert!(svc.list_screening_phases(&result.project_id).await.unwrap().is_empty());
    assert!(svc.get_qa_template(&result.project_id).await.unwrap().is_none());

    let form = svc
        .get_extraction_form(&result.project_id)
        .await
        .unwrap()
        .unwrap();
    let fields = svc.list_extraction_fields(&form.id).await.unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "notes");
    assert_eq!(fields[0].label, "Notes");
    assert_eq!(fields[0].field_type, FieldKind::Text);
    assert!(fields[0].parent_id.is_none());
}

#[tokio::test]
async fn screening_without_phases_gets_exactly_one_default_phase() {
    let svc = test_service().await;
    let mut raw = demo_slr();
    raw["screening"] = json!({
        "review_per_paper": 2,
        "conflict_type": "Decision",
        "conflict_resolution": "Unanimity",
        "exclusion_criteria": [{"name": "Off topic"}]
    });

    let result = svc.install_document(&raw, &creator()).await.unwrap();
    let phases = svc.list_screening_phases(&result.project_id).await.unwrap();
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].title, DEFAULT_PHASE_TITLE);
    assert_eq!(phases[0].position, 0);

    let config = svc.get_project_config(&result.project_id).await.unwrap();
    assert_eq!(config.conflict_type, ConflictMode::IncludeExclude);
    assert_eq!(config.conflict_resolution, ResolutionRule::Unanimity);
    assert_eq!(config.validation_percentage, 20);
    assert!(config.validation_enabled);
    assert_eq!(config.validation_assignment_mode, ValidationAssignmentMode::Normal);
}

// ---------------------------------------------------------------------------
// Conflicts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_label_conflicts_without_writing() {
    let svc = test_service().await;
    svc.install_document(&demo_slr(), &creator()).await.unwrap();
    let before = row_counts(&svc).await;

    let mut again = demo_slr();
    again["project"]["short_name"] = json!("DEMO_slr");
    again["project"]["name"] = json!("Another title");
    let err = svc.install_document(&again, &creator()).await.unwrap_err();

    assert!(
        matches!(&err, InstallError::Conflict { label } if label == "demo_slr"),
        "unexpected error: {err:?}"
    );
    assert_eq!(row_counts(&svc).await, before);
}

#[tokio::test]
async fn label_claimed_after_precheck_is_still_a_conflict() {
    let svc = test_service().await;
    let protocol = validated(&svc, &full_protocol());

    // Plan built as if the pre-check had passed, then another install wins.
    let plan = InstallPlan::build(&protocol, &creator()).unwrap();
    svc.install_protocol(&protocol, &AuthIdentity::new("someone_else"))
        .await
        .unwrap();
    let before = row_counts(&svc).await;

    let err = svc.apply_plan(&plan).await.unwrap_err();
    assert!(
        matches!(&err, InstallError::Conflict { label } if label == "covid_slr"),
        "unexpected error: {err:?}"
    );
    assert_eq!(row_counts(&svc).await, before);
}

// ---------------------------------------------------------------------------
// Atomicity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failure_in_last_row_rolls_back_everything() {
    let svc = test_service().await;
    let protocol = validated(&svc, &full_protocol());

    let mut plan = InstallPlan::build(&protocol, &creator()).unwrap();
    plan.fields.last_mut().unwrap().form_id = "frm-does-not-exist".into();

    let err = svc.apply_plan(&plan).await.unwrap_err();
    assert!(matches!(err, InstallError::Internal(_)), "unexpected error: {err:?}");
    assert_eq!(err.to_string(), "Project installation failed");

    assert_eq!(row_counts(&svc).await, all_zero());
    assert!(svc.find_project_by_label("covid_slr").await.unwrap().is_none());

    // The label is still free afterwards.
    svc.install_protocol(&protocol, &creator()).await.unwrap();
}

#[tokio::test]
async fn failure_in_qa_rows_rolls_back_everything() {
    let svc = test_service().await;
    let protocol = validated(&svc, &full_protocol());

    let mut plan = InstallPlan::build(&protocol, &creator()).unwrap();
    let qa = plan.qa.as_mut().unwrap();
    let duplicate = qa.options[0].id.clone();
    qa.options.last_mut().unwrap().id = duplicate;

    let err = svc.apply_plan(&plan).await.unwrap_err();
    assert!(matches!(err, InstallError::Internal(_)), "unexpected error: {err:?}");
    assert_eq!(row_counts(&svc).await, all_zero());
}

#[tokio::test]
async fn invalid_document_is_rejected_before_any_write() {
    let svc = test_service().await;
    let mut raw = demo_slr();
    raw["category"] = json!([
        {"category_type": "List", "name": "design", "values": [{"name": "RCT"}], "mandatory": true}
    ]);

    let err = svc.install_document(&raw, &creator()).await.unwrap_err();
    let InstallError::Validation(errors) = err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert_eq!(errors.paths(), ["/category/0/values"]);
    assert_eq!(row_counts(&svc).await, all_zero());
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn installed_project_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sift.db");
    let path = path.to_str().unwrap();

    let project_id = {
        let svc = SiftService::new_local(path).await.unwrap();
        svc.install_document(&full_protocol(), &creator())
            .await
            .unwrap()
            .project_id
    };

    let svc = SiftService::new_local(path).await.unwrap();
    let project = svc.find_project_by_label("Covid_SLR").await.unwrap().unwrap();
    assert_eq!(project.id, project_id);
    assert_eq!(svc.list_projects().await.unwrap().len(), 1);
}

//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::Utc;
use schemars::schema_for;
use serde_json::json;
use sift_core::entities::*;
use sift_core::enums::*;
use sift_core::flatten::{FieldDescriptor, flatten};
use sift_core::protocol::*;
use sift_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_protocol() -> ReviewProtocol {
    serde_json::from_value(json!({
        "project": {"short_name": "Covid_SLR", "name": "COVID review", "description": "Demo"},
        "screening": {
            "review_per_paper": 2,
            "conflict_type": "Criteria",
            "conflict_resolution": "Majority",
            "exclusion_criteria": [{"name": "Not peer reviewed"}, {"name": "Wrong population"}],
            "validation_percentage": 20,
            "phases": [{"title": "Title and abstract", "fields": ["design"]}]
        },
        "quality_assess": {
            "question": ["Is the sample adequate?"],
            "response": [{"title": "Yes", "score": 1}, {"title": "No", "score": -0.5}],
            "min_score": 0.5
        },
        "category": [
            {"category_type": "List", "name": "design", "values": [{"name": "RCT"}, {"name": "Cohort"}],
             "mandatory": true,
             "sub_categories": [
                {"category_type": "Simple", "name": "sample_size", "type": "int", "mandatory": false}
             ]}
        ],
        "reporting": [
            {"report_type": "Simple", "name": "by_design", "value": "design", "chart": ["bar", "pie"]}
        ]
    }))
    .expect("sample protocol should deserialize")
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    project_roundtrip,
    Project,
    Project {
        id: "prj-a3f8b2c1d4e5f607".into(),
        label: "covid_slr".into(),
        title: "COVID review".into(),
        description: Some("Demo".into()),
        status: ProjectStatus::Draft,
        created_by: "user_2abc".into(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    member_roundtrip,
    ProjectMember,
    ProjectMember {
        id: "mbr-0011223344556677".into(),
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        user_id: "user_2abc".into(),
        role: MemberRole::Admin,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    project_config_roundtrip,
    ProjectConfig,
    ProjectConfig {
        id: "cfg-0011223344556677".into(),
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        screening_enabled: true,
        qa_enabled: true,
        extraction_enabled: true,
        conflict_type: ConflictMode::AllCriteria,
        conflict_resolution: ResolutionRule::Majority,
        review_per_paper: 2,
        validation_percentage: 20,
        validation_enabled: true,
        validation_assignment_mode: ValidationAssignmentMode::Normal,
        source_papers_enabled: false,
        search_strategy_enabled: false,
        protocol: sample_protocol(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    criterion_roundtrip,
    ExclusionCriterion,
    ExclusionCriterion {
        id: "exc-0011223344556677".into(),
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        name: "Not peer reviewed".into(),
        position: 0,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    phase_roundtrip,
    ScreeningPhase,
    ScreeningPhase {
        id: "phs-0011223344556677".into(),
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        title: "Title and abstract".into(),
        description: None,
        fields: Some(vec!["design".into()]),
        position: 0,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    qa_template_roundtrip,
    QaTemplate,
    QaTemplate {
        id: "qat-0011223344556677".into(),
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        min_score: 0.5,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    qa_option_roundtrip,
    QaOption,
    QaOption {
        id: "qao-0011223344556677".into(),
        question_id: "qaq-0011223344556677".into(),
        title: "No".into(),
        score: -0.5,
        is_positive: false,
        position: 1,
    }
);

roundtrip_and_validate!(
    extraction_form_roundtrip,
    ExtractionForm,
    ExtractionForm {
        id: "frm-0011223344556677".into(),
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        published: true,
        published_at: Some(Utc::now()),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    extraction_field_roundtrip,
    ExtractionField,
    ExtractionField {
        id: "fld-0011223344556677".into(),
        form_id: "frm-0011223344556677".into(),
        name: "sample_size".into(),
        label: "sample_size".into(),
        field_type: FieldKind::Int,
        is_required: false,
        position: 1,
        config: FieldConfig {
            parent: Some("design".into()),
            ..FieldConfig::default()
        },
        parent_id: Some("fld-8899aabbccddeeff".into()),
    }
);

roundtrip_and_validate!(
    install_result_roundtrip,
    InstallResult,
    InstallResult {
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        label: "covid_slr".into(),
        title: "COVID review".into(),
    }
);

roundtrip_and_validate!(
    project_summary_roundtrip,
    ProjectSummary,
    ProjectSummary {
        project_id: "prj-a3f8b2c1d4e5f607".into(),
        label: "covid_slr".into(),
        title: "COVID review".into(),
        status: "DRAFT".into(),
        screening_enabled: true,
        qa_enabled: true,
        extraction_enabled: true,
        exclusion_criteria: 2,
        screening_phases: 1,
        qa_questions: 1,
        qa_options: 2,
        extraction_fields: 2,
        reports: 1,
    }
);

roundtrip_and_validate!(
    field_error_roundtrip,
    FieldError,
    FieldError::new("/category/0/values", "[{\"name\":\"RCT\"}] has less than 2 items")
);

roundtrip_and_validate!(protocol_roundtrip, ReviewProtocol, sample_protocol());

#[test]
fn flattened_descriptors_validate_against_schema() {
    let fields: Vec<FieldDescriptor> = flatten(&sample_protocol().category);
    assert_eq!(fields.len(), 2);

    let schema = serde_json::to_value(schema_for!(FieldDescriptor)).unwrap();
    for field in &fields {
        let instance = serde_json::to_value(field).unwrap();
        let errors = validate_against_schema(&schema, &instance);
        assert!(errors.is_empty(), "{}: {errors:?}", field.name);
    }
}

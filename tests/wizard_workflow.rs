use std::sync::Arc;

use fla_wizard::efiling::{
    InMemorySubmissionRepository, PackageCallback, PackageRequest, SubmissionPackage,
    SubmissionRecord, SubmissionRepository, UploadPolicy, UploadedFile,
};
use fla_wizard::wizard::{
    DocumentSet, LocationDirectory, PageSubmission, Pathway, Progress, WizardSession,
    WizardState,
};
use serde_json::{json, Value};

const EXISTING_PROTECTION_ORDERS: &str =
    "Copy of your existing protection related written agreement(s), court order(s) or plan(s)";
const EXISTING_ORDERS: &str = "Copy of your existing written agreement(s) or court order(s)";

fn session() -> WizardSession {
    WizardSession::new(WizardState::default(), Arc::new(LocationDirectory::standard()))
}

fn page(survey: &str, step: usize, page: usize, data: Value) -> PageSubmission {
    PageSubmission {
        survey_name: survey.to_string(),
        step,
        page,
        page_title: survey.to_string(),
        data,
        ..PageSubmission::default()
    }
}

#[test]
fn family_law_matter_documents_follow_recorded_answers() {
    let mut session = session();
    let flm = session.state().layout().flm;

    session.record_survey_page(&page(
        "flmBackgroundSurvey",
        flm.step,
        1,
        json!({ "existingPOOrders": "y", "ExistingOrdersFLM": "y" }),
    ));
    session.settle();

    let answers = session.state().pathway_answers(Pathway::FamilyLawMatter);
    let documents = session.compute_required_documents(DocumentSet::FamilyLawMatter, &answers);
    assert_eq!(
        documents.required,
        vec![EXISTING_PROTECTION_ORDERS, EXISTING_ORDERS]
    );
    assert!(documents.reminder.is_empty());

    session.record_survey_page(&page(
        "flmAdditionalDocumentsSurvey",
        flm.step,
        flm.flm_additional_documents,
        json!({ "isFilingAdditionalDocs": "n", "unableFileForms": [EXISTING_ORDERS] }),
    ));
    assert!(session.apply_case_management_fallback());

    let state = session.into_state();
    let documents = state
        .required_documents(DocumentSet::FamilyLawMatter)
        .expect("documents stored");
    assert_eq!(documents.required.len(), 2);
    assert_eq!(documents.required[0], EXISTING_PROTECTION_ORDERS);
    assert!(documents.required[1].contains("Form 11"));
}

#[test]
fn changing_answers_sends_a_completed_pathway_back_to_review() {
    let mut session = session();
    let layout = session.state().layout().clone();
    let pages = layout.pathway_pages(Pathway::ChildReloc);

    {
        let state = session.state_mut();
        state.set_page_active(pages.step, pages.review, true);
        state.set_page_progress(pages.step, pages.review, Progress::Complete);
        for preview in &pages.previews {
            state.set_page_active(pages.step, *preview, true);
            state.set_page_progress(pages.step, *preview, Progress::Complete);
        }
        state.set_pathway_completed(Pathway::ChildReloc, true);
        state.set_page_active(layout.submit.step, 0, true);
        state.set_page_progress(layout.submit.step, 0, Progress::Complete);
    }

    session.survey_changed(Pathway::ChildReloc);
    let state = session.into_state();

    assert!(!state.pathway_completed(Pathway::ChildReloc));
    assert_eq!(
        state.page_progress(pages.step, pages.review),
        Progress::NeedsReview
    );
    for preview in &pages.previews {
        assert!(!state.page_is_active(pages.step, *preview));
    }
    assert!(!state.page_is_active(layout.submit.step, 0));
    assert_eq!(
        state.page_progress(layout.submit.step, 0),
        Progress::NotStarted
    );
}

#[test]
fn wizard_state_survives_a_json_round_trip_between_requests() {
    let mut session = session();
    let answers = session.state().pathway_answers(Pathway::ProtectionOrder);
    session.compute_required_documents(DocumentSet::ProtectionOrder, &answers);
    let state = session.into_state();

    let encoded = serde_json::to_string(&state).expect("state serializes");
    let decoded: WizardState = serde_json::from_str(&encoded).expect("state deserializes");
    assert_eq!(decoded, state);
}

#[test]
fn filing_package_flows_into_a_submission_record() {
    let request = PackageRequest {
        generated_pdf_ready: true,
        files: vec![
            UploadedFile {
                name: "order.pdf".to_string(),
                size: 4096,
            },
            UploadedFile {
                name: "photo.JPG".to_string(),
                size: 8192,
            },
        ],
        document_types: vec!["EXH".to_string(), "EXH".to_string()],
    };

    let package =
        SubmissionPackage::assemble(&UploadPolicy::default(), &request).expect("package builds");
    assert_eq!(package.documents.len(), 3);
    assert_eq!(package.documents[2].file_name, "photo.pdf");
    assert_eq!(package.conversions(), 1);
    assert_eq!(package.document_types, vec!["POR", "EXH", "EXH"]);

    let repository = InMemorySubmissionRepository::new();
    let now = chrono::Utc::now();
    let mut record = repository
        .insert(SubmissionRecord::open("application-42", now))
        .expect("insert");
    record.mark_uploaded("hub-submission", now);
    record.record_package(
        PackageCallback {
            package_number: Some("1201".to_string()),
            package_url: None,
        },
        now,
    );
    repository.update(record.clone()).expect("update");

    let stored = repository
        .fetch(&record.transaction_id)
        .expect("fetch")
        .expect("present");
    assert!(stored.is_uploaded());
    assert_eq!(stored.package_number.as_deref(), Some("1201"));
}

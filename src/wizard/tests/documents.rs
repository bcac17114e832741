use serde_json::json;

use super::common::*;
use crate::wizard::documents::rules::{
    CONSENT_ORDER_FORM18, FOREIGN_ORDER, ORDER_FOR_ENFORCEMENT, OUTSIDE_BC_ORDER,
    PARENTING_ARRANGEMENTS, RECORD_CHECK_CONSENT_FORM5, REGISTRY_SEARCH_REQUEST,
    RELOCATION_NOTICE, SUPPORT_CALCULATION, SUPPORT_ORDER_OR_AGREEMENT, TREATY_NATION_SERVICE,
};
use crate::wizard::documents::{
    apply_case_management_fallback, remove_required_documents, CASE_MANAGEMENT_WITHOUT_NOTICE,
};
use crate::wizard::domain::{DocumentSet, Pathway, RequiredDocuments};

#[test]
fn flm_with_existing_protection_orders_needs_only_those_orders() {
    let mut state = state();

    let documents = documents(
        &mut state,
        DocumentSet::FamilyLawMatter,
        &[("flmBackgroundSurvey", json!({ "existingPOOrders": "y" }))],
    );

    assert_eq!(documents.required, vec![EXISTING_PROTECTION_ORDERS]);
    assert!(documents.reminder.is_empty());
    assert_eq!(
        state.required_documents(DocumentSet::FamilyLawMatter),
        Some(&documents)
    );
}

#[test]
fn empty_answers_produce_empty_lists() {
    let mut state = state();
    for set in DocumentSet::ordered() {
        let documents = documents(&mut state, set, &[]);
        assert!(documents.is_empty(), "{set:?} produced {documents:?}");
    }
}

#[test]
fn recomputing_is_idempotent() {
    let mut state = state();
    let surveys = [
        ("flmQuestionnaireSurvey", json!(["childSupport"])),
        (
            "aboutExistingChildSupportSurvey",
            json!({ "filedWithDirector": "y" }),
        ),
        ("flmBackgroundSurvey", json!({ "ExistingOrdersFLM": "y" })),
    ];

    let first = documents(&mut state, DocumentSet::FamilyLawMatter, &surveys);
    let second = documents(&mut state, DocumentSet::FamilyLawMatter, &surveys);

    assert_eq!(first, second);
    assert_eq!(first.required, vec![EXISTING_ORDERS]);
    assert_eq!(first.reminder, vec![MAINTENANCE_ENFORCEMENT_SERVICE]);
}

#[test]
fn protection_order_rules_keep_table_order() {
    let mut state = state();

    let documents = documents(
        &mut state,
        DocumentSet::ProtectionOrder,
        &[
            ("poQuestionnaireSurvey", json!({ "orderType": "needPO" })),
            ("poFilingLocationSurvey", json!({ "ExistingFamilyCase": "y" })),
            ("backgroundSurvey", json!({ "existingPOOrders": "y" })),
        ],
    );

    assert_eq!(
        documents.required,
        vec![
            "Any exhibits referenced in your application",
            EXISTING_ORDERS,
            EXISTING_PROTECTION_ORDERS,
        ]
    );
}

#[test]
fn other_children_with_orders_need_existing_orders() {
    let mut state = state();
    let background = json!({
        "ExistingOrders": "y",
        "PartiesHasOtherChilderen": "y",
        "allOtherChilderen": [],
    });

    let without_children = documents(
        &mut state,
        DocumentSet::ProtectionOrder,
        &[
            ("poQuestionnaireSurvey", json!({ "orderType": "needPO" })),
            ("backgroundSurvey", background.clone()),
        ],
    );
    assert!(!without_children.required.contains(&EXISTING_ORDERS.to_string()));

    let mut with_children = background;
    with_children["allOtherChilderen"] = json!([{ "name": { "first": "Sam" } }]);
    let documents = documents(
        &mut state,
        DocumentSet::ProtectionOrder,
        &[
            ("poQuestionnaireSurvey", json!({ "orderType": "needPO" })),
            ("backgroundSurvey", with_children),
        ],
    );
    assert!(documents.required.contains(&EXISTING_ORDERS.to_string()));
}

#[test]
fn change_and_terminate_orders_need_existing_orders() {
    let mut state = state();
    for order_type in ["changePO", "terminatePO"] {
        let documents = documents(
            &mut state,
            DocumentSet::ProtectionOrder,
            &[("poQuestionnaireSurvey", json!({ "orderType": order_type }))],
        );
        assert_eq!(documents.required, vec![EXISTING_ORDERS]);
    }
}

#[test]
fn duplicate_required_texts_collapse_to_first_occurrence() {
    let mut state = state();
    let enfrc = state.layout().enfrc;
    state.set_page_active(enfrc.step, enfrc.enforce_agreement_or_order, true);

    let documents = documents(
        &mut state,
        DocumentSet::AgreementEnfrc,
        &[
            ("enfrcQuestionnaireSurvey", json!(["arrears", "expenses"])),
            (
                "enforceAgreementOrOrderSurvey",
                json!({ "enforceOrder": "y" }),
            ),
        ],
    );

    assert_eq!(
        documents.required,
        vec![
            "Copy of support order or agreement",
            COURT_ORDER_FOR_ENFORCEMENT
        ]
    );
}

#[test]
fn enforcement_page_rules_need_an_active_page() {
    let mut state = state();
    let surveys = [(
        "enforceAgreementOrOrderSurvey",
        json!({ "enforceOrder": "n", "filedOrder": "n", "existingType": "courtOrder" }),
    )];

    let inactive = documents(&mut state, DocumentSet::AgreementEnfrc28, &surveys);
    assert!(inactive.required.is_empty());

    let enfrc = state.layout().enfrc;
    state.set_page_active(enfrc.step, enfrc.enforce_agreement_or_order, true);
    let active = documents(&mut state, DocumentSet::AgreementEnfrc28, &surveys);
    assert_eq!(active.required, vec!["Certified copy of order"]);

    let enforcement = documents(&mut state, DocumentSet::AgreementEnfrc, &surveys);
    assert_eq!(enforcement.required, vec![COURT_ORDER_FOR_ENFORCEMENT]);
}

#[test]
fn determination_requests_follow_the_appointment() {
    let mut state = state();
    let enfrc = state.layout().enfrc;
    state.set_page_active(
        enfrc.step,
        enfrc.enforce_change_or_set_aside_determination,
        true,
    );
    let surveys = [(
        "enforceChangeSetAsideDeterminationSurvey",
        json!({
            "filedOrder": "n",
            "appointedDetermination": { "selected": "writtenAgreement" },
            "filedAgreement": "n",
        }),
    )];

    let determination = documents(&mut state, DocumentSet::AgreementEnfrc27, &surveys);
    assert_eq!(
        determination.required,
        vec!["Copy of determination of parenting coordinator"]
    );

    let agreement = documents(&mut state, DocumentSet::AgreementEnfrc26, &surveys);
    assert_eq!(
        agreement.required,
        vec!["Copy of written agreement to appoint a parenting coordinator"]
    );
}

#[test]
fn reply_reminds_about_parenting_education_in_early_resolution_registries() {
    let mut state = state();
    let met = json!({ "MetEarlyResolutionRequirements": "y" });

    for (court, expected) in [("Vancouver", 1), ("Kamloops", 0), ("Nowhere", 0)] {
        let mut filing = met.clone();
        filing["ExistingCourt"] = json!(court);
        let documents = documents(
            &mut state,
            DocumentSet::ReplyFlm,
            &[("filingLocationSurvey", filing)],
        );
        assert_eq!(documents.reminder.len(), expected, "court {court}");
    }
}

#[test]
fn reply_child_support_documents() {
    let mut state = state();

    let documents = documents(
        &mut state,
        DocumentSet::ReplyFlm,
        &[
            (
                "rflmQuestionnaireSurvey",
                json!({ "selectedChildSupportForm": ["newChildSupport", "existingChildSupport"] }),
            ),
            ("replyNewChildSupportSurvey", json!({ "agreeCourtOrder": "n" })),
            (
                "replyExistingChildSupportSurvey",
                json!({ "agreeCourtOrder": "n" }),
            ),
            (
                "rflmCalculatingChildSupportSurvey",
                json!({ "attachingCalculations": "y" }),
            ),
            (
                "rflmAdditionalDocumentsSurvey",
                json!({ "isFilingAdditionalDocs": "y" }),
            ),
            (
                "rflmBackgroundSurvey",
                json!({ "existingPOOrdersAttached": "n" }),
            ),
        ],
    );

    assert_eq!(
        documents.required,
        vec![
            "Copy of the missed protection related written agreement(s), court order(s) or plan(s)",
            "Support calculation",
            "Financial Statement Form 4",
            "Financial Statement Form 4, if applicable",
        ]
    );
}

#[test]
fn priority_parenting_schedule_and_service_reminders() {
    let mut state = state();
    let step = state.layout().ppm.step;
    record(
        &mut state,
        step,
        "ppmQuestionnaireSurvey",
        json!(["childServices"]),
    );
    record(
        &mut state,
        step,
        "priorityParentingMatterOrderSurvey",
        json!({ "childRemoved": "y", "confirmChildServices": ["applyPPM"] }),
    );
    record(
        &mut state,
        step,
        "ppmIndigenousAncestryOfChildSurvey",
        json!({ "indigenousAncestry": ["Nisg̲a’a"] }),
    );
    let answers = state.pathway_answers(Pathway::PriorityParenting);

    let documents = crate::wizard::documents::compute_required_documents(
        &mut state,
        &locations(),
        DocumentSet::PriorityParenting,
        &answers,
    );

    assert_eq!(documents.required.len(), 1);
    assert!(documents.required[0].starts_with("Completed Schedule 1"));
    assert_eq!(documents.reminder.len(), 2);
    assert!(documents.reminder[0].starts_with("You must serve the director under Child"));
    assert!(documents.reminder[1].contains("Treaty First Nation"));
}

#[test]
fn case_management_form18_needs_the_consent_page() {
    let mut state = state();
    let surveys = [(
        "byConsentSurvey",
        json!({ "giveConsentDirection": "fileForm18" }),
    )];

    assert!(documents(&mut state, DocumentSet::CaseMgmt, &surveys).is_empty());

    let cm = state.layout().cm;
    state.set_page_active(cm.step, cm.by_consent, true);
    let documents = documents(&mut state, DocumentSet::CaseMgmt, &surveys);
    assert_eq!(documents.required.len(), 1);
    assert!(documents.required[0].contains("Consent Order Form 18"));
}

#[test]
fn relocation_documents_follow_the_questionnaire() {
    let mut state = state();

    let both = documents(
        &mut state,
        DocumentSet::ChildReloc,
        &[(
            "relocQuestionnaireSurvey",
            json!({ "ExistingParentingArrangements": "y", "receiveNotice": "y" }),
        )],
    );
    assert_eq!(both.required, vec![PARENTING_ARRANGEMENTS, RELOCATION_NOTICE]);
    assert!(both.reminder.is_empty());

    let notice_only = documents(
        &mut state,
        DocumentSet::ChildReloc,
        &[(
            "relocQuestionnaireSurvey",
            json!({ "ExistingParentingArrangements": "n", "receiveNotice": "y" }),
        )],
    );
    assert_eq!(notice_only.required, vec![RELOCATION_NOTICE]);
}

#[test]
fn becoming_a_guardian_needs_form5_then_registry_search() {
    let mut state = state();
    let flm = state.layout().flm;
    record(
        &mut state,
        flm.step,
        "flmQuestionnaireSurvey",
        json!(["guardianOfChild", "spousalSupport"]),
    );
    record(
        &mut state,
        flm.step,
        "guardianOfChildSurvey",
        json!({ "applicationType": ["becomeGuardian"] }),
    );
    record(
        &mut state,
        flm.step,
        "indigenousAncestryOfChildSurvey",
        json!({ "indigenousAncestry": ["Treaty First Nation"] }),
    );
    record(
        &mut state,
        flm.step,
        "calculatingSpousalSupportSurvey",
        json!({ "attachingCalculations": "y" }),
    );
    state.set_page_active(flm.step, flm.guardian_of_child, true);
    let answers = state.pathway_answers(Pathway::FamilyLawMatter);

    let documents = crate::wizard::documents::compute_required_documents(
        &mut state,
        &locations(),
        DocumentSet::FamilyLawMatter,
        &answers,
    );
    assert_eq!(
        documents.required,
        vec![
            SUPPORT_CALCULATION,
            RECORD_CHECK_CONSENT_FORM5,
            REGISTRY_SEARCH_REQUEST,
        ]
    );
    assert_eq!(documents.reminder, vec![TREATY_NATION_SERVICE]);

    state.set_page_active(flm.step, flm.guardian_of_child, false);
    let documents = crate::wizard::documents::compute_required_documents(
        &mut state,
        &locations(),
        DocumentSet::FamilyLawMatter,
        &answers,
    );
    assert_eq!(documents.required, vec![SUPPORT_CALCULATION]);
    assert_eq!(documents.reminder, vec![TREATY_NATION_SERVICE]);
}

#[test]
fn spousal_support_calculation_needs_spousal_support_selected() {
    let mut state = state();
    let calculation = (
        "calculatingSpousalSupportSurvey",
        json!({ "attachingCalculations": "y" }),
    );

    let unselected = documents(
        &mut state,
        DocumentSet::FamilyLawMatter,
        &[
            ("flmQuestionnaireSurvey", json!(["childSupport"])),
            calculation.clone(),
        ],
    );
    assert!(unselected.is_empty());

    let selected = documents(
        &mut state,
        DocumentSet::FamilyLawMatter,
        &[
            ("flmQuestionnaireSurvey", json!(["spousalSupport"])),
            calculation,
        ],
    );
    assert_eq!(selected.required, vec![SUPPORT_CALCULATION]);
    assert!(selected.reminder.is_empty());
}

#[test]
fn treaty_reminder_needs_guardianship_and_ancestry() {
    let mut state = state();
    let ancestry = (
        "indigenousAncestryOfChildSurvey",
        json!({ "indigenousAncestry": ["Nisg̲a’a"] }),
    );

    let without_guardianship = documents(
        &mut state,
        DocumentSet::FamilyLawMatter,
        &[
            ("flmQuestionnaireSurvey", json!(["parentingArrangements"])),
            ancestry.clone(),
        ],
    );
    assert!(without_guardianship.reminder.is_empty());

    let with_guardianship = documents(
        &mut state,
        DocumentSet::FamilyLawMatter,
        &[("flmQuestionnaireSurvey", json!(["guardianOfChild"])), ancestry],
    );
    assert!(with_guardianship.required.is_empty());
    assert_eq!(with_guardianship.reminder, vec![TREATY_NATION_SERVICE]);
}

#[test]
fn order_from_outside_bc_needs_its_page() {
    let mut state = state();
    let surveys = [
        (
            "byConsentSurvey",
            json!({ "giveConsentDirection": "fileForm18" }),
        ),
        (
            "recognizingAnOrderFromOutsideBcSurvey",
            json!({ "outsideBcOrder": "y" }),
        ),
    ];

    assert!(documents(&mut state, DocumentSet::CaseMgmt, &surveys).is_empty());

    let cm = state.layout().cm;
    state.set_page_active(cm.step, cm.recognizing_an_order_from_outside_bc, true);
    let outside_only = documents(&mut state, DocumentSet::CaseMgmt, &surveys);
    assert_eq!(outside_only.required, vec![OUTSIDE_BC_ORDER]);

    state.set_page_active(cm.step, cm.by_consent, true);
    let both = documents(&mut state, DocumentSet::CaseMgmt, &surveys);
    assert_eq!(both.required, vec![CONSENT_ORDER_FORM18, OUTSIDE_BC_ORDER]);
    assert!(both.reminder.is_empty());
}

#[test]
fn foreign_support_needs_the_foreign_order() {
    let mut state = state();

    let foreign = documents(
        &mut state,
        DocumentSet::AgreementEnfrc,
        &[("enfrcQuestionnaireSurvey", json!(["foreignSupport"]))],
    );
    assert_eq!(foreign.required, vec![FOREIGN_ORDER]);

    let all_reasons = documents(
        &mut state,
        DocumentSet::AgreementEnfrc,
        &[(
            "enfrcQuestionnaireSurvey",
            json!(["expenses", "foreignSupport", "arrears"]),
        )],
    );
    assert_eq!(
        all_reasons.required,
        vec![SUPPORT_ORDER_OR_AGREEMENT, FOREIGN_ORDER, ORDER_FOR_ENFORCEMENT]
    );
    assert!(all_reasons.reminder.is_empty());
}

#[test]
fn remove_clears_both_lists() {
    let mut state = state();
    documents(
        &mut state,
        DocumentSet::FamilyLawMatter,
        &[("flmBackgroundSurvey", json!({ "existingPOOrders": "y" }))],
    );

    remove_required_documents(&mut state, DocumentSet::FamilyLawMatter);

    assert_eq!(
        state.required_documents(DocumentSet::FamilyLawMatter),
        Some(&RequiredDocuments::default())
    );
}

fn flm_with_two_documents() -> crate::wizard::state::WizardState {
    let mut state = state();
    documents(
        &mut state,
        DocumentSet::FamilyLawMatter,
        &[(
            "flmBackgroundSurvey",
            json!({ "existingPOOrders": "y", "ExistingOrdersFLM": "y" }),
        )],
    );
    state
}

#[test]
fn fallback_substitutes_case_management_once() {
    let mut state = flm_with_two_documents();
    let step = state.layout().flm.step;
    record(
        &mut state,
        step,
        "flmAdditionalDocumentsSurvey",
        json!({
            "isFilingAdditionalDocs": "n",
            "unableFileForms": [EXISTING_PROTECTION_ORDERS, EXISTING_ORDERS],
        }),
    );

    assert!(apply_case_management_fallback(&mut state));

    let documents = state
        .required_documents(DocumentSet::FamilyLawMatter)
        .expect("computed");
    assert_eq!(documents.required, vec![CASE_MANAGEMENT_WITHOUT_NOTICE]);
}

#[test]
fn fallback_keeps_fileable_documents_in_place() {
    let mut state = flm_with_two_documents();
    let step = state.layout().flm.step;
    record(
        &mut state,
        step,
        "flmAdditionalDocumentsSurvey",
        json!({ "isFilingAdditionalDocs": "n", "unableFileForms": [EXISTING_ORDERS] }),
    );

    assert!(apply_case_management_fallback(&mut state));

    let documents = state
        .required_documents(DocumentSet::FamilyLawMatter)
        .expect("computed");
    assert_eq!(
        documents.required,
        vec![EXISTING_PROTECTION_ORDERS, CASE_MANAGEMENT_WITHOUT_NOTICE]
    );
}

#[test]
fn fallback_does_nothing_when_filing_additional_documents() {
    let mut state = flm_with_two_documents();
    let step = state.layout().flm.step;
    record(
        &mut state,
        step,
        "flmAdditionalDocumentsSurvey",
        json!({ "isFilingAdditionalDocs": "y", "unableFileForms": [EXISTING_ORDERS] }),
    );
    let before = state.clone();

    assert!(!apply_case_management_fallback(&mut state));
    assert_eq!(state, before);

    let mut untouched = super::common::state();
    assert!(!apply_case_management_fallback(&mut untouched));
}

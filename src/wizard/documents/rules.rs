use super::{DocumentList, DocumentRule, RuleContext};
use crate::wizard::activation::OptionalSection;
use crate::wizard::domain::DocumentSet;
use crate::wizard::registry::RegistryType;

const EXISTING_ORDERS: &str = "Copy of your existing written agreement(s) or court order(s)";
const EXISTING_PROTECTION_ORDERS: &str =
    "Copy of your existing protection related written agreement(s), court order(s) or plan(s)";
const MISSED_PROTECTION_ORDERS: &str =
    "Copy of the missed protection related written agreement(s), court order(s) or plan(s)";
const MISSED_EXISTING_ORDERS: &str = "Copy of the missed existing agreement(s) or court order(s)";
pub(crate) const SUPPORT_CALCULATION: &str = "Support calculation";
const FINANCIAL_STATEMENT: &str = "Financial Statement Form 4";
const FINANCIAL_STATEMENT_IF_APPLICABLE: &str = "Financial Statement Form 4, if applicable";
const PARENTING_EDUCATION_CERTIFICATE: &str = "Certificate of completion for parenting education program (Parenting After Separation or Parenting After Separation For Indigenous Families), if applicable.";
const EXHIBITS: &str = "Any exhibits referenced in your application";

const FINANCIAL_STATEMENT_FORM4: &str = "Completed <a href='https://www2.gov.bc.ca/assets/gov/law-crime-and-justice/courthouse-services/court-files-records/court-forms/family/pfa713.pdf?forcedownload=true' target='_blank' > Financial Statement Form 4 </a>";
pub(crate) const RECORD_CHECK_CONSENT_FORM5: &str = "Completed  <a class='mr-1' href='https://www2.gov.bc.ca/assets/gov/law-crime-and-justice/courthouse-services/court-files-records/court-forms/supreme-family/s-51-consent-child-protection-record-check.pdf?forcedownload=true' target='_blank' > Consent for Child Protection Record Check Form 5 </a> <i> Family Law Act Regulation </i>";
pub(crate) const REGISTRY_SEARCH_REQUEST: &str = "Completed  <a class='mr-1' href='https://www2.gov.bc.ca/assets/gov/law-crime-and-justice/courthouse-services/court-files-records/court-forms/family/pfa914.pdf?forcedownload=true' target='_blank' > Request for protection order registry search </a> form";
const SCHEDULE_1: &str = "Completed Schedule 1 (to be completed by a director under the Child, Family and Community Service Act)<ul class='mt-3' style='line-height: 1.5; list-style-type:circle;'><li>When you upload your completed Schedule 1, you will need to select from the drop list of document types – Schedule 1, completed by the Director from the top of the drop list. Once uploaded, the Schedule 1 will be attached to your Application About a Priority Parenting Matter when you click the Proceed to Submit button.</li></ul>";
const MAINTENANCE_ENFORCEMENT_SERVICE: &str =
    "You must serve a copy of the application on the director of Maintenance Enforcement.";
pub(crate) const TREATY_NATION_SERVICE: &str = "You must serve the Nisg̲a’a Lisims Government or the Treaty First Nation to which the child belongs with notice of this application as described in section 208 or 209 of the Family Law Act. <br/><br/>Contact the Nisga’a Lisims Government or the Treaty First Nation to confirm how they should be served with notice of the application. For an alphabetical listing of First Nations including information about the First Nation(s) and contact information where available, visit the BC Government <a target='_blank' href='https://www2.gov.bc.ca/gov/content/environment/natural-resource-stewardship/consulting-with-first-nations/first-nations-negotiations/first-nations-a-z-listing'>website</a> .";
const CFCSA_DIRECTOR_SERVICE: &str = "You must serve the director under Child, Family and Community Service Act with notice of this application. The director can be served in any of the ways provided for in Question 5 of Schedule 1 (that was completed by the Director).";
pub(crate) const PARENTING_ARRANGEMENTS: &str =
    "Copy of existing written agreement or court order about parenting arrangements.";
pub(crate) const RELOCATION_NOTICE: &str = "Copy of the written notice of relocation";
pub(crate) const CONSENT_ORDER_FORM18: &str = "Completed <a target='blank' href='https://www2.gov.bc.ca/assets/gov/law-crime-and-justice/courthouse-services/court-files-records/court-forms/family/pfa739.pdf?forcedownload=true'>Consent Order Form 18</a> form";
pub(crate) const OUTSIDE_BC_ORDER: &str = "Certified copy of the order from outside BC";
pub(crate) const SUPPORT_ORDER_OR_AGREEMENT: &str = "Copy of support order or agreement";
pub(crate) const FOREIGN_ORDER: &str = "Copy of the foreign order";
pub(crate) const ORDER_FOR_ENFORCEMENT: &str = "Copy of court order for enforcement";
const FILED_AGREEMENT_OR_ORDER: &str =
    "Copy of filed written agreement or court order for enforcement";
const AGREEMENT_FOR_ENFORCEMENT: &str = "Copy of written agreement for enforcement";
const FILED_DETERMINATION: &str = "Copy of filed determination of a parenting coordinator";
const DETERMINATION: &str = "Copy of determination of parenting coordinator";
const WRITTEN_AGREEMENT: &str = "Copy of written agreement";
const COORDINATOR_AGREEMENT: &str = "Copy of written agreement to appoint a parenting coordinator";
const CERTIFIED_ORDER: &str = "Certified copy of order";

const NISGAA: &str = "Nisg̲a’a";
const TREATY_FIRST_NATION: &str = "Treaty First Nation";

/// Ordered rule table for `set`. Rules append in table order.
pub(crate) fn rules_for(set: DocumentSet) -> Vec<DocumentRule> {
    match set {
        DocumentSet::ReplyFlm => reply_flm_rules(),
        DocumentSet::ProtectionOrder => protection_order_rules(),
        DocumentSet::FamilyLawMatter => family_law_matter_rules(),
        DocumentSet::PriorityParenting => priority_parenting_rules(),
        DocumentSet::ChildReloc => relocation_rules(),
        DocumentSet::CaseMgmt => case_management_rules(),
        DocumentSet::AgreementEnfrc => enforcement_rules(),
        DocumentSet::AgreementEnfrc26 => agreement_filing_rules(),
        DocumentSet::AgreementEnfrc27 => determination_filing_rules(),
        DocumentSet::AgreementEnfrc28 => order_filing_rules(),
    }
}

fn required(text: &'static str, applies: fn(&RuleContext<'_>) -> bool) -> DocumentRule {
    DocumentRule {
        list: DocumentList::Required,
        text,
        applies,
    }
}

fn reminder(text: &'static str, applies: fn(&RuleContext<'_>) -> bool) -> DocumentRule {
    DocumentRule {
        list: DocumentList::Reminder,
        text,
        applies,
    }
}

fn reply_new_child_support(ctx: &RuleContext<'_>) -> bool {
    ctx.survey("rflmQuestionnaireSurvey")
        .field("selectedChildSupportForm")
        .includes("newChildSupport")
        && ctx
            .survey("replyNewChildSupportSurvey")
            .field("agreeCourtOrder")
            .is("n")
}

fn reply_existing_child_support(ctx: &RuleContext<'_>) -> bool {
    ctx.survey("rflmQuestionnaireSurvey")
        .field("selectedChildSupportForm")
        .includes("existingChildSupport")
        && ctx
            .survey("replyExistingChildSupportSurvey")
            .field("agreeCourtOrder")
            .is("n")
}

fn reply_selected_child_support(ctx: &RuleContext<'_>) -> bool {
    !ctx.survey("rflmQuestionnaireSurvey")
        .field("selectedChildSupportForm")
        .is_empty()
}

fn reply_flm_rules() -> Vec<DocumentRule> {
    vec![
        required(MISSED_PROTECTION_ORDERS, |ctx| {
            ctx.survey("rflmBackgroundSurvey")
                .field("existingPOOrdersAttached")
                .is("n")
        }),
        required(MISSED_EXISTING_ORDERS, |ctx| {
            let background = ctx.survey("rflmBackgroundSurvey");
            background.field("ExistingOrdersFLM").is("y")
                && background.field("otherPartyAttach").is("n")
        }),
        required(SUPPORT_CALCULATION, |ctx| {
            reply_selected_child_support(ctx)
                && (reply_new_child_support(ctx) || reply_existing_child_support(ctx))
                && ctx
                    .survey("rflmCalculatingChildSupportSurvey")
                    .field("attachingCalculations")
                    .is("y")
        }),
        required(FINANCIAL_STATEMENT, |ctx| {
            reply_selected_child_support(ctx)
                && reply_new_child_support(ctx)
                && ctx
                    .survey("rflmAdditionalDocumentsSurvey")
                    .field("isFilingAdditionalDocs")
                    .is("y")
        }),
        required(FINANCIAL_STATEMENT_IF_APPLICABLE, |ctx| {
            reply_selected_child_support(ctx) && reply_existing_child_support(ctx)
        }),
        reminder(PARENTING_EDUCATION_CERTIFICATE, |ctx| {
            let filing = ctx.survey("filingLocationSurvey");
            filing.field("ExistingCourt").as_str().is_some_and(|court| {
                ctx.locations
                    .included_in_registries(court, RegistryType::EarlyResolutions)
            }) && filing.field("MetEarlyResolutionRequirements").is("y")
        }),
    ]
}

fn protection_order_type(ctx: &RuleContext<'_>, order_type: &str) -> bool {
    ctx.survey("poQuestionnaireSurvey")
        .field("orderType")
        .is(order_type)
}

fn protection_order_rules() -> Vec<DocumentRule> {
    vec![
        required(EXISTING_ORDERS, |ctx| {
            protection_order_type(ctx, "changePO") || protection_order_type(ctx, "terminatePO")
        }),
        required(EXHIBITS, |ctx| protection_order_type(ctx, "needPO")),
        required(EXISTING_ORDERS, |ctx| {
            let background = ctx.survey("backgroundSurvey");
            protection_order_type(ctx, "needPO")
                && (ctx
                    .survey("poFilingLocationSurvey")
                    .field("ExistingFamilyCase")
                    .is("y")
                    || (background.field("ExistingOrders").is("y")
                        && background.field("PartiesHasOtherChilderen").is("y")
                        && background.field("allOtherChilderen").len() > 0))
        }),
        required(EXISTING_PROTECTION_ORDERS, |ctx| {
            protection_order_type(ctx, "needPO")
                && ctx
                    .survey("backgroundSurvey")
                    .field("existingPOOrders")
                    .is("y")
        }),
    ]
}

fn flm_selected(ctx: &RuleContext<'_>, matter: &str) -> bool {
    ctx.survey("flmQuestionnaireSurvey").includes(matter)
}

fn treaty_nation_ancestry(ctx: &RuleContext<'_>, survey: &str) -> bool {
    let ancestry = ctx.survey(survey).field("indigenousAncestry");
    ancestry.includes(NISGAA) || ancestry.includes(TREATY_FIRST_NATION)
}

fn family_law_matter_rules() -> Vec<DocumentRule> {
    vec![
        required(EXISTING_PROTECTION_ORDERS, |ctx| {
            ctx.survey("flmBackgroundSurvey")
                .field("existingPOOrders")
                .is("y")
        }),
        required(EXISTING_ORDERS, |ctx| {
            ctx.survey("flmBackgroundSurvey")
                .field("ExistingOrdersFLM")
                .is("y")
        }),
        required(FINANCIAL_STATEMENT_FORM4, |ctx| {
            ctx.section(OptionalSection::FlmFinancialStatement)
        }),
        required(SUPPORT_CALCULATION, |ctx| {
            (ctx.survey("calculatingChildSupportSurvey")
                .field("attachingCalculations")
                .is("y")
                && flm_selected(ctx, "childSupport"))
                || (ctx
                    .survey("calculatingSpousalSupportSurvey")
                    .field("attachingCalculations")
                    .is("y")
                    && flm_selected(ctx, "spousalSupport"))
        }),
        required(RECORD_CHECK_CONSENT_FORM5, |ctx| {
            ctx.section(OptionalSection::FlmRecordCheckConsent)
        }),
        required(REGISTRY_SEARCH_REQUEST, |ctx| {
            ctx.section(OptionalSection::FlmRecordCheckConsent)
        }),
        reminder(MAINTENANCE_ENFORCEMENT_SERVICE, |ctx| {
            (flm_selected(ctx, "childSupport")
                && ctx
                    .survey("aboutExistingChildSupportSurvey")
                    .field("filedWithDirector")
                    .is("y"))
                || (flm_selected(ctx, "spousalSupport")
                    && ctx
                        .survey("existingSpousalSupportOrderAgreementSurvey")
                        .field("filedWithDirector")
                        .is("y"))
        }),
        reminder(TREATY_NATION_SERVICE, |ctx| {
            flm_selected(ctx, "guardianOfChild")
                && treaty_nation_ancestry(ctx, "indigenousAncestryOfChildSurvey")
        }),
    ]
}

fn ppm_child_services_with_treaty_nation(ctx: &RuleContext<'_>) -> bool {
    ctx.survey("ppmQuestionnaireSurvey").includes("childServices")
        && treaty_nation_ancestry(ctx, "ppmIndigenousAncestryOfChildSurvey")
}

fn priority_parenting_rules() -> Vec<DocumentRule> {
    vec![
        required(EXISTING_ORDERS, |ctx| {
            ctx.survey("ppmBackgroundSurvey")
                .field("ExistingOrdersFLM")
                .is("y")
        }),
        required(SCHEDULE_1, |ctx| ctx.section(OptionalSection::PpmSchedule1)),
        required(RECORD_CHECK_CONSENT_FORM5, |ctx| {
            ctx.section(OptionalSection::PpmRecordCheckConsent)
        }),
        required(REGISTRY_SEARCH_REQUEST, |ctx| {
            ctx.section(OptionalSection::PpmRecordCheckConsent)
        }),
        reminder(CFCSA_DIRECTOR_SERVICE, ppm_child_services_with_treaty_nation),
        reminder(TREATY_NATION_SERVICE, ppm_child_services_with_treaty_nation),
    ]
}

fn relocation_rules() -> Vec<DocumentRule> {
    vec![
        required(PARENTING_ARRANGEMENTS, |ctx| {
            ctx.survey("relocQuestionnaireSurvey")
                .field("ExistingParentingArrangements")
                .is("y")
        }),
        required(RELOCATION_NOTICE, |ctx| {
            ctx.survey("relocQuestionnaireSurvey")
                .field("receiveNotice")
                .is("y")
        }),
    ]
}

fn case_management_rules() -> Vec<DocumentRule> {
    vec![
        required(CONSENT_ORDER_FORM18, |ctx| {
            let cm = ctx.layout().cm;
            ctx.page_active(cm.step, cm.by_consent)
                && ctx
                    .survey("byConsentSurvey")
                    .field("giveConsentDirection")
                    .is("fileForm18")
        }),
        required(OUTSIDE_BC_ORDER, |ctx| {
            let cm = ctx.layout().cm;
            ctx.page_active(cm.step, cm.recognizing_an_order_from_outside_bc)
                && ctx
                    .survey("recognizingAnOrderFromOutsideBcSurvey")
                    .field("outsideBcOrder")
                    .is("y")
        }),
    ]
}

fn enforcement_selected(ctx: &RuleContext<'_>, reason: &str) -> bool {
    ctx.survey("enfrcQuestionnaireSurvey").includes(reason)
}

/// Enforce-agreement-or-order page is active and its survey answers `field == value`.
fn enforce_answer(ctx: &RuleContext<'_>, field: &str, value: &str) -> bool {
    let enfrc = ctx.layout().enfrc;
    ctx.page_active(enfrc.step, enfrc.enforce_agreement_or_order)
        && ctx
            .survey("enforceAgreementOrOrderSurvey")
            .field(field)
            .is(value)
}

/// Neither enforced as an order nor already filed, with the given existing type.
fn unfiled_existing(ctx: &RuleContext<'_>, existing_type: &str) -> bool {
    enforce_answer(ctx, "enforceOrder", "n")
        && enforce_answer(ctx, "filedOrder", "n")
        && enforce_answer(ctx, "existingType", existing_type)
}

fn determination_answer(ctx: &RuleContext<'_>, field: &str, value: &str) -> bool {
    let enfrc = ctx.layout().enfrc;
    ctx.page_active(enfrc.step, enfrc.enforce_change_or_set_aside_determination)
        && ctx
            .survey("enforceChangeSetAsideDeterminationSurvey")
            .field(field)
            .is(value)
}

/// Determination not yet filed, appointed by `appointed_by`.
fn unfiled_determination(ctx: &RuleContext<'_>, appointed_by: &str) -> bool {
    determination_answer(ctx, "filedOrder", "n")
        && ctx
            .survey("enforceChangeSetAsideDeterminationSurvey")
            .field("appointedDetermination")
            .field("selected")
            .is(appointed_by)
}

fn unfiled_agreement_determination(ctx: &RuleContext<'_>, agreement_filed: &str) -> bool {
    unfiled_determination(ctx, "writtenAgreement")
        && determination_answer(ctx, "filedAgreement", agreement_filed)
}

fn enforcement_rules() -> Vec<DocumentRule> {
    vec![
        required(SUPPORT_ORDER_OR_AGREEMENT, |ctx| {
            enforcement_selected(ctx, "arrears")
        }),
        required(FOREIGN_ORDER, |ctx| enforcement_selected(ctx, "foreignSupport")),
        required(ORDER_FOR_ENFORCEMENT, |ctx| {
            enforcement_selected(ctx, "expenses")
        }),
        required(ORDER_FOR_ENFORCEMENT, |ctx| {
            enforce_answer(ctx, "enforceOrder", "y")
        }),
        required(FILED_AGREEMENT_OR_ORDER, |ctx| {
            enforce_answer(ctx, "enforceOrder", "n") && enforce_answer(ctx, "filedOrder", "y")
        }),
        required(ORDER_FOR_ENFORCEMENT, |ctx| {
            unfiled_existing(ctx, "courtOrder")
        }),
        required(AGREEMENT_FOR_ENFORCEMENT, |ctx| {
            unfiled_existing(ctx, "writtenAgreement")
        }),
        required(FILED_DETERMINATION, |ctx| {
            determination_answer(ctx, "filedOrder", "y")
        }),
        required(DETERMINATION, |ctx| unfiled_determination(ctx, "courtOrder")),
        required(DETERMINATION, |ctx| unfiled_agreement_determination(ctx, "y")),
        required(DETERMINATION, |ctx| unfiled_agreement_determination(ctx, "n")),
    ]
}

fn agreement_filing_rules() -> Vec<DocumentRule> {
    vec![
        required(WRITTEN_AGREEMENT, |ctx| {
            unfiled_existing(ctx, "writtenAgreement")
        }),
        required(COORDINATOR_AGREEMENT, |ctx| {
            unfiled_agreement_determination(ctx, "n")
        }),
    ]
}

fn determination_filing_rules() -> Vec<DocumentRule> {
    vec![
        required(DETERMINATION, |ctx| unfiled_determination(ctx, "courtOrder")),
        required(DETERMINATION, |ctx| unfiled_agreement_determination(ctx, "y")),
        required(DETERMINATION, |ctx| unfiled_agreement_determination(ctx, "n")),
    ]
}

fn order_filing_rules() -> Vec<DocumentRule> {
    vec![required(CERTIFIED_ORDER, |ctx| {
        unfiled_existing(ctx, "courtOrder")
    })]
}

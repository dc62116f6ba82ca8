mod common;

use axum::http::StatusCode;
use common::{valid_form, FakeCrm, RecordingView, ScriptedSubmitter, Toast};
use leads_core::{
    config::FormConfig,
    crm::GENERIC_FAILURE_MESSAGE,
    form::SUCCESS_MESSAGE,
    validation::FIRST_NAME_MESSAGE,
    CrmClient, FormField, LeadForm, LeadFormInput, LeadSource, LeadSubmitter, Role, Route,
    SubmissionOutcome, SubmitResult,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

fn form_with(submitter: Arc<dyn LeadSubmitter>, view: &Arc<RecordingView>) -> LeadForm {
    LeadForm::new(submitter, view.clone(), view.clone(), &FormConfig::default())
}

fn fill(form: &LeadForm, input: &LeadFormInput) {
    for field in [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::PhoneNumber,
        FormField::Remark,
        FormField::AccountName,
        FormField::Date,
        FormField::Time,
    ] {
        form.set_field(field, input.get(field));
    }
}

fn ok() -> SubmissionOutcome {
    SubmissionOutcome::Success {
        message: Some("ok".to_string()),
    }
}

#[tokio::test]
async fn test_invalid_form_never_submits() {
    let submitter = ScriptedSubmitter::new(ok());
    let view = Arc::new(RecordingView::default());
    let form = form_with(submitter.clone(), &view);

    let mut input = valid_form();
    input.first_name = "P".to_string();
    fill(&form, &input);

    match form.submit().await {
        SubmitResult::Invalid(errors) => {
            assert!(errors.has_error("firstName", FIRST_NAME_MESSAGE));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }

    assert_eq!(submitter.calls(), 0);
    assert!(form.errors().has_error("firstName", FIRST_NAME_MESSAGE));
    assert_eq!(form.field_errors(FormField::FirstName), vec![FIRST_NAME_MESSAGE.to_string()]);
    assert!(form.field_errors(FormField::Email).is_empty());
    assert_eq!(form.input(), input);
    assert!(view.toasts().is_empty());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_second_submit_while_pending_makes_no_request() {
    let gate = Arc::new(Notify::new());
    let submitter = ScriptedSubmitter::gated(ok(), gate.clone());
    let view = Arc::new(RecordingView::default());
    let form = Arc::new(form_with(submitter.clone(), &view));
    fill(&form, &valid_form());
    form.set_role(Role::Student);

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });

    submitter.entered.notified().await;
    assert!(form.is_submitting());

    assert_eq!(form.submit().await, SubmitResult::AlreadySubmitting);
    assert_eq!(submitter.calls(), 1);

    gate.notify_one();
    let result = first.await.unwrap();
    assert_eq!(result, SubmitResult::Completed(ok()));
    assert_eq!(submitter.calls(), 1);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_slow_remote_receives_exactly_one_request() {
    let crm = FakeCrm::spawn_with_delay(StatusCode::OK, r#"{"message":"ok"}"#, Duration::from_millis(300)).await;
    let client: Arc<dyn LeadSubmitter> = Arc::new(CrmClient::new(&crm.crm_config(5)).unwrap());
    let view = Arc::new(RecordingView::default());
    let form = Arc::new(form_with(client, &view));
    fill(&form, &valid_form());

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });

    while crm.request_count() == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(form.submit().await, SubmitResult::AlreadySubmitting);

    assert!(matches!(first.await.unwrap(), SubmitResult::Completed(SubmissionOutcome::Success { .. })));
    assert_eq!(crm.request_count(), 1);
}

#[tokio::test]
async fn test_duplicate_keeps_fields_and_shows_error() {
    let duplicate = SubmissionOutcome::Duplicate {
        message: "Email Already Exist".to_string(),
    };
    let submitter = ScriptedSubmitter::new(duplicate.clone());
    let view = Arc::new(RecordingView::default());
    let form = form_with(submitter.clone(), &view);
    fill(&form, &valid_form());
    form.set_role(Role::JobSeeker);

    assert_eq!(form.submit().await, SubmitResult::Completed(duplicate));

    assert_eq!(form.input(), valid_form());
    assert_eq!(view.toasts(), vec![Toast::Error("Email Already Exist".to_string())]);
    assert!(!form.has_pending_navigation());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_duplicate_from_remote_end_to_end() {
    let crm = FakeCrm::spawn(StatusCode::OK, r#"{"message":"Email Already Exist"}"#).await;
    let client: Arc<dyn LeadSubmitter> = Arc::new(CrmClient::new(&crm.crm_config(5)).unwrap());
    let view = Arc::new(RecordingView::default());
    let form = form_with(client, &view);
    fill(&form, &valid_form());

    let result = form.submit().await;

    assert!(matches!(result, SubmitResult::Completed(SubmissionOutcome::Duplicate { .. })));
    assert_eq!(form.field(FormField::Email), "priya.sharma@example.com");
    assert_eq!(view.toasts(), vec![Toast::Error("Email Already Exist".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_success_resets_and_redirects_by_role() {
    let cases = [
        (Role::Student, Route::Learning, "/learning"),
        (Role::BusinessOwner, Route::Business, "/business"),
        (Role::JobSeeker, Route::Careers, "/careers"),
        (Role::Unset, Route::Careers, "/careers"),
    ];

    for (role, expected, path) in cases {
        let submitter = ScriptedSubmitter::new(ok());
        let view = Arc::new(RecordingView::default());
        let form = form_with(submitter.clone(), &view);

        let mut input = valid_form();
        if role == Role::BusinessOwner {
            input.account_name = "Sharma Textiles".to_string();
        }
        fill(&form, &input);
        form.set_role(role);
        form.set_source(LeadSource::PamphletInNewspaper);

        assert_eq!(form.submit().await, SubmitResult::Completed(ok()));

        assert!(form.input().is_empty(), "fields reset for {:?}", role);
        assert_eq!(view.toasts(), vec![Toast::Success(SUCCESS_MESSAGE.to_string())]);
        assert!(view.visited().is_empty(), "redirect waits out the delay");
        assert!(form.has_pending_navigation());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(view.visited().is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(view.visited(), vec![expected]);
        assert_eq!(expected.path(), path);
        assert!(!form.has_pending_navigation());
    }
}

#[tokio::test(start_paused = true)]
async fn test_teardown_before_redirect_is_a_no_op() {
    let submitter = ScriptedSubmitter::new(ok());
    let view = Arc::new(RecordingView::default());
    let form = form_with(submitter.clone(), &view);
    fill(&form, &valid_form());
    form.set_role(Role::Student);

    form.submit().await;
    assert!(form.has_pending_navigation());
    drop(form);

    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(view.toasts(), vec![Toast::Success(SUCCESS_MESSAGE.to_string())]);
    assert!(view.visited().is_empty());
}

#[tokio::test]
async fn test_transport_failure_keeps_fields() {
    let submitter = ScriptedSubmitter::new(SubmissionOutcome::failure(GENERIC_FAILURE_MESSAGE));
    let view = Arc::new(RecordingView::default());
    let form = form_with(submitter.clone(), &view);
    fill(&form, &valid_form());

    let result = form.submit().await;

    assert_eq!(result, SubmitResult::Completed(SubmissionOutcome::failure(GENERIC_FAILURE_MESSAGE)));
    assert_eq!(form.input(), valid_form());
    assert_eq!(view.toasts(), vec![Toast::Error(GENERIC_FAILURE_MESSAGE.to_string())]);
    assert!(!form.is_submitting());
    assert!(!form.has_pending_navigation());
}

#[tokio::test]
async fn test_network_error_end_to_end() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = leads_core::config::CrmConfig {
        base_url: format!("http://{}", addr),
        contact_path: common::CONTACT_PATH.to_string(),
        request_timeout_seconds: 5,
    };
    let client: Arc<dyn LeadSubmitter> = Arc::new(CrmClient::new(&config).unwrap());
    let view = Arc::new(RecordingView::default());
    let form = form_with(client, &view);
    fill(&form, &valid_form());

    let result = form.submit().await;

    assert!(matches!(result, SubmitResult::Completed(SubmissionOutcome::Failure { .. })));
    assert_eq!(form.input(), valid_form());
    assert_eq!(view.toasts().len(), 1);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_company_name_gate_for_business_owner() {
    let submitter = ScriptedSubmitter::new(ok());
    let view = Arc::new(RecordingView::default());
    let form = form_with(submitter.clone(), &view);
    fill(&form, &valid_form());

    form.set_role(Role::BusinessOwner);
    assert!(form.shows_company_name());

    assert!(matches!(form.submit().await, SubmitResult::Invalid(_)));
    assert_eq!(submitter.calls(), 0);

    form.set_field(FormField::AccountName, "Sharma Textiles");
    assert!(matches!(form.submit().await, SubmitResult::Completed(_)));

    let payloads = submitter.payloads.lock();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].accountname, "Sharma Textiles");
    assert_eq!(payloads[0].accname, "Actify Business");
    assert_eq!(payloads[0].remark.enquiry_type, Role::BusinessOwner);
}

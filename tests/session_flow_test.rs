//! End-to-end session flows against an in-memory service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use u_dispatch::client::{Transport, TransportError, TransportResponse};
use u_dispatch::models::{FileCandidate, Mode, RuleId, SPREADSHEET_MIME};
use u_dispatch::presenter::render_text;
use u_dispatch::request::Request;
use u_dispatch::session::{Session, UiState};
use u_dispatch::validation::ValidationErrorKind;

/// Records every request and answers like the service would: one result
/// per requested rule, plus comparison rows in compare mode.
#[derive(Default)]
struct FakeService {
    seen: Mutex<Vec<(Mode, Vec<RuleId>)>>,
}

impl FakeService {
    fn seen(&self) -> Vec<(Mode, Vec<RuleId>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeService {
    async fn send(&self, request: &Request) -> Result<TransportResponse, TransportError> {
        self.seen
            .lock()
            .unwrap()
            .push((request.mode(), request.rules().to_vec()));

        let results: Vec<_> = request
            .rules()
            .iter()
            .map(|rule| {
                json!({
                    "rule": rule.name(),
                    "schedule": [
                        {"job": "J1", "rj": 0, "pj": 3, "Start time": 0, "Completion time": 3, "Flow time": 3, "Late time": 0},
                        {"job": "J2", "rj": 1, "pj": 2, "Start time": 3, "Completion time": 5, "Flow time": 4, "Late time": 1}
                    ],
                    "gantt_chart": "iVBORw0KGgo="
                })
            })
            .collect();
        let mut body = json!({ "results": results });
        if request.mode() == Mode::Compare {
            let rows: Vec<_> = request
                .rules()
                .iter()
                .map(|rule| {
                    json!({
                        "Rule": rule.name(),
                        "Average Completion Time": "4.00",
                        "Average Flow Time": "3.50",
                        "Average Late Time": "0.50",
                        "Utilization (%)": "62.50"
                    })
                })
                .collect();
            body["compare_data"] = json!(rows);
        }
        Ok(TransportResponse::new(200, body.to_string()))
    }
}

fn upload(session: &mut Session) {
    session
        .accept_file(Some(FileCandidate::new(
            b"PK\x03\x04".to_vec(),
            SPREADSHEET_MIME,
            "jobs.xlsx",
        )))
        .unwrap();
}

#[tokio::test]
async fn test_execute_then_compare_then_dismiss() {
    let service = Arc::new(FakeService::default());
    let mut session = Session::new(service.clone());
    upload(&mut session);

    session.toggle(RuleId::Lrpt);
    session.toggle(RuleId::Spt);
    let UiState::Succeeded(first) = session.execute().await else {
        panic!("execute failed: {:?}", session.message());
    };
    assert!(first.comparison.is_none());
    assert_eq!(first.rules(), vec![RuleId::Spt, RuleId::Lrpt]);

    session.toggle(RuleId::Edd);
    let UiState::Succeeded(second) = session.compare().await else {
        panic!("compare failed: {:?}", session.message());
    };
    assert_eq!(second.rules(), vec![RuleId::Spt, RuleId::Edd, RuleId::Lrpt]);
    let comparison = second.comparison.as_ref().unwrap();
    assert_eq!(comparison.len(), 3);
    assert_eq!(comparison[1].rule, RuleId::Edd);

    let text = render_text(&second);
    assert!(text.starts_with("== Compare result =="));
    assert!(text.contains("62.50"));

    session.dismiss();
    assert!(session.controller().state().results().is_none());
    assert!(session.selection().is_empty());
    assert!(session.dataset().is_some());

    assert_eq!(
        service.seen(),
        vec![
            (Mode::Execute, vec![RuleId::Spt, RuleId::Lrpt]),
            (Mode::Compare, vec![RuleId::Spt, RuleId::Edd, RuleId::Lrpt]),
        ]
    );
}

#[tokio::test]
async fn test_same_set_same_request() {
    let service = Arc::new(FakeService::default());

    for clicks in [
        vec![RuleId::Wspt, RuleId::Lpt, RuleId::Lst],
        vec![RuleId::Lst, RuleId::Wspt, RuleId::Lpt],
        vec![RuleId::Lpt, RuleId::Edd, RuleId::Lst, RuleId::Edd, RuleId::Wspt],
    ] {
        let mut session = Session::new(service.clone());
        upload(&mut session);
        for rule in clicks {
            session.toggle(rule);
        }
        session.compare().await;
    }

    let seen = service.seen();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|s| s == &seen[0]));
    assert_eq!(seen[0].1, vec![RuleId::Lpt, RuleId::Wspt, RuleId::Lst]);
}

#[tokio::test]
async fn test_validation_failures_send_nothing() {
    let service = Arc::new(FakeService::default());
    let mut session = Session::new(service.clone());

    session.toggle(RuleId::Spt);
    session.toggle(RuleId::Lpt);
    session.compare().await;
    assert_eq!(session.notice().unwrap().kind, ValidationErrorKind::MissingFile);

    upload(&mut session);
    session.toggle(RuleId::Spt);
    session.compare().await;
    assert_eq!(
        session.notice().unwrap().kind,
        ValidationErrorKind::InsufficientRulesForComparison
    );

    session.toggle(RuleId::Lpt);
    session.execute().await;
    assert_eq!(
        session.notice().unwrap().kind,
        ValidationErrorKind::NoRulesSelected
    );

    assert!(service.seen().is_empty());
}

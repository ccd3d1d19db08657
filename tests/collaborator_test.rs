mod common;

use common::{MixedOutcomeClient, SpyClient, WALLET};
use ledgermain::application::session::Session;
use ledgermain::application::transcript::{EntryKind, TranscriptEntry};

fn errors(transcript: &[TranscriptEntry]) -> Vec<&str> {
    transcript
        .iter()
        .filter(|e| e.kind == EntryKind::Error)
        .map(|e| e.text.as_str())
        .collect()
}

#[tokio::test]
async fn test_wrong_arity_never_calls_collaborator() {
    let client = SpyClient::new();
    let session = Session::new(Box::new(client.clone()));

    let lines = [
        "RUN".to_string(),
        "RUN EMP001".to_string(),
        "RUN EMP001 40 25.50 US".to_string(),
        format!("RUN EMP001 40 25.50 US {WALLET} EXTRA"),
        "SETTLE".to_string(),
        "SETTLE EMP001 40 25.50".to_string(),
        format!("SETTLE EMP001 40 25.50 US {WALLET} EXTRA"),
    ];

    for line in &lines {
        let before = session.snapshot().await.transcript.len();
        session.submit(line).await;
        let transcript = session.snapshot().await.transcript;
        assert_eq!(transcript.len(), before + 2, "line {line:?}");
        assert_eq!(transcript.last().unwrap().kind, EntryKind::Error);
    }

    assert_eq!(client.call_count(), 0);
    assert!(session.snapshot().await.session_state.is_empty());
}

#[tokio::test]
async fn test_failed_run_keeps_prior_state() {
    let client = SpyClient::new();
    let session = Session::new(Box::new(client.clone()));
    session.submit(&format!("SETTLE EMP001 40 25.50 US {WALLET}")).await;
    let prior = session.snapshot().await.session_state;

    client.fail_with(Some("COBOL binary not found"));
    session.submit(&format!("RUN EMP001 10 10 US {WALLET}")).await;
    session.submit(&format!("SETTLE EMP001 10 10 US {WALLET}")).await;

    let snapshot = session.snapshot().await;
    assert_eq!(client.call_count(), 3);
    assert_eq!(snapshot.session_state, prior);
    assert_eq!(prior[0].1.payroll.net_pay.to_string(), "816.00");
    assert_eq!(
        errors(&snapshot.transcript),
        vec![
            "✗ ERROR: COBOL binary not found",
            "✗ ERROR: COBOL binary not found"
        ]
    );
    assert!(!snapshot.busy);

    client.fail_with(None);
    session.submit(&format!("RUN EMP001 10 10 US {WALLET}")).await;
    let updated = session.snapshot().await.session_state;
    assert_eq!(updated[0].1.payroll.net_pay.to_string(), "80.00");
    assert!(updated[0].1.settlement.is_none());
}

#[tokio::test]
async fn test_failed_settle_aborts_before_payroll_output() {
    let client = SpyClient::failing("Process and settle failed");
    let session = Session::new(Box::new(client.clone()));
    session
        .submit(&format!("SETTLE EMP001 40 25.50 US {WALLET}"))
        .await;

    let snapshot = session.snapshot().await;
    assert_eq!(errors(&snapshot.transcript), vec!["✗ ERROR: Process and settle failed"]);
    assert!(
        snapshot
            .transcript
            .iter()
            .all(|e| e.kind != EntryKind::Success)
    );
    assert!(snapshot.session_state.is_empty());
}

#[tokio::test]
async fn test_failed_batch_is_a_single_error() {
    let client = SpyClient::failing("connection refused");
    let session = Session::new(Box::new(client.clone()));
    session.submit("BATCH").await;

    let snapshot = session.snapshot().await;
    assert_eq!(errors(&snapshot.transcript), vec!["✗ ERROR: connection refused"]);
    assert_eq!(client.call_count(), 1);
    assert!(snapshot.session_state.is_empty());

    session.submit("STATUS").await;
    let last = session.snapshot().await.transcript;
    assert_eq!(last.last().unwrap().text, "No session data available.");
}

#[tokio::test]
async fn test_batch_with_mixed_row_outcomes() {
    let client = MixedOutcomeClient::new(&["EMP002"], &["EMP003"]);
    let session = Session::new(Box::new(client));
    session.submit("BATCH").await;

    let snapshot = session.snapshot().await;
    let lines: Vec<&str> = snapshot.transcript.iter().map(|e| e.text.as_str()).collect();
    assert!(lines.contains(&"  PROCESSED:      2"));
    assert!(lines.contains(&"  ERRORS:         1"));
    assert!(lines.contains(&"  SETTLED:        1"));
    assert!(lines.contains(&"  FAILED:         1"));

    let block = |id: &str| {
        let header = format!("  {id}:");
        let start = lines.iter().position(|l| *l == header).unwrap();
        lines[start..start + 4].to_vec()
    };
    let emp001 = block("EMP001");
    assert_eq!(emp001[1], "    Net Pay:      $816.00 USDC");
    assert_eq!(emp001[2], "    Settlement:   ✓");
    assert!(emp001[3].starts_with("    TX:           0x"));
    assert_eq!(
        block("EMP002")[1..],
        [
            "    Net Pay:      $0.00 USDC",
            "    Settlement:   ✗",
            "    TX:           N/A",
        ]
    );
    assert_eq!(
        block("EMP003")[1..],
        [
            "    Net Pay:      $1035.00 USDC",
            "    Settlement:   ✗",
            "    TX:           N/A",
        ]
    );

    let headers: Vec<_> = lines
        .iter()
        .filter(|l| l.starts_with("  EMP") && l.ends_with(':'))
        .collect();
    assert_eq!(headers, vec![&"  EMP001:", &"  EMP002:", &"  EMP003:"]);
    assert_eq!(lines[lines.len() - 2], "🎉 FRANKENSTEIN COMPLETE!");
    assert!(errors(&snapshot.transcript).is_empty());

    let state = &snapshot.session_state;
    let ids: Vec<_> = state.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["EMP001", "EMP002", "EMP003"]);
    assert!(state[0].1.settlement.as_ref().unwrap().is_success());
    assert!(!state[1].1.payroll.is_ok());
    assert!(state[1].1.settlement.is_none());
    assert!(!state[2].1.settlement.as_ref().unwrap().is_success());
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_one_call_per_command() {
    let client = SpyClient::new();
    let session = Session::new(Box::new(client.clone()));
    session.submit(&format!("RUN EMP001 40 25.50 US {WALLET}")).await;
    session.submit(&format!("SETTLE EMP001 40 25.50 US {WALLET}")).await;
    session.submit("BATCH").await;
    session.submit("HELP").await;
    session.submit("STATUS").await;
    session.submit("CLEAR").await;
    assert_eq!(client.call_count(), 3);
    assert!(session.snapshot().await.transcript.is_empty());
}

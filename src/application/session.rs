use super::command::Command;
use super::gate::ProcessingGate;
use super::parser::parse;
use super::store::SessionStore;
use super::transcript::{Transcript, TranscriptEntry, banner};
use crate::domain::employee::{EmployeeInput, demo_batch};
use crate::domain::payroll::{EmployeeRecord, PayrollResult};
use crate::domain::ports::PayrollClientBox;
use crate::domain::settlement::SettlementResult;
use std::slice;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const RUN_USAGE: &str = "RUN <emp_id> <hours> <rate> <tax_code> <wallet>";
const SETTLE_USAGE: &str = "SETTLE <emp_id> <hours> <rate> <tax_code> <wallet>";

const HELP_TEXT: &[&str] = &[
    "",
    "AVAILABLE COMMANDS:",
    "  RUN <emp_id> <hours> <rate> <tax_code> <wallet>",
    "    → Execute COBOL payroll calculation only",
    "  SETTLE <emp_id> <hours> <rate> <tax_code> <wallet>",
    "    → Execute payroll + USDC settlement on Base L2",
    "  BATCH",
    "    → Process multiple employees (demo data)",
    "  STATUS",
    "    → Show current session data",
    "  CLEAR",
    "    → Clear terminal screen",
    "",
    "EXAMPLE:",
    "  > RUN EMP001 40 25.50 US 0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb2",
    "",
];

/// What happened to a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The command ran to completion, successfully or not.
    Accepted,
    /// Another command held the gate; nothing was recorded.
    Rejected,
    /// The line was blank after trimming; nothing was recorded.
    Empty,
}

/// Point-in-time copy of everything a rendering layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub transcript: Vec<TranscriptEntry>,
    pub session_state: Vec<(String, EmployeeRecord)>,
    pub busy: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    transcript: Transcript,
    store: SessionStore,
}

/// The command-driven session engine.
///
/// `Session` owns the transcript, the per-employee results and the
/// single-flight gate. Lines go in through [`Session::submit`]; renderers read
/// through [`Session::snapshot`]. The state lock is never held across a
/// collaborator call, and the gate is released on every exit path.
pub struct Session {
    client: PayrollClientBox,
    state: RwLock<SessionState>,
    gate: ProcessingGate,
}

impl Session {
    /// Creates a session with an empty transcript.
    pub fn new(client: PayrollClientBox) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState::default()),
            gate: ProcessingGate::new(),
        }
    }

    /// Creates a session whose transcript starts with the startup banner.
    pub fn with_banner(client: PayrollClientBox) -> Self {
        let mut state = SessionState::default();
        state.transcript.extend(banner());
        Self {
            client,
            state: RwLock::new(state),
            gate: ProcessingGate::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            transcript: state.transcript.entries().to_vec(),
            session_state: state.store.to_vec(),
            busy: self.gate.is_busy(),
        }
    }

    /// Submits one raw terminal line.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        let line = raw.trim();
        if line.is_empty() {
            return SubmitOutcome::Empty;
        }

        let Some(_guard) = self.gate.try_acquire() else {
            debug!(line, "session busy, input rejected");
            return SubmitOutcome::Rejected;
        };

        self.append([TranscriptEntry::input(format!("> {line}"))])
            .await;

        let command = Command::from(parse(line));
        debug!(?command, suspends = command.is_async(), "dispatching command");

        match command {
            Command::Help => self.help().await,
            Command::Run(args) => self.run(&args).await,
            Command::Settle(args) => self.settle(&args).await,
            Command::Batch => self.batch().await,
            Command::Status => self.status().await,
            Command::Clear => self.state.write().await.transcript.clear(),
            Command::Unknown(name) => {
                self.append([
                    TranscriptEntry::error(format!("Unknown command: {name}")),
                    TranscriptEntry::error("Type HELP for available commands."),
                ])
                .await;
            }
        }

        SubmitOutcome::Accepted
    }

    async fn append(&self, entries: impl IntoIterator<Item = TranscriptEntry>) {
        self.state.write().await.transcript.extend(entries);
    }

    async fn help(&self) {
        self.append(HELP_TEXT.iter().map(|line| TranscriptEntry::output(*line)))
            .await;
    }

    async fn run(&self, args: &[String]) {
        let input = match EmployeeInput::from_args(args) {
            Ok(input) => input,
            Err(e) => {
                debug!(error = %e, "run rejected");
                self.append([invalid_arguments(RUN_USAGE)]).await;
                return;
            }
        };

        self.append([
            TranscriptEntry::blank(),
            TranscriptEntry::output(format!("Processing payroll for {}...", input.employee_id)),
            TranscriptEntry::output("  Invoking THE BRAIN (COBOL)..."),
        ])
        .await;

        info!(employee_id = %input.employee_id, "requesting payroll computation");
        let batch = match self.client.compute_payroll(slice::from_ref(&input)).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!(employee_id = %input.employee_id, error = %e, "payroll computation failed");
                self.append([computation_failed(&e.to_string())]).await;
                return;
            }
        };

        let Some(result) = find_payroll(batch.results, &input.employee_id) else {
            self.append([missing_payroll(&input.employee_id)]).await;
            return;
        };

        let mut entries = vec![TranscriptEntry::success("✓ COBOL CALCULATION COMPLETE")];
        entries.extend(payroll_breakdown(&result));
        entries.push(TranscriptEntry::output(format!("  STATUS:         {}", result.status)));
        entries.push(TranscriptEntry::blank());

        let mut state = self.state.write().await;
        state.store.record(result, None);
        state.transcript.extend(entries);
    }

    async fn settle(&self, args: &[String]) {
        let input = match EmployeeInput::from_args(args) {
            Ok(input) => input,
            Err(e) => {
                debug!(error = %e, "settle rejected");
                self.append([invalid_arguments(SETTLE_USAGE)]).await;
                return;
            }
        };

        self.append([
            TranscriptEntry::blank(),
            TranscriptEntry::output(format!(
                "🧟‍♂️ FRANKENSTEIN AWAKENING for {}...",
                input.employee_id
            )),
            TranscriptEntry::output("  Step 1: Invoking THE BRAIN (COBOL)..."),
            TranscriptEntry::blank(),
        ])
        .await;

        info!(employee_id = %input.employee_id, "requesting payroll and settlement");
        let outcome = match self.client.compute_and_settle(slice::from_ref(&input)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(employee_id = %input.employee_id, error = %e, "payroll and settlement failed");
                self.append([computation_failed(&e.to_string())]).await;
                return;
            }
        };

        let Some(payroll) = find_payroll(outcome.payroll.results, &input.employee_id) else {
            self.append([missing_payroll(&input.employee_id)]).await;
            return;
        };
        let settlement = outcome
            .settlement
            .for_employee(&payroll.employee_id)
            .cloned();

        let mut entries = vec![TranscriptEntry::success("✓ COBOL CALCULATION COMPLETE")];
        entries.extend(payroll_breakdown(&payroll));
        entries.push(TranscriptEntry::blank());
        entries.push(TranscriptEntry::output(
            "  Step 2: Executing THE HANDS (Base L2 Settlement)...",
        ));
        entries.push(TranscriptEntry::blank());

        match &settlement {
            Some(s) if s.is_success() => {
                info!(employee_id = %s.employee_id, tx = ?s.transaction_hash, "settlement complete");
                entries.extend(settlement_breakdown(s));
            }
            Some(s) => {
                let reason = s.error.as_deref().unwrap_or("unknown error");
                warn!(employee_id = %s.employee_id, reason, "settlement failed");
                entries.push(TranscriptEntry::error(format!("✗ SETTLEMENT FAILED: {reason}")));
            }
            None => {
                warn!(employee_id = %input.employee_id, "no settlement produced");
                entries.push(TranscriptEntry::error(format!(
                    "✗ SETTLEMENT FAILED: no settlement produced for {}",
                    input.employee_id
                )));
            }
        }

        let mut state = self.state.write().await;
        state.store.record(payroll, settlement);
        state.transcript.extend(entries);
    }

    async fn batch(&self) {
        self.append([
            TranscriptEntry::blank(),
            TranscriptEntry::output("🧟‍♂️ BATCH PROCESSING: Awakening THE FRANKENSTEIN..."),
            TranscriptEntry::blank(),
        ])
        .await;

        let employees = demo_batch();
        info!(count = employees.len(), "requesting batch payroll and settlement");
        let outcome = match self.client.compute_and_settle(&employees).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "batch processing failed");
                self.append([computation_failed(&e.to_string())]).await;
                return;
            }
        };

        let summary = outcome.payroll.summary;
        let mut entries = vec![
            TranscriptEntry::success("✓ BATCH PROCESSING COMPLETE"),
            TranscriptEntry::blank(),
            TranscriptEntry::output(format!("  PROCESSED:      {}", summary.processed)),
            TranscriptEntry::output(format!("  ERRORS:         {}", summary.errors)),
            TranscriptEntry::output(format!(
                "  SETTLED:        {}",
                outcome.settlement.total_succeeded
            )),
            TranscriptEntry::output(format!(
                "  FAILED:         {}",
                outcome.settlement.total_failed
            )),
            TranscriptEntry::blank(),
        ];

        let mut records = Vec::with_capacity(outcome.payroll.results.len());
        for payroll in outcome.payroll.results {
            let settlement = outcome
                .settlement
                .for_employee(&payroll.employee_id)
                .cloned();
            let settled = settlement.as_ref().is_some_and(SettlementResult::is_success);
            let tx = settlement
                .as_ref()
                .filter(|s| s.is_success())
                .and_then(|s| s.transaction_hash.as_deref())
                .unwrap_or("N/A");

            entries.push(TranscriptEntry::output(format!("  {}:", payroll.employee_id)));
            entries.push(TranscriptEntry::output(format!(
                "    Net Pay:      ${} USDC",
                payroll.net_pay
            )));
            entries.push(TranscriptEntry::output(format!(
                "    Settlement:   {}",
                if settled { "✓" } else { "✗" }
            )));
            entries.push(TranscriptEntry::output(format!("    TX:           {tx}")));
            entries.push(TranscriptEntry::blank());

            records.push((payroll, settlement));
        }

        entries.push(TranscriptEntry::success("🎉 FRANKENSTEIN COMPLETE!"));
        entries.push(TranscriptEntry::blank());

        let mut state = self.state.write().await;
        for (payroll, settlement) in records {
            state.store.record(payroll, settlement);
        }
        state.transcript.extend(entries);
    }

    async fn status(&self) {
        let mut state = self.state.write().await;
        if state.store.is_empty() {
            state
                .transcript
                .push(TranscriptEntry::output("No session data available."));
            return;
        }

        let mut entries = vec![
            TranscriptEntry::blank(),
            TranscriptEntry::output("SESSION DATA:"),
        ];
        for (employee_id, record) in state.store.iter() {
            entries.push(TranscriptEntry::output(format!(
                "  Employee {employee_id}: Net Pay = {}",
                record.payroll.net_pay
            )));
            if let Some(settlement) = &record.settlement {
                entries.push(TranscriptEntry::output(format!(
                    "    Settlement: {}",
                    settlement.status
                )));
            }
        }
        entries.push(TranscriptEntry::blank());
        state.transcript.extend(entries);
    }
}

/// Picks the row for `employee_id`; a lone row is taken as-is, since the
/// backend may truncate long IDs.
fn find_payroll(mut results: Vec<PayrollResult>, employee_id: &str) -> Option<PayrollResult> {
    let index = results
        .iter()
        .position(|r| r.employee_id == employee_id)
        .or((results.len() == 1).then_some(0))?;
    Some(results.swap_remove(index))
}

fn invalid_arguments(usage: &str) -> TranscriptEntry {
    TranscriptEntry::error(format!("✗ Invalid arguments. Usage: {usage}"))
}

fn computation_failed(message: &str) -> TranscriptEntry {
    TranscriptEntry::error(format!("✗ ERROR: {message}"))
}

fn missing_payroll(employee_id: &str) -> TranscriptEntry {
    computation_failed(&format!("no payroll result returned for {employee_id}"))
}

fn payroll_breakdown(result: &PayrollResult) -> Vec<TranscriptEntry> {
    vec![
        TranscriptEntry::blank(),
        TranscriptEntry::output(format!("  EMPLOYEE ID:    {}", result.employee_id)),
        TranscriptEntry::output(format!("  GROSS PAY:      ${}", result.gross_pay)),
        TranscriptEntry::output(format!("  FEDERAL TAX:    ${}", result.federal_tax)),
        TranscriptEntry::output(format!("  STATE TAX:      ${}", result.state_tax)),
        TranscriptEntry::output(format!("  NET PAY:        ${}", result.net_pay)),
    ]
}

fn settlement_breakdown(result: &SettlementResult) -> Vec<TranscriptEntry> {
    vec![
        TranscriptEntry::success("✓ SETTLEMENT COMPLETE"),
        TranscriptEntry::blank(),
        TranscriptEntry::output(format!("  AMOUNT:         {} USDC", result.amount)),
        TranscriptEntry::output(format!("  TO ADDRESS:     {}", result.to_address)),
        TranscriptEntry::output(format!(
            "  TX HASH:        {}",
            result.transaction_hash.as_deref().unwrap_or("N/A")
        )),
        TranscriptEntry::output(format!(
            "  EXPLORER:       {}",
            result.transaction_link.as_deref().unwrap_or("N/A")
        )),
        TranscriptEntry::blank(),
        TranscriptEntry::success("🎉 FRANKENSTEIN COMPLETE!"),
        TranscriptEntry::blank(),
    ]
}

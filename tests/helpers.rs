use async_trait::async_trait;
use betslip_core::{
    Bet, BetGateway, MemoryStore, SelectionDraft, SlipConfig, SlipError, SlipResult, SlipService,
    SlipStore, StaticSession, SubmitOutcome,
};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Behavior of the test gateway for a run
#[allow(dead_code)]
pub enum GatewayMode {
    Persist(String),
    PersistAfterDelay(String, Duration),
    Unavailable(String),
    Error(String),
    Hang,
}

/// Test double for the bet gateway that records every submitted payload
pub struct RecordingGateway {
    mode: GatewayMode,
    pub submitted: Mutex<Vec<Bet>>,
}

#[allow(dead_code)]
impl RecordingGateway {
    pub fn persisting(id: &str) -> Self {
        Self {
            mode: GatewayMode::Persist(id.to_string()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn persisting_after(id: &str, delay: Duration) -> Self {
        Self {
            mode: GatewayMode::PersistAfterDelay(id.to_string(), delay),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            mode: GatewayMode::Unavailable(reason.to_string()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn erroring(message: &str) -> Self {
        Self {
            mode: GatewayMode::Error(message.to_string()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn hanging() -> Self {
        Self {
            mode: GatewayMode::Hang,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn last_submitted(&self) -> Option<Bet> {
        self.submitted.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl BetGateway for RecordingGateway {
    async fn submit(&self, bet: &Bet) -> SlipResult<SubmitOutcome> {
        self.submitted.lock().unwrap().push(bet.clone());
        match &self.mode {
            GatewayMode::Persist(id) => Ok(SubmitOutcome::Persisted { id: id.clone() }),
            GatewayMode::PersistAfterDelay(id, delay) => {
                tokio::time::sleep(*delay).await;
                Ok(SubmitOutcome::Persisted { id: id.clone() })
            }
            GatewayMode::Unavailable(reason) => Ok(SubmitOutcome::Unavailable {
                reason: reason.clone(),
            }),
            GatewayMode::Error(message) => Err(SlipError::SubmissionFailed(message.clone())),
            GatewayMode::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// In-memory store whose writes can be made to fail mid-test
pub struct FailingWriteStore {
    inner: MemoryStore,
    pub fail_writes: AtomicBool,
}

#[allow(dead_code)]
impl FailingWriteStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn start_failing_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

impl SlipStore for FailingWriteStore {
    fn get(&self, key: &str) -> SlipResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> SlipResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SlipError::Storage("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}

/// Test harness: a slip service wired to an in-memory store, a recording
/// gateway and a fixed session
pub struct TestSlip {
    pub service: SlipService,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<RecordingGateway>,
}

#[allow(dead_code)]
impl TestSlip {
    /// Authenticated user over a persisting gateway
    pub fn new() -> Self {
        Self::build(
            RecordingGateway::persisting("bet-1"),
            StaticSession::authenticated("user-1"),
            SlipConfig::default(),
        )
    }

    pub fn with_gateway(gateway: RecordingGateway) -> Self {
        Self::build(
            gateway,
            StaticSession::authenticated("user-1"),
            SlipConfig::default(),
        )
    }

    pub fn with_session(session: StaticSession) -> Self {
        Self::build(
            RecordingGateway::persisting("bet-1"),
            session,
            SlipConfig::default(),
        )
    }

    pub fn build(gateway: RecordingGateway, session: StaticSession, config: SlipConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(gateway);
        let service = SlipService::new(store.clone(), gateway.clone(), Arc::new(session), config);
        Self {
            service,
            store,
            gateway,
        }
    }
}

/// Parse a decimal literal
pub fn dec(s: &str) -> Decimal {
    s.parse().expect("invalid decimal literal in test")
}

/// Draft a selection from the bare event/outcome/odds triple
pub fn draft(event: &str, outcome: &str, odds: &str) -> SelectionDraft {
    SelectionDraft::new(event, outcome, dec(odds))
}

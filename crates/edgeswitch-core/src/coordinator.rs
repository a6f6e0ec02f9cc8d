// ── Coordinator ──
//
// One coordinator owns one client and serializes every call to it. The
// host drives `refresh()` on its own schedule (see
// `ControllerConfig::update_interval`); there is no background task here.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use edgeswitch_api::transport::{TlsMode, TransportConfig};
use edgeswitch_api::{ConnectionTestResult, EdgeSwitchClient, ErrorCategory};

use crate::config::{ControllerConfig, TlsVerification};
use crate::convert;
use crate::error::CoreError;
use crate::model::{EdgeSwitchDevice, EdgeSwitchInterfaceConfig, EdgeSwitchStatistics, SwitchSummary};

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Failed,
}

// ── Snapshot ─────────────────────────────────────────────────────

/// Everything one refresh cycle fetched.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub connected: bool,
    pub device: EdgeSwitchDevice,
    /// First statistics sample; `None` when the switch returned none.
    pub statistics: Option<EdgeSwitchStatistics>,
    pub interfaces: EdgeSwitchInterfaceConfig,
    pub last_update: DateTime<Utc>,
}

impl Snapshot {
    pub fn summary(&self) -> SwitchSummary {
        SwitchSummary::from_snapshot(self)
    }
}

// ── Coordinator ──────────────────────────────────────────────────

/// Polling entry point for one switch.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: ControllerConfig,
    client: Mutex<EdgeSwitchClient>,
    snapshot: watch::Sender<Option<Arc<Snapshot>>>,
    connection_state: watch::Sender<ConnectionState>,
    last_update_success: AtomicBool,
}

impl Coordinator {
    /// Create a coordinator. Validates the config and the URL; no I/O.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let client = EdgeSwitchClient::new(
            &config.url,
            config.username.clone(),
            config.password.clone(),
            build_transport(&config),
        )?;
        let (snapshot, _) = watch::channel(None);
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                config,
                client: Mutex::new(client),
                snapshot,
                connection_state,
                last_update_success: AtomicBool::new(false),
            }),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Log in. Any failure is reported as [`CoreError::NotReady`] so the
    /// host can retry setup later.
    pub async fn setup(&self) -> Result<(), CoreError> {
        let result = self.inner.client.lock().await.login().await;
        match result {
            Ok(()) => {
                self.set_state(ConnectionState::Connected);
                info!(url = %self.inner.config.url, "switch ready");
                Ok(())
            }
            Err(e) => {
                self.set_state(ConnectionState::Failed);
                warn!(error = %e, "switch setup failed");
                Err(CoreError::from(e).not_ready())
            }
        }
    }

    /// Fetch and map all three documents.
    ///
    /// On failure the previous snapshot is kept as stale data,
    /// [`last_update_success`](Self::last_update_success) turns false, and
    /// [`CoreError::UpdateFailed`] is returned. An authentication failure
    /// also drops the session so the next cycle logs in again.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, CoreError> {
        let mut client = self.inner.client.lock().await;

        match fetch(&mut client).await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.inner.snapshot.send_replace(Some(Arc::clone(&snapshot)));
                self.inner.last_update_success.store(true, Ordering::SeqCst);
                self.set_state(ConnectionState::Connected);
                debug!("refresh complete");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "refresh failed, keeping previous data");
                if e.category() == ErrorCategory::Auth {
                    client.logout().await;
                }
                self.inner.last_update_success.store(false, Ordering::SeqCst);
                self.set_state(ConnectionState::Failed);
                Err(e.update_failed())
            }
        }
    }

    /// Log out and release the connection. Never fails.
    pub async fn shutdown(&self) {
        self.inner.client.lock().await.close().await;
        self.set_state(ConnectionState::Disconnected);
        debug!("coordinator shut down");
    }

    /// Run a login/logout round trip without keeping a session.
    pub async fn test_connection(&self) -> ConnectionTestResult {
        self.inner.client.lock().await.test_connection().await
    }

    /// Set up, run `f`, and shut down on every exit path.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Coordinator) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let coordinator = Coordinator::new(config)?;
        if let Err(e) = coordinator.setup().await {
            coordinator.shutdown().await;
            return Err(e);
        }
        let result = f(coordinator.clone()).await;
        coordinator.shutdown().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Latest successful snapshot, possibly stale.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.inner.snapshot.subscribe()
    }

    /// Whether the most recent refresh succeeded.
    pub fn last_update_success(&self) -> bool {
        self.inner.last_update_success.load(Ordering::SeqCst)
    }

    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    fn set_state(&self, state: ConnectionState) {
        self.inner.connection_state.send_replace(state);
    }
}

async fn fetch(client: &mut EdgeSwitchClient) -> Result<Snapshot, CoreError> {
    if !client.is_logged_in() {
        client.login().await?;
    }

    let device = convert::device_from_json(client.get_device_info().await?)?;
    let statistics = convert::statistics_from_list(client.get_statistics().await?)?;
    let interfaces = convert::interfaces_from_json(client.get_interfaces().await?)?;

    Ok(Snapshot {
        connected: true,
        device,
        statistics,
        interfaces,
        last_update: Utc::now(),
    })
}

// ── Helpers ──────────────────────────────────────────────────────

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

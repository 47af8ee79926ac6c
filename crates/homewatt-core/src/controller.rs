// ── Dashboard controller ──
//
// Owns the API client, the view store, and the polling loop. Fetch
// adapters pull one resource each and replace the matching store slot;
// mutation methods push a change and re-fetch exactly the views that
// change could have touched (see `refresh.rs`). All state lives here --
// there are no ambient globals.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use homewatt_api::models::{ApplianceUpdate, NewAppliance};
use homewatt_api::transport::TransportConfig;
use homewatt_api::{EnergyApi, FetchOutcome, MutationAck};

use crate::config::DashboardConfig;
use crate::error::CoreError;
use crate::model::{
    Alert, ApplianceDetail, ApplianceStatus, DashboardStats, EnergyReading, Room, RoomRef,
    UsageHistory,
};
use crate::refresh::{RefreshSet, View};
use crate::store::ViewStore;

// ── Dashboard ────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<DashboardInner>`. Construct once at startup
/// and thread through every handler; drop to tear everything down.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    api: EnergyApi,
    store: ViewStore,
    /// Zero or one active poll task. `start_polling` cancels any existing
    /// task before spawning, so duplicate loops cannot accumulate.
    poll: Mutex<Option<PollTask>>,
}

struct PollTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Dashboard {
    /// Create a controller from configuration. Does not touch the network --
    /// call [`connect()`](Self::connect) or the individual refresh methods.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            cookie_jar: None, // EnergyApi::new adds one automatically
        };
        let api = EnergyApi::new(config.base_url.clone(), &transport)?;

        Ok(Self {
            inner: Arc::new(DashboardInner {
                config,
                api,
                store: ViewStore::new(),
                poll: Mutex::new(None),
            }),
        })
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Access the view store.
    pub fn store(&self) -> &ViewStore {
        &self.inner.store
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Log in if credentials are configured; a no-op otherwise (the
    /// session may already exist in the cookie jar).
    pub async fn login(&self) -> Result<(), CoreError> {
        let Some(ref creds) = self.inner.config.credentials else {
            debug!("no credentials configured -- skipping login");
            return Ok(());
        };
        self.inner
            .api
            .login(&creds.username, creds.password.expose_secret())
            .await?;
        info!(username = %creds.username, "logged in");
        Ok(())
    }

    /// Log in, load every view once, and start the polling cycle.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.login().await?;
        self.refresh_all().await;
        self.start_polling().await;
        Ok(())
    }

    /// One-shot: build, log in, run the closure, no polling.
    /// Optimized for the CLI's single request-response cycle.
    pub async fn oneshot<F, Fut, T>(config: DashboardConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Dashboard) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.poll_interval = Duration::ZERO;

        let dashboard = Dashboard::new(cfg)?;
        dashboard.login().await?;
        f(dashboard).await
    }

    // ── Fetch adapters ───────────────────────────────────────────────
    //
    // One per resource: issue a GET, normalize, replace the store slot.
    // Failures are recorded in the slot (rendered in place of data) and
    // logged; nothing is retried.

    pub async fn refresh_stats(&self) {
        let result = self
            .inner
            .api
            .dashboard_stats()
            .await
            .map(|o| o.map(DashboardStats::from));
        if let Err(ref e) = result {
            warn!(view = "stats", error = %e, "refresh failed");
        }
        self.inner.store.apply_stats(result);
    }

    pub async fn refresh_rooms(&self) {
        let result = self
            .inner
            .api
            .room_usage()
            .await
            .map(|o| o.map(|rooms| rooms.into_iter().map(Room::from).collect::<Vec<_>>()));
        if let Err(ref e) = result {
            warn!(view = "rooms", error = %e, "refresh failed");
        }
        self.inner.store.apply_rooms(result);
    }

    pub async fn refresh_history(&self) {
        let result = self
            .inner
            .api
            .usage_history()
            .await
            .map(|o| o.map(UsageHistory::from));
        if let Err(ref e) = result {
            warn!(view = "history", error = %e, "refresh failed");
        }
        self.inner.store.apply_history(result);
    }

    pub async fn refresh_readings(&self) {
        let result = self.inner.api.energy_readings().await.map(|o| {
            o.map(|readings| {
                readings
                    .into_iter()
                    .map(EnergyReading::from)
                    .collect::<Vec<_>>()
            })
        });
        if let Err(ref e) = result {
            warn!(view = "readings", error = %e, "refresh failed");
        }
        self.inner.store.apply_readings(result);
    }

    pub async fn refresh_alerts(&self) {
        let result = self
            .inner
            .api
            .alerts()
            .await
            .map(|o| o.map(|alerts| alerts.into_iter().map(Alert::from).collect::<Vec<_>>()));
        if let Err(ref e) = result {
            warn!(view = "alerts", error = %e, "refresh failed");
        }
        self.inner.store.apply_alerts(result);
    }

    /// Refresh every view concurrently. Overlapping calls are tolerated:
    /// the later completion simply replaces the slot (last write wins).
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.refresh_stats(),
            self.refresh_rooms(),
            self.refresh_history(),
            self.refresh_readings(),
            self.refresh_alerts(),
        );
        self.inner.store.mark_refreshed();
        debug!("full refresh complete");
    }

    /// Refresh the views in `set`.
    pub async fn refresh(&self, set: RefreshSet) {
        if set == RefreshSet::NONE {
            return;
        }
        for view in set.views() {
            match view {
                View::Stats => self.refresh_stats().await,
                View::Rooms => self.refresh_rooms().await,
                View::History => self.refresh_history().await,
                View::Readings => self.refresh_readings().await,
                View::Alerts => self.refresh_alerts().await,
            }
        }
        self.inner.store.mark_refreshed();
    }

    // ── One-shot fetches (form prefill, scripting) ───────────────────

    /// The bare room list (id + name), for pickers.
    pub async fn fetch_rooms(&self) -> Result<Vec<RoomRef>, CoreError> {
        match self.inner.api.rooms().await? {
            FetchOutcome::Authenticated(rooms) => {
                Ok(rooms.into_iter().map(RoomRef::from).collect())
            }
            FetchOutcome::Unauthenticated => Err(CoreError::AuthRequired),
        }
    }

    /// A single room (edit-form prefill).
    pub async fn fetch_room(&self, room_id: i64) -> Result<RoomRef, CoreError> {
        match self.inner.api.room(room_id).await? {
            FetchOutcome::Authenticated(room) => Ok(RoomRef::from(room)),
            FetchOutcome::Unauthenticated => Err(CoreError::AuthRequired),
        }
    }

    /// A single appliance (edit-form prefill).
    pub async fn fetch_appliance(&self, appliance_id: i64) -> Result<ApplianceDetail, CoreError> {
        match self.inner.api.appliance(appliance_id).await? {
            FetchOutcome::Authenticated(appliance) => Ok(ApplianceDetail::from(appliance)),
            FetchOutcome::Unauthenticated => Err(CoreError::AuthRequired),
        }
    }

    // ── Mutation handlers ────────────────────────────────────────────
    //
    // Issue the request, then re-fetch the affected views. The ack's
    // message (or the error's) is what the notification surface shows.

    pub async fn add_room(&self, name: &str) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.add_room(name).await?;
        self.refresh(RefreshSet::AFTER_ROOM_EDIT).await;
        Ok(ack)
    }

    pub async fn rename_room(&self, room_id: i64, name: &str) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.edit_room(room_id, name).await?;
        self.refresh(RefreshSet::AFTER_ROOM_EDIT).await;
        Ok(ack)
    }

    pub async fn delete_room(&self, room_id: i64) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.delete_room(room_id).await?;
        self.refresh(RefreshSet::AFTER_CASCADING_DELETE).await;
        Ok(ack)
    }

    pub async fn add_appliance(&self, appliance: &NewAppliance) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.add_appliance(appliance).await?;
        self.refresh(RefreshSet::AFTER_ROOM_EDIT).await;
        Ok(ack)
    }

    pub async fn edit_appliance(
        &self,
        appliance_id: i64,
        update: &ApplianceUpdate,
    ) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.edit_appliance(appliance_id, update).await?;
        self.refresh(RefreshSet::AFTER_ROOM_EDIT).await;
        Ok(ack)
    }

    /// Flip an appliance's status from its current state.
    pub async fn toggle_appliance(
        &self,
        appliance_id: i64,
        current: ApplianceStatus,
    ) -> Result<MutationAck, CoreError> {
        let ack = self
            .inner
            .api
            .update_appliance_status(appliance_id, current.toggled().wire_value())
            .await?;
        self.refresh(RefreshSet::AFTER_ROOM_EDIT).await;
        Ok(ack)
    }

    pub async fn delete_appliance(&self, appliance_id: i64) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.delete_appliance(appliance_id).await?;
        self.refresh(RefreshSet::AFTER_CASCADING_DELETE).await;
        Ok(ack)
    }

    pub async fn delete_usage_log(&self, log_id: i64) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.delete_usage_log(log_id).await?;
        self.refresh(RefreshSet::AFTER_LOG_DELETE).await;
        Ok(ack)
    }

    /// Generate simulated usage data.
    ///
    /// This is the one slow mutation: polling is paused around it so a
    /// poll pass doesn't overlap the bulk insert, then restarted.
    pub async fn simulate_data(&self) -> Result<MutationAck, CoreError> {
        let was_polling = self.stop_polling().await;

        let result = self.inner.api.simulate_data().await;
        if result.is_ok() {
            self.refresh(RefreshSet::ALL).await;
        }

        if was_polling {
            self.start_polling().await;
        }
        Ok(result?)
    }

    pub async fn simulate_alerts(&self) -> Result<MutationAck, CoreError> {
        let ack = self.inner.api.simulate_alerts().await?;
        self.refresh(RefreshSet::AFTER_SIMULATE_ALERTS).await;
        Ok(ack)
    }

    /// Set the warning/critical thresholds. Affects only future alert
    /// evaluation, so nothing re-fetches.
    pub async fn set_thresholds(
        &self,
        warning_kwh: f64,
        critical_kwh: f64,
    ) -> Result<MutationAck, CoreError> {
        Ok(self
            .inner
            .api
            .update_thresholds(warning_kwh, critical_kwh)
            .await?)
    }

    // ── Polling scheduler ────────────────────────────────────────────

    /// Start the periodic refresh cycle.
    ///
    /// Idempotent restart: any existing poll task is cancelled and joined
    /// first, so there is never more than one active timer. A zero
    /// interval disables polling.
    pub async fn start_polling(&self) {
        let period = self.inner.config.poll_interval;
        if period.is_zero() {
            return;
        }

        let mut guard = self.inner.poll.lock().await;
        if let Some(old) = guard.take() {
            old.cancel.cancel();
            let _ = old.handle.await;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_task(self.clone(), period, cancel.clone()));
        *guard = Some(PollTask { cancel, handle });
        debug!(period_secs = period.as_secs_f64(), "polling started");
    }

    /// Stop the polling cycle. Returns whether a task was running.
    pub async fn stop_polling(&self) -> bool {
        let mut guard = self.inner.poll.lock().await;
        let Some(old) = guard.take() else {
            return false;
        };
        old.cancel.cancel();
        let _ = old.handle.await;
        debug!("polling stopped");
        true
    }

    pub async fn is_polling(&self) -> bool {
        self.inner.poll.lock().await.is_some()
    }
}

// ── Background task ──────────────────────────────────────────────────

/// Tick `refresh_all` at a fixed cadence until cancelled.
/// No backoff, no jitter; a failed pass just waits for the next tick.
async fn poll_task(dashboard: Dashboard, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => dashboard.refresh_all().await,
        }
    }
}

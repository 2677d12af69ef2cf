//! # Onboarding Worker
//!
//! Drains `background_jobs` and turns registrations into accounts.
//!
//! ## Processing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Onboarding Worker Loop                               │
//! │                                                                         │
//! │  tokio::select! {                                                      │
//! │      interval.tick()   ──┐                                             │
//! │      notify.notified() ──┼──► drain(): claim_next() until empty        │
//! │      shutdown_rx       ──┴──► break                                    │
//! │  }                                                                     │
//! │                                                                         │
//! │  per job:                                                              │
//! │   1. customer exists? ──yes──► failed ("already registered")          │
//! │      (retry of a crashed attempt with the same pair: new password SMS) │
//! │   2. split full name                                                   │
//! │   3. 4-digit password, argon2 hash                                     │
//! │   4. INSERT customer + user (one transaction)                          │
//! │   5. SMS credentials (failure logged, accounts kept)                   │
//! │   6. done                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, error, info, warn};

use fh_core::codes::{generate_customer_name, generate_password};
use fh_core::{
    BackgroundJob, CoreError, Customer, PersonName, RegistrationRequest, User, ValidationError,
    JOB_KIND_ONBOARDING,
};
use fh_db::{Database, DbError};

use crate::auth::hash_secret;
use crate::error::ApiError;
use crate::sms::SmsGateway;

/// Errors that fail a job.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Invalid job payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Unknown job kind: {0}")]
    UnknownKind(String),

    #[error("{0}")]
    Credentials(String),
}

impl From<ApiError> for JobError {
    fn from(err: ApiError) -> Self {
        JobError::Credentials(err.message)
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Background task processing queued onboarding jobs.
pub struct OnboardingWorker {
    db: Database,
    sms: Arc<dyn SmsGateway>,
    poll_interval: Duration,
    notify: Arc<Notify>,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for controlling the worker.
#[derive(Clone)]
pub struct OnboardingHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl OnboardingHandle {
    /// Triggers graceful shutdown.
    pub async fn shutdown(&self) {
        if self.shutdown_tx.send(()).await.is_err() {
            debug!("Onboarding worker already stopped");
        }
    }
}

impl OnboardingWorker {
    /// Creates a worker woken by `notify` and returns its handle.
    pub fn new(
        db: Database,
        sms: Arc<dyn SmsGateway>,
        poll_interval: Duration,
        notify: Arc<Notify>,
    ) -> (Self, OnboardingHandle) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let worker = OnboardingWorker {
            db,
            sms,
            poll_interval,
            notify,
            shutdown_rx,
        };

        (worker, OnboardingHandle { shutdown_tx })
    }

    /// Runs the worker loop. Spawn as a background task.
    pub async fn run(mut self) {
        info!("Onboarding worker starting");

        match self.db.jobs().requeue_stale_running().await {
            Ok(0) => {}
            Ok(n) => warn!(count = n, "Requeued jobs left running by a previous process"),
            Err(e) => error!(error = %e, "Failed to requeue stale jobs"),
        }

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    drain(&self.db, self.sms.as_ref()).await;
                }

                _ = self.notify.notified() => {
                    drain(&self.db, self.sms.as_ref()).await;
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Onboarding worker shutting down");
                    break;
                }
            }
        }

        info!("Onboarding worker stopped");
    }
}

/// Processes queued jobs until none remain. Returns how many were taken.
pub async fn drain(db: &Database, sms: &dyn SmsGateway) -> usize {
    let mut processed = 0;

    loop {
        let job = match db.jobs().claim_next().await {
            Ok(Some(job)) => job,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to claim job");
                break;
            }
        };
        processed += 1;

        let outcome = match job.kind.as_str() {
            JOB_KIND_ONBOARDING => onboard(db, sms, &job).await,
            other => Err(JobError::UnknownKind(other.to_string())),
        };

        let recorded = match outcome {
            Ok(()) => db.jobs().mark_done(&job.id).await,
            Err(e) => db.jobs().mark_failed(&job.id, &e.to_string()).await,
        };

        if let Err(e) = recorded {
            error!(id = %job.id, error = %e, "Failed to record job outcome");
        }
    }

    if processed > 0 {
        debug!(processed, "Job queue drained");
    }
    processed
}

/// Creates the customer and user for one registration.
async fn onboard(db: &Database, sms: &dyn SmsGateway, job: &BackgroundJob) -> Result<(), JobError> {
    let request: RegistrationRequest = serde_json::from_str(&job.payload)?;

    let already_registered = || CoreError::AlreadyRegistered {
        mobile_number: request.mobile_number.clone(),
        email: request.email_address.clone(),
    };

    if db
        .customers()
        .exists_by_mobile_or_email(&request.mobile_number, &request.email_address)
        .await?
    {
        // a previous attempt of this job committed the accounts and then
        // died before the credentials went out
        if job.attempts > 1 {
            if let Some(existing) = db.customers().get_by_email(&request.email_address).await? {
                if existing.mobile_no == request.mobile_number {
                    return resend_credentials(db, sms, &request, &existing).await;
                }
            }
        }
        return Err(already_registered().into());
    }

    let name = PersonName::split(&request.full_name).ok_or_else(|| {
        CoreError::from(ValidationError::Required {
            field: "full_name".to_string(),
        })
    })?;

    let password = generate_password();
    let password_hash = hash_secret(&password)?;
    let now = Utc::now();

    let customer = Customer {
        name: generate_customer_name(),
        customer_name: name.display_name(),
        first_name: name.first_name.clone(),
        middle_name: name.middle_name.clone(),
        last_name: name.last_name.clone(),
        mobile_no: request.mobile_number.clone(),
        email_id: request.email_address.clone(),
        created_at: now,
    };

    let user = User {
        email: request.email_address.clone(),
        full_name: request.full_name.trim().to_string(),
        mobile_no: request.mobile_number.clone(),
        password_hash,
        api_key: None,
        api_secret_hash: None,
        enabled: true,
        created_at: now,
        updated_at: now,
    };

    match db.customers().create_with_user(&customer, &user).await {
        Ok(()) => {}
        // lost a race with a concurrent registration
        Err(e) if e.is_unique_violation_on(&["customers.", "users."]) => {
            return Err(already_registered().into());
        }
        Err(e) => return Err(e.into()),
    }

    send_credentials(sms, &request, &customer, &password).await;

    info!(customer = %customer.name, email = %user.email, "Registration processed");
    Ok(())
}

/// Issues a fresh password for accounts an interrupted attempt created.
async fn resend_credentials(
    db: &Database,
    sms: &dyn SmsGateway,
    request: &RegistrationRequest,
    customer: &Customer,
) -> Result<(), JobError> {
    let password = generate_password();
    db.users()
        .update_password(&request.email_address, &hash_secret(&password)?)
        .await?;

    send_credentials(sms, request, customer, &password).await;

    info!(customer = %customer.name, "Credentials reissued after interrupted onboarding");
    Ok(())
}

/// Texts the login details. Failure is logged; the accounts stay.
async fn send_credentials(
    sms: &dyn SmsGateway,
    request: &RegistrationRequest,
    customer: &Customer,
    password: &str,
) {
    let message = format!(
        "Welcome to FH Online, {}. Log in with {} and password {}.",
        customer.first_name, request.email_address, password
    );

    if let Err(e) = sms.send(&request.mobile_number, &message).await {
        warn!(
            customer = %customer.name,
            gateway = sms.name(),
            error = %e,
            "Credentials SMS failed; account created"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::{LogSmsGateway, SmsError, SmsResult};
    use async_trait::async_trait;
    use fh_core::JobStatus;
    use fh_db::DbConfig;

    struct DownGateway;

    #[async_trait]
    impl SmsGateway for DownGateway {
        async fn send(&self, _mobile: &str, _message: &str) -> SmsResult<()> {
            Err(SmsError::Config("offline".to_string()))
        }

        fn name(&self) -> &'static str {
            "down"
        }
    }

    #[derive(Default)]
    struct RecordingGateway {
        sent: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SmsGateway for RecordingGateway {
        async fn send(&self, _mobile: &str, message: &str) -> SmsResult<()> {
            self.sent.lock().unwrap().push(message.to_string());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    async fn enqueue(db: &Database, mobile: &str, email: &str, key: &str) -> String {
        let payload = serde_json::to_string(&RegistrationRequest {
            mobile_number: mobile.to_string(),
            email_address: email.to_string(),
            full_name: "Jane Wanjiru Doe".to_string(),
        })
        .unwrap();
        db.jobs()
            .enqueue(JOB_KIND_ONBOARDING, key, &payload)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_sms_failure_keeps_accounts() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = enqueue(&db, "254700000001", "jane@example.com", "k1").await;

        assert_eq!(drain(&db, &DownGateway).await, 1);

        let job = db.jobs().get(&id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert_eq!(job.attempts, 1);

        let customer = db
            .customers()
            .get_by_email("jane@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(customer.middle_name.as_deref(), Some("Wanjiru"));
        assert!(customer.name.starts_with("CUST-"));
        assert!(db.users().get_by_email("jane@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_second_job_for_same_customer_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        enqueue(&db, "254700000001", "jane@example.com", "k1").await;
        let second = enqueue(&db, "+254700000001", "jane@example.com", "k2").await;

        assert_eq!(drain(&db, &LogSmsGateway).await, 2);

        let job = db.jobs().get(&second).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.last_error.unwrap().contains("already registered"));
        assert_eq!(db.customers().count().await.unwrap(), 1);
        assert_eq!(db.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_kind_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let job = db.jobs().enqueue("reindex", "k1", "{}").await.unwrap();

        drain(&db, &LogSmsGateway).await;

        let job = db.jobs().get(&job.id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.last_error.as_deref(), Some("Unknown job kind: reindex"));
    }

    #[tokio::test]
    async fn test_worker_wakes_on_notify_and_stops() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let notify = Arc::new(Notify::new());
        let (worker, handle) = OnboardingWorker::new(
            db.clone(),
            Arc::new(LogSmsGateway),
            Duration::from_secs(3600),
            notify.clone(),
        );
        let task = tokio::spawn(worker.run());

        enqueue(&db, "254700000001", "jane@example.com", "k1").await;
        notify.notify_one();

        let mut done = 0;
        for _ in 0..50 {
            done = db.jobs().count_by_status(JobStatus::Done).await.unwrap();
            if done == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(done, 1);

        handle.shutdown().await;
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_interrupted_onboarding_reissues_credentials() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = enqueue(&db, "254700000001", "jane@example.com", "k1").await;

        // first attempt: claimed, accounts committed, process gone before SMS
        db.jobs().claim_next().await.unwrap().unwrap();
        let now = Utc::now();
        let customer = Customer {
            name: "CUST-0000AAAA".to_string(),
            customer_name: "Jane Wanjiru Doe".to_string(),
            first_name: "Jane".to_string(),
            middle_name: Some("Wanjiru".to_string()),
            last_name: Some("Doe".to_string()),
            mobile_no: "254700000001".to_string(),
            email_id: "jane@example.com".to_string(),
            created_at: now,
        };
        let user = User {
            email: "jane@example.com".to_string(),
            full_name: "Jane Wanjiru Doe".to_string(),
            mobile_no: "254700000001".to_string(),
            password_hash: hash_secret("never-sent").unwrap(),
            api_key: None,
            api_secret_hash: None,
            enabled: true,
            created_at: now,
            updated_at: now,
        };
        db.customers().create_with_user(&customer, &user).await.unwrap();
        assert_eq!(db.jobs().requeue_stale_running().await.unwrap(), 1);

        let sms = RecordingGateway::default();
        assert_eq!(drain(&db, &sms).await, 1);

        let job = db.jobs().get(&id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert_eq!(job.attempts, 2);
        assert_eq!(db.customers().count().await.unwrap(), 1);

        let sent = sms.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        let password = sent[0].trim_end_matches('.').rsplit(' ').next().unwrap().to_string();
        let stored = db.users().get_by_email("jane@example.com").await.unwrap().unwrap();
        assert!(crate::auth::verify_secret(&password, &stored.password_hash));
        assert!(!crate::auth::verify_secret("never-sent", &stored.password_hash));
    }
}

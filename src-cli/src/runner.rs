//! 同步周期的调度
//!
//! 每个周期重新认证（token 会过期），然后执行一次同步或 dry run。

use std::sync::Arc;
use std::time::Duration;

use designator_core::designator_provider::{self, CloudCredentials, ProviderError};
use designator_core::{
    CoreError, FetchStep, ReconcileConfig, ReconcileResult, ReconcileService, ServiceContext,
};
use tokio::time::MissedTickBehavior;

use crate::config::AppConfig;
use crate::error::AppError;

/// 同步执行器
pub struct Runner {
    credentials: CloudCredentials,
    reconcile: Arc<ReconcileConfig>,
    dry_run: bool,
}

impl Runner {
    pub fn new(config: AppConfig, dry_run: bool) -> Self {
        Self {
            credentials: config.cloud,
            reconcile: Arc::new(config.reconcile),
            dry_run,
        }
    }

    /// 执行一个同步周期
    pub async fn run_once(&self) -> Result<ReconcileResult, AppError> {
        let connection = designator_provider::connect(&self.credentials)
            .await
            .map_err(connect_error)?;
        tracing::debug!(
            network_endpoint = connection.session.network_endpoint(),
            dns_endpoint = connection.session.dns_endpoint(),
            token_expires_at = ?connection.session.expires_at(),
            "Authenticated"
        );

        let ctx = ServiceContext::from_providers(
            connection.compute,
            connection.dns,
            Arc::clone(&self.reconcile),
        );
        let service = ReconcileService::new(Arc::new(ctx));

        let result = if self.dry_run {
            service.dry_run().await?
        } else {
            service.reconcile().await?
        };
        log_summary(&result);
        Ok(result)
    }

    /// 按固定间隔执行，直到收到 Ctrl-C
    ///
    /// 单个周期失败只记录错误，下一个周期照常执行。
    pub async fn run_interval(&self, period: Duration) -> Result<(), AppError> {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval_secs = period.as_secs(), "Running every interval");
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(
                            error = %e,
                            fetch_failure = e.is_fetch_failure(),
                            "Reconcile tick aborted"
                        );
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received Ctrl-C, stopping");
                    return Ok(());
                }
            }
        }
    }
}

/// 认证失败映射为拉取失败；凭据被拒绝时额外提示检查配置
fn connect_error(e: ProviderError) -> CoreError {
    if e.is_auth_error() {
        tracing::error!(
            "Keystone rejected the credentials, check [cloud] username, password and domains"
        );
    }
    CoreError::fetch(FetchStep::Authenticate, e)
}

fn log_summary(result: &ReconcileResult) {
    tracing::info!(
        dry_run = result.dry_run,
        mutations = result.mutation_count(),
        created = result.created.len(),
        deleted = result.deleted.len(),
        conflicts = result.conflicts.len(),
        skipped = result.skipped.len(),
        duration_ms = (result.finished_at - result.started_at).num_milliseconds(),
        "Reconcile tick finished"
    );
    if result.has_failures() {
        tracing::warn!(failures = result.failures.len(), "Some record writes failed");
        for failure in &result.failures {
            tracing::warn!(
                name = %failure.name,
                operation = ?failure.operation,
                error = %failure.error,
                "Record write failed"
            );
        }
    }
    if tracing::enabled!(tracing::Level::DEBUG) {
        match serde_json::to_string(result) {
            Ok(json) => tracing::debug!(summary = %json, "Reconcile summary"),
            Err(e) => tracing::debug!(error = %e, "Failed to serialize summary"),
        }
    }
}

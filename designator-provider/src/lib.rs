//! OpenStack 服务客户端库
//!
//! 只覆盖同步 DNS 所需的最小 API 面：
//! - Keystone v3 密码认证与服务目录解析
//! - Neutron 网络 / 端口列表
//! - Designate Zone / 记录集的列表、创建、删除
//!
//! 上层通过 [`ComputeProvider`] 和 [`DnsProvider`] 两个 trait 使用这些客户端，
//! 不依赖具体的 HTTP 细节。

pub mod error;
mod http_client;
mod providers;
mod session;
pub mod traits;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

pub use error::{ProviderError, Result};
pub use providers::{DesignateProvider, KeystoneProvider, NeutronProvider};
pub use session::Session;
pub use traits::{ComputeProvider, DnsProvider, ErrorContext, ProviderErrorMapper, RawApiError};
pub use types::{
    CloudCredentials, CreateRecordSetRequest, FixedIp, Network, Port, RecordSet, RecordSetQuery,
    RecordType, Zone,
};

/// 已连接的云：计算与 DNS 两个能力
#[derive(Clone)]
pub struct CloudConnection {
    pub session: Session,
    pub compute: Arc<dyn ComputeProvider>,
    pub dns: Arc<dyn DnsProvider>,
}

/// 认证并创建 Neutron / Designate 客户端
pub async fn connect(credentials: &CloudCredentials) -> Result<CloudConnection> {
    let client = Client::builder()
        .timeout(Duration::from_secs(credentials.timeout_secs))
        .user_agent(concat!("designator/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: "http".to_string(),
            detail: e.to_string(),
        })?;

    let session = KeystoneProvider::new(client, credentials.clone())
        .authenticate()
        .await?;

    Ok(CloudConnection {
        compute: Arc::new(NeutronProvider::new(session.clone())),
        dns: Arc::new(DesignateProvider::new(session.clone())),
        session,
    })
}

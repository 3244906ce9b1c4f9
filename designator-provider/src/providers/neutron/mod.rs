//! Neutron 网络服务客户端

mod error;
mod http;
mod provider;
mod types;

use crate::session::Session;

pub(crate) const NEUTRON_API_VERSION: &str = "/v2.0";

/// 翻页上限，防止 `*_links` 异常时死循环
pub(crate) const MAX_PAGES: usize = 1000;

/// Neutron 客户端
pub struct NeutronProvider {
    pub(crate) session: Session,
}

impl NeutronProvider {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}{NEUTRON_API_VERSION}{path}",
            self.session.network_endpoint
        )
    }
}

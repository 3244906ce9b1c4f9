//! Designate DNS 服务客户端

mod error;
mod http;
mod provider;
mod types;

use crate::session::Session;

pub(crate) const DESIGNATE_API_VERSION: &str = "/v2";

/// 翻页上限，防止 `links.next` 异常时死循环
pub(crate) const MAX_PAGES: usize = 1000;

/// Designate 客户端
pub struct DesignateProvider {
    pub(crate) session: Session,
}

impl DesignateProvider {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}{DESIGNATE_API_VERSION}{path}",
            self.session.dns_endpoint
        )
    }
}

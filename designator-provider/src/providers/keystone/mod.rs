//! Keystone v3 认证

mod error;
mod http;
mod types;

use reqwest::Client;

use crate::types::CloudCredentials;

pub(crate) const KEYSTONE_TOKENS_PATH: &str = "/v3/auth/tokens";
pub(crate) const NETWORK_SERVICE_TYPE: &str = "network";
pub(crate) const DNS_SERVICE_TYPE: &str = "dns";

/// Keystone 认证客户端
pub struct KeystoneProvider {
    pub(crate) client: Client,
    pub(crate) credentials: CloudCredentials,
}

impl KeystoneProvider {
    pub fn new(client: Client, credentials: CloudCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

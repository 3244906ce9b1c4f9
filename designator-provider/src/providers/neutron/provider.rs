//! Neutron ComputeProvider 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ComputeProvider, ErrorContext};
use crate::types::{Network, Port};

use super::types::{NetworksResponse, PortsResponse, next_link};
use super::{MAX_PAGES, NeutronProvider};

#[async_trait]
impl ComputeProvider for NeutronProvider {
    async fn list_networks(&self) -> Result<Vec<Network>> {
        let mut networks = Vec::new();
        let mut next = Some(self.url("/networks"));

        for _ in 0..MAX_PAGES {
            let Some(url) = next.take() else {
                log::debug!("Listed {} networks", networks.len());
                return Ok(networks);
            };
            let page: NetworksResponse = self.get_url(&url, ErrorContext::default()).await?;
            networks.extend(page.networks);
            next = next_link(page.networks_links);
        }

        Err(self.too_many_pages("/networks"))
    }

    async fn list_ports(&self) -> Result<Vec<Port>> {
        let mut ports = Vec::new();
        let mut next = Some(self.url("/ports"));

        for _ in 0..MAX_PAGES {
            let Some(url) = next.take() else {
                log::debug!("Listed {} ports", ports.len());
                return Ok(ports);
            };
            let page: PortsResponse = self.get_url(&url, ErrorContext::default()).await?;
            ports.extend(page.ports);
            next = next_link(page.ports_links);
        }

        Err(self.too_many_pages("/ports"))
    }
}

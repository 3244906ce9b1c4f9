//! 各 OpenStack 服务客户端

mod designate;
mod keystone;
mod neutron;

pub use designate::DesignateProvider;
pub use keystone::KeystoneProvider;
pub use neutron::NeutronProvider;

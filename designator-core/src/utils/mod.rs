//! 工具模块

pub mod dns_name;

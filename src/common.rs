//! 通用模块，包含错误处理、配置和工具类型

pub mod config;
pub mod errors;
pub mod utils;

pub use self::config::{
    AlgorithmSpec, CipherConfig, CipherHandlePolicy, KeyToolConfig, StorageConfig,
};
pub use self::errors::{Error, ErrorKind, KeyRole, Result};
pub use self::utils::ZeroizingVec;

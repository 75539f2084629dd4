//! TaskLine - 任务线活动系统后端服务
//!
//! 基于 Actix Web 构建的任务提交与审核系统后端。
//!
//! # 架构
//! - `config`: 配置管理（含固定任务线/小分队目录）
//! - `errors`: 统一错误处理
//! - `middlewares`: 审核口令中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（JSON 文件）
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

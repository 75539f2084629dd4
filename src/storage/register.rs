use crate::errors::Result;
use crate::storage::Storage;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedStorageFuture = Pin<Box<dyn Future<Output = Result<Box<dyn Storage>>> + Send>>;
pub type StorageConstructor = Arc<dyn Fn() -> BoxedStorageFuture + Send + Sync>;

static STORAGE_REGISTRY: Lazy<RwLock<HashMap<String, StorageConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_storage_plugin<S: Into<String>>(name: S, constructor: StorageConstructor) {
    let name = name.into();
    let mut registry = STORAGE_REGISTRY
        .write()
        .expect("Storage registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_storage_plugin(name: &str) -> Option<StorageConstructor> {
    STORAGE_REGISTRY
        .read()
        .expect("Storage registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_storage_registry() {
    let registry = STORAGE_REGISTRY
        .read()
        .expect("Storage registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No storage plugins registered.");
    } else {
        tracing::debug!("Registered storage plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

/// 在模块加载时把存储后端注册进注册表
#[macro_export]
macro_rules! declare_storage_plugin {
    ($name:literal, $plugin:ty) => {
        #[ctor::ctor]
        fn _register_storage_plugin() {
            $crate::storage::register::register_storage_plugin(
                $name,
                std::sync::Arc::new(
                    || -> $crate::storage::register::BoxedStorageFuture {
                        Box::pin(async {
                            let storage = <$plugin>::new_async().await?;
                            Ok(Box::new(storage) as Box<dyn $crate::storage::Storage>)
                        })
                    },
                ),
            );
        }
    };
}

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 对象缓存抽象
///
/// 后端通过 declare_object_cache_plugin! 在进程启动时注册，
/// 运行时按配置选择并支持回退。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    /// 读取原始字符串值
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// 写入原始字符串值，ttl 单位为秒（0 表示使用后端默认）
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    /// 删除键
    async fn remove(&self, key: &str);

    /// 清空缓存
    async fn invalidate_all(&self);
}

/// 注册缓存插件的宏
///
/// 在缓存实现文件顶部调用，进程启动时通过 ctor 自动注册构造函数。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $ty:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        let fut: $crate::cache::register::BoxedObjectCacheFuture =
                            Box::pin(async {
                                let cache = <$ty>::new()
                                    .map_err($crate::errors::EduProofError::cache_connection)?;
                                let boxed: Box<dyn $crate::cache::ObjectCache> = Box::new(cache);
                                Ok(boxed)
                            });
                        fut
                    }),
                );
            }
        }
    };
}

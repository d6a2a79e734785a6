//! 参考数据上下文
//!
//! 以 signal 持有核心库的 `ReferenceCache`，所有页面读取同一份状态。
//! Token 变化由 Effect 观察；异步加载通过 `spawn_local` 发起。

use crate::api::FrontendApi;
use crate::auth::AuthContext;
use flightontime::cache::{self, CacheHandle};
use flightontime::{AuthSession, ClientResult, ReferenceCache};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct DataContext {
    cache: RwSignal<ReferenceCache>,
}

impl DataContext {
    fn new(session: &AuthSession) -> Self {
        Self {
            cache: RwSignal::new(ReferenceCache::new(session.token())),
        }
    }

    /// 跟随会话的 Token，变化时立即清空
    pub fn observe(&self, session: &AuthSession) {
        self.update(|cache| cache.observe(session));
    }

    /// 响应式读取缓存
    pub fn with<R>(&self, f: impl FnOnce(&ReferenceCache) -> R) -> R {
        self.cache.with(f)
    }

    pub fn with_untracked<R>(&self, f: impl FnOnce(&ReferenceCache) -> R) -> R {
        self.cache.with_untracked(f)
    }

    /// 隐式加载航空公司与机场（命中缓存时不发请求）
    pub fn ensure_reference(&self, api: FrontendApi) {
        let data = *self;
        spawn_local(async move {
            cache::ensure_reference_data(&api, &data).await;
        });
    }

    /// 手动重试
    pub fn refetch(&self, api: FrontendApi) {
        let data = *self;
        spawn_local(async move {
            cache::refetch_reference_data(&api, &data).await;
        });
    }

    /// 重新获取历史记录，不阻塞调用方
    pub fn refetch_flights(&self, api: FrontendApi) {
        let data = *self;
        spawn_local(async move {
            cache::refetch_flights(&api, &data).await;
        });
    }

    pub async fn delete_flight(&self, api: &FrontendApi, id: i64) -> ClientResult<()> {
        cache::delete_flight(api, self, id).await
    }
}

/// 只有内容真的变化时才通知订阅者
impl CacheHandle for DataContext {
    fn update<R>(&self, f: impl FnOnce(&mut ReferenceCache) -> R) -> Option<R> {
        self.cache.try_maybe_update(|cache| {
            let before = cache.clone();
            let out = f(cache);
            (*cache != before, out)
        })
    }
}

/// 从 Context 获取数据上下文
pub fn use_data() -> DataContext {
    use_context::<DataContext>().expect("DataContext should be provided")
}

/// 创建数据上下文，并在每次 Token 变化后触发隐式加载
pub fn provide_data(auth: AuthContext, api: FrontendApi) -> DataContext {
    let data = DataContext::new(&auth.session.get_untracked());
    provide_context(data);

    Effect::new(move |_| {
        let session = auth.session.get();
        data.observe(&session);
        if session.is_authenticated() {
            data.ensure_reference(api.clone());
        }
    });

    data
}

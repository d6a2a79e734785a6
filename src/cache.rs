//! 参考数据缓存
//!
//! 在同一认证会话内避免重复获取航空公司、机场与历史记录，并保证跨会话的新鲜度：
//! - 航空公司 + 机场是一个缓存单元，同时填充或同时为空
//! - 历史记录是独立的缓存单元，只在页面需要时获取
//! - Token 的任何变化都会立即清空全部三个列表
//!
//! 状态本身 (`ReferenceCache`) 是纯数据，由宿主通过 `CacheHandle` 持有
//! （浏览器中是 signal，测试中是 `RefCell`）；异步加载函数只在发起与提交两个时刻
//! 访问状态，每次加载携带 `LoadTicket`，提交时会话纪元或加载编号不匹配的结果直接丢弃。

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;
use crate::session::AuthSession;
use crate::token::TokenProvider;
use flightontime_shared::{Airline, Airport, FlightRecord};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

// =========================================================
// 缓存单元状态
// =========================================================

/// 单个缓存单元的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitState {
    #[default]
    Empty,
    Loading,
    Loaded,
    Failed,
}

/// 一次加载的凭据
///
/// `epoch` 标识发起时的会话，`load` 标识这一次加载本身；
/// 同一单元的新加载会使旧凭据失效。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: Uuid,
    load: Uuid,
}

// =========================================================
// 缓存状态
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCache {
    /// 当前会话纪元，每次 Token 变化时重新生成
    epoch: Uuid,
    /// 本纪元对应的 Token
    bound_token: Option<String>,

    airlines: Vec<Airline>,
    airports: Vec<Airport>,
    reference_state: UnitState,
    reference_load: Option<Uuid>,
    error: Option<ClientError>,

    flights: Vec<FlightRecord>,
    flights_state: UnitState,
    flights_load: Option<Uuid>,
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ReferenceCache {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            epoch: Uuid::new_v4(),
            bound_token: normalize(token),
            airlines: Vec::new(),
            airports: Vec::new(),
            reference_state: UnitState::Empty,
            reference_load: None,
            error: None,
            flights: Vec::new(),
            flights_state: UnitState::Empty,
            flights_load: None,
        }
    }

    // --- Token 变化 ---

    /// Token 已变化：无条件清空三个列表与错误，并开启新纪元
    ///
    /// 新 Token 为空时同样执行。
    pub fn on_token_change(&mut self, token: Option<&str>) {
        log_info!("[Cache] Token changed, clearing cached lists");
        *self = Self::new(token);
    }

    /// 若给定 Token 与当前纪元绑定的不同则清空，返回是否发生了清空
    pub fn sync_token(&mut self, token: Option<&str>) -> bool {
        let token = normalize(token);
        if token != self.bound_token {
            self.on_token_change(token.as_deref());
            true
        } else {
            false
        }
    }

    /// 跟随认证会话的当前 Token
    pub fn observe(&mut self, session: &AuthSession) -> bool {
        self.sync_token(session.token())
    }

    // --- 航空公司 + 机场 ---

    /// 准备一次航空公司 + 机场加载
    ///
    /// - 没有 Token：不加载
    /// - `force` 为 false（隐式触发）：只在单元为 `Empty` 时加载；已加载时视为命中并清除错误
    /// - `force` 为 true（手动重试）：无论状态如何都重新加载
    pub fn begin_reference_load(&mut self, token: Option<&str>, force: bool) -> Option<LoadTicket> {
        self.sync_token(token);
        self.bound_token.as_ref()?;

        if !force {
            match self.reference_state {
                UnitState::Empty => {}
                UnitState::Loaded => {
                    log_info!("[Cache] Using cached airlines/airports");
                    self.error = None;
                    return None;
                }
                UnitState::Loading | UnitState::Failed => return None,
            }
        }

        let ticket = LoadTicket {
            epoch: self.epoch,
            load: Uuid::new_v4(),
        };
        self.reference_state = UnitState::Loading;
        self.reference_load = Some(ticket.load);
        self.error = None;
        Some(ticket)
    }

    /// 提交航空公司 + 机场的加载结果，返回结果是否被采纳
    pub fn commit_reference(
        &mut self,
        ticket: LoadTicket,
        current_token: Option<&str>,
        result: ClientResult<(Vec<Airline>, Vec<Airport>)>,
    ) -> bool {
        self.sync_token(current_token);
        if ticket.epoch != self.epoch || self.reference_load != Some(ticket.load) {
            log_warn!("[Cache] Discarding stale airlines/airports result");
            return false;
        }

        self.reference_load = None;
        match result {
            Ok((airlines, airports)) => {
                log_info!(
                    "[Cache] Loaded {} airlines and {} airports",
                    airlines.len(),
                    airports.len()
                );
                self.airlines = airlines;
                self.airports = airports;
                self.reference_state = UnitState::Loaded;
                self.error = None;
            }
            Err(e) => {
                log_error!("[Cache] Failed to load reference data: {}", e);
                self.airlines.clear();
                self.airports.clear();
                self.reference_state = UnitState::Failed;
                self.error = Some(e);
            }
        }
        true
    }

    // --- 历史记录 ---

    /// 准备一次历史记录加载（总是重新获取）
    pub fn begin_flights_load(&mut self, token: Option<&str>) -> Option<LoadTicket> {
        self.sync_token(token);
        self.bound_token.as_ref()?;

        let ticket = LoadTicket {
            epoch: self.epoch,
            load: Uuid::new_v4(),
        };
        self.flights_state = UnitState::Loading;
        self.flights_load = Some(ticket.load);
        Some(ticket)
    }

    /// 提交历史记录结果
    ///
    /// 失败只记录日志，不写入共享的错误字段，已有列表保持不变。
    pub fn commit_flights(
        &mut self,
        ticket: LoadTicket,
        current_token: Option<&str>,
        result: ClientResult<Vec<FlightRecord>>,
    ) -> bool {
        self.sync_token(current_token);
        if ticket.epoch != self.epoch || self.flights_load != Some(ticket.load) {
            log_warn!("[Cache] Discarding stale flight history result");
            return false;
        }

        self.flights_load = None;
        match result {
            Ok(flights) => {
                self.flights = flights;
                self.flights_state = UnitState::Loaded;
            }
            Err(e) => {
                log_error!("[Cache] Failed to load flight history: {}", e);
                self.flights_state = UnitState::Failed;
            }
        }
        true
    }

    // --- Accessors ---

    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    pub fn reference_state(&self) -> UnitState {
        self.reference_state
    }

    pub fn flights_state(&self) -> UnitState {
        self.flights_state
    }

    /// 航空公司 + 机场是否正在加载
    pub fn is_loading(&self) -> bool {
        self.reference_state == UnitState::Loading
    }

    /// 历史页面渲染时是否需要获取
    ///
    /// 从未加载过，或上次失败且列表仍为空。
    pub fn needs_history(&self) -> bool {
        match self.flights_state {
            UnitState::Empty => true,
            UnitState::Failed => self.flights.is_empty(),
            _ => false,
        }
    }

    /// 三个列表是否都为空
    pub fn is_cleared(&self) -> bool {
        self.airlines.is_empty() && self.airports.is_empty() && self.flights.is_empty()
    }
}

fn normalize(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(str::to_string)
}

// =========================================================
// 状态持有者
// =========================================================

/// 缓存状态的持有者
///
/// 每次访问都是一次同步的读-改-写，异步加载在两次访问之间挂起。
/// 宿主已被释放（如组件卸载）时返回 None。
pub trait CacheHandle {
    fn update<R>(&self, f: impl FnOnce(&mut ReferenceCache) -> R) -> Option<R>;
}

impl CacheHandle for RefCell<ReferenceCache> {
    fn update<R>(&self, f: impl FnOnce(&mut ReferenceCache) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<C: CacheHandle> CacheHandle for Rc<C> {
    fn update<R>(&self, f: impl FnOnce(&mut ReferenceCache) -> R) -> Option<R> {
        C::update(self, f)
    }
}

// =========================================================
// 异步加载
// =========================================================

/// 隐式触发：单元为空且有 Token 时并发获取航空公司与机场，返回是否发出了请求
pub async fn ensure_reference_data<H, T, C>(api: &ApiClient<H, T>, cache: &C) -> bool
where
    H: HttpClient,
    T: TokenProvider,
    C: CacheHandle,
{
    load_reference(api, cache, false).await
}

/// 手动重试：无视缓存状态重新获取航空公司与机场
pub async fn refetch_reference_data<H, T, C>(api: &ApiClient<H, T>, cache: &C) -> bool
where
    H: HttpClient,
    T: TokenProvider,
    C: CacheHandle,
{
    load_reference(api, cache, true).await
}

async fn load_reference<H, T, C>(api: &ApiClient<H, T>, cache: &C, force: bool) -> bool
where
    H: HttpClient,
    T: TokenProvider,
    C: CacheHandle,
{
    let token = api.current_token();
    let Some(ticket) = cache
        .update(|c| c.begin_reference_load(token.as_deref(), force))
        .flatten()
    else {
        return false;
    };

    log_info!("[Cache] Fetching airlines and airports");
    let result = futures::try_join!(api.airlines(), api.airports())
        .map_err(|e| e.in_op("cache.reference"));

    let token = api.current_token();
    cache.update(|c| c.commit_reference(ticket, token.as_deref(), result));
    true
}

/// 获取历史记录，失败不向调用方传播
pub async fn refetch_flights<H, T, C>(api: &ApiClient<H, T>, cache: &C) -> bool
where
    H: HttpClient,
    T: TokenProvider,
    C: CacheHandle,
{
    let token = api.current_token();
    let Some(ticket) = cache
        .update(|c| c.begin_flights_load(token.as_deref()))
        .flatten()
    else {
        return false;
    };

    let result = api.flights().await.map_err(|e| e.in_op("cache.flights"));

    let token = api.current_token();
    cache.update(|c| c.commit_flights(ticket, token.as_deref(), result));
    true
}

/// 删除一条历史记录并重新获取列表（不在本地修改列表，以保持后端的顺序）
pub async fn delete_flight<H, T, C>(api: &ApiClient<H, T>, cache: &C, id: i64) -> ClientResult<()>
where
    H: HttpClient,
    T: TokenProvider,
    C: CacheHandle,
{
    api.delete_flight(id)
        .await
        .map_err(|e| e.in_op_with("cache.delete_flight", id.to_string()))?;
    refetch_flights(api, cache).await;
    Ok(())
}

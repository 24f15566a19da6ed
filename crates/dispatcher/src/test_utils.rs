//! 协作服务的内存替身
//!
//! 这些实现不做任何网络或数据库访问，并记录每一次调用，
//! 便于测试断言"某一步之后没有产生副作用"。

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use dispatch_core::{
    Ambulance, AmbulanceRegistry, Case, CaseStatus, CaseStore, Collaborator, CoordinatorResult,
    DispatchError, GeoPoint, Hospital, HospitalDirectory, RouteProvider, RouteResult,
};

/// Mock implementation of HospitalDirectory
#[derive(Debug, Clone, Default)]
pub struct MockHospitalDirectory {
    hospitals: Arc<Mutex<Vec<Hospital>>>,
    ambulances: Arc<Mutex<HashMap<i64, Vec<Ambulance>>>>,
    fail_hospital_lookup: bool,
    failing_fleets: HashSet<i64>,
    delay: Option<Duration>,
    specialization_queries: Arc<Mutex<Vec<String>>>,
    ambulance_queries: Arc<Mutex<Vec<i64>>>,
}

impl MockHospitalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册医院及其救护车，救护车顺序即目录返回顺序
    pub fn with_hospital(self, hospital: Hospital, ambulances: Vec<Ambulance>) -> Self {
        self.ambulances
            .lock()
            .unwrap()
            .insert(hospital.id, ambulances);
        self.hospitals.lock().unwrap().push(hospital);
        self
    }

    /// 按专科查询时返回协作服务不可用
    pub fn failing(mut self) -> Self {
        self.fail_hospital_lookup = true;
        self
    }

    /// 查询指定医院的救护车时返回协作服务不可用
    pub fn with_failing_fleet(mut self, hospital_id: i64) -> Self {
        self.failing_fleets.insert(hospital_id);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn specialization_queries(&self) -> Vec<String> {
        self.specialization_queries.lock().unwrap().clone()
    }

    pub fn ambulance_queries(&self) -> Vec<i64> {
        self.ambulance_queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.specialization_queries.lock().unwrap().len() + self.ambulance_queries.lock().unwrap().len()
    }

    async fn simulate_latency(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl HospitalDirectory for MockHospitalDirectory {
    async fn find_by_specialization(&self, specialization: &str) -> CoordinatorResult<Vec<Hospital>> {
        self.specialization_queries
            .lock()
            .unwrap()
            .push(specialization.to_string());
        self.simulate_latency().await;

        if self.fail_hospital_lookup {
            return Err(DispatchError::collaborator(
                Collaborator::HospitalDirectory,
                "mock hospital directory unavailable",
            ));
        }

        let hospitals = self.hospitals.lock().unwrap();
        Ok(hospitals
            .iter()
            .filter(|h| h.specialization == specialization)
            .cloned()
            .collect())
    }

    async fn find_ambulances(&self, hospital_id: i64) -> CoordinatorResult<Vec<Ambulance>> {
        self.ambulance_queries.lock().unwrap().push(hospital_id);
        self.simulate_latency().await;

        if self.failing_fleets.contains(&hospital_id) {
            return Err(DispatchError::collaborator(
                Collaborator::HospitalDirectory,
                format!("mock fleet lookup failed for hospital {hospital_id}"),
            ));
        }

        let ambulances = self.ambulances.lock().unwrap();
        Ok(ambulances.get(&hospital_id).cloned().unwrap_or_default())
    }
}

/// Mock implementation of AmbulanceRegistry
///
/// 预设的结果按调用顺序依次返回，用完后返回默认结果。
#[derive(Debug, Clone)]
pub struct MockAmbulanceRegistry {
    default_outcome: bool,
    outcomes: Arc<Mutex<VecDeque<bool>>>,
    delay: Option<Duration>,
    updates: Arc<Mutex<Vec<(i64, bool)>>>,
}

impl MockAmbulanceRegistry {
    pub fn new() -> Self {
        Self {
            default_outcome: true,
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: None,
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 所有更新都返回失败
    pub fn rejecting() -> Self {
        Self {
            default_outcome: false,
            ..Self::new()
        }
    }

    pub fn with_outcomes(self, outcomes: Vec<bool>) -> Self {
        *self.outcomes.lock().unwrap() = outcomes.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 已完成的可用性更新（救护车id, 目标状态）
    pub fn updates(&self) -> Vec<(i64, bool)> {
        self.updates.lock().unwrap().clone()
    }
}

impl Default for MockAmbulanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AmbulanceRegistry for MockAmbulanceRegistry {
    async fn set_availability(&self, ambulance_id: i64, available: bool) -> bool {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_outcome);
        self.updates.lock().unwrap().push((ambulance_id, available));
        outcome
    }
}

/// Mock implementation of RouteProvider returning a fixed result
#[derive(Debug, Clone)]
pub struct MockRouteProvider {
    result: RouteResult,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<(GeoPoint, GeoPoint)>>>,
}

impl MockRouteProvider {
    pub fn returning(result: RouteResult) -> Self {
        Self {
            result,
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn success(geometry: &str) -> Self {
        Self::returning(RouteResult::success(geometry, 5_400.0, 720.0))
    }

    pub fn failure() -> Self {
        Self::returning(RouteResult::failure())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 已请求的路线（起点, 终点）
    pub fn requests(&self) -> Vec<(GeoPoint, GeoPoint)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteProvider for MockRouteProvider {
    async fn compute_route(&self, origin: GeoPoint, destination: GeoPoint) -> RouteResult {
        self.requests.lock().unwrap().push((origin, destination));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

/// Mock implementation of CaseStore
#[derive(Debug, Clone)]
pub struct MockCaseStore {
    cases: Arc<Mutex<HashMap<i64, Case>>>,
    next_id: Arc<Mutex<i64>>,
    fail_create: bool,
    delay: Option<Duration>,
}

impl MockCaseStore {
    pub fn new() -> Self {
        Self {
            cases: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            fail_create: false,
            delay: None,
        }
    }

    /// 创建案例时总是失败
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::new()
        }
    }

    /// 创建案例前等待，模拟缓慢的存储
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn count(&self) -> usize {
        self.cases.lock().unwrap().len()
    }

    pub fn get_all_cases(&self) -> Vec<Case> {
        let mut cases: Vec<Case> = self.cases.lock().unwrap().values().cloned().collect();
        cases.sort_by_key(|c| c.id);
        cases
    }
}

impl Default for MockCaseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaseStore for MockCaseStore {
    async fn create_case(&self, case: &Case) -> CoordinatorResult<Case> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_create {
            return Err(DispatchError::CaseStore("mock case store unavailable".to_string()));
        }

        let mut cases = self.cases.lock().unwrap();
        let mut next_id = self.next_id.lock().unwrap();

        let mut new_case = case.clone();
        new_case.id = *next_id;
        *next_id += 1;

        cases.insert(new_case.id, new_case.clone());
        Ok(new_case)
    }

    async fn get_case(&self, id: i64) -> CoordinatorResult<Option<Case>> {
        Ok(self.cases.lock().unwrap().get(&id).cloned())
    }

    async fn list_cases(&self) -> CoordinatorResult<Vec<Case>> {
        Ok(self.get_all_cases())
    }

    async fn update_case(&self, case: &Case) -> CoordinatorResult<Case> {
        let mut cases = self.cases.lock().unwrap();
        match cases.get_mut(&case.id) {
            Some(existing) => {
                *existing = case.clone();
                Ok(case.clone())
            }
            None => Err(DispatchError::CaseNotFound { id: case.id }),
        }
    }
}

/// Builder for creating test Hospital entities
pub struct HospitalBuilder {
    hospital: Hospital,
}

impl HospitalBuilder {
    pub fn new() -> Self {
        Self {
            hospital: Hospital {
                id: 1,
                name: "Mount Sinai".to_string(),
                specialization: "Cardiology".to_string(),
                ambulance_ids: vec![],
            },
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.hospital.id = id;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.hospital.name = name.to_string();
        self
    }

    pub fn with_specialization(mut self, specialization: &str) -> Self {
        self.hospital.specialization = specialization.to_string();
        self
    }

    pub fn with_ambulance_ids(mut self, ids: Vec<i64>) -> Self {
        self.hospital.ambulance_ids = ids;
        self
    }

    pub fn build(self) -> Hospital {
        self.hospital
    }
}

impl Default for HospitalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test Ambulance entities
pub struct AmbulanceBuilder {
    ambulance: Ambulance,
}

impl AmbulanceBuilder {
    pub fn new() -> Self {
        Self {
            ambulance: Ambulance {
                id: 1,
                latitude: 40.7128,
                longitude: -74.006,
                available: true,
            },
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.ambulance.id = id;
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.ambulance.latitude = latitude;
        self.ambulance.longitude = longitude;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.ambulance.available = false;
        self
    }

    pub fn build(self) -> Ambulance {
        self.ambulance
    }
}

impl Default for AmbulanceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 构造一个尚未保存的OPEN案例
pub fn sample_case(ambulance_id: i64, hospital_id: i64) -> Case {
    Case {
        id: 0,
        latitude: 40.7589,
        longitude: -73.9851,
        specialization: "Cardiology".to_string(),
        status: CaseStatus::Open,
        assigned_ambulance_id: ambulance_id,
        assigned_hospital_id: hospital_id,
        estimated_duration_seconds: 720.0,
        estimated_distance_meters: 5_400.0,
        route_geometry: "poly1".to_string(),
        created_at: Utc::now(),
    }
}

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant as StdInstant};

use futures::stream::{self, StreamExt};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, instrument, warn, Instrument};

use dispatch_core::{
    Ambulance, AmbulanceHospitalCandidate, AmbulanceRegistry, Case, CaseStore, CoordinatorResult,
    DispatchError, DispatchResult, DispatcherConfig, EmergencyRequest, Hospital,
    HospitalDirectory, RouteProvider,
};
use dispatch_infrastructure::MetricsCollector;

use crate::strategies::select_nearest;

/// 单次调度流程的截止时间
///
/// 每个挂起点（协作服务调用、案例保存）都在同一个截止时间下执行，
/// 超时即视为协作服务不可用。
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext {
    deadline: Instant,
}

impl DispatchContext {
    pub fn new(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    async fn run<F>(&self, stage: &'static str, future: F) -> CoordinatorResult<F::Output>
    where
        F: Future,
    {
        timeout_at(self.deadline, future).await.map_err(|_| {
            warn!(stage, "Dispatch deadline exceeded");
            DispatchError::DeadlineExceeded { stage }
        })
    }
}

/// 急救调度协调器
///
/// 串联医院查询、候选选择、路线计算、救护车预留和案例保存。
/// 协调器本身不持有可变状态，多个请求可以并发调用同一个实例。
#[derive(Clone)]
pub struct DispatchCoordinator {
    hospital_directory: Arc<dyn HospitalDirectory>,
    ambulance_registry: Arc<dyn AmbulanceRegistry>,
    route_provider: Arc<dyn RouteProvider>,
    case_store: Arc<dyn CaseStore>,
    config: DispatcherConfig,
    metrics: Arc<MetricsCollector>,
}

impl DispatchCoordinator {
    pub fn new(
        hospital_directory: Arc<dyn HospitalDirectory>,
        ambulance_registry: Arc<dyn AmbulanceRegistry>,
        route_provider: Arc<dyn RouteProvider>,
        case_store: Arc<dyn CaseStore>,
        config: DispatcherConfig,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            hospital_directory,
            ambulance_registry,
            route_provider,
            case_store,
            config,
            metrics,
        }
    }

    /// 以配置的 `pipeline_timeout_seconds` 为预算创建截止时间
    pub fn default_context(&self) -> DispatchContext {
        DispatchContext::new(Duration::from_secs(self.config.pipeline_timeout_seconds))
    }

    /// 处理一次紧急调度请求，使用配置的默认截止时间
    ///
    /// 任何失败都以 `DispatchResult{status: FAILURE}` 返回，不会向调用方抛出错误。
    pub async fn handle_emergency(&self, request: EmergencyRequest) -> DispatchResult {
        self.handle_emergency_with(self.default_context(), request)
            .await
    }

    /// 在调用方提供的截止时间内处理紧急调度请求
    pub async fn handle_emergency_with(
        &self,
        ctx: DispatchContext,
        request: EmergencyRequest,
    ) -> DispatchResult {
        match self.dispatch(ctx, request).await {
            Ok(result) => result,
            Err(error) => DispatchResult::from(&error),
        }
    }

    /// 在独立任务中执行调度流程
    ///
    /// 调用方的future被丢弃（请求超时、客户端断开）时，流程仍会执行到终态，
    /// 预留的救护车要么关联到案例，要么被补偿释放。
    /// 返回 `Ok` 表示成功，`Err` 为失败原因，指标与日志已在任务内记录。
    #[instrument(skip(self, ctx, request), fields(specialization = %request.specialization))]
    pub async fn dispatch(
        &self,
        ctx: DispatchContext,
        request: EmergencyRequest,
    ) -> CoordinatorResult<DispatchResult> {
        let coordinator = self.clone();
        let task = tokio::spawn(
            async move { coordinator.execute(ctx, request).await }.in_current_span(),
        );

        match task.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                error!(error = %join_error, "Dispatch task terminated abnormally");
                let error = DispatchError::Internal(format!("dispatch task failed: {join_error}"));
                self.metrics.record_dispatch_failure(error.kind(), 0.0);
                Err(error)
            }
        }
    }

    async fn execute(
        &self,
        ctx: DispatchContext,
        request: EmergencyRequest,
    ) -> CoordinatorResult<DispatchResult> {
        let started = StdInstant::now();
        let outcome = self.run_pipeline(&ctx, &request).await;
        let elapsed = started.elapsed().as_secs_f64();

        match outcome {
            Ok((result, ambulance_id)) => {
                self.metrics.record_dispatch_success(ambulance_id, elapsed);
                Ok(result)
            }
            Err(error) => {
                match &error {
                    DispatchError::Validation(_)
                    | DispatchError::NoHospital { .. }
                    | DispatchError::NoAvailableAmbulance { .. } => {
                        info!(error = %error, "Dispatch ended without assignment");
                    }
                    _ => warn!(error = %error, "Dispatch failed"),
                }
                self.metrics.record_dispatch_failure(error.kind(), elapsed);
                Err(error)
            }
        }
    }

    async fn run_pipeline(
        &self,
        ctx: &DispatchContext,
        request: &EmergencyRequest,
    ) -> CoordinatorResult<(DispatchResult, i64)> {
        request.validate()?;

        let target = request.location();

        let hospitals = ctx
            .run(
                "hospital_lookup",
                self.hospital_directory
                    .find_by_specialization(&request.specialization),
            )
            .await??;
        if hospitals.is_empty() {
            return Err(DispatchError::NoHospital {
                specialization: request.specialization.clone(),
            });
        }
        debug!(hospital_count = hospitals.len(), "Hospitals found");

        let fleets = self.collect_fleets(ctx, &hospitals).await?;
        let candidates: Vec<AmbulanceHospitalCandidate<'_>> = hospitals
            .iter()
            .zip(fleets.iter())
            .flat_map(|(hospital, ambulances)| {
                ambulances
                    .iter()
                    .map(move |ambulance| AmbulanceHospitalCandidate::new(ambulance, hospital))
            })
            .collect();

        let (ambulance, hospital) = match select_nearest(&candidates, target) {
            Some(selected) => (selected.ambulance.clone(), selected.hospital.clone()),
            None => {
                return Err(DispatchError::NoAvailableAmbulance {
                    specialization: request.specialization.clone(),
                })
            }
        };

        let route = ctx
            .run(
                "route",
                self.route_provider
                    .compute_route(ambulance.location(), target),
            )
            .await?;
        let polyline = match route.polyline_geometry.clone() {
            Some(polyline) if route.is_success() => polyline,
            _ => {
                return Err(DispatchError::RouteCalculationFailed {
                    ambulance_id: ambulance.id,
                })
            }
        };

        self.reserve(ctx, ambulance.id).await?;

        let case = Case::open(request, &ambulance, &hospital, &route);
        match ctx.run("case_record", self.case_store.create_case(&case)).await {
            Ok(Ok(saved)) => {
                info!(
                    case_id = saved.id,
                    ambulance_id = ambulance.id,
                    hospital_id = hospital.id,
                    "Dispatch case recorded"
                );
            }
            Ok(Err(error)) | Err(error) => {
                error!(
                    ambulance_id = ambulance.id,
                    error = %error,
                    "Failed to record dispatch case after reservation"
                );
                if self.config.release_on_case_failure {
                    self.release(ambulance.id).await;
                } else {
                    error!(
                        ambulance_id = ambulance.id,
                        "Ambulance stays reserved without a case"
                    );
                }
                return Err(error);
            }
        }

        let ambulance_id = ambulance.id;
        Ok((
            DispatchResult::success(ambulance, hospital, polyline),
            ambulance_id,
        ))
    }

    /// 按医院顺序并发查询救护车，结果顺序与医院顺序一致
    ///
    /// 单个医院查询失败只记录日志，该医院不贡献候选。
    async fn collect_fleets(
        &self,
        ctx: &DispatchContext,
        hospitals: &[Hospital],
    ) -> CoordinatorResult<Vec<Vec<Ambulance>>> {
        let directory = self.hospital_directory.as_ref();
        let lookup_futures: Vec<_> = hospitals
            .iter()
            .map(move |hospital| async move {
                match directory.find_ambulances(hospital.id).await {
                    Ok(ambulances) => {
                        debug!(
                            hospital_id = hospital.id,
                            ambulance_count = ambulances.len(),
                            "Ambulances fetched"
                        );
                        ambulances
                    }
                    Err(error) => {
                        warn!(
                            hospital_id = hospital.id,
                            error = %error,
                            "Skipping hospital whose ambulances could not be fetched"
                        );
                        Vec::new()
                    }
                }
            })
            .collect();
        let lookups = stream::iter(lookup_futures)
            .buffered(self.config.max_concurrent_lookups.max(1))
            .collect::<Vec<_>>();

        ctx.run("ambulance_lookup", lookups).await
    }

    async fn reserve(&self, ctx: &DispatchContext, ambulance_id: i64) -> CoordinatorResult<()> {
        match ctx
            .run(
                "reservation",
                self.ambulance_registry.set_availability(ambulance_id, false),
            )
            .await
        {
            Ok(true) => {
                debug!(ambulance_id, "Ambulance reserved");
                Ok(())
            }
            Ok(false) => Err(DispatchError::ReservationFailed { ambulance_id }),
            Err(error) => {
                // 超时时无法确定预留是否已被登记服务应用，按已应用处理并释放。
                // 若请求从未到达而另一流程恰好预留了同一辆车，
                // 该释放会在最后写入生效的语义下覆盖对方的预留。
                warn!(
                    ambulance_id,
                    "Reservation outcome unknown after deadline, releasing"
                );
                self.release(ambulance_id).await;
                Err(error)
            }
        }
    }

    /// 补偿释放已预留的救护车
    async fn release(&self, ambulance_id: i64) -> bool {
        let released = self
            .ambulance_registry
            .set_availability(ambulance_id, true)
            .await;
        self.metrics.record_compensation(ambulance_id, released);

        if released {
            info!(ambulance_id, "Reserved ambulance released");
        } else {
            error!(
                ambulance_id,
                "Failed to release reserved ambulance, manual intervention required"
            );
        }
        released
    }
}

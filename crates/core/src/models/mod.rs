pub mod case;
pub mod dispatch;
pub mod emergency;
pub mod fleet;
pub mod route;

pub use case::{Case, CaseStatus};
pub use dispatch::{DispatchResult, DispatchStatus};
pub use emergency::{EmergencyRequest, EmergencyRequestPayload, GeoPoint};
pub use fleet::{Ambulance, AmbulanceHospitalCandidate, Hospital};
pub use route::{RouteResult, RouteStatus};

use tracing::{debug, warn};

use dispatch_core::{AmbulanceHospitalCandidate, GeoPoint};

use crate::geo::distance_between;

/// 选择距离事发地点最近的可用救护车
///
/// 只考虑 `available == true` 的候选；距离相同时保留输入顺序中靠前的候选。
/// 不修改任何状态，也不访问网络。
pub fn select_nearest<'a>(
    candidates: &[AmbulanceHospitalCandidate<'a>],
    target: GeoPoint,
) -> Option<AmbulanceHospitalCandidate<'a>> {
    let mut nearest: Option<(AmbulanceHospitalCandidate<'a>, f64)> = None;
    let mut available_count = 0usize;

    for candidate in candidates.iter().filter(|c| c.ambulance.available) {
        available_count += 1;
        let distance = distance_between(candidate.ambulance.location(), target);

        if !distance.is_finite() {
            warn!(
                ambulance_id = candidate.ambulance.id,
                "Skipping ambulance with unusable coordinates"
            );
            continue;
        }

        // 严格小于，保证并列时先出现者胜出
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((*candidate, distance)),
        }
    }

    match nearest {
        Some((candidate, distance)) => {
            debug!(
                ambulance_id = candidate.ambulance.id,
                hospital_id = candidate.hospital.id,
                distance_meters = distance,
                available_count,
                "最近可用救护车已选定"
            );
            Some(candidate)
        }
        None => {
            debug!(
                candidate_count = candidates.len(),
                "没有可用的候选救护车"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::{Ambulance, Hospital};

    // 沿经线每度约111195米
    const METERS_PER_DEGREE: f64 = 111_195.0;

    fn ambulance_at_distance(id: i64, meters: f64, available: bool) -> Ambulance {
        Ambulance {
            id,
            latitude: meters / METERS_PER_DEGREE,
            longitude: 0.0,
            available,
        }
    }

    fn hospital(id: i64) -> Hospital {
        Hospital {
            id,
            name: format!("hospital-{id}"),
            specialization: "Cardiology".to_string(),
            ambulance_ids: vec![],
        }
    }

    fn origin() -> GeoPoint {
        GeoPoint::new(0.0, 0.0)
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_nearest(&[], origin()).is_none());
    }

    #[test]
    fn test_only_unavailable_candidates() {
        let hospital = hospital(1);
        let ambulances = [
            ambulance_at_distance(1, 100.0, false),
            ambulance_at_distance(2, 200.0, false),
        ];
        let candidates: Vec<_> = ambulances
            .iter()
            .map(|a| AmbulanceHospitalCandidate::new(a, &hospital))
            .collect();

        assert!(select_nearest(&candidates, origin()).is_none());
    }

    #[test]
    fn test_nearest_wins_regardless_of_order() {
        let hospital = hospital(1);
        let ambulances = [
            ambulance_at_distance(3000, 3000.0, true),
            ambulance_at_distance(500, 500.0, true),
            ambulance_at_distance(10000, 10000.0, true),
        ];
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        for order in orders {
            let candidates: Vec<_> = order
                .iter()
                .map(|&i| AmbulanceHospitalCandidate::new(&ambulances[i], &hospital))
                .collect();
            let selected = select_nearest(&candidates, origin()).unwrap();
            assert_eq!(selected.ambulance.id, 500, "order {order:?}");
        }
    }

    #[test]
    fn test_unavailable_nearer_ambulance_is_ignored() {
        let hospital = hospital(1);
        let ambulances = [
            ambulance_at_distance(1, 50.0, false),
            ambulance_at_distance(2, 900.0, true),
        ];
        let candidates: Vec<_> = ambulances
            .iter()
            .map(|a| AmbulanceHospitalCandidate::new(a, &hospital))
            .collect();

        let selected = select_nearest(&candidates, origin()).unwrap();
        assert_eq!(selected.ambulance.id, 2);
    }

    #[test]
    fn test_tie_breaks_by_input_order() {
        let first_hospital = hospital(1);
        let second_hospital = hospital(2);
        let a = ambulance_at_distance(7, 1200.0, true);
        let b = ambulance_at_distance(8, 1200.0, true);

        let candidates = [
            AmbulanceHospitalCandidate::new(&a, &first_hospital),
            AmbulanceHospitalCandidate::new(&b, &second_hospital),
        ];
        let selected = select_nearest(&candidates, origin()).unwrap();
        assert_eq!(selected.ambulance.id, 7);
        assert_eq!(selected.hospital.id, 1);

        let reversed = [candidates[1], candidates[0]];
        let selected = select_nearest(&reversed, origin()).unwrap();
        assert_eq!(selected.ambulance.id, 8);
        assert_eq!(selected.hospital.id, 2);
    }

    #[test]
    fn test_selection_keeps_owning_hospital() {
        let near_hospital = hospital(10);
        let far_hospital = hospital(20);
        let near = ambulance_at_distance(1, 300.0, true);
        let far = ambulance_at_distance(2, 4000.0, true);

        let candidates = [
            AmbulanceHospitalCandidate::new(&far, &far_hospital),
            AmbulanceHospitalCandidate::new(&near, &near_hospital),
        ];
        let selected = select_nearest(&candidates, origin()).unwrap();
        assert_eq!(selected.hospital.id, 10);
    }
}

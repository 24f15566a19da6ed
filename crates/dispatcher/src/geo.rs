use dispatch_core::GeoPoint;

/// 地球平均半径（米）
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// 使用haversine公式计算两点间的大圆距离（米）
///
/// 输入为角度制经纬度，调用方负责校验坐标合法性。
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

pub fn distance_between(from: GeoPoint, to: GeoPoint) -> f64 {
    distance_meters(from.latitude, from.longitude, to.latitude, to.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_meters(40.7589, -73.9851, 40.7589, -73.9851), 0.0);
        assert_eq!(distance_meters(-33.8688, 151.2093, -33.8688, 151.2093), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            ((40.7128, -74.006), (40.7589, -73.9851)),
            ((51.5074, -0.1278), (48.8566, 2.3522)),
            ((-33.8688, 151.2093), (35.6762, 139.6503)),
            ((0.0, 179.9), (0.0, -179.9)),
        ];

        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let forward = distance_meters(lat1, lon1, lat2, lon2);
            let backward = distance_meters(lat2, lon2, lat1, lon1);
            assert!((forward - backward).abs() < 1e-6, "{forward} != {backward}");
        }
    }

    #[test]
    fn test_known_distances() {
        // 曼哈顿下城到时代广场约5.4公里
        let manhattan = distance_meters(40.7128, -74.006, 40.7589, -73.9851);
        assert!((5_300.0..5_500.0).contains(&manhattan), "{manhattan}");

        // 伦敦到巴黎约344公里
        let london_paris = distance_meters(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((340_000.0..348_000.0).contains(&london_paris), "{london_paris}");

        // 跨越日期变更线的短距离
        let antimeridian = distance_meters(0.0, 179.9, 0.0, -179.9);
        assert!((22_000.0..22_500.0).contains(&antimeridian), "{antimeridian}");
    }

    #[test]
    fn test_distance_between_points() {
        let a = GeoPoint::new(40.7128, -74.006);
        let b = GeoPoint::new(40.7589, -73.9851);
        assert_eq!(
            distance_between(a, b),
            distance_meters(40.7128, -74.006, 40.7589, -73.9851)
        );
    }
}

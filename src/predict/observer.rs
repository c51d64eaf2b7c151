/// Observer location on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl Observer {
    /// Parse a `"lat, lon"` pair in degrees.
    pub fn from_coordinates(coordinates: &str, altitude_m: Option<f64>) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() < 2 {
            return None;
        }
        let latitude_deg = parts[0].parse().ok()?;
        let longitude_deg = parts[1].parse().ok()?;
        Some(Self {
            latitude_deg,
            longitude_deg,
            altitude_m: altitude_m.unwrap_or(0.0),
        })
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        // WGS-84 constants
        let a = 6378.137;
        let e2 = 0.00669437999014;
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let alt_km = self.altitude_m / 1000.0;
        [
            (n + alt_km) * lat.cos() * lon.cos(),
            (n + alt_km) * lat.cos() * lon.sin(),
            (n * (1.0 - e2) + alt_km) * sin_lat,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_pairs() {
        let observer = Observer::from_coordinates("52.52, 13.405", Some(34.0)).unwrap();
        assert_eq!(observer.latitude_deg, 52.52);
        assert_eq!(observer.longitude_deg, 13.405);
        assert_eq!(observer.altitude_m, 34.0);

        assert!(Observer::from_coordinates("52.52", None).is_none());
        assert!(Observer::from_coordinates("north, east", None).is_none());
    }

    #[test]
    fn ecef_position_is_on_the_ellipsoid() {
        let at = |latitude_deg: f64, longitude_deg: f64| Observer {
            latitude_deg,
            longitude_deg,
            altitude_m: 0.0,
        };

        // Equator, prime meridian: x is the semi-major axis.
        let equator = at(0.0, 0.0).position_ecef_km();
        assert!((equator[0] - 6378.137).abs() < 1e-6);
        assert!(equator[1].abs() < 1e-6);
        assert!(equator[2].abs() < 1e-6);

        // North pole: z is the semi-minor axis, ~6356.75 km.
        let pole = at(90.0, 0.0).position_ecef_km();
        assert!(pole[0].abs() < 1e-6);
        assert!((pole[2] - 6356.752).abs() < 0.01);
    }
}

mod tests {
    use approx::assert_relative_eq;

    use crate::length::{Length, EARTH_RADIUS_M, JUPITER_RADIUS_M, SOLAR_RADIUS_M};

    #[test]
    fn test_length_conversions() {
        let earth = Length::from_earth_radii(1.0);
        assert_relative_eq!(earth.to_m(), EARTH_RADIUS_M);
        assert_relative_eq!(earth.to_km(), 6371.0);

        let jupiter = Length::from_meters(JUPITER_RADIUS_M);
        assert_relative_eq!(jupiter.to_jupiter_radii(), 1.0);
        assert_relative_eq!(jupiter.to_earth_radii(), 11.2, epsilon = 0.05);

        // The default integration ceiling is eight Jupiter radii
        let ceiling = Length::from_jupiter_radii(8.0);
        assert!(ceiling.to_solar_radii() < 1.0);

        let sun = Length::from_solar_radii(1.0);
        assert_relative_eq!(sun.to_m(), SOLAR_RADIUS_M);
        assert_relative_eq!(sun.to_jupiter_radii(), 9.73, epsilon = 0.01);
    }

    #[test]
    fn test_length_arithmetic_operations() {
        let a = Length::from_km(3000.0);
        let b = Length::from_km(500.0);

        assert_relative_eq!((a + b).to_km(), 3500.0);
        assert_relative_eq!((a - b).to_km(), 2500.0);
        assert_relative_eq!((a * 2.0).to_km(), 6000.0);
        assert_relative_eq!((0.5 * a).to_km(), 1500.0);
        assert_relative_eq!((a / 3.0).to_km(), 1000.0);
        assert_relative_eq!(a / b, 6.0);
    }

    #[test]
    fn test_length_min_max() {
        let inner = Length::from_km(1200.0);
        let outer = Length::from_km(6371.0);

        assert_eq!(inner.min(outer), inner);
        assert_eq!(outer.min(inner), inner);
        assert_eq!(inner.max(outer), outer);
        assert_relative_eq!(outer.powi(2), 6.371e6 * 6.371e6);
    }
}

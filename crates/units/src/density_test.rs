mod tests {
    use approx::assert_relative_eq;

    use crate::density::Density;

    #[test]
    fn test_density_conversions() {
        let rock = Density::from_kg_per_m3(3300.0);
        assert_relative_eq!(rock.to_grams_per_cm3(), 3.3);

        let iron = Density::from_grams_per_cm3(7.86);
        assert_relative_eq!(iron.to_kg_per_m3(), 7860.0, epsilon = 1e-9);
        assert_relative_eq!(iron.to_grams_per_cm3(), 7.86, epsilon = 1e-12);
    }

    #[test]
    fn test_compression_ratio() {
        let reference = Density::from_kg_per_m3(8300.0);
        let compressed = reference * 1.5;

        assert_relative_eq!(compressed / reference, 1.5);
        assert!(compressed > reference);
    }
}

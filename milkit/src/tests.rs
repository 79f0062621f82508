#[cfg(test)]
mod tests {
    use crate::config::{DatasetSource, FileNaming, LoaderConfig};
    use crate::container::FileRole;
    use crate::error::MilkitError;

    #[test]
    fn test_default_configuration() {
        let config = LoaderConfig::new();

        assert_eq!(config.naming.data_suffix, ".h5");
        assert_eq!(config.naming.label_suffix, "_label.h5");
        assert_eq!(config.data_shape, [3, 64, 64]);
        assert_eq!(config.label_shape, [1]);
        assert!(!config.strict_alignment);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_identical_suffixes() {
        let config = LoaderConfig::new().with_naming(
            FileNaming::new()
                .with_data_suffix(".hdf5".to_owned())
                .with_label_suffix(".hdf5".to_owned()),
        );

        match config.validate() {
            Err(MilkitError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("must differ"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_independent_label_suffix() {
        let naming = FileNaming::new().with_label_suffix("_y.hdf5".to_owned());

        assert!(naming.validate().is_ok());
        assert_eq!(naming.classify("a_y.hdf5"), Some((FileRole::Label, "a")));
        assert_eq!(naming.classify("a.h5"), Some((FileRole::Data, "a")));
        assert_eq!(naming.classify("a.hdf5"), None);
    }

    #[test]
    fn test_data_suffix_shadowed_by_label_suffix() {
        let naming = FileNaming::new()
            .with_data_suffix("_x.h5".to_owned())
            .with_label_suffix(".h5".to_owned());

        match naming.validate() {
            Err(MilkitError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("ends with the label suffix"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_empty_suffix() {
        let naming = FileNaming::new().with_data_suffix(String::new());

        assert!(matches!(
            naming.validate(),
            Err(MilkitError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_sized_label_shape() {
        let config = LoaderConfig::new().with_label_shape([0]);

        match config.validate() {
            Err(MilkitError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("Label record shape"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_classify_label_before_data() {
        let naming = FileNaming::new();

        assert_eq!(naming.classify("foo_label.h5"), Some((FileRole::Label, "foo")));
        assert_eq!(naming.classify("foo.h5"), Some((FileRole::Data, "foo")));
        assert_eq!(naming.classify("foo.txt"), None);
    }

    #[test]
    fn test_dataset_source_parsing() {
        let source: DatasetSource = "data/train:2".parse().unwrap();
        assert_eq!(source, DatasetSource::new("data/train", 2));
        assert_eq!(source.to_string(), "data/train:2");

        let with_colon: DatasetSource = "C:/data:0".parse().unwrap();
        assert_eq!(with_colon, DatasetSource::new("C:/data", 0));

        assert!("data/train".parse::<DatasetSource>().is_err());
        assert!(":1".parse::<DatasetSource>().is_err());
        assert!("data/train:x".parse::<DatasetSource>().is_err());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = LoaderConfig::new()
            .with_data_shape([1, 28, 28])
            .with_strict_alignment(true);

        let json = serde_json::to_string(&config).unwrap();
        let restored: LoaderConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, config);
    }
}

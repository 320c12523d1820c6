//! Storage layout of market data files.
//!
//! Path format:
//! `s3://{BUCKET}/data/ib/{ASSET_CLASS}/{EXCHANGE}/{CURRENCY}/{FREQUENCY}/{SYMBOL}.{EXT}.gz`
//!
//! Asset class directories are not cased uniformly (`Futures` but `stocks`);
//! existing files are laid out that way, so the segments come from
//! [`asset_class_segment`] and never from a case transformation.

use barvault_types::{AssetClass, Frequency, SpecError, SymbolSpec};

/// Returns the directory name of an asset class, if the layout has one.
#[must_use]
pub const fn asset_class_segment(asset_class: AssetClass) -> Option<&'static str> {
    match asset_class {
        AssetClass::Futures => Some("Futures"),
        AssetClass::Stocks => Some("stocks"),
        AssetClass::Etfs | AssetClass::Forex | AssetClass::Sp500 => None,
    }
}

/// Returns the directory name of a frequency, if the layout has one.
#[must_use]
pub const fn frequency_segment(frequency: Frequency) -> Option<&'static str> {
    match frequency {
        Frequency::Minutely => Some("minutely"),
        Frequency::Daily => Some("daily"),
        Frequency::Tick => None,
    }
}

/// Builds the storage path of a series under `prefix`.
///
/// `prefix` is the bucket URL plus the data root, see
/// [`ResolverConfig::prefix`](crate::ResolverConfig::prefix).
///
/// # Errors
///
/// Returns [`SpecError::Unsupported`] if the asset class or frequency has no
/// directory in the layout.
///
/// # Example
///
/// ```
/// use barvault_paths::layout::file_path;
/// use barvault_types::{AssetClass, ContractType, Extension, Frequency, SymbolSpec};
///
/// let spec = SymbolSpec::new(
///     "ESZ21",
///     AssetClass::Futures,
///     ContractType::Expiry,
///     "GLOBEX",
///     "USD",
///     Frequency::Minutely,
///     Extension::Csv,
/// )
/// .unwrap();
/// let path = file_path("s3://bucket/data/ib", &spec).unwrap();
/// assert_eq!(path, "s3://bucket/data/ib/Futures/GLOBEX/USD/minutely/ESZ21.csv.gz");
/// ```
pub fn file_path(prefix: &str, spec: &SymbolSpec) -> Result<String, SpecError> {
    let asset = asset_class_segment(spec.asset_class()).ok_or_else(|| SpecError::Unsupported {
        kind: "asset class",
        value: spec.asset_class().to_string(),
    })?;
    let frequency = frequency_segment(spec.frequency()).ok_or_else(|| SpecError::Unsupported {
        kind: "frequency",
        value: spec.frequency().to_string(),
    })?;

    Ok(format!(
        "{}/{}/{}/{}/{}/{}.{}.gz",
        prefix,
        asset,
        spec.exchange(),
        spec.currency(),
        frequency,
        spec.symbol(),
        spec.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use barvault_types::{ContractType, Extension};

    const PREFIX: &str = "s3://bucket/data/ib";

    fn spec(asset_class: AssetClass, frequency: Frequency) -> SymbolSpec {
        SymbolSpec::new(
            "CLH21",
            asset_class,
            ContractType::Expiry,
            "ECBOT",
            "EUR",
            frequency,
            Extension::Csv,
        )
        .unwrap()
    }

    #[test]
    fn test_segment_casing() {
        assert_eq!(asset_class_segment(AssetClass::Futures), Some("Futures"));
        assert_eq!(asset_class_segment(AssetClass::Stocks), Some("stocks"));
        assert_eq!(asset_class_segment(AssetClass::Forex), None);
    }

    #[test]
    fn test_daily_path() {
        let path = file_path(PREFIX, &spec(AssetClass::Futures, Frequency::Daily)).unwrap();
        assert_eq!(path, "s3://bucket/data/ib/Futures/ECBOT/EUR/daily/CLH21.csv.gz");
    }

    #[test]
    fn test_parquet_suffix() {
        let spec = SymbolSpec::new(
            "TSLA",
            AssetClass::Stocks,
            ContractType::Continuous,
            "NSDQ",
            "USD",
            Frequency::Daily,
            Extension::Parquet,
        )
        .unwrap();
        let path = file_path(PREFIX, &spec).unwrap();
        assert!(path.ends_with("/stocks/NSDQ/USD/daily/TSLA.pq.gz"));
    }

    #[test]
    fn test_unsupported_members() {
        let err = file_path(PREFIX, &spec(AssetClass::Sp500, Frequency::Daily)).unwrap_err();
        assert!(matches!(err, SpecError::Unsupported { kind: "asset class", .. }));

        let err = file_path(PREFIX, &spec(AssetClass::Futures, Frequency::Tick)).unwrap_err();
        assert!(matches!(err, SpecError::Unsupported { kind: "frequency", .. }));
    }
}

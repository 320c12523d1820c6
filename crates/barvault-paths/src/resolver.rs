//! Path resolution bound to a configured bucket.

use std::path::Path;
use std::sync::Arc;

use barvault_types::SymbolSpec;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::{PathError, ResolverConfig, Result};

/// Resolves storage paths and metadata files for one bucket.
///
/// Calls are blocking. Object store listings run on a private
/// single-threaded runtime, so a resolver must not be used from inside
/// another async runtime.
#[derive(Debug)]
pub struct PathResolver {
    config: ResolverConfig,
    store: Arc<dyn ObjectStore>,
    runtime: Runtime,
}

impl PathResolver {
    /// Creates a resolver over an existing object store.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing runtime cannot be started.
    pub fn new(config: ResolverConfig, store: Arc<dyn ObjectStore>) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            config,
            store,
            runtime,
        })
    }

    /// Creates a resolver backed by S3, with credentials and region taken
    /// from the standard `AWS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the S3 client cannot be configured.
    pub fn s3(config: ResolverConfig) -> Result<Self> {
        let store = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .build()?;
        Self::new(config, Arc::new(store))
    }

    /// Creates a resolver whose bucket contents are mirrored in a local directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be canonicalized.
    pub fn local(config: ResolverConfig, root: impl AsRef<Path>) -> Result<Self> {
        let store = LocalFileSystem::new_with_prefix(root)?;
        Self::new(config, Arc::new(store))
    }

    /// Creates an S3 resolver for the bucket named in the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket is not configured or S3 setup fails.
    pub fn from_env() -> Result<Self> {
        Self::s3(ResolverConfig::from_env()?)
    }

    /// Returns the resolver configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the storage path of a series.
    ///
    /// Pure: the result depends only on `spec` and the configured bucket.
    /// See [`ResolverConfig::generate_file_path`].
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidSpecification`] if the layout has no
    /// directory for the asset class or frequency.
    pub fn generate_file_path(&self, spec: &SymbolSpec) -> Result<String> {
        self.config.generate_file_path(spec)
    }

    /// Returns the full path of the newest symbols metadata file.
    ///
    /// Candidates are the direct children of the metadata directory whose
    /// file name matches the symbols naming convention. File names carry a zero-padded
    /// date stamp, so the lexicographically greatest key is the newest.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotFound`] if no candidate exists, or
    /// [`PathError::Listing`] if the store cannot be listed.
    pub fn get_latest_symbols_file(&self) -> Result<String> {
        let prefix = self.config.metadata_key_prefix();
        let location = ObjectPath::from(prefix.as_str());
        let listing = self
            .runtime
            .block_on(self.store.list_with_delimiter(Some(&location)))?;
        debug!(prefix = %prefix, objects = listing.objects.len(), "listed metadata directory");

        listing
            .objects
            .iter()
            .map(|meta| &meta.location)
            .filter(|key| key.filename().is_some_and(|name| self.config.is_symbols_file(name)))
            .max_by(|a, b| a.as_ref().cmp(b.as_ref()))
            .map(|key| format!("s3://{}/{}", self.config.bucket, key))
            .ok_or_else(|| PathError::NotFound {
                prefix: format!("s3://{}/{}", self.config.bucket, prefix),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barvault_types::{AssetClass, ContractType, Extension, Frequency};
    use object_store::PutPayload;
    use object_store::memory::InMemory;

    const BUCKET: &str = "alphamatic-data";

    fn in_memory(keys: &[&str]) -> PathResolver {
        let store = Arc::new(InMemory::new());
        let seeding = Runtime::new().unwrap();
        for key in keys {
            seeding
                .block_on(store.put(
                    &ObjectPath::from(*key),
                    PutPayload::from_static(b"symbol,exchange\n"),
                ))
                .unwrap();
        }
        PathResolver::new(ResolverConfig::new(BUCKET), store).unwrap()
    }

    fn spec(
        symbol: &str,
        frequency: Frequency,
        asset_class: AssetClass,
        contract_type: ContractType,
        exchange: &str,
        currency: &str,
    ) -> SymbolSpec {
        SymbolSpec::new(
            symbol,
            asset_class,
            contract_type,
            exchange,
            currency,
            frequency,
            Extension::Csv,
        )
        .unwrap()
    }

    #[test]
    fn test_generate_file_path_futures_minutely() {
        let resolver = in_memory(&[]);
        let spec = spec(
            "ESZ21",
            Frequency::Minutely,
            AssetClass::Futures,
            ContractType::Expiry,
            "GLOBEX",
            "USD",
        );
        assert_eq!(
            resolver.generate_file_path(&spec).unwrap(),
            "s3://alphamatic-data/data/ib/Futures/GLOBEX/USD/minutely/ESZ21.csv.gz"
        );
    }

    #[test]
    fn test_generate_file_path_stocks_minutely() {
        let resolver = in_memory(&[]);
        let spec = spec(
            "TSLA",
            Frequency::Minutely,
            AssetClass::Stocks,
            ContractType::Continuous,
            "NSDQ",
            "USD",
        );
        assert_eq!(
            resolver.generate_file_path(&spec).unwrap(),
            "s3://alphamatic-data/data/ib/stocks/NSDQ/USD/minutely/TSLA.csv.gz"
        );
    }

    #[test]
    fn test_generate_file_path_futures_daily() {
        let resolver = in_memory(&[]);
        let spec = spec(
            "CLH21",
            Frequency::Daily,
            AssetClass::Futures,
            ContractType::Expiry,
            "ECBOT",
            "EUR",
        );
        assert_eq!(
            resolver.generate_file_path(&spec).unwrap(),
            "s3://alphamatic-data/data/ib/Futures/ECBOT/EUR/daily/CLH21.csv.gz"
        );
    }

    #[test]
    fn test_generate_file_path_is_repeatable() {
        let resolver = in_memory(&[]);
        let esz = spec(
            "ESZ21",
            Frequency::Minutely,
            AssetClass::Futures,
            ContractType::Expiry,
            "GLOBEX",
            "USD",
        );
        let tsla = spec(
            "TSLA",
            Frequency::Daily,
            AssetClass::Stocks,
            ContractType::Continuous,
            "NSDQ",
            "USD",
        );

        let first = resolver.generate_file_path(&esz).unwrap();
        resolver.generate_file_path(&tsla).unwrap();
        let second = resolver.generate_file_path(&esz).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_file_path_rejects_unsupported() {
        let resolver = in_memory(&[]);
        let spec = spec(
            "EURUSD",
            Frequency::Daily,
            AssetClass::Forex,
            ContractType::Continuous,
            "IDEALPRO",
            "USD",
        );
        assert!(matches!(
            resolver.generate_file_path(&spec),
            Err(PathError::InvalidSpecification(_))
        ));
    }

    #[test]
    fn test_latest_symbols_file() {
        let resolver = in_memory(&[
            "data/ib/metadata/symbols-2021-03-15-101500000000.csv",
            "data/ib/metadata/symbols-2021-04-01-143112738505.csv",
            "data/ib/metadata/symbols-2020-12-31-235959000000.csv",
            "data/ib/metadata/exchanges-2021-05-01-000000000000.csv",
            "data/ib/Futures/GLOBEX/USD/daily/ESZ21.csv.gz",
        ]);

        let latest = resolver.get_latest_symbols_file().unwrap();
        assert_eq!(
            latest,
            "s3://alphamatic-data/data/ib/metadata/symbols-2021-04-01-143112738505.csv"
        );
        assert!(latest.starts_with(&resolver.config().prefix()));
    }

    #[test]
    fn test_latest_symbols_file_ignores_subdirectories() {
        let resolver = in_memory(&[
            "data/ib/metadata/symbols-2021-04-01-143112738505.csv",
            "data/ib/metadata/zz/symbols-2000-01-01-000000000000.csv",
            "data/ib/metadata/archive/symbols-2099-01-01-000000000000.csv",
        ]);
        assert_eq!(
            resolver.get_latest_symbols_file().unwrap(),
            "s3://alphamatic-data/data/ib/metadata/symbols-2021-04-01-143112738505.csv"
        );
    }

    #[test]
    fn test_latest_symbols_file_not_found() {
        let resolver = in_memory(&["data/ib/metadata/exchanges-2021-05-01.csv"]);
        let err = resolver.get_latest_symbols_file().unwrap_err();
        assert!(matches!(err, PathError::NotFound { ref prefix } if prefix.ends_with("data/ib/metadata")));
    }

    #[test]
    fn test_latest_symbols_file_local_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = dir.path().join("data/ib/metadata");
        std::fs::create_dir_all(&metadata).unwrap();
        std::fs::write(metadata.join("symbols-2021-01-04-000000000000.csv"), "a\n").unwrap();
        std::fs::write(metadata.join("symbols-2021-02-01-000000000000.csv"), "b\n").unwrap();

        let resolver = PathResolver::local(ResolverConfig::new(BUCKET), dir.path()).unwrap();
        assert_eq!(
            resolver.get_latest_symbols_file().unwrap(),
            "s3://alphamatic-data/data/ib/metadata/symbols-2021-02-01-000000000000.csv"
        );
    }
}

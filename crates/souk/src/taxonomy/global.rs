use std::sync::OnceLock;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::taxonomy::TaxonomyStore;

static MARKETPLACE: Lazy<TaxonomyStore> = Lazy::new(|| {
    TaxonomyStore::embedded().expect("failed to load the embedded marketplace taxonomy")
});

static INSTALLED: OnceLock<TaxonomyStore> = OnceLock::new();

#[derive(Error, Debug, PartialEq, Eq)]
#[error("a taxonomy has already been installed")]
pub struct AlreadyInitialized;

/// Returns the marketplace taxonomy compiled into this crate.
///
/// The taxonomy is loaded on first access and shared for the rest of the
/// process. A malformed embedded taxonomy aborts the process.
pub fn marketplace() -> &'static TaxonomyStore {
    &MARKETPLACE
}

/// Installs `store` as the process-wide taxonomy.
///
/// This may only be done once; later calls leave the installed taxonomy in
/// place and return [`AlreadyInitialized`].
pub fn init(store: TaxonomyStore) -> Result<&'static TaxonomyStore, AlreadyInitialized> {
    INSTALLED.set(store).map_err(|_| AlreadyInitialized)?;

    log::debug!("installed process-wide taxonomy");

    INSTALLED.get().ok_or(AlreadyInitialized)
}

/// Returns the process-wide taxonomy installed with [`init`], if any.
pub fn get() -> Option<&'static TaxonomyStore> {
    INSTALLED.get()
}

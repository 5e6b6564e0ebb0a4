// Required Ports - interfaces the host application implements

/// Durable key-value storage holding the persisted snapshot as JSON text.
///
/// Shared across the detached write workers, so calls take `&self` and
/// implementations handle their own interior mutability.
pub trait StorageClient: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    fn set(&self, key: &str, value: String) -> Result<(), String>;

    /// Returns whether an entry existed.
    fn remove(&self, key: &str) -> Result<bool, String>;
}

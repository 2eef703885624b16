/// Where the raw dataset document comes from.
pub trait DatasetSource: Send + Sync {
    /// Human-readable origin, used in logs and load errors.
    fn describe(&self) -> String;

    /// Read the full dataset document. Called once per successful load.
    fn read_document(&self) -> anyhow::Result<Vec<u8>>;
}

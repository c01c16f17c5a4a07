use hostkeep_format::{layout, parse, IdMap, LineEnding};
use hostkeep_types::Record;
use tracing::warn;

use crate::error::StoreResult;

/// Whole-file access to one hosts file.
///
/// Backends provide raw byte access; the record-level cycle is built on top
/// of it by the provided methods:
/// - `read_all` reads the file and parses it;
/// - `write_all` generates text from records and overwrites the file.
pub trait HostsStore: Send + Sync {
    /// Read the file verbatim.
    ///
    /// Returns `Err` if the file is missing or unreadable.
    fn read_raw(&self) -> StoreResult<Vec<u8>>;

    /// Overwrite the file verbatim with one write.
    fn write_raw(&self, bytes: &[u8]) -> StoreResult<()>;

    /// Check whether the backing file currently exists.
    fn exists(&self) -> bool;

    /// Terminator used when regenerating the file.
    fn line_ending(&self) -> LineEnding {
        LineEnding::Lf
    }

    /// Read the file as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a stray byte in a
    /// comment never makes the whole file unreadable.
    fn read_text(&self) -> StoreResult<String> {
        let bytes = self.read_raw()?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("hosts file is not valid UTF-8; replacing invalid sequences");
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    /// Read and parse the current file.
    fn read_all(&self) -> StoreResult<Vec<Record>> {
        Ok(parse(&self.read_text()?))
    }

    /// Regenerate the file from `records` and overwrite it.
    ///
    /// Returns where each written record's id lands on the next read.
    fn write_all(&self, records: &[Record]) -> StoreResult<IdMap> {
        let laid_out = layout(records);
        self.write_raw(laid_out.render(self.line_ending()).as_bytes())?;
        Ok(laid_out.id_map())
    }
}

use indexmap::map::Entry;

use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartListener;

use super::ChartContext;

impl<L> ChartContext<L> {
    /// Attaches an observer. Ids are unique per context; events reach
    /// listeners in attachment order.
    pub fn register_listener(&mut self, listener: Box<dyn ChartListener>) -> ChartResult<()> {
        self.ensure_active("register_listener")?;
        if listener.id().is_empty() {
            return Err(ChartError::InvalidData(
                "listener id must not be empty".to_owned(),
            ));
        }
        match self.listeners.entry(listener.id().to_owned()) {
            Entry::Occupied(entry) => Err(ChartError::InvalidData(format!(
                "listener `{}` is already attached to this chart",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(listener);
                Ok(())
            }
        }
    }

    /// Detaches an observer without sending it further events. Returns
    /// `true` when it was attached.
    pub fn unregister_listener(&mut self, listener_id: &str) -> ChartResult<bool> {
        self.ensure_active("unregister_listener")?;
        Ok(self.listeners.shift_remove(listener_id).is_some())
    }

    pub fn listener_count(&self) -> ChartResult<usize> {
        self.ensure_active("listener_count")?;
        Ok(self.listeners.len())
    }

    pub fn has_listener(&self, listener_id: &str) -> ChartResult<bool> {
        self.ensure_active("has_listener")?;
        Ok(self.listeners.contains_key(listener_id))
    }

    /// Attached listener ids in dispatch order.
    pub fn listener_ids(&self) -> ChartResult<Vec<&str>> {
        self.ensure_active("listener_ids")?;
        Ok(self.listeners.keys().map(String::as_str).collect())
    }
}

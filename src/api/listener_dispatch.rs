use crate::extensions::{ChartEvent, ListenerContext};

use super::ChartContext;

impl<L> ChartContext<L> {
    pub(super) fn listener_context(&self) -> ListenerContext {
        ListenerContext {
            layout_revision: self.revision,
            container: self.model.container,
            drawing_area: self.published.as_ref().map(|layout| layout.drawing_area),
            registered_axes: self.model.registry.len(),
            series_count: self.model.series.len(),
        }
    }

    pub(super) fn emit_event(&mut self, event: ChartEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let context = self.listener_context();
        for listener in self.listeners.values_mut() {
            listener.on_event(event, context);
        }
    }
}

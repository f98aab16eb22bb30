//! Display updater — projects payload readings onto the readout elements.

use armpanel_domain::payload::{Axis, Payload};

use crate::ports::ViewBindings;

/// Write every reading present in `payload` into its readout.
///
/// Readouts for absent or non-numeric fields keep their current text.
pub fn update(view: &ViewBindings, payload: &Payload) {
    for axis in Axis::ALL {
        if let Some(reading) = payload.reading(axis) {
            view.readout(axis).set_text(&axis.render(reading));
        }
    }
}

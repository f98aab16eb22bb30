//! View port — element handles the services write into.
//!
//! The panel never looks elements up by name at the point of use. The
//! composition root resolves every element once through
//! [`ViewBindings::bind`] and hands the resulting struct to the services.

use std::sync::Arc;

use armpanel_domain::payload::Axis;
use armpanel_domain::step::StepSize;

/// A single visible element: some text and a whitespace-separated class list.
///
/// Handles are shared between tasks (poller ticks, alert timers, commands),
/// so implementations use interior mutability.
pub trait Element: Send + Sync {
    fn text(&self) -> String;

    fn set_text(&self, text: &str);

    fn class(&self) -> String;

    fn set_class(&self, class: &str);

    fn has_class(&self, name: &str) -> bool {
        self.class().split_whitespace().any(|c| c == name)
    }

    fn add_class(&self, name: &str) {
        if self.has_class(name) {
            return;
        }
        let class = self.class();
        if class.trim().is_empty() {
            self.set_class(name);
        } else {
            self.set_class(&format!("{} {name}", class.trim_end()));
        }
    }

    fn remove_class(&self, name: &str) {
        if !self.has_class(name) {
            return;
        }
        let class = self.class();
        let remaining: Vec<&str> = class.split_whitespace().filter(|c| *c != name).collect();
        self.set_class(&remaining.join(" "));
    }
}

/// Shared handle to an element.
pub type ElementHandle = Arc<dyn Element>;

/// Identifies each element the panel binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Current joint reading.
    Readout(Axis),
    /// Editable move target.
    Target(Axis),
    StatusDot,
    StatusText,
    AlertBox,
    ForceLabel,
    SpeedLabel,
    StepButton(StepSize),
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Readout(Axis::Base) => f.write_str("xPos"),
            Self::Readout(Axis::YAxis) => f.write_str("yPos"),
            Self::Readout(Axis::ZAxis) => f.write_str("zPos"),
            Self::Target(Axis::Base) => f.write_str("targetX"),
            Self::Target(Axis::YAxis) => f.write_str("targetY"),
            Self::Target(Axis::ZAxis) => f.write_str("targetZ"),
            Self::StatusDot => f.write_str("statusDot"),
            Self::StatusText => f.write_str("statusText"),
            Self::AlertBox => f.write_str("alertBox"),
            Self::ForceLabel => f.write_str("forceValue"),
            Self::SpeedLabel => f.write_str("speedValue"),
            Self::StepButton(step) => write!(f, "step{step}"),
        }
    }
}

/// One element per axis.
pub struct AxisElements {
    pub base: ElementHandle,
    pub yaxis: ElementHandle,
    pub zaxis: ElementHandle,
}

impl AxisElements {
    #[must_use]
    pub fn get(&self, axis: Axis) -> &ElementHandle {
        match axis {
            Axis::Base => &self.base,
            Axis::YAxis => &self.yaxis,
            Axis::ZAxis => &self.zaxis,
        }
    }
}

/// Every element the panel touches, resolved once.
pub struct ViewBindings {
    pub readouts: AxisElements,
    pub targets: AxisElements,
    pub status_dot: ElementHandle,
    pub status_text: ElementHandle,
    pub alert_box: ElementHandle,
    pub force_label: ElementHandle,
    pub speed_label: ElementHandle,
    step_buttons: Vec<(StepSize, ElementHandle)>,
}

impl ViewBindings {
    /// Resolve all elements through `lookup`, including one step button per
    /// entry of `step_sizes`.
    pub fn bind(step_sizes: &[StepSize], mut lookup: impl FnMut(ElementId) -> ElementHandle) -> Self {
        let mut axes = |make: fn(Axis) -> ElementId| AxisElements {
            base: lookup(make(Axis::Base)),
            yaxis: lookup(make(Axis::YAxis)),
            zaxis: lookup(make(Axis::ZAxis)),
        };
        let readouts = axes(ElementId::Readout);
        let targets = axes(ElementId::Target);

        let mut step_buttons: Vec<(StepSize, ElementHandle)> = Vec::with_capacity(step_sizes.len());
        for &step in step_sizes {
            if step_buttons.iter().any(|(s, _)| *s == step) {
                continue;
            }
            step_buttons.push((step, lookup(ElementId::StepButton(step))));
        }

        Self {
            readouts,
            targets,
            status_dot: lookup(ElementId::StatusDot),
            status_text: lookup(ElementId::StatusText),
            alert_box: lookup(ElementId::AlertBox),
            force_label: lookup(ElementId::ForceLabel),
            speed_label: lookup(ElementId::SpeedLabel),
            step_buttons,
        }
    }

    #[must_use]
    pub fn readout(&self, axis: Axis) -> &ElementHandle {
        self.readouts.get(axis)
    }

    #[must_use]
    pub fn target(&self, axis: Axis) -> &ElementHandle {
        self.targets.get(axis)
    }

    pub fn step_buttons(&self) -> impl Iterator<Item = (StepSize, &ElementHandle)> {
        self.step_buttons.iter().map(|(step, el)| (*step, el))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingElement, TestView};

    #[test]
    fn should_add_class_once() {
        let el = RecordingElement::default();
        el.add_class("active");
        el.add_class("active");
        assert_eq!(el.class(), "active");
    }

    #[test]
    fn should_append_class_to_existing_list() {
        let el = RecordingElement::with_class("alert alert-info");
        el.add_class("show");
        assert_eq!(el.class(), "alert alert-info show");
    }

    #[test]
    fn should_remove_only_the_named_class() {
        let el = RecordingElement::with_class("alert alert-error show");
        el.remove_class("show");
        assert_eq!(el.class(), "alert alert-error");
        assert!(!el.has_class("show"));
    }

    #[test]
    fn should_use_markup_ids_for_element_names() {
        assert_eq!(ElementId::Readout(Axis::Base).to_string(), "xPos");
        assert_eq!(ElementId::Target(Axis::ZAxis).to_string(), "targetZ");
        let step = StepSize::new(10).unwrap();
        assert_eq!(ElementId::StepButton(step).to_string(), "step10");
    }

    #[test]
    fn should_bind_every_element_once() {
        let test_view = TestView::new();
        let names = test_view.bound_names();
        for expected in [
            "xPos", "yPos", "zPos", "targetX", "targetY", "targetZ", "statusDot", "statusText",
            "alertBox", "forceValue", "speedValue", "step1", "step5", "step10",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn should_skip_duplicate_step_sizes() {
        let five = StepSize::new(5).unwrap();
        let view = ViewBindings::bind(&[five, five], |_| Arc::new(RecordingElement::default()));
        assert_eq!(view.step_buttons().count(), 1);
    }
}

//! # armpanel-adapter-console
//!
//! Console adapter — backs the view port with a line-oriented terminal.
//!
//! ## Responsibilities
//! - Hand out one [`Element`] per [`ElementId`], all writing to a shared sink
//! - Echo the changes an operator cares about (readouts, status, alerts,
//!   slider labels, the selected step) and keep the rest silent
//!
//! ## Dependency rule
//! Depends on `armpanel-app` (for the port trait) and `armpanel-domain`.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use armpanel_app::ports::{Element, ElementHandle, ElementId};
use armpanel_domain::payload::Axis;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// A terminal the panel's elements print to.
#[derive(Clone)]
pub struct Console {
    sink: Sink,
}

impl Console {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Create the element bound to `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> ElementHandle {
        let (label, echo) = match id {
            ElementId::Readout(Axis::Base) => ("base".to_string(), Echo::Text),
            ElementId::Readout(Axis::YAxis) => ("y-axis".to_string(), Echo::Text),
            ElementId::Readout(Axis::ZAxis) => ("z-axis".to_string(), Echo::Text),
            ElementId::StatusText => ("status".to_string(), Echo::Text),
            ElementId::ForceLabel => ("gripper force".to_string(), Echo::Text),
            ElementId::SpeedLabel => ("speed".to_string(), Echo::Text),
            ElementId::AlertBox => (String::new(), Echo::Shown),
            ElementId::StepButton(step) => (format!("step size {step}\u{b0}"), Echo::Active),
            ElementId::Target(_) | ElementId::StatusDot => (id.to_string(), Echo::Silent),
        };
        Arc::new(ConsoleElement {
            label,
            echo,
            text: Mutex::new(String::new()),
            class: Mutex::new(String::new()),
            sink: Arc::clone(&self.sink),
        })
    }

    /// Print a free-form line, e.g. a prompt or help text.
    pub fn println(&self, line: &str) {
        write_line(&self.sink, line);
    }
}

/// When an element prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Echo {
    /// `label: text`, whenever the text changes.
    Text,
    /// `[severity] text`, whenever the class list is set with `show` in it.
    Shown,
    /// `label selected`, when the `active` class is gained.
    Active,
    Silent,
}

struct ConsoleElement {
    label: String,
    echo: Echo,
    text: Mutex<String>,
    class: Mutex<String>,
    sink: Sink,
}

impl Element for ConsoleElement {
    fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_text(&self, text: &str) {
        let previous = std::mem::replace(
            &mut *self.text.lock().unwrap_or_else(PoisonError::into_inner),
            text.to_string(),
        );
        if self.echo == Echo::Text && previous != text {
            write_line(&self.sink, &format!("{}: {text}", self.label));
        }
    }

    fn class(&self) -> String {
        self.class
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_class(&self, class: &str) {
        let previous = std::mem::replace(
            &mut *self.class.lock().unwrap_or_else(PoisonError::into_inner),
            class.to_string(),
        );
        let has = |list: &str, name: &str| list.split_whitespace().any(|c| c == name);
        match self.echo {
            Echo::Shown if has(class, "show") => {
                let severity = class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("alert-"))
                    .unwrap_or("info");
                write_line(&self.sink, &format!("[{severity}] {}", self.text()));
            }
            Echo::Active if has(class, "active") && !has(&previous, "active") => {
                write_line(&self.sink, &format!("{} selected", self.label));
            }
            _ => {}
        }
    }
}

fn write_line(sink: &Sink, line: &str) {
    let mut out = sink.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        tracing::warn!(error = %err, "failed to write to console");
    }
}

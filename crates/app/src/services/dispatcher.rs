//! Command dispatcher — use-cases behind every panel control.

use armpanel_domain::alert::Alert;
use armpanel_domain::command::{
    Command, GripperAction, JogDirection, MoveTarget, NEUTRAL_PERCENT, PowerState,
    SettingsUpdate, parse_leading_int,
};
use armpanel_domain::payload::{Axis, Payload};
use armpanel_domain::request::ApiRequest;
use armpanel_domain::step::StepSize;

use crate::ports::{Confirm, Transport};
use crate::services::api_client::ApiClient;

/// Mutable panel state owned by the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub current_step: StepSize,
}

/// Maps operator intents onto device requests.
///
/// Every operation resolves to the reply payload, or `None` when the request
/// failed (the failure has already been alerted) or was never sent.
pub struct CommandDispatcher<T, C> {
    client: ApiClient<T>,
    confirm: C,
    state: PanelState,
}

impl<T: Transport, C: Confirm> CommandDispatcher<T, C> {
    pub const EMERGENCY_STOP_PROMPT: &'static str = "ACTIVATE EMERGENCY STOP?";

    pub fn new(client: ApiClient<T>, confirm: C) -> Self {
        Self {
            client,
            confirm,
            state: PanelState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Select the jog step, highlight its button and tell the device.
    ///
    /// A step with no bound button is refused with an error alert and leaves
    /// both the highlight and the current step untouched.
    #[tracing::instrument(skip_all, fields(step = %step))]
    pub async fn set_step_size(&mut self, step: StepSize) -> Option<Payload> {
        if !self.client.view().step_buttons().any(|(size, _)| size == step) {
            tracing::warn!("no step button for this size");
            self.client
                .alerts()
                .show(&Alert::error(format!("Step size {step}\u{b0} is not available")));
            return None;
        }
        self.state.current_step = step;
        for (size, button) in self.client.view().step_buttons() {
            if size == step {
                button.add_class("active");
            } else {
                button.remove_class("active");
            }
        }
        self.client
            .send(Command::Settings(SettingsUpdate {
                step_size: Some(step),
                ..SettingsUpdate::default()
            }))
            .await
    }

    /// Jog one step in `direction`. The device applies its own step setting.
    #[tracing::instrument(skip_all, fields(direction = %direction))]
    pub async fn jog(&self, direction: JogDirection) -> Option<Payload> {
        tracing::debug!(step = %self.state.current_step, "jogging");
        self.client.send(Command::Jog(direction)).await
    }

    /// Move to whatever the target inputs currently hold.
    #[tracing::instrument(skip(self))]
    pub async fn move_to_position(&self) -> Option<Payload> {
        let view = self.client.view();
        let target = MoveTarget::from_inputs(
            &view.target(Axis::Base).text(),
            &view.target(Axis::YAxis).text(),
            &view.target(Axis::ZAxis).text(),
        );
        tracing::debug!(
            base = target.base,
            yaxis = target.yaxis,
            zaxis = target.zaxis,
            "moving"
        );
        self.client.send(Command::Move(target)).await
    }

    /// Fill the target inputs with a preset, then move there.
    #[tracing::instrument(skip(self))]
    pub async fn go_to_position(&self, base: i64, yaxis: i64, zaxis: i64) -> Option<Payload> {
        self.enter_targets(&base.to_string(), &yaxis.to_string(), &zaxis.to_string());
        self.move_to_position().await
    }

    /// Type raw text into the target inputs. Nothing is sent.
    pub fn enter_targets(&self, base: &str, yaxis: &str, zaxis: &str) {
        let view = self.client.view();
        view.target(Axis::Base).set_text(base);
        view.target(Axis::YAxis).set_text(yaxis);
        view.target(Axis::ZAxis).set_text(zaxis);
    }

    pub async fn gripper_open(&self) -> Option<Payload> {
        self.client.send(Command::Gripper(GripperAction::Open)).await
    }

    pub async fn gripper_close(&self) -> Option<Payload> {
        self.client.send(Command::Gripper(GripperAction::Close)).await
    }

    /// Apply a gripper force percentage typed by the operator.
    #[tracing::instrument(skip(self))]
    pub async fn update_gripper_force(&self, raw: &str) -> Option<Payload> {
        let force = parse_leading_int(raw).unwrap_or(NEUTRAL_PERCENT);
        self.client
            .view()
            .force_label
            .set_text(&format!("{force}%"));
        self.client
            .send(Command::Settings(SettingsUpdate {
                gripper_force: Some(force),
                ..SettingsUpdate::default()
            }))
            .await
    }

    /// Apply a speed percentage typed by the operator.
    #[tracing::instrument(skip(self))]
    pub async fn update_speed(&self, raw: &str) -> Option<Payload> {
        let speed = parse_leading_int(raw).unwrap_or(NEUTRAL_PERCENT);
        self.client
            .view()
            .speed_label
            .set_text(&format!("{speed}%"));
        self.client
            .send(Command::Settings(SettingsUpdate {
                speed: Some(speed),
                ..SettingsUpdate::default()
            }))
            .await
    }

    pub async fn power_on(&self) -> Option<Payload> {
        self.client.send(Command::Power(PowerState::On)).await
    }

    pub async fn power_off(&self) -> Option<Payload> {
        self.client.send(Command::Power(PowerState::Off)).await
    }

    pub async fn home_position(&self) -> Option<Payload> {
        self.client.send(Command::Home).await
    }

    /// Same as [`home_position`](Self::home_position).
    pub async fn reset_position(&self) -> Option<Payload> {
        self.home_position().await
    }

    /// Stop the arm, but only once the operator has confirmed.
    #[tracing::instrument(skip(self))]
    pub async fn emergency_stop(&self) -> Option<Payload> {
        if !self.confirm.confirm(Self::EMERGENCY_STOP_PROMPT).await {
            tracing::info!("emergency stop cancelled");
            return None;
        }
        tracing::warn!("emergency stop requested");
        self.client.send(Command::EmergencyStop).await
    }

    pub async fn pick_and_place(&self) -> Option<Payload> {
        self.run_sequence(Command::PickAndPlace, "Starting Pick & Place sequence...")
            .await
    }

    pub async fn calibrate(&self) -> Option<Payload> {
        self.run_sequence(Command::Calibrate, "Starting calibration...")
            .await
    }

    pub async fn test_sequence(&self) -> Option<Payload> {
        self.run_sequence(Command::TestSequence, "Starting test sequence...")
            .await
    }

    /// Announce the current readouts as a saved position. Nothing is sent.
    pub fn save_current_position(&self) -> Alert {
        let view = self.client.view();
        let alert = Alert::success(format!(
            "Position saved: Base={}, Y={}, Z={}",
            view.readout(Axis::Base).text(),
            view.readout(Axis::YAxis).text(),
            view.readout(Axis::ZAxis).text(),
        ));
        self.client.alerts().show(&alert);
        alert
    }

    /// Ask a serial bridge to open its link, optionally on a given port.
    #[tracing::instrument(skip(self))]
    pub async fn connect(&self, port: Option<String>) -> Option<Payload> {
        self.client.send(Command::Connect { port }).await
    }

    pub async fn disconnect(&self) -> Option<Payload> {
        self.client.send(Command::Disconnect).await
    }

    /// Read the status once and refresh the readouts from it.
    pub async fn refresh_status(&self) -> Option<Payload> {
        self.client.call(ApiRequest::status()).await
    }

    async fn run_sequence(&self, command: Command, announcement: &str) -> Option<Payload> {
        self.client.alerts().show(&Alert::info(announcement));
        tracing::info!(sequence = command.path(), "starting sequence");
        self.client.send(command).await
    }
}

//! Bridge between the model layer's event channel and the iced runtime.
//!
//! The subscription creates the event channel, hands the sender back to the
//! application (which attaches it to the profile store), then forwards every
//! model event as a message. The sender handoff mirrors a query-channel
//! handshake: state that must live inside the async task announces its
//! endpoints through the first events it emits.

use iced::task::{sipper, Never, Sipper};
use iced::Subscription;
use tokio::sync::mpsc;
use tracing::debug;

use printprep_shared::events::ModelEvent;

/// Events surfaced to the application by the bridge
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// The channel is up; attach this sender to the profile store
    ChannelReady(mpsc::UnboundedSender<ModelEvent>),
    /// A forwarded model event
    Model(ModelEvent),
}

/// Create the iced subscription for model events.
pub fn subscription() -> Subscription<BridgeEvent> {
    Subscription::run(model_event_sipper)
}

/// The long-running forwarding task.
fn model_event_sipper() -> impl Sipper<Never, BridgeEvent> {
    sipper(async move |mut output| {
        let (sender, mut receiver) = mpsc::unbounded_channel::<ModelEvent>();
        let _ = output.send(BridgeEvent::ChannelReady(sender)).await;
        debug!("model event bridge ready");

        loop {
            match receiver.recv().await {
                Some(event) => {
                    let _ = output.send(BridgeEvent::Model(event)).await;
                }
                None => {
                    // All senders dropped; nothing will ever arrive again.
                    // Park instead of busy-looping; the subscription is
                    // recreated if the app resubscribes.
                    debug!("model event channel closed");
                    std::future::pending::<()>().await;
                }
            }
        }
    })
}

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{error, info, warn};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};

use crate::config::MqttConfig;
use crate::types::Reading;

/// Flags shared between the feed thread and the UI.
#[derive(Debug, Clone, Default)]
pub struct FeedSignals {
    pub shutdown: Arc<AtomicBool>,
    pub connected: Arc<AtomicBool>,
}

impl FeedSignals {
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Payloads carry either one reading or a batch of them.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ReadingPayload {
    Batch(Vec<Reading>),
    Single(Reading),
}

/// Blocks on the broker connection, forwarding readings until shutdown or a
/// connection error.
pub fn run_mqtt_client(
    config: &MqttConfig,
    reading_sender: Sender<Reading>,
    signals: FeedSignals,
) -> Result<(), Box<dyn std::error::Error>> {
    let (client, mut connection) = Client::new(mqtt_options(config), 10);
    client.subscribe(&config.topic, QoS::AtLeastOnce)?;
    info!("Subscribed to '{}' on {}:{}", config.topic, config.broker, config.port);

    for event in connection.iter() {
        if signals.shutdown.load(Ordering::Relaxed) {
            info!("Reading feed received shutdown signal, exiting");
            break;
        }

        match event {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                signals.connected.store(true, Ordering::Relaxed);
            }
            Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == config.topic => {
                match parse_readings(&publish.payload) {
                    Ok(readings) => {
                        for reading in readings {
                            if reading_sender.send(reading).is_err() {
                                info!("Reading channel disconnected, feed exiting");
                                signals.connected.store(false, Ordering::Relaxed);
                                return Ok(());
                            }
                        }
                    }
                    Err(e) => warn!("Invalid reading payload: {}", e),
                }
            }
            Ok(_) => {}
            Err(e) => {
                signals.connected.store(false, Ordering::Relaxed);
                error!("MQTT connection error: {}", e);
                return Err(e.into());
            }
        }
    }

    signals.connected.store(false, Ordering::Relaxed);
    Ok(())
}

/// Connection options for the feed. The viewer only subscribes, so no last
/// will is registered.
fn mqtt_options(config: &MqttConfig) -> MqttOptions {
    let mut mqtt_options = MqttOptions::new(&config.client_id, &config.broker, config.port);

    if let (Ok(user), Ok(pass)) = (env::var("MQTT_USER"), env::var("MQTT_PASS")) {
        mqtt_options.set_credentials(user, pass);
    }
    mqtt_options.set_keep_alive(Duration::from_secs(config.keep_alive.into()));
    mqtt_options
}

pub fn parse_readings(payload: &[u8]) -> Result<Vec<Reading>, String> {
    let payload_str = std::str::from_utf8(payload).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    match serde_json::from_str::<ReadingPayload>(payload_str) {
        Ok(ReadingPayload::Batch(readings)) => Ok(readings),
        Ok(ReadingPayload::Single(reading)) => Ok(vec![reading]),
        Err(e) => Err(format!("JSON parsing error: {}", e)),
    }
}

//! Presence rules — the bindings of a home/away deployment.

use std::collections::BTreeSet;
use std::sync::Arc;

use wifitriggers_domain::condition::Condition;
use wifitriggers_domain::hardware_address::HardwareAddress;

use crate::engine::{Engine, EngineBuilder};
use crate::ports::Delivery;
use crate::switch::Switch;

/// Turn `switch` on while any tracked device is connected, off otherwise.
pub fn presence_rules<D: Delivery>(
    tracked: impl IntoIterator<Item = HardwareAddress>,
    switch: &Arc<Switch<D>>,
) -> EngineBuilder {
    let somebody_home = Condition::any_present(tracked);
    Engine::builder()
        .when(somebody_home.clone(), switch.on_action())
        .when(!somebody_home, switch.off_action())
}

/// Turn `switch` on while every device is connected, off as soon as one is
/// missing.
///
/// An empty device list produces no bindings.
pub fn subset_rules<D: Delivery>(
    devices: impl IntoIterator<Item = HardwareAddress>,
    switch: &Arc<Switch<D>>,
) -> EngineBuilder {
    let devices: BTreeSet<_> = devices.into_iter().collect();
    if devices.is_empty() {
        return EngineBuilder::new();
    }
    let all_connected = Condition::all_present(devices);
    Engine::builder()
        .when(all_connected.clone(), switch.on_action())
        .when(!all_connected, switch.off_action())
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Mutex;

    use tokio_util::sync::CancellationToken;
    use wifitriggers_domain::client_set::ClientSet;
    use wifitriggers_domain::error::WifiTriggersError;
    use wifitriggers_domain::switch_state::SwitchState;

    use super::*;

    #[derive(Default)]
    struct RecordingDelivery {
        delivered: Mutex<Vec<&'static str>>,
    }

    impl Delivery for RecordingDelivery {
        type Payload = &'static str;

        fn deliver(
            &self,
            _cancel: &CancellationToken,
            payload: &&'static str,
        ) -> impl Future<Output = Result<(), WifiTriggersError>> + Send {
            self.delivered.lock().unwrap().push(*payload);
            async { Ok(()) }
        }
    }

    fn addr(last: u8) -> HardwareAddress {
        HardwareAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, last])
    }

    fn clients(lasts: &[u8]) -> ClientSet {
        lasts.iter().copied().map(addr).collect()
    }

    fn switch(name: &str) -> Arc<Switch<RecordingDelivery>> {
        Arc::new(Switch::new(name, RecordingDelivery::default(), "on", "off"))
    }

    #[test]
    fn should_turn_presence_switch_on_when_somebody_home() {
        let home = switch("home");
        let engine = presence_rules([addr(1), addr(2)], &home).build();

        let on = engine.evaluate(&clients(&[2, 9]));
        let off = engine.evaluate(&clients(&[9]));

        assert_eq!(on.labels().collect::<Vec<_>>(), ["home:on"]);
        assert_eq!(off.labels().collect::<Vec<_>>(), ["home:off"]);
    }

    #[test]
    fn should_turn_subset_switch_off_when_one_device_missing() {
        let cameras = switch("cameras");
        let engine = subset_rules([addr(2), addr(3)], &cameras).build();

        let on = engine.evaluate(&clients(&[1, 2, 3]));
        let off = engine.evaluate(&clients(&[2]));

        assert_eq!(on.labels().collect::<Vec<_>>(), ["cameras:on"]);
        assert_eq!(off.labels().collect::<Vec<_>>(), ["cameras:off"]);
    }

    #[test]
    fn should_produce_no_bindings_for_empty_device_list() {
        let cameras = switch("cameras");
        let engine = subset_rules(Vec::<HardwareAddress>::new(), &cameras).build();
        assert!(engine.is_empty());
    }

    #[tokio::test]
    async fn should_drive_both_switches_from_one_engine() {
        let home = switch("home");
        let cameras = switch("cameras");
        let engine = presence_rules([addr(1)], &home)
            .extend(subset_rules([addr(2), addr(3)], &cameras))
            .build();

        engine
            .evaluate(&clients(&[1, 2]))
            .run(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(engine.len(), 4);
        assert_eq!(home.state().await, SwitchState::On);
        assert_eq!(cameras.state().await, SwitchState::Off);
    }
}

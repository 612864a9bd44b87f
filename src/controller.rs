//! Generic RGB controller on top of an ASRock adapter.

use std::ops::Range;

use log::{debug, info, trace, warn};

use crate::adapter::{Adapter, Variant};
use crate::catalog::{ModeCatalog, STATIC_MODE_INDEX};
use crate::color::RgbColor;
use crate::error::{Error, Result, Target};
use crate::mode::Mode;
use crate::topology::{Led, Topology, Zone};

pub const DESCRIPTION: &str = "ASRock ASR LED/Polychrome Device";

/// Kind of device this controller drives.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum DeviceType {
    Motherboard,
}

/// RGB controller for one ASRock lighting device.
///
/// The adapter is borrowed for the controller's whole lifetime, so a hardware handle can only be
/// driven by one controller at a time.
pub struct Controller<'a, A: Adapter + ?Sized> {
    adapter: &'a mut A,
    name: String,
    version: String,
    modes: ModeCatalog,
    topology: Topology,
    colors: Vec<RgbColor>,
    active_mode: usize,
    /// Current speed of each mode, index-aligned with the catalog.
    speeds: Vec<u8>,
}

impl<'a, A: Adapter + ?Sized> Controller<'a, A> {
    /// Build modes and topology from the variant and zone counts the adapter reports.
    pub fn new(adapter: &'a mut A) -> Self {
        let variant = adapter.variant();
        let modes = ModeCatalog::new(variant);
        let topology = Topology::probe(&*adapter);
        let colors = vec![RgbColor::BLACK; topology.leds().len()];

        info!(
            "{variant} controller with {} modes, {} zones and {} LEDs",
            modes.len(),
            topology.zones().len(),
            colors.len()
        );

        Self {
            name: adapter.device_name(),
            version: adapter.firmware_version(),
            speeds: modes.iter().map(Mode::default_speed).collect(),
            active_mode: 0,
            adapter,
            modes,
            topology,
            colors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &'static str {
        DESCRIPTION
    }

    pub fn device_type(&self) -> DeviceType {
        DeviceType::Motherboard
    }

    pub fn variant(&self) -> Variant {
        self.modes.variant()
    }

    pub fn modes(&self) -> &ModeCatalog {
        &self.modes
    }

    pub fn zones(&self) -> &[Zone] {
        self.topology.zones()
    }

    pub fn leds(&self) -> &[Led] {
        self.topology.leds()
    }

    pub fn colors(&self) -> &[RgbColor] {
        &self.colors
    }

    pub fn active_mode(&self) -> usize {
        self.active_mode
    }

    /// Speed of the active mode, sent with the next mode push.
    pub fn speed(&self) -> u8 {
        self.speeds[self.active_mode]
    }

    fn mode(&self) -> &Mode {
        &self.modes[self.active_mode]
    }

    /// LED indices belonging to a zone.
    pub fn zone_leds(&self, zone: usize) -> Result<Range<usize>> {
        let zones = self.topology.zones();
        zones.get(zone).map(Zone::leds).ok_or(Error::IndexOutOfRange {
            target: Target::Zone,
            index: zone,
            len: zones.len(),
        })
    }

    /// Reject color edits unless the active mode uses per-LED colors.
    fn check_per_led_color(&self) -> Result<()> {
        let mode = self.mode();
        if mode.supports_per_led_color() {
            return Ok(());
        }

        warn!("Rejecting color change in mode {}", mode.name);
        Err(Error::Unsupported(format!("mode {} has no per-LED colors", mode.name)))
    }

    /// Store the color of one LED without touching the hardware.
    pub fn set_led_color(&mut self, led: usize, color: RgbColor) -> Result<()> {
        self.check_per_led_color()?;

        let len = self.colors.len();
        let slot = self.colors.get_mut(led).ok_or(Error::IndexOutOfRange {
            target: Target::Led,
            index: led,
            len,
        })?;
        *slot = color;
        Ok(())
    }

    /// Store one color for every LED of a zone.
    pub fn set_zone_color(&mut self, zone: usize, color: RgbColor) -> Result<()> {
        self.check_per_led_color()?;

        let leds = self.zone_leds(zone)?;
        self.colors[leds].fill(color);
        Ok(())
    }

    /// Store one color for every LED.
    pub fn set_all_colors(&mut self, color: RgbColor) -> Result<()> {
        self.check_per_led_color()?;

        self.colors.fill(color);
        Ok(())
    }

    /// Write the stored color of every LED, in index order.
    pub fn update_leds(&mut self) -> Result<()> {
        debug!("Updating {} LEDs", self.colors.len());

        for (led, color) in self.colors.iter().enumerate() {
            let (r, g, b) = color.components();
            trace!("LED {led} <- {color}");
            self.adapter.set_colors_and_speed(led, r, g, b)?;
        }

        Ok(())
    }

    /// Write the LEDs of a zone.
    ///
    /// The hardware has no zone-scoped color command, so this writes every LED.
    pub fn update_zone_leds(&mut self, zone: usize) -> Result<()> {
        self.zone_leds(zone)?;
        self.update_leds()
    }

    /// Write the stored color of a single LED.
    pub fn update_single_led(&mut self, led: usize) -> Result<()> {
        let color = *self.colors.get(led).ok_or(Error::IndexOutOfRange {
            target: Target::Led,
            index: led,
            len: self.colors.len(),
        })?;

        let (r, g, b) = color.components();
        trace!("LED {led} <- {color}");
        self.adapter.set_colors_and_speed(led, r, g, b)?;

        Ok(())
    }

    /// Switch to direct per-LED color control.
    pub fn set_custom_mode(&mut self) {
        self.activate(STATIC_MODE_INDEX);
    }

    /// Change the speed of the active mode.
    ///
    /// Only stored; it is sent by the next [`Self::update_mode`].
    pub fn set_speed(&mut self, speed: u8) -> Result<()> {
        let mode = self.mode();
        let range = match mode.speed_range {
            Some(range) if mode.supports_speed() => range,
            _ => {
                warn!("Rejecting speed {speed} for mode {}", mode.name);
                return Err(Error::Unsupported(format!("mode {} has no speed control", mode.name)));
            },
        };

        if !range.contains(speed) {
            warn!("Rejecting speed {speed} for mode {}, outside of {:?}", mode.name, range);
            return Err(Error::SpeedOutOfRange { speed, min: range.min, max: range.max });
        }

        self.speeds[self.active_mode] = speed;
        Ok(())
    }

    /// Make a mode active without sending it.
    pub fn set_active_mode(&mut self, index: usize) -> Result<()> {
        if index >= self.modes.len() {
            warn!("Rejecting mode {index}, only {} modes available", self.modes.len());
            return Err(Error::IndexOutOfRange {
                target: Target::Mode,
                index,
                len: self.modes.len(),
            });
        }

        self.activate(index);
        Ok(())
    }

    /// Select a mode by its catalog index and send it to the hardware.
    ///
    /// The previous mode stays active if the hardware write fails.
    pub fn select_mode(&mut self, index: usize) -> Result<()> {
        let previous = self.active_mode;
        self.set_active_mode(index)?;

        let result = self.update_mode();
        if result.is_err() {
            self.active_mode = previous;
        }

        result
    }

    /// Send the active mode, then every LED color.
    pub fn update_mode(&mut self) -> Result<()> {
        let (value, speed) = (self.mode().value, self.speed());
        debug!("Setting mode {} (0x{value:02x}) with speed {speed}", self.mode().name);

        self.adapter.set_mode(value, speed)?;

        self.update_leds()
    }

    /// Change the LED count of a zone.
    ///
    /// Zones on this hardware have a fixed size, so this always fails.
    pub fn resize_zone(&mut self, zone: usize, size: usize) -> Result<()> {
        warn!("Rejecting resize of zone {zone} to {size} LEDs");
        Err(Error::Unsupported("zone resize".into()))
    }

    fn activate(&mut self, index: usize) {
        if index != self.active_mode {
            debug!("Activating mode {}", self.modes[index].name);
        }

        self.active_mode = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterError, AdapterResult, ZoneSlot};
    use crate::mode::ColorMode;

    /// Primitive call received by the mock adapter.
    #[derive(PartialEq, Eq, Debug, Copy, Clone)]
    enum Call {
        Mode(u8, u8),
        Color(usize, u8, u8, u8),
    }

    /// Adapter recording every primitive call.
    struct MockAdapter {
        variant: Variant,
        counts: [u8; 5],
        calls: Vec<Call>,
        fail_after: Option<usize>,
    }

    impl MockAdapter {
        fn new(variant: Variant, counts: [u8; 5]) -> Self {
            Self { variant, counts, calls: Vec::new(), fail_after: None }
        }

        fn record(&mut self, call: Call) -> AdapterResult {
            if self.fail_after.is_some_and(|limit| self.calls.len() >= limit) {
                return Err(AdapterError::from("bus timeout"));
            }

            self.calls.push(call);
            Ok(())
        }
    }

    impl Adapter for MockAdapter {
        fn variant(&self) -> Variant {
            self.variant
        }

        fn zone_led_count(&self, slot: ZoneSlot) -> u8 {
            ZoneSlot::HEADERS
                .iter()
                .position(|&header| header == slot)
                .map_or(0, |index| self.counts[index])
        }

        fn device_name(&self) -> String {
            "ASRock B450 Steel Legend".into()
        }

        fn firmware_version(&self) -> String {
            "2.00".into()
        }

        fn set_mode(&mut self, mode: u8, speed: u8) -> AdapterResult {
            self.record(Call::Mode(mode, speed))
        }

        fn set_colors_and_speed(&mut self, led: usize, r: u8, g: u8, b: u8) -> AdapterResult {
            self.record(Call::Color(led, r, g, b))
        }
    }

    fn colors(calls: &[Call]) -> Vec<usize> {
        calls
            .iter()
            .filter_map(|call| match call {
                Call::Color(led, ..) => Some(*led),
                Call::Mode(..) => None,
            })
            .collect()
    }

    #[test]
    fn metadata() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [1, 0, 0, 0, 0]);
        let controller = Controller::new(&mut adapter);

        assert_eq!(controller.name(), "ASRock B450 Steel Legend");
        assert_eq!(controller.version(), "2.00");
        assert_eq!(controller.description(), "ASRock ASR LED/Polychrome Device");
        assert_eq!(controller.device_type(), DeviceType::Motherboard);
        assert_eq!(controller.active_mode(), 0);
    }

    #[test]
    fn asrled_single_zone() {
        let mut adapter = MockAdapter::new(Variant::AsrLed, [3, 3, 3, 3, 3]);
        let controller = Controller::new(&mut adapter);

        assert!(!controller.modes().is_empty());
        assert_eq!(controller.zones().len(), 1);
        assert_eq!(controller.zones()[0].name, "Motherboard");
        assert_eq!(controller.leds().len(), 1);
        assert_eq!(controller.leds()[0].name, "Motherboard");
        assert_eq!(controller.colors(), [RgbColor::BLACK]);
    }

    #[test]
    fn push_all_leds_in_order() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [2, 0, 1, 4, 0]);
        let mut controller = Controller::new(&mut adapter);

        controller.set_custom_mode();
        controller.set_led_color(2, RgbColor::new(1, 2, 3)).unwrap();
        controller.set_led_color(2, RgbColor::new(4, 5, 6)).unwrap();
        controller.set_led_color(6, RgbColor::new(0xff, 0, 0x80)).unwrap();
        controller.update_leds().unwrap();

        let calls = &adapter.calls;
        assert_eq!(colors(calls), (0..7).collect::<Vec<_>>());
        assert_eq!(calls[2], Call::Color(2, 4, 5, 6));
        assert_eq!(calls[6], Call::Color(6, 0xff, 0, 0x80));
        assert_eq!(calls[0], Call::Color(0, 0, 0, 0));
    }

    #[test]
    fn set_color_is_local() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV1, [1, 1, 0, 0, 0]);
        let mut controller = Controller::new(&mut adapter);

        controller.set_custom_mode();
        controller.set_led_color(1, RgbColor::new(9, 9, 9)).unwrap();
        assert_eq!(controller.colors()[1], RgbColor::new(9, 9, 9));
        assert!(adapter.calls.is_empty());
    }

    #[test]
    fn led_index_out_of_range() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV1, [1, 1, 0, 0, 0]);
        let mut controller = Controller::new(&mut adapter);

        controller.set_custom_mode();
        let err = controller.set_led_color(2, RgbColor::new(1, 1, 1)).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { target: Target::Led, index: 2, len: 2 });
        assert_eq!(controller.colors(), [RgbColor::BLACK; 2]);

        assert!(matches!(
            controller.update_single_led(5),
            Err(Error::IndexOutOfRange { target: Target::Led, .. })
        ));
    }

    #[test]
    fn zone_push_is_full_push() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [2, 0, 1, 4, 0]);
        let mut controller = Controller::new(&mut adapter);

        controller.update_zone_leds(1).unwrap();
        assert!(matches!(
            controller.update_zone_leds(3),
            Err(Error::IndexOutOfRange { target: Target::Zone, index: 3, len: 3 })
        ));

        assert_eq!(colors(&adapter.calls), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn zone_colors() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [2, 0, 1, 4, 0]);
        let mut controller = Controller::new(&mut adapter);
        let red = RgbColor::new(0xff, 0, 0);

        controller.set_custom_mode();
        assert_eq!(controller.zone_leds(2).unwrap(), 3..7);
        controller.set_zone_color(2, red).unwrap();

        let expected = [[RgbColor::BLACK; 3].as_slice(), [red; 4].as_slice()].concat();
        assert_eq!(controller.colors(), expected);

        let blue = RgbColor::new(0, 0, 0xff);
        controller.set_all_colors(blue).unwrap();
        assert!(controller.colors().iter().all(|&color| color == blue));
    }

    #[test]
    fn custom_mode_is_static() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [1, 0, 0, 0, 0]);
        let mut controller = Controller::new(&mut adapter);

        controller.set_custom_mode();
        assert_eq!(controller.active_mode(), STATIC_MODE_INDEX);
        assert_eq!(controller.modes()[controller.active_mode()].color_mode, ColorMode::PerLed);
        assert!(adapter.calls.is_empty());
    }

    #[test]
    fn mode_push_repushes_colors() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [2, 0, 1, 0, 0]);
        let mut controller = Controller::new(&mut adapter);

        controller.set_custom_mode();
        controller.update_mode().unwrap();
        controller.update_mode().unwrap();

        let pass = [
            Call::Mode(0x11, 0),
            Call::Color(0, 0, 0, 0),
            Call::Color(1, 0, 0, 0),
            Call::Color(2, 0, 0, 0),
        ];
        assert_eq!(adapter.calls, [pass, pass].concat());
    }

    #[test_log::test]
    fn select_mode_sends_default_speed() {
        let mut adapter = MockAdapter::new(Variant::AsrLed, [0; 5]);
        let mut controller = Controller::new(&mut adapter);

        let breathing = controller.modes().position("Breathing").unwrap();
        controller.select_mode(breathing).unwrap();
        assert_eq!(controller.speed(), 0x03);

        assert!(matches!(
            controller.select_mode(8),
            Err(Error::IndexOutOfRange { target: Target::Mode, index: 8, len: 8 })
        ));
        assert_eq!(controller.active_mode(), breathing);

        assert_eq!(adapter.calls, [Call::Mode(0x12, 0x03), Call::Color(0, 0, 0, 0)]);
    }

    #[test_log::test]
    fn speed_validation() {
        let mut adapter = MockAdapter::new(Variant::AsrLed, [0; 5]);
        let mut controller = Controller::new(&mut adapter);

        controller.set_custom_mode();
        assert!(matches!(controller.set_speed(0x01), Err(Error::Unsupported(_))));

        let wave = controller.modes().position("Wave").unwrap();
        controller.select_mode(wave).unwrap();
        assert_eq!(
            controller.set_speed(0x06),
            Err(Error::SpeedOutOfRange { speed: 0x06, min: 0x05, max: 0x00 })
        );
        controller.set_speed(0x01).unwrap();
        controller.update_mode().unwrap();

        assert_eq!(adapter.calls.last(), Some(&Call::Color(0, 0, 0, 0)));
        assert!(adapter.calls.contains(&Call::Mode(0x18, 0x01)));
    }

    #[test]
    fn resize_is_unsupported() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [2, 0, 1, 4, 0]);
        let mut controller = Controller::new(&mut adapter);

        for (zone, size) in [(0, 5), (1, 1), (7, 0)] {
            assert!(matches!(controller.resize_zone(zone, size), Err(Error::Unsupported(_))));
        }

        assert_eq!(controller.zones()[0].leds_count, 2);
        assert_eq!(controller.leds().len(), 7);
        assert!(adapter.calls.is_empty());
    }

    #[test]
    fn adapter_failure_keeps_state() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [4, 0, 0, 0, 0]);
        adapter.fail_after = Some(2);
        let mut controller = Controller::new(&mut adapter);

        let green = RgbColor::new(0, 0xff, 0);
        controller.set_custom_mode();
        controller.set_all_colors(green).unwrap();

        let err = controller.update_mode().unwrap_err();
        assert_eq!(err, Error::Adapter(AdapterError("bus timeout".into())));
        assert_eq!(controller.colors(), [green; 4]);
        assert_eq!(controller.active_mode(), STATIC_MODE_INDEX);

        assert_eq!(adapter.calls, [Call::Mode(0x11, 0), Call::Color(0, 0, 0xff, 0)]);
    }

    #[test]
    fn speed_is_kept_per_mode() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [1, 0, 0, 0, 0]);
        let mut controller = Controller::new(&mut adapter);

        let wave = controller.modes().position("Wave").unwrap();
        let scan = controller.modes().position("Scan").unwrap();
        controller.select_mode(wave).unwrap();
        controller.set_speed(0x10).unwrap();

        controller.set_custom_mode();
        assert_eq!(controller.speed(), 0);
        controller.set_active_mode(scan).unwrap();
        assert_eq!(controller.speed(), 0xe0);

        controller.set_active_mode(wave).unwrap();
        assert_eq!(controller.speed(), 0x10);
        controller.update_mode().unwrap();

        let modes: Vec<_> = adapter
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Mode(..)))
            .copied()
            .collect();
        assert_eq!(modes, [Call::Mode(0x17, 0xe0), Call::Mode(0x17, 0x10)]);
    }

    #[test]
    fn failed_mode_selection_keeps_previous_mode() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [2, 0, 0, 0, 0]);
        adapter.fail_after = Some(0);
        let mut controller = Controller::new(&mut adapter);

        let err = controller.select_mode(4).unwrap_err();
        assert_eq!(err, Error::Adapter(AdapterError("bus timeout".into())));
        assert_eq!(controller.active_mode(), 0);
        assert_eq!(controller.speed(), 0);
        assert_eq!(controller.colors(), [RgbColor::BLACK; 2]);
        assert!(adapter.calls.is_empty());
    }

    #[test]
    fn colors_need_per_led_mode() {
        let mut adapter = MockAdapter::new(Variant::PolychromeV2, [2, 1, 0, 0, 0]);
        let mut controller = Controller::new(&mut adapter);
        let white = RgbColor::new(0xff, 0xff, 0xff);

        let neon = controller.modes().position("Neon").unwrap();
        for mode in [0, neon] {
            controller.set_active_mode(mode).unwrap();
            assert!(matches!(controller.set_led_color(0, white), Err(Error::Unsupported(_))));
            assert!(matches!(controller.set_zone_color(1, white), Err(Error::Unsupported(_))));
            assert!(matches!(controller.set_all_colors(white), Err(Error::Unsupported(_))));
        }
        assert_eq!(controller.colors(), [RgbColor::BLACK; 3]);

        controller.set_custom_mode();
        controller.set_led_color(0, white).unwrap();
        controller.set_zone_color(1, white).unwrap();
        assert_eq!(controller.colors(), [white, RgbColor::BLACK, white]);

        let breathing = controller.modes().position("Breathing").unwrap();
        controller.set_active_mode(breathing).unwrap();
        controller.set_all_colors(white).unwrap();
        assert!(adapter.calls.is_empty());
    }
}

//! Adapter logging hardware writes instead of performing them.

use log::info;
use polychrome::{Adapter, AdapterResult, Variant, ZoneSlot};

pub struct DryRunAdapter {
    variant: Variant,
    counts: Vec<u8>,
}

impl DryRunAdapter {
    /// Create an adapter reporting `counts` for the header slots, in slot order.
    ///
    /// Missing slots report zero LEDs.
    pub fn new(variant: Variant, counts: Vec<u8>) -> Self {
        Self { variant, counts }
    }
}

impl Adapter for DryRunAdapter {
    fn variant(&self) -> Variant {
        self.variant
    }

    fn zone_led_count(&self, slot: ZoneSlot) -> u8 {
        ZoneSlot::HEADERS
            .iter()
            .position(|&header| header == slot)
            .and_then(|index| self.counts.get(index).copied())
            .unwrap_or(0)
    }

    fn device_name(&self) -> String {
        format!("ASRock {} (dry run)", self.variant)
    }

    fn firmware_version(&self) -> String {
        String::from("0.00")
    }

    fn set_mode(&mut self, mode: u8, speed: u8) -> AdapterResult {
        info!("SetMode mode=0x{mode:02x} speed=0x{speed:02x}");
        Ok(())
    }

    fn set_colors_and_speed(&mut self, led: usize, r: u8, g: u8, b: u8) -> AdapterResult {
        info!("SetColorsAndSpeed led={led} r=0x{r:02x} g=0x{g:02x} b=0x{b:02x}");
        Ok(())
    }
}

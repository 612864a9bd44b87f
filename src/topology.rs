//! Zone and LED layout.

use std::ops::Range;

use crate::adapter::{Adapter, ZoneSlot};

/// Name of the only zone and LED on hardware without a zone register.
pub const MOTHERBOARD: &str = "Motherboard";

/// Shape of a zone.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum ZoneKind {
    Single,
    Linear,
    Matrix,
}

/// Named, contiguous group of LEDs.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Zone {
    pub name: &'static str,
    pub kind: ZoneKind,
    pub leds_min: usize,
    pub leds_max: usize,
    pub leds_count: usize,
    /// Global index of the first LED.
    pub start: usize,
}

impl Zone {
    /// Fixed-size zone starting at `start`.
    fn fixed(name: &'static str, start: usize, leds_count: usize) -> Self {
        let kind = if leds_count > 1 { ZoneKind::Linear } else { ZoneKind::Single };
        Self { name, kind, leds_min: leds_count, leds_max: leds_count, leds_count, start }
    }

    /// Global LED indices covered by this zone.
    pub fn leds(&self) -> Range<usize> {
        self.start..self.start + self.leds_count
    }
}

/// Single addressable output.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Led {
    pub name: String,
    /// Index of the owning zone.
    pub zone: usize,
}

/// Zones and the flat LED list, index-aligned with the color array.
#[derive(Default, Debug, Clone)]
pub struct Topology {
    zones: Vec<Zone>,
    leds: Vec<Led>,
}

impl Topology {
    /// Read the layout from the adapter.
    pub fn probe<A: Adapter + ?Sized>(adapter: &A) -> Self {
        if !adapter.variant().has_zone_register() {
            return Self::single(MOTHERBOARD);
        }

        let counts = ZoneSlot::HEADERS.iter().map(|&slot| (slot, adapter.zone_led_count(slot)));
        Self::from_counts(counts)
    }

    /// One zone with one LED, both named after the device.
    pub fn single(name: &'static str) -> Self {
        let zone = Zone::fixed(name, 0, 1);
        let led = Led { name: name.into(), zone: 0 };
        Self { zones: vec![zone], leds: vec![led] }
    }

    /// Build zones from per-slot LED counts, skipping empty slots.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (ZoneSlot, u8)>,
    {
        let mut topology = Self::default();

        for (slot, count) in counts {
            if count == 0 {
                continue;
            }

            let zone_index = topology.zones.len();
            let zone = Zone::fixed(slot.name(), topology.leds.len(), count.into());

            let leds = (1..=zone.leds_count).map(|position| Led {
                name: format!("{} {position}", zone.name),
                zone: zone_index,
            });
            topology.leds.extend(leds);
            topology.zones.push(zone);
        }

        topology
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn leds(&self) -> &[Led] {
        &self.leds
    }
}

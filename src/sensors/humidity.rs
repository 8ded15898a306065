//! Analog hygrometer (HIH-4030 class, ratiometric voltage output).
//!
//! Read via the ESP32 ADC. The datasheet's linear transfer function
//! converts the supply-relative voltage to %RH:
//!
//! ```text
//! RH = (Vout / Vsupply - 0.16) / 0.0062
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

static SIM_HUMIDITY_ADC: AtomicU16 = AtomicU16::new(2048);

/// Inject the raw ADC value returned by the next host-side read.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_humidity_adc(raw: u16) {
    SIM_HUMIDITY_ADC.store(raw, Ordering::Relaxed);
}

const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
const ZERO_OFFSET: f32 = 0.16;
const SLOPE: f32 = 0.0062;
/// Readings this close to a rail mean an open or shorted probe.
const RAIL_MARGIN_V: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidityReading {
    pub raw: u16,
    pub percent: f32,
}

pub struct HumiditySensor {
    _adc_gpio: i32,
}

impl HumiditySensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&self) -> Result<HumidityReading, SensorError> {
        let raw = self.read_adc()?;
        let percent = adc_to_percent(raw)?;
        Ok(HumidityReading { raw, percent })
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_HUMIDITY).ok_or(SensorError::AdcReadFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_HUMIDITY_ADC.load(Ordering::Relaxed))
    }
}

fn adc_to_percent(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= V_REF - RAIL_MARGIN_V {
        return Err(SensorError::OutOfRange);
    }
    let rh = (voltage / V_REF - ZERO_OFFSET) / SLOPE;
    Ok(rh.clamp(0.0, 100.0))
}

//! Control policy: maps a sensor snapshot and the active mode to directives.
//!
//! [`evaluate`] is a pure function: the same `(snapshot, mode)` pair always
//! yields the same list, and nothing outside its arguments is read or written.
//!
//! In [`Mode::Auto`] each device is driven by an if / else-if pair of
//! thresholds. Readings that fall between the two thresholds (the dead-band)
//! produce no directive, so the actuator keeps its last known state. Scene
//! modes ignore the thresholds and issue a fixed set of directives.
//!
//! Rules run in a fixed order. Nothing resolves conflicts between directives
//! for the same device; whoever applies the list lets the last one win.

use crate::device::{AIR_CONDITIONER, CURTAIN, FAN, MAIN_LIGHT};
use crate::directive::{AcCommand, Command, CurtainCommand, Directive, Power};
use crate::mode::Mode;
use crate::sensor::{Occupancy, SensorSnapshot};

/// Below this illuminance (lux) an occupied room needs the light on.
pub const LIGHT_ON_BELOW: f64 = 300.0;
/// Above this illuminance (lux) the light is switched off.
pub const LIGHT_OFF_ABOVE: f64 = 500.0;
/// Above this CO2 level (ppm) the fan starts.
pub const FAN_ON_ABOVE: f64 = 1000.0;
/// Below this CO2 level (ppm) the fan stops.
pub const FAN_OFF_BELOW: f64 = 800.0;
/// Above this temperature (°C) the AC starts.
pub const AC_ON_ABOVE: f64 = 26.0;
/// Below this temperature (°C) the AC stops.
pub const AC_OFF_BELOW: f64 = 22.0;
/// Target the AC cools to in automatic mode.
pub const AUTO_TARGET_TEMPERATURE: f64 = 25.0;
/// Target the AC holds during a lecture.
pub const LECTURE_TARGET_TEMPERATURE: f64 = 24.0;
/// Above this illuminance (lux) the curtain closes.
pub const CURTAIN_CLOSE_ABOVE: f64 = 800.0;
/// Below this illuminance (lux) the curtain opens.
pub const CURTAIN_OPEN_BELOW: f64 = 200.0;

/// Compute the directives for `snapshot` under `mode`.
#[must_use]
pub fn evaluate(snapshot: &SensorSnapshot, mode: Mode) -> Vec<Directive> {
    match mode {
        Mode::Auto => auto(snapshot),
        Mode::Lecture => vec![
            Directive::new(MAIN_LIGHT, Command::Light(Power::On), "lecture scene"),
            Directive::new(
                AIR_CONDITIONER,
                Command::Ac(AcCommand::On {
                    target_temperature: Some(LECTURE_TARGET_TEMPERATURE),
                }),
                "lecture scene",
            ),
        ],
        Mode::Exam => vec![
            Directive::new(MAIN_LIGHT, Command::Light(Power::On), "exam scene"),
            Directive::new(FAN, Command::Fan(Power::Off), "exam scene: keep the room quiet"),
        ],
        Mode::Energy => {
            if snapshot.occupancy() == Occupancy::Absent {
                let reason = "energy saving: room is empty";
                vec![
                    Directive::new(MAIN_LIGHT, Command::Light(Power::Off), reason),
                    Directive::new(AIR_CONDITIONER, Command::Ac(AcCommand::Off), reason),
                    Directive::new(FAN, Command::Fan(Power::Off), reason),
                ]
            } else {
                Vec::new()
            }
        }
    }
}

fn auto(snapshot: &SensorSnapshot) -> Vec<Directive> {
    let light = snapshot.light();
    let occupancy = snapshot.occupancy();
    let co2 = snapshot.co2();
    let temperature = snapshot.temperature();

    let mut directives = Vec::with_capacity(4);

    if light < LIGHT_ON_BELOW && occupancy == Occupancy::Present {
        directives.push(Directive::new(
            MAIN_LIGHT,
            Command::Light(Power::On),
            "room is occupied and too dark",
        ));
    } else if light > LIGHT_OFF_ABOVE || occupancy == Occupancy::Absent {
        directives.push(Directive::new(
            MAIN_LIGHT,
            Command::Light(Power::Off),
            "enough daylight or room is empty",
        ));
    }

    if co2 > FAN_ON_ABOVE {
        directives.push(Directive::new(
            FAN,
            Command::Fan(Power::On),
            "CO2 concentration too high",
        ));
    } else if co2 < FAN_OFF_BELOW {
        directives.push(Directive::new(
            FAN,
            Command::Fan(Power::Off),
            "CO2 concentration normal",
        ));
    }

    if temperature > AC_ON_ABOVE {
        directives.push(Directive::new(
            AIR_CONDITIONER,
            Command::Ac(AcCommand::On {
                target_temperature: Some(AUTO_TARGET_TEMPERATURE),
            }),
            "temperature too high",
        ));
    } else if temperature < AC_OFF_BELOW {
        directives.push(Directive::new(
            AIR_CONDITIONER,
            Command::Ac(AcCommand::Off),
            "temperature comfortable",
        ));
    }

    if light > CURTAIN_CLOSE_ABOVE {
        directives.push(Directive::new(
            CURTAIN,
            Command::Curtain(CurtainCommand::Close),
            "sunlight too strong",
        ));
    } else if light < CURTAIN_OPEN_BELOW {
        directives.push(Directive::new(
            CURTAIN,
            Command::Curtain(CurtainCommand::Open),
            "more daylight needed",
        ));
    }

    directives
}

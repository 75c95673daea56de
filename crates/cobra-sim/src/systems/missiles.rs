//! Missile targeting: arm, launch and stand down.
//!
//! Launching only spends a missile from the rack; there is no missile body
//! in flight.

use cobra_core::commands::ControlState;
use cobra_core::events::{AudioEvent, Feedback};

use crate::pilot::Pilot;

/// Arm a missile if one is loaded and none is armed.
pub fn arm(pilot: &mut Pilot, feedback: &mut Feedback) -> bool {
    if pilot.missiles == 0 || pilot.missile_armed {
        return false;
    }
    pilot.missile_armed = true;
    feedback.cue(AudioEvent::MissileArmed);
    true
}

/// Launch the armed missile.
pub fn launch(pilot: &mut Pilot, feedback: &mut Feedback) -> bool {
    if !pilot.missile_armed {
        return false;
    }
    pilot.missiles = pilot.missiles.saturating_sub(1);
    pilot.missile_armed = false;
    feedback.cue(AudioEvent::MissileLaunched);
    log::debug!("missile launched; {} left", pilot.missiles);
    true
}

/// Stand the armed missile down.
pub fn unarm(pilot: &mut Pilot) -> bool {
    std::mem::replace(&mut pilot.missile_armed, false)
}

/// Poll the held missile keys in target, fire, unarm order.
pub fn run(pilot: &mut Pilot, controls: &ControlState, feedback: &mut Feedback) {
    if controls.target_missile {
        arm(pilot, feedback);
    }
    if controls.fire_missile {
        launch(pilot, feedback);
    }
    if controls.unarm_missile {
        unarm(pilot);
    }
}

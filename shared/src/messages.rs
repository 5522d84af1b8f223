//! Player-facing message texts.

use crate::{RemainingTime, vitality::hearts};

pub fn death_notice(duration: RemainingTime) -> String {
    format!("You have died! You will be in spectator mode for {duration}.")
}

pub fn back_from_the_dead(name: &str) -> String {
    format!("{name} is now back from the dead!")
}

pub fn vitality_increased(amount: u32) -> String {
    let hearts = hearts(amount);
    let plural = if hearts == 1.0 { "" } else { "s" };
    format!("Your max health has increased by {hearts} heart{plural}!")
}

pub fn remaining_notice(name: &str, remaining: RemainingTime) -> String {
    format!("{name} has {remaining} left in spectator mode.")
}

pub fn not_restricted_notice() -> String {
    "You are not in spectator mode.".to_string()
}

//! Stock showroom example
//!
//! Runs the showroom with the compiled-in five-car fleet.
//!
//! Controls:
//!   1-5 - Select a car (in load order)
//!   Up/Down - Nudge the selected car along its lane
//!   Left Mouse + Move - Orbit the camera
//!   Scroll - Zoom

use bevy::prelude::*;
use motorcade_core::ShowroomConfig;
use motorcade_scene::create_app;

fn main() {
    println!("Starting motorcade showroom...");
    println!();
    println!("Controls:");
    println!("  1-5 - Select a car (in load order)");
    println!("  Up/Down - Nudge the selected car");
    println!("  Left Mouse + Move - Orbit");
    println!("  Scroll - Zoom");
    println!();

    let window = Window {
        title: "motorcade showroom".to_string(),
        ..default()
    };

    create_app(ShowroomConfig::default(), window).run();
}

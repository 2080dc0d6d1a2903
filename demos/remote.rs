//! The smart-light remote from the crate documentation.

use rewind::light::{Light, LightCommand};
use rewind::{History, Macro};

fn status(light: &Light) {
    if light.is_on() {
        println!("the light is on at brightness {}", light.brightness());
    } else {
        println!("the light is off");
    }
}

fn main() {
    let mut light = Light::new();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    status(&light);

    let dim = LightCommand::set_brightness(&light, 40);
    history.perform(&mut light, dim).unwrap();
    status(&light);

    history.undo(&mut light).unwrap();
    status(&light);
    history.redo(&mut light).unwrap();
    status(&light);

    let night = Macro::new("good night")
        .with(LightCommand::set_brightness(&light, 10))
        .with(LightCommand::TurnOff);
    history.perform(&mut light, night).unwrap();
    status(&light);

    println!("{}", history.display());

    // Undoing the macro reverses both steps at once.
    history.undo(&mut light).unwrap();
    status(&light);
}

//! Connecting a slot that logs every transition.

use rewind::light::{Light, LightCommand};
use rewind::{History, Signal};

fn main() {
    let mut light = Light::new();
    let mut history = History::builder()
        .connect(|signal: Signal| println!("-- {signal:?}"))
        .build();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    let dim = LightCommand::set_brightness(&light, 25);
    history.perform(&mut light, dim).unwrap();
    history.undo(&mut light).unwrap();
    history.redo(&mut light).unwrap();
    history.clear();
}

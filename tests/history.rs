use rewind::light::{Light, LightCommand, LightError};
use rewind::{Entry, History, HistoryError, Macro, Signal, State};
use std::sync::mpsc;

#[test]
fn perform_undo_redo() {
    let mut light = Light::new();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    assert!(light.is_on());
    history.undo(&mut light).unwrap();
    assert!(!light.is_on());
    history.redo(&mut light).unwrap();
    assert!(light.is_on());
}

#[test]
fn undo_until_empty() {
    let mut light = Light::new();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    history.perform(&mut light, LightCommand::TurnOff).unwrap();

    history.undo(&mut light).unwrap();
    assert!(light.is_on());
    history.undo(&mut light).unwrap();
    assert!(!light.is_on());
    assert_eq!(history.undo(&mut light), Err(HistoryError::Empty));
    assert!(!light.is_on());
}

#[test]
fn perform_truncates_redo() {
    let mut light = Light::new();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    history.undo(&mut light).unwrap();
    assert!(history.can_redo());

    let dim = LightCommand::SetBrightness { to: 50, previous: 0 };
    history.perform(&mut light, dim).unwrap();
    assert!(!history.can_redo());
    assert_eq!(history.redo(&mut light), Err(HistoryError::Empty));
}

#[test]
fn round_trip_restores_the_light() {
    let mut light = Light::new();
    let initial = light.clone();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    let dim = LightCommand::set_brightness(&light, 30);
    history.perform(&mut light, dim).unwrap();
    let dim = LightCommand::set_brightness(&light, 60);
    history.perform(&mut light, dim).unwrap();
    assert_eq!(light.brightness(), 60);

    history.undo(&mut light).unwrap();
    assert_eq!(light.brightness(), 30);
    history.undo(&mut light).unwrap();
    assert_eq!(light.brightness(), Light::MAX_BRIGHTNESS);
    history.undo(&mut light).unwrap();
    assert_eq!(light, initial);

    history.redo(&mut light).unwrap();
    history.redo(&mut light).unwrap();
    history.redo(&mut light).unwrap();
    assert!(light.is_on());
    assert_eq!(light.brightness(), 60);
}

#[test]
fn redo_right_after_undo_is_identity() {
    let mut light = Light::new();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    let dim = LightCommand::set_brightness(&light, 40);
    history.perform(&mut light, dim).unwrap();
    let snapshot = light.clone();

    history.undo(&mut light).unwrap();
    history.redo(&mut light).unwrap();
    assert_eq!(light, snapshot);
}

#[test]
fn failed_macro_child_rolls_everything_back() {
    let mut light = Light::new();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    let dim = LightCommand::set_brightness(&light, 70);
    history.perform(&mut light, dim).unwrap();
    let snapshot = light.clone();

    let batch = Macro::new("overdrive")
        .with(LightCommand::set_brightness(&light, 90))
        .with(LightCommand::SetBrightness { to: 255, previous: 90 });
    assert_eq!(
        history.perform(&mut light, batch),
        Err(HistoryError::MacroFailed(LightError::OutOfRange(255)))
    );

    // The receiver and the history look exactly as before the perform call.
    assert_eq!(light, snapshot);
    assert_eq!(history.len(), 2);
    assert_eq!(history.undo_text(), Some("set brightness to 70".into()));
}

#[test]
fn macro_undoes_children_in_reverse() {
    let mut light = Light::new();
    let mut history: History<LightCommand> = History::new();

    let movie = Macro::new("movie mode")
        .with(LightCommand::TurnOn)
        .with(LightCommand::SetBrightness { to: 40, previous: 0 });
    history.perform(&mut light, movie).unwrap();
    assert!(light.is_on());
    assert_eq!(light.brightness(), 40);
    assert_eq!(history.undo_text(), Some("movie mode".into()));

    history.undo(&mut light).unwrap();
    assert!(!light.is_on());
    assert_eq!(light.brightness(), 0);

    history.redo(&mut light).unwrap();
    assert!(light.is_on());
    assert_eq!(light.brightness(), 40);
}

#[test]
fn limit_evicts_the_oldest_entry() {
    let mut light = Light::new();
    let mut history: History<LightCommand> = History::builder().limit(2).build();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    let dim = LightCommand::set_brightness(&light, 30);
    history.perform(&mut light, dim).unwrap();
    let dim = LightCommand::set_brightness(&light, 60);
    history.perform(&mut light, dim).unwrap();
    assert_eq!(history.len(), 2);

    history.undo(&mut light).unwrap();
    assert_eq!(light.brightness(), 30);
    history.undo(&mut light).unwrap();
    assert_eq!(light.brightness(), Light::MAX_BRIGHTNESS);
    // The turn-on entry was evicted, so the light stays on.
    assert_eq!(history.undo(&mut light), Err(HistoryError::Empty));
    assert!(light.is_on());
}

#[test]
fn signals_describe_every_transition() {
    let (sender, receiver) = mpsc::channel();
    let mut light = Light::new();
    let mut history = History::builder()
        .connect(move |signal| sender.send(signal).unwrap())
        .build();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    history.undo(&mut light).unwrap();
    history.redo(&mut light).unwrap();
    history.clear();
    // Clearing an empty history is not a transition.
    history.clear();

    let signals: Vec<Signal> = receiver.try_iter().collect();
    assert_eq!(
        signals,
        [
            Signal::Performed("turn the light on".into()),
            Signal::Undone("turn the light on".into()),
            Signal::Redone("turn the light on".into()),
            Signal::Cleared,
        ]
    );
}

#[test]
fn clear_discards_without_undoing() {
    let mut light = Light::new();
    let mut history = History::new();

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    history.clear();
    assert!(light.is_on());
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert_eq!(history.undo(&mut light), Err(HistoryError::Empty));
}

#[test]
fn entry_state_machine() {
    let mut light = Light::new();
    let mut entry = Entry::from(LightCommand::TurnOn);
    assert_eq!(entry.state(), State::Pending);
    assert_eq!(entry.undo(&mut light), Err(HistoryError::NotApplied));
    assert_eq!(entry.redo(&mut light), Err(HistoryError::NotApplied));

    entry.apply(&mut light).unwrap();
    assert_eq!(entry.state(), State::Applied);
    assert_eq!(entry.apply(&mut light), Err(HistoryError::AlreadyApplied));
    assert_eq!(entry.redo(&mut light), Err(HistoryError::AlreadyApplied));

    entry.undo(&mut light).unwrap();
    assert_eq!(entry.state(), State::Undone);
    assert_eq!(entry.undo(&mut light), Err(HistoryError::NotApplied));

    entry.redo(&mut light).unwrap();
    assert!(light.is_on());
}

#[test]
fn perform_rejects_an_entry_that_was_already_applied() {
    let mut light = Light::new();
    let mut history: History<LightCommand> = History::new();

    let mut entry = Entry::from(LightCommand::TurnOn);
    entry.apply(&mut light).unwrap();
    assert_eq!(
        history.perform(&mut light, entry),
        Err(HistoryError::AlreadyApplied)
    );
    assert!(history.is_empty());
    // Only the manual apply touched the light.
    assert!(light.is_on());
}

#[test]
fn failed_command_leaves_history_unchanged() {
    let mut light = Light::new();
    let mut history = History::new();

    let blinding = LightCommand::SetBrightness { to: 200, previous: 0 };
    assert_eq!(
        history.perform(&mut light, blinding),
        Err(HistoryError::Command(LightError::OutOfRange(200)))
    );
    assert!(history.is_empty());
    assert!(!history.can_undo());
}

#[test]
fn undo_and_redo_texts() {
    let mut light = Light::new();
    let mut history = History::new();
    assert_eq!(history.undo_text(), None);
    assert_eq!(history.redo_text(), None);

    history.perform(&mut light, LightCommand::TurnOn).unwrap();
    history.perform(&mut light, LightCommand::TurnOff).unwrap();
    assert_eq!(history.undo_text(), Some("turn the light off".into()));
    assert_eq!(history.redo_text(), None);

    history.undo(&mut light).unwrap();
    assert_eq!(history.undo_text(), Some("turn the light on".into()));
    assert_eq!(history.redo_text(), Some("turn the light off".into()));
}

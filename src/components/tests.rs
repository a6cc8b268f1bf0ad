use super::controllers::*;
use super::instructions::*;
use super::*;
use crate::host::{Host, HostError, MemoryHost, Tool, Toggle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn host() -> (Arc<MemoryHost>, Arc<dyn Host>) {
    let memory = Arc::new(MemoryHost::new());
    let host: Arc<dyn Host> = memory.clone();
    (memory, host)
}

#[test]
fn test_percent_controller_maps_fraction() {
    let (_, host) = host();
    let opacity = PercentController::opacity(&host);
    opacity.set_value(35).unwrap();
    assert_eq!(opacity.get_value().unwrap(), 35);

    opacity.set_value(150).unwrap();
    assert_eq!(opacity.get_value().unwrap(), 100);
    assert_eq!(opacity.pretty_name(&40), "40%");
}

#[test]
fn test_brush_rotation_wraps() {
    let (_, host) = host();
    let rotation = BrushRotationController::new(&host);
    rotation.set_value(370).unwrap();
    assert_eq!(rotation.get_value().unwrap(), 10);
    rotation.set_value(-90).unwrap();
    assert_eq!(rotation.get_value().unwrap(), 270);
}

#[test]
fn test_layer_controller_names_after_refresh() {
    let memory = Arc::new(MemoryHost::new().with_layers(&[("Sketch", true), ("Ink", true)]));
    let host: Arc<dyn Host> = memory.clone();
    let layers = LayerController::new(&host);
    let current = layers.get_value().unwrap();

    assert_eq!(layers.pretty_name(&current), format!("Layer {}", current.0));
    layers.refresh().unwrap();
    assert_eq!(layers.pretty_name(&current), "Ink");
}

#[test]
fn test_set_brush_on_non_paintable() {
    let (_, host) = host();
    host.set_tool(Tool::Move).unwrap();
    SetBrushOnNonPaintable::new(&host).enter().unwrap();
    assert_eq!(host.tool().unwrap(), Tool::FreehandBrush);

    host.set_tool(Tool::Line).unwrap();
    SetBrushOnNonPaintable::new(&host).enter().unwrap();
    assert_eq!(host.tool().unwrap(), Tool::Line);
}

#[test]
fn test_temporary_on_restores_previous_state() {
    let (_, host) = host();
    let instruction = TemporaryOn::new(&host, Toggle::IsolateLayer);

    instruction.enter().unwrap();
    assert!(host.toggle(Toggle::IsolateLayer).unwrap());
    instruction.exit().unwrap();
    assert!(!host.toggle(Toggle::IsolateLayer).unwrap());

    host.set_toggle(Toggle::IsolateLayer, true).unwrap();
    instruction.enter().unwrap();
    instruction.exit().unwrap();
    assert!(host.toggle(Toggle::IsolateLayer).unwrap());
}

#[test]
fn test_toggle_layer_visibility_restores_on_exit() {
    let (_, host) = host();
    let instruction = ToggleLayerVisibility::new(&host);
    let layer = host.current_layer().unwrap();

    instruction.enter().unwrap();
    assert!(!host.layers().unwrap()[0].visible);
    instruction.exit().unwrap();
    assert!(host.layers().unwrap()[0].visible);
    assert_eq!(host.current_layer().unwrap(), layer);
}

struct Failing {
    exits: Arc<AtomicUsize>,
}

impl Instruction for Failing {
    fn enter(&self) -> Result<(), HostError> {
        Err(HostError::NoDocument)
    }

    fn exit(&self) -> Result<(), HostError> {
        self.exits.fetch_add(1, Ordering::SeqCst);
        Err(HostError::NoActiveLayer)
    }
}

#[test]
fn test_holder_exit_runs_every_instruction() {
    let exits = Arc::new(AtomicUsize::new(0));
    let holder = InstructionHolder::new(vec![
        Box::new(Failing {
            exits: Arc::clone(&exits),
        }),
        Box::new(Failing {
            exits: Arc::clone(&exits),
        }),
    ]);

    assert_eq!(holder.enter().unwrap_err(), HostError::NoDocument);
    assert_eq!(holder.exit().unwrap_err(), HostError::NoActiveLayer);
    assert_eq!(exits.load(Ordering::SeqCst), 2);
}

#[test]
fn test_tag_source_follows_host() {
    let memory = Arc::new(MemoryHost::new().with_tag("Digital", &["a", "b"]));
    let host: Arc<dyn Host> = memory.clone();
    let tag = Tag::new(&host, "Digital");
    assert_eq!(tag.values().unwrap(), vec!["a".to_string(), "b".to_string()]);

    memory.set_tag("Digital", &["c"]);
    assert_eq!(tag.values().unwrap(), vec!["c".to_string()]);
    assert!(Tag::new(&host, "Missing").values().unwrap().is_empty());
}

#[test]
fn test_layer_stack_strategies() {
    let memory = Arc::new(MemoryHost::new().with_layers(&[
        ("bottom", true),
        ("hidden", false),
        ("top", true),
    ]));
    let host: Arc<dyn Host> = memory.clone();
    let all = CurrentLayerStack::new(&host, PickStrategy::All).values().unwrap();
    assert_eq!(all.len(), 3);

    let visible = CurrentLayerStack::new(&host, PickStrategy::Visible)
        .values()
        .unwrap();
    assert_eq!(visible, vec![all[0], all[2]]);

    host.set_current_layer(all[1]).unwrap();
    let same = CurrentLayerStack::new(&host, PickStrategy::CurrentVisibility)
        .values()
        .unwrap();
    assert_eq!(same, vec![all[1]]);
}

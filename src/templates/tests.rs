use super::*;
use crate::PluginContext;
use crate::components::controllers::{
    BrushRotationController, PercentController, PresetController, TimeController, ToolController,
};
use crate::components::{Controller, Instruction, InstructionHolder, Tag};
use crate::config::{ConfigStore, Location};
use crate::config::RotationDeadzoneStrategy;
use crate::host::{BrushProperty, Host, HostError, MemoryHost, Tool};
use crate::input::{ActionError, PluginAction};
use crate::pie::{NonPresetPieConfig, PieDefaults};
use crate::rotation::RotationDefaults;
use crate::slider::{Range, Slider};
use crate::util::Point;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

const SETTLE: Duration = Duration::from_millis(150);

fn context() -> (Arc<MemoryHost>, PluginContext) {
    let memory = Arc::new(MemoryHost::new());
    let host: Arc<dyn Host> = memory.clone();
    let ctx = PluginContext::new(host, ConfigStore::in_memory());
    ctx.config.fps_limit.write(200).unwrap();
    (memory, ctx)
}

fn opacity(ctx: &PluginContext) -> Arc<dyn Controller<i32>> {
    Arc::new(PercentController::opacity(&ctx.host))
}

#[derive(Default)]
struct Counting {
    enters: Arc<AtomicUsize>,
    exits: Arc<AtomicUsize>,
}

impl Instruction for Counting {
    fn enter(&self) -> Result<(), HostError> {
        self.enters.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exit(&self) -> Result<(), HostError> {
        self.exits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn counting() -> (Arc<AtomicUsize>, Arc<AtomicUsize>, InstructionHolder) {
    let instruction = Counting::default();
    let enters = Arc::clone(&instruction.enters);
    let exits = Arc::clone(&instruction.exits);
    (enters, exits, InstructionHolder::new(vec![Box::new(instruction)]))
}

// ============================================================================
// Pure helpers
// ============================================================================

#[test]
fn test_next_index_cycles_and_wraps() {
    let values = [70, 50, 30, 100];
    assert_eq!(next_index(&values, None, &100), 0);
    assert_eq!(next_index(&values, None, &70), 1);
    assert_eq!(next_index(&values, Some(2), &30), 3);
    assert_eq!(next_index(&values, None, &42), 0);
    assert_eq!(next_index::<i32>(&[], None, &1), 0);
}

#[test]
fn test_next_index_handles_repeated_values() {
    let values = [10, 20, 10, 30];
    assert_eq!(next_index(&values, None, &10), 1);
    assert_eq!(next_index(&values, Some(1), &20), 2);
    assert_eq!(next_index(&values, Some(2), &10), 3);
}

#[test]
fn test_pick_axis_waits_for_decisive_movement() {
    assert_eq!(pick_axis(Point::new(5, 3)), None);
    assert_eq!(pick_axis(Point::new(12, 0)), Some(Axis::Horizontal));
    assert_eq!(pick_axis(Point::new(-2, 15)), Some(Axis::Vertical));
    assert_eq!(pick_axis(Point::new(20, 25)), None);
}

// ============================================================================
// Temporary key
// ============================================================================

#[test]
fn test_temporary_key_restores_previous_value() {
    let (memory, ctx) = context();
    let key = TemporaryKey::new("Move", Arc::new(ToolController::new(&ctx.host)), Tool::Move);

    key.on_key_press().unwrap();
    assert_eq!(memory.tool().unwrap(), Tool::Move);
    key.on_every_key_release().unwrap();
    assert_eq!(memory.tool().unwrap(), Tool::FreehandBrush);
    assert_eq!(memory.write_count(), 2);
}

#[test]
fn test_temporary_key_low_value_wins() {
    let (memory, ctx) = context();
    let key = TemporaryKey::new("Move", Arc::new(ToolController::new(&ctx.host)), Tool::Move)
        .with_low_value(Tool::Line);

    key.on_key_press().unwrap();
    key.on_every_key_release().unwrap();
    assert_eq!(memory.tool().unwrap(), Tool::Line);
}

#[test]
fn test_temporary_key_defers_early_release() {
    let (memory, ctx) = context();
    let key = TemporaryKey::new("Transform", Arc::new(ToolController::new(&ctx.host)), Tool::Transform)
        .with_time_interval(Duration::from_millis(100));

    key.on_key_press().unwrap();
    key.on_every_key_release().unwrap();
    assert_eq!(memory.tool().unwrap(), Tool::Transform);
    assert!(key.has_pending_restore());

    thread::sleep(Duration::from_millis(250));
    assert_eq!(memory.tool().unwrap(), Tool::FreehandBrush);
    assert!(!key.has_pending_restore());
    assert_eq!(memory.write_count(), 2);
}

#[test]
fn test_temporary_key_new_press_cancels_deferred_restore() {
    let (memory, ctx) = context();
    let key = TemporaryKey::new("Transform", Arc::new(ToolController::new(&ctx.host)), Tool::Transform)
        .with_time_interval(Duration::from_millis(150));

    key.on_key_press().unwrap();
    key.on_every_key_release().unwrap();
    key.on_key_press().unwrap();
    assert!(!key.has_pending_restore());

    thread::sleep(Duration::from_millis(250));
    assert_eq!(memory.tool().unwrap(), Tool::Transform);

    key.on_every_key_release().unwrap();
    assert_eq!(memory.tool().unwrap(), Tool::FreehandBrush);
}

#[test]
fn test_temporary_key_runs_exit_when_restore_fails() {
    let (memory, ctx) = context();
    let (enters, exits, holder) = counting();
    let key = TemporaryKey::new("Frame", Arc::new(TimeController::new(&ctx.host)), 10)
        .with_instructions(holder);

    key.on_key_press().unwrap();
    assert_eq!(memory.current_time().unwrap(), 10);
    memory.close_document();
    assert!(key.on_every_key_release().is_err());
    assert_eq!(enters.load(Ordering::SeqCst), 1);
    assert_eq!(exits.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Multiple assignment
// ============================================================================

#[test]
fn test_multiple_assignment_cycles_and_resets() {
    let (_, ctx) = context();
    let controller = opacity(&ctx);
    let action = MultipleAssignment::new(
        &ctx.store,
        "Opacity",
        Arc::clone(&controller),
        vec![70, 50, 30, 100],
    )
    .with_default_value(100);

    let mut seen = Vec::new();
    for _ in 0..5 {
        action.on_key_press().unwrap();
        action.on_short_key_release().unwrap();
        action.on_every_key_release().unwrap();
        seen.push(controller.get_value().unwrap());
    }
    assert_eq!(seen, vec![70, 50, 30, 100, 70]);

    action.on_key_press().unwrap();
    action.on_long_key_release().unwrap();
    assert_eq!(controller.get_value().unwrap(), 100);

    action.on_key_press().unwrap();
    assert_eq!(controller.get_value().unwrap(), 70);
}

#[test]
fn test_multiple_assignment_empty_source_writes_nothing() {
    let (memory, ctx) = context();
    let action = MultipleAssignment::new(&ctx.store, "Opacity", opacity(&ctx), Vec::<i32>::new());
    action.on_key_press().unwrap();
    assert_eq!(memory.write_count(), 0);
}

#[test]
fn test_multiple_assignment_follows_edited_settings() {
    let (_, ctx) = context();
    let controller = opacity(&ctx);
    let action = MultipleAssignment::new(
        &ctx.store,
        "Opacity",
        Arc::clone(&controller),
        vec![70, 50],
    )
    .with_default_value(100);
    assert_eq!(action.config().name(), "Opacity");

    action.on_key_press().unwrap();
    assert_eq!(controller.get_value().unwrap(), 70);

    ctx.store
        .write_checked(Location::Global, "Opacity", "Values", "20\t40")
        .unwrap();
    ctx.store
        .write_checked(Location::Global, "Opacity", "Default value", "90")
        .unwrap();

    action.on_key_press().unwrap();
    assert_eq!(controller.get_value().unwrap(), 20);
    action.on_key_press().unwrap();
    assert_eq!(controller.get_value().unwrap(), 40);

    action.on_long_key_release().unwrap();
    assert_eq!(controller.get_value().unwrap(), 90);
}

#[test]
fn test_multiple_assignment_source_is_not_persisted() {
    let memory = Arc::new(MemoryHost::new().with_tag("Digital", &["a", "b"]));
    let host: Arc<dyn Host> = memory.clone();
    let ctx = PluginContext::new(host, ConfigStore::in_memory());
    let action = MultipleAssignment::with_source(
        &ctx.store,
        "Presets",
        Arc::new(PresetController::new(&ctx.host)),
        Tag::new(&ctx.host, "Digital"),
    );

    action.on_key_press().unwrap();
    assert_eq!(memory.preset().unwrap(), "a");
    assert!(ctx.store.spec(Location::Global, "Presets", "Values").is_none());

    memory.set_tag("Digital", &["c"]);
    action.on_key_press().unwrap();
    assert_eq!(memory.preset().unwrap(), "c");
}

#[test]
fn test_raw_instructions_enter_and_exit() {
    let (enters, exits, holder) = counting();
    let action = RawInstructions::new("Isolate", holder);
    action.on_key_press().unwrap();
    action.on_every_key_release().unwrap();
    assert_eq!(enters.load(Ordering::SeqCst), 1);
    assert_eq!(exits.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Mouse trackers
// ============================================================================

#[test]
fn test_mouse_tracker_requires_a_slider() {
    let (_, ctx) = context();
    let result = mouse_tracker(&ctx, "Nothing", None, None, InstructionHolder::default());
    assert!(matches!(result, Err(ActionError::MissingSlider(name)) if name == "Nothing"));
}

#[test]
fn test_single_axis_vertical_follows_upward_motion() {
    let (memory, ctx) = context();
    let controller = opacity(&ctx);
    memory.set_brush_property(BrushProperty::Opacity, 0.5).unwrap();
    let slider = Slider::range(Arc::clone(&controller), Range::new(0, 100), None);
    let tracker = mouse_tracker(&ctx, "Opacity", None, Some(slider), InstructionHolder::default())
        .unwrap();
    let MouseTracker::Single(single) = &tracker else {
        panic!("expected a single axis tracker");
    };
    assert_eq!(single.axis(), Axis::Vertical);

    tracker.on_key_press().unwrap();
    memory.set_cursor(Point::new(0, -40));
    thread::sleep(SETTLE);
    assert_eq!(controller.get_value().unwrap(), 60);

    tracker.on_every_key_release().unwrap();
    assert!(!single.is_tracking());
}

#[test]
fn test_double_axis_picks_first_decisive_axis() {
    let (memory, ctx) = context();
    let horizontal = Slider::range(opacity(&ctx), Range::new(0, 100), None);
    let vertical = Slider::range(Arc::new(PercentController::flow(&ctx.host)), Range::new(0, 100), None);
    let tracker = mouse_tracker(
        &ctx,
        "Brush",
        Some(horizontal),
        Some(vertical),
        InstructionHolder::default(),
    )
    .unwrap();
    let MouseTracker::Double(double) = &tracker else {
        panic!("expected a double axis tracker");
    };

    tracker.on_key_press().unwrap();
    memory.set_cursor(Point::new(12, 0));
    thread::sleep(SETTLE);
    assert_eq!(double.active_axis(), Some(Axis::Horizontal));
    assert!(double.is_tracking(Axis::Horizontal));
    assert!(!double.is_tracking(Axis::Vertical));

    tracker.on_every_key_release().unwrap();
    assert!(!double.is_tracking(Axis::Horizontal));
}

// ============================================================================
// Pie menu and rotation selector
// ============================================================================

#[test]
fn test_pie_menu_commits_hovered_label() {
    let (memory, ctx) = context();
    let controller = opacity(&ctx);
    let config = NonPresetPieConfig::new(&ctx.store, "Opacity pie", vec![100, 70, 50, 30], &PieDefaults::default());
    let pie = PieMenu::new(&ctx, "Opacity pie", Arc::clone(&controller), config);

    memory.set_cursor(Point::new(500, 500));
    pie.on_key_press().unwrap();
    assert_eq!(pie.state(), PieState::Open);
    assert_eq!(memory.shown_widgets(), vec!["Opacity pie".to_string()]);

    memory.set_cursor(Point::new(600, 500));
    thread::sleep(SETTLE);
    assert_eq!(pie.hovered_label().map(|label| label.value), Some(70));

    pie.on_every_key_release().unwrap();
    assert_eq!(controller.get_value().unwrap(), 70);
    assert_eq!(pie.last_outcome(), Some(PieState::LabelSelected));
    assert_eq!(pie.state(), PieState::Idle);
    assert!(memory.shown_widgets().is_empty());
}

#[test]
fn test_pie_menu_deadzone_release_does_nothing_by_default() {
    let (memory, ctx) = context();
    let config = NonPresetPieConfig::new(&ctx.store, "Opacity pie", vec![100, 70], &PieDefaults::default());
    let pie = PieMenu::new(&ctx, "Opacity pie", opacity(&ctx), config);

    memory.set_cursor(Point::new(500, 500));
    pie.on_key_press().unwrap();
    pie.on_every_key_release().unwrap();
    assert_eq!(pie.last_outcome(), Some(PieState::DeadzoneRelease));
    assert_eq!(memory.write_count(), 0);
}

#[test]
fn test_rotation_selector_sets_angle_and_zeroes_in_deadzone() {
    let (memory, ctx) = context();
    memory.set_brush_property(BrushProperty::Rotation, 45.0).unwrap();
    let controller: Arc<dyn Controller<i32>> = Arc::new(BrushRotationController::new(&ctx.host));
    let defaults = RotationDefaults {
        deadzone_strategy: RotationDeadzoneStrategy::SetToZero,
        ..RotationDefaults::default()
    };
    let selector = RotationSelector::new(&ctx, "Rotate brush", Arc::clone(&controller), &defaults);

    memory.set_cursor(Point::new(300, 300));
    selector.on_key_press().unwrap();
    assert!(selector.is_open());
    memory.set_cursor(Point::new(300, 600));
    thread::sleep(SETTLE);
    selector.on_every_key_release().unwrap();
    assert_eq!(controller.get_value().unwrap(), 180);
    assert!(!selector.is_open());

    memory.set_cursor(Point::new(300, 300));
    selector.on_key_press().unwrap();
    selector.on_every_key_release().unwrap();
    assert_eq!(controller.get_value().unwrap(), 0);
}

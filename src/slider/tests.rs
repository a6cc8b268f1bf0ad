use super::handler::DeadzoneAnchor;
use super::*;
use crate::components::controllers::PercentController;
use crate::components::{Instruction, InstructionHolder};
use crate::config::{ConfigStore, GlobalConfig};
use crate::host::{Host, MemoryHost};
use crate::util::Point;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

const SETTLE: Duration = Duration::from_millis(120);

fn fast_config() -> GlobalConfig {
    let config = GlobalConfig::new(&ConfigStore::in_memory());
    config.fps_limit.write(200).unwrap();
    config
}

fn opacity_host(percent: f64) -> (Arc<MemoryHost>, Arc<dyn Controller<i32>>) {
    let memory = Arc::new(MemoryHost::new());
    memory
        .set_brush_property(crate::host::BrushProperty::Opacity, percent / 100.0)
        .unwrap();
    let host: Arc<dyn Host> = memory.clone();
    (memory, Arc::new(PercentController::opacity(&host)))
}

fn cursor_x(memory: &Arc<MemoryHost>) -> impl Fn() -> i32 + Send + use<> {
    let memory = Arc::clone(memory);
    move || memory.cursor_position().x
}

#[test]
fn test_step_index_moves_one_element_per_step() {
    assert_eq!(step_index(2, 5, 49.0, 1.0), 2);
    assert_eq!(step_index(2, 5, 50.0, 1.0), 3);
    assert_eq!(step_index(2, 5, -49.0, 1.0), 2);
    assert_eq!(step_index(2, 5, -100.0, 1.0), 0);
    assert_eq!(step_index(2, 5, 25.0, 2.0), 3);
}

#[test]
fn test_step_index_clamps_to_ends() {
    assert_eq!(step_index(2, 5, 10_000.0, 1.0), 4);
    assert_eq!(step_index(2, 5, -10_000.0, 1.0), 0);
    assert_eq!(step_index(0, 0, 500.0, 1.0), 0);
}

#[test]
fn test_range_value_scales_and_clamps() {
    let range = Range::new(10, 100);
    assert_eq!(range_value(50.0, 40.0, 1.0, &range), 60.0);
    assert_eq!(range_value(50.0, 40.0, 2.0, &range), 70.0);
    assert_eq!(range_value(50.0, 4000.0, 1.0, &range), 100.0);
    assert_eq!(range_value(50.0, -4000.0, 1.0, &range), 10.0);
}

#[test]
fn test_range_new_orders_bounds() {
    let range = Range::new(100, 10);
    assert_eq!(range.min, 10);
    assert_eq!(range.max, 100);
}

#[test]
fn test_deadzone_anchor_reanchors_at_edge() {
    let mut anchor = DeadzoneAnchor::new(0, 10);
    assert_eq!(anchor.offset(5), None);
    assert_eq!(anchor.offset(-10), None);
    assert_eq!(anchor.offset(15), Some(5.0));
    assert_eq!(anchor.offset(-3), Some(-13.0));
}

#[test]
fn test_deadzone_anchor_without_deadzone_ignores_rest() {
    let mut anchor = DeadzoneAnchor::new(100, 0);
    assert_eq!(anchor.offset(100), None);
    assert_eq!(anchor.offset(101), Some(1.0));
}

#[test]
fn test_range_handler_follows_pointer() {
    let (memory, controller) = opacity_host(50.0);
    let slider = Slider::range(controller.clone(), Range::new(10, 100), Some(100));
    let handler = SliderHandler::new("Opacity", slider, fast_config(), InstructionHolder::default());

    handler.start(cursor_x(&memory)).unwrap();
    assert!(handler.is_active());
    memory.set_cursor(Point::new(40, 0));
    thread::sleep(SETTLE);
    assert_eq!(controller.get_value().unwrap(), 60);

    handler.stop();
    assert!(!handler.is_active());
}

#[test]
fn test_cycle_handler_steps_and_clamps() {
    let (memory, controller) = opacity_host(30.0);
    let slider = Slider::cycle(controller.clone(), vec![10, 20, 30, 40, 50], Some(50));
    let handler = SliderHandler::new("Opacity", slider, fast_config(), InstructionHolder::default());

    handler.start(cursor_x(&memory)).unwrap();
    memory.set_cursor(Point::new(100, 0));
    thread::sleep(SETTLE);
    assert_eq!(controller.get_value().unwrap(), 50);

    memory.set_cursor(Point::new(-500, 0));
    thread::sleep(SETTLE);
    assert_eq!(controller.get_value().unwrap(), 10);
    handler.stop();
}

#[test]
fn test_no_write_without_movement() {
    let (memory, controller) = opacity_host(30.0);
    let slider = Slider::cycle(controller, vec![10, 20, 30], None);
    let handler = SliderHandler::new("Opacity", slider, fast_config(), InstructionHolder::default());
    let writes = memory.write_count();

    handler.start(cursor_x(&memory)).unwrap();
    thread::sleep(SETTLE);
    handler.stop();
    assert_eq!(memory.write_count(), writes);
}

#[test]
fn test_stop_twice_writes_nothing_afterwards() {
    let (memory, controller) = opacity_host(50.0);
    let slider = Slider::range(controller, Range::new(0, 100), None);
    let handler = SliderHandler::new("Opacity", slider, fast_config(), InstructionHolder::default());

    handler.start(cursor_x(&memory)).unwrap();
    memory.set_cursor(Point::new(20, 0));
    thread::sleep(SETTLE);
    handler.stop();
    let writes = memory.write_count();

    memory.set_cursor(Point::new(200, 0));
    thread::sleep(SETTLE);
    handler.stop();
    assert_eq!(memory.write_count(), writes);
}

struct CountUpdates(Arc<AtomicUsize>);

impl Instruction for CountUpdates {
    fn update(&self) -> Result<(), crate::host::HostError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_update_runs_after_each_write() {
    let (memory, controller) = opacity_host(10.0);
    let updates = Arc::new(AtomicUsize::new(0));
    let instructions = InstructionHolder::new(vec![Box::new(CountUpdates(Arc::clone(&updates)))]);
    let slider = Slider::cycle(controller, vec![10, 20, 30], None);
    let handler = SliderHandler::new("Opacity", slider, fast_config(), instructions);

    handler.start(cursor_x(&memory)).unwrap();
    memory.set_cursor(Point::new(60, 0));
    thread::sleep(SETTLE);
    memory.set_cursor(Point::new(110, 0));
    thread::sleep(SETTLE);
    handler.stop();

    assert_eq!(updates.load(Ordering::SeqCst), 2);
}

#[test]
fn test_sensitivity_scales_with_global_setting() {
    let (memory, controller) = opacity_host(50.0);
    let config = fast_config();
    config.tracker_sensitivity_scale.write(2.0).unwrap();
    let slider = Slider::range(controller.clone(), Range::new(0, 100), None).with_sensitivity(0.5);
    let handler = SliderHandler::new("Opacity", slider, config, InstructionHolder::default());

    handler.start(cursor_x(&memory)).unwrap();
    memory.set_cursor(Point::new(8, 0));
    thread::sleep(SETTLE);
    handler.stop();
    assert_eq!(controller.get_value().unwrap(), 52);
}

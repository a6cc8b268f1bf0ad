//! Stock actions shipped with the plugin.
//!
//! Every action reads and writes its settings through the context's
//! [`ConfigStore`](crate::config::ConfigStore), so building the catalog also
//! registers the specs of every persisted field.

use std::sync::Arc;
use std::time::Duration;

use crate::PluginContext;
use crate::components::controllers::{
    BlendingModeController, BrushRotationController, BrushSizeController, LayerController,
    PercentController, PresetController, TimeController, ToggleController, ToolController,
};
use crate::components::instructions::{
    EnsureOff, SetBrushOnNonPaintable, TemporaryOn, ToggleLayerVisibility,
};
use crate::components::{CurrentLayerStack, InstructionHolder, PickStrategy, Tag};
use crate::config::{DeadzoneStrategy, EnumValue, Field};
use crate::host::{BlendingMode, Tool, Toggle};
use crate::input::{ActionError, ActionRegistry, PluginAction};
use crate::pie::{EnumPieConfig, PieDefaults, PresetPieConfig};
use crate::rotation::RotationDefaults;
use crate::slider::{Range, Slider};
use crate::templates::{
    MultipleAssignment, PieMenu, RotationSelector, TemporaryKey, mouse_tracker,
};

const TRACKED_BLENDING_MODES: [BlendingMode; 8] = [
    BlendingMode::Normal,
    BlendingMode::Overlay,
    BlendingMode::Multiply,
    BlendingMode::Color,
    BlendingMode::Add,
    BlendingMode::Behind,
    BlendingMode::Darken,
    BlendingMode::Lighten,
];

const BRUSH_SIZES: [f64; 41] = [
    0.7, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 14.0, 16.0,
    20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 70.0, 80.0, 100.0, 120.0, 160.0, 200.0, 250.0,
    300.0, 350.0, 400.0, 450.0, 500.0, 600.0, 700.0, 800.0, 900.0, 1000.0,
];

/// Builds the stock actions, in menu order.
///
/// # Errors
/// Returns an error if an action is misconfigured.
pub fn default_actions(ctx: &PluginContext) -> Result<Vec<Arc<dyn PluginAction>>, ActionError> {
    let mut actions = temporary_keys(ctx);
    actions.extend(cycles(ctx));
    actions.extend(trackers(ctx)?);
    actions.extend(pie_menus(ctx));
    actions.push(Arc::new(RotationSelector::new(
        ctx,
        "Rotate brush",
        Arc::new(BrushRotationController::new(&ctx.host)),
        &RotationDefaults::default(),
    )));
    Ok(actions)
}

/// Registers every stock action.
///
/// # Errors
/// Returns an error if an action is misconfigured or two actions share a name.
pub fn build_registry(ctx: &PluginContext) -> Result<ActionRegistry, ActionError> {
    let mut registry = ActionRegistry::new();
    for action in default_actions(ctx)? {
        registry.register(action, &ctx.config)?;
    }
    Ok(registry)
}

// ============================================================================
// Temporary keys
// ============================================================================

fn temporary_keys(ctx: &PluginContext) -> Vec<Arc<dyn PluginAction>> {
    let host = &ctx.host;
    let tools = || Arc::new(ToolController::new(host));
    let toggle_with = |toggle: Toggle, excluded: Toggle| {
        TemporaryKey::new(
            format!("{} (temporary)", toggle.pretty_name()),
            Arc::new(ToggleController::new(host, toggle)),
            true,
        )
        .with_low_value(false)
        .with_instructions(InstructionHolder::new(vec![
            Box::new(SetBrushOnNonPaintable::new(host)),
            Box::new(EnsureOff::new(host, excluded)),
        ]))
    };

    vec![
        Arc::new(TemporaryKey::new("Move tool (temporary)", tools(), Tool::Move)),
        Arc::new(
            TemporaryKey::new("Transform tool (temporary)", tools(), Tool::Transform)
                .with_time_interval(Duration::from_secs(1)),
        ),
        Arc::new(toggle_with(Toggle::Eraser, Toggle::PreserveAlpha)),
        Arc::new(toggle_with(Toggle::PreserveAlpha, Toggle::Eraser)),
    ]
}

// ============================================================================
// Cycles
// ============================================================================

fn cycles(ctx: &PluginContext) -> Vec<Arc<dyn PluginAction>> {
    let host = &ctx.host;
    let store = &ctx.store;
    vec![
        Arc::new(
            MultipleAssignment::new(
                store,
                "Opacity (cycle)",
                Arc::new(PercentController::opacity(host)),
                vec![70, 50, 30, 100],
            )
            .with_default_value(100),
        ),
        Arc::new(MultipleAssignment::new(
            store,
            "Selection tools (cycle)",
            Arc::new(ToolController::new(host)),
            vec![
                Tool::FreehandSelection,
                Tool::RectangularSelection,
                Tool::ContiguousSelection,
            ],
        )),
        Arc::new(MultipleAssignment::new(
            store,
            "Misc tools (cycle)",
            Arc::new(ToolController::new(host)),
            vec![Tool::Crop, Tool::Reference, Tool::Gradient, Tool::MultiBrush],
        )),
        Arc::new(
            MultipleAssignment::with_source(
                store,
                "Preset (cycle)",
                Arc::new(PresetController::new(host)),
                Tag::new(host, "Digital"),
            )
            .with_default_value("b) Basic-5 Size Opacity".to_string())
            .with_instructions(InstructionHolder::new(vec![Box::new(
                SetBrushOnNonPaintable::new(host),
            )])),
        ),
    ]
}

// ============================================================================
// Mouse trackers
// ============================================================================

fn trackers(ctx: &PluginContext) -> Result<Vec<Arc<dyn PluginAction>>, ActionError> {
    let host = &ctx.host;
    let layer_scraper = |name: &str, strategy: PickStrategy, instructions: InstructionHolder| {
        mouse_tracker(
            ctx,
            name,
            Some(Slider::range(
                Arc::new(TimeController::new(host)),
                Range::new(0, i32::MAX),
                Some(1),
            )),
            Some(Slider::cycle(
                Arc::new(LayerController::new(host)),
                CurrentLayerStack::new(host, strategy),
                None,
            )),
            instructions,
        )
    };

    let trackers: Vec<Arc<dyn PluginAction>> = vec![
        Arc::new(layer_scraper(
            "Layer scraper - isolate",
            PickStrategy::CurrentVisibility,
            InstructionHolder::new(vec![Box::new(TemporaryOn::new(host, Toggle::IsolateLayer))]),
        )?),
        Arc::new(layer_scraper(
            "Layer scraper - visibility",
            PickStrategy::Visible,
            InstructionHolder::new(vec![Box::new(ToggleLayerVisibility::new(host))]),
        )?),
        Arc::new(mouse_tracker(
            ctx,
            "Blending mode (tracker)",
            Some(Slider::cycle(
                Arc::new(BlendingModeController::new(host)),
                TRACKED_BLENDING_MODES.to_vec(),
                Some(BlendingMode::Normal),
            )),
            None,
            InstructionHolder::default(),
        )?),
        Arc::new(mouse_tracker(
            ctx,
            "Discrete brush settings (tracker)",
            Some(Slider::cycle(
                Arc::new(BrushSizeController::new(host)),
                BRUSH_SIZES.to_vec(),
                Some(100.0),
            )),
            Some(Slider::cycle(
                Arc::new(PercentController::opacity(host)),
                (1..=10).map(|step| step * 10).collect::<Vec<i32>>(),
                Some(100),
            )),
            InstructionHolder::default(),
        )?),
        Arc::new(mouse_tracker(
            ctx,
            "Contiguous brush settings (tracker)",
            Some(Slider::range(
                Arc::new(BrushSizeController::new(host)),
                Range::new(50.0, 1000.0),
                Some(100.0),
            )),
            Some(Slider::range(
                Arc::new(PercentController::opacity(host)),
                Range::new(10, 100),
                Some(100),
            )),
            InstructionHolder::default(),
        )?),
    ];
    Ok(trackers)
}

// ============================================================================
// Pie menus
// ============================================================================

fn pie_menus(ctx: &PluginContext) -> Vec<Arc<dyn PluginAction>> {
    let host = &ctx.host;
    let preset_pie = |color: &str, tag: &Field<String>| -> Arc<dyn PluginAction> {
        let name = format!("Pie: Presets ({color})");
        let config = PresetPieConfig::new(&ctx.store, host, &name, &tag.read(), &PieDefaults::default())
            .follow_tag(tag);
        Arc::new(
            PieMenu::new(ctx, name, Arc::new(PresetController::new(host)), config).with_instructions(
                InstructionHolder::new(vec![Box::new(SetBrushOnNonPaintable::new(host))]),
            ),
        )
    };

    let pick_previous = PieDefaults {
        deadzone_strategy: DeadzoneStrategy::PickPrevious,
        ..PieDefaults::default()
    };
    let blending_modes = EnumPieConfig::new(
        &ctx.store,
        "Pie: Blending modes",
        TRACKED_BLENDING_MODES.to_vec(),
        &pick_previous,
    );
    let tools = EnumPieConfig::new(
        &ctx.store,
        "Pie: Tools",
        vec![
            Tool::FreehandBrush,
            Tool::Transform,
            Tool::Move,
            Tool::FreehandSelection,
            Tool::Fill,
            Tool::Gradient,
            Tool::ColorSampler,
            Tool::Crop,
        ],
        &pick_previous,
    );

    vec![
        preset_pie("red", &ctx.config.tag_red),
        preset_pie("green", &ctx.config.tag_green),
        preset_pie("blue", &ctx.config.tag_blue),
        Arc::new(PieMenu::new(
            ctx,
            "Pie: Blending modes",
            Arc::new(BlendingModeController::new(host)),
            blending_modes,
        )),
        Arc::new(PieMenu::new(
            ctx,
            "Pie: Tools",
            Arc::new(ToolController::new(host)),
            tools,
        )),
    ]
}

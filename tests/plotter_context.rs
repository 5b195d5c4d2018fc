use jobs2d::driver::RecordingDriver;
use jobs2d::{
    init_logging, presets, run_job, Canvas, Command, PipelineSettings, PlotterContext, ShapeSurface,
};

fn context_with_canvas() -> PlotterContext {
    init_logging(PipelineSettings::default().logging_config());
    let settings = PipelineSettings::from_json_str(r#"{ "real_time_interval_ms": 0, "history_capacity": 4 }"#).unwrap();
    let mut context = PlotterContext::new(settings);
    context.canvases.add("A4", Canvas::rectangle(105.0, 148.5).unwrap());
    context
}

#[test]
fn test_every_default_driver_runs_presets() {
    let surface = ShapeSurface::new();
    let mut context = context_with_canvas();
    let handles = context.install_default_drivers(surface.clone()).unwrap();
    context
        .commands
        .add_and_select("Deeply complex", presets::deeply_complex().unwrap())
        .unwrap();

    let names: Vec<String> = context.drivers.names().into_iter().map(String::from).collect();
    for name in &names {
        context.drivers.set_current(name).unwrap();
        context.run_current_job().unwrap();
    }

    assert_eq!(context.history.len(), 4);
    assert_eq!(context.history.last().unwrap().driver, "Canvas aware line");
    assert_eq!(handles.usage.snapshot().jobs, 1);
    assert!(!surface.is_empty());
}

#[test]
fn test_recording_becomes_current_command() {
    let mut context = context_with_canvas();
    let mut recorder = RecordingDriver::new();
    run_job(&presets::compound_rectangle().unwrap(), &mut recorder).unwrap();

    context.register_recording(&mut recorder, "Captured").unwrap();

    let current: &Command = context.commands.current_command().unwrap();
    assert!(current.is_recorded());
    assert_eq!(current.operations().unwrap().len(), 8);
    assert!(!context.check_current_command().unwrap().exceeded());
}

#[test]
fn test_replay_uses_current_driver() {
    let surface = ShapeSurface::new();
    let mut context = context_with_canvas();
    context.install_default_drivers(surface.clone()).unwrap();
    context.drivers.set_current("Basic line").unwrap();
    context
        .commands
        .add_and_select("Secret", presets::secret_command().unwrap())
        .unwrap();

    context.run_current_job().unwrap();
    let drawn = surface.drain().len();
    context.replay(0).unwrap();

    assert_eq!(drawn, 4);
    assert_eq!(surface.len(), drawn);
}

#[test]
fn test_canvas_aware_driver_follows_canvas_switch() {
    let surface = ShapeSurface::new();
    let mut context = context_with_canvas();
    context.canvases.add("Round", Canvas::circle(50.0).unwrap());
    context.install_default_drivers(surface.clone()).unwrap();
    context.drivers.set_current("Canvas aware line").unwrap();
    context
        .commands
        .add_and_select("Rectangle", presets::compound_rectangle().unwrap())
        .unwrap();

    context.run_current_job().unwrap();
    assert_eq!(surface.drain().len(), 4);

    // Every corner of the rectangle lies outside the round canvas
    context.canvases.set_current("Round").unwrap();
    context.run_current_job().unwrap();
    assert!(surface.is_empty());
}

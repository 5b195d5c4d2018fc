use std::collections::HashSet;

use egui::Pos2;
use jobs2d::command::visitors::{summarize, TransformVisitor};
use jobs2d::command::{deep_copy, flatten, presets};
use jobs2d::{Canvas, CanvasBoundaryVisitor, Command, CommandKind, CommandStats, Operation, PipelineError, Transformation};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: Pos2, b: Pos2) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

// Kinds of every node in traversal order
fn kinds(command: &Command) -> Vec<&'static str> {
    let mut labels = vec![command.kind().label()];
    match command.kind() {
        CommandKind::Composite(children) => children.iter().for_each(|child| labels.extend(kinds(child))),
        CommandKind::Secret(inner) => labels.extend(kinds(inner)),
        _ => {}
    }
    labels
}

#[test]
fn test_deep_copy_shares_no_identity() {
    let original = presets::deeply_complex().unwrap();
    let copy = deep_copy(&original);

    assert_eq!(flatten(&copy), flatten(&original));
    assert_eq!(kinds(&copy), kinds(&original));
    assert_eq!(CommandStats::of(&copy), CommandStats::of(&original));

    let original_ids: HashSet<_> = original.node_ids().into_iter().collect();
    assert!(copy.node_ids().iter().all(|id| !original_ids.contains(id)));

    // Copying a copy is equivalent again
    let again = deep_copy(&copy);
    assert_eq!(flatten(&again), flatten(&original));
    assert_eq!(kinds(&again), kinds(&original));
}

#[test]
fn test_deep_copy_children_point_at_new_parents() {
    let original = presets::compound_rectangle().unwrap();
    let copy = deep_copy(&original);

    assert_eq!(copy.owner(), None);
    for child in copy.children() {
        assert_eq!(child.owner(), Some(copy.id()));
    }
}

#[test]
fn test_rectangle_boundary_is_inclusive() {
    let (w, h) = (50.0, 30.0);
    let canvas = Canvas::rectangle(w, h).unwrap();

    let inside = Command::leaf("inside", [Operation::move_to(0.0, 0.0), Operation::line_to(w, 0.0)]);
    let outside = Command::leaf("outside", [Operation::move_to(0.0, 0.0), Operation::line_to(w + 1.0, 0.0)]);

    assert!(!CanvasBoundaryVisitor::check(canvas, &inside).exceeded());
    let report = CanvasBoundaryVisitor::check(canvas, &outside);
    assert!(report.exceeded());
    assert_eq!(report.first().unwrap().path, vec![1]);
}

#[test]
fn test_boundary_reports_every_violation_with_paths() {
    let canvas = Canvas::rectangle(10.0, 10.0).unwrap();
    let first = Command::leaf("first", [Operation::line_to(20.0, 0.0), Operation::move_to(0.0, 0.0)]);
    let second = Command::leaf("second", [Operation::line_to(5.0, 5.0), Operation::line_to(0.0, 15.0)]);
    let tree = Command::composite("tree", vec![first, second]).unwrap();

    let report = CanvasBoundaryVisitor::check(canvas, &tree);

    let paths: Vec<_> = report.violations.iter().map(|violation| violation.path.clone()).collect();
    assert_eq!(paths, vec![vec![0, 0], vec![1, 1]]);
    assert_eq!(report.segments_checked, 3);
}

#[test]
fn test_secret_content_is_checked_but_concealed() {
    let canvas = Canvas::circle(10.0).unwrap();
    let secret = presets::secret_command().unwrap();

    let report = CanvasBoundaryVisitor::check(canvas, &secret);

    assert!(report.exceeded());
    assert!(report.violations.iter().all(|violation| violation.concealed));
    assert!(!report.first().unwrap().to_string().contains("-90"));
    let debug = format!("{:?}", report);
    assert!(debug.contains("concealed: true"));
    assert!(!debug.contains("-90") && !debug.contains("from"));
}

#[test]
fn test_summary_hides_secret_coordinates() {
    let secret = presets::secret_command().unwrap();
    let tree = Command::composite("with secret", vec![secret]).unwrap();

    let text = summarize(&tree);

    assert!(text.contains("Secret command"));
    assert!(text.contains("<hidden>"));
    assert!(!text.contains("-90"));
    assert!(!format!("{:?}", tree).contains("-90"));
}

#[test]
fn test_transform_visitor_scales_composition() {
    let command = presets::compound_rectangle().unwrap();
    let (s1, s2) = (1.5, 4.0);

    let mut first = TransformVisitor::new(Transformation::scale(s1).unwrap()).unwrap();
    let mut second = TransformVisitor::new(Transformation::scale(s2).unwrap()).unwrap();
    let twice = second.transformed(&first.transformed(&command));

    let mut once = TransformVisitor::new(Transformation::scale(s1 * s2).unwrap()).unwrap();
    let combined = once.transformed(&command);

    for (a, b) in flatten(&twice).iter().zip(flatten(&combined).iter()) {
        assert!(approx_eq(a.position(), b.position()));
    }
}

#[test]
fn test_transform_in_place_keeps_identity() {
    let mut command = presets::compound_rectangle().unwrap();
    let ids = command.node_ids();
    let before = flatten(&command);

    let mut visitor = TransformVisitor::new(Transformation::HorizontalFlip).unwrap();
    visitor.apply_in_place(&mut command);

    assert_eq!(command.node_ids(), ids);
    for (old, new) in before.iter().zip(flatten(&command).iter()) {
        assert_eq!(new.position(), Pos2::new(-old.position().x, old.position().y));
    }
}

#[test]
fn test_attach_owned_child_leaves_both_trees_unchanged() {
    let mut first = presets::compound_rectangle().unwrap();
    let mut second = Command::composite("second", vec![Command::leaf("dot", [Operation::move_to(1.0, 1.0)])]).unwrap();
    let first_ids = first.node_ids();
    let second_ids = second.node_ids();
    let second_ops = flatten(&second);

    let stolen = first.children()[0].clone();
    let result = second.attach(stolen);

    assert!(matches!(result, Err(PipelineError::OwnershipConflict { owner, .. }) if owner == first.id()));
    assert_eq!(first.node_ids(), first_ids);
    assert_eq!(second.node_ids(), second_ids);
    assert_eq!(flatten(&second), second_ops);

    // Once detached it may move
    let detached = first.detach(0).unwrap();
    second.attach(detached).unwrap();
    assert_eq!(second.children().len(), 2);
    assert_eq!(first.children().len(), 3);
}

#[test]
fn test_attach_rejects_cycles() {
    let mut tree = presets::compound_rectangle().unwrap();
    let itself = tree.clone();

    assert!(matches!(tree.attach(itself), Err(PipelineError::OwnershipConflict { .. })));
}

#[test]
fn test_clone_next_to_original_is_rejected() {
    let dot = Command::leaf("dot", [Operation::move_to(1.0, 1.0)]);

    let result = Command::composite("twice", vec![dot.clone(), dot.clone()]);
    assert!(matches!(result, Err(PipelineError::OwnershipConflict { node, .. }) if node == dot.id()));

    // A deep copy is a node of its own
    let pair = Command::composite("pair", vec![deep_copy(&dot), dot]).unwrap();
    let ids: HashSet<_> = pair.node_ids().into_iter().collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_statistics_of_presets() {
    let stats = CommandStats::of(&presets::deeply_complex().unwrap());
    assert_eq!(stats.composites, 3);
    assert_eq!(stats.max_depth, 4);
    assert_eq!(stats.operations, stats.moves + stats.lines);
}

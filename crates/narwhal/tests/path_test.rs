use narwhal::path::edge_path;
use narwhal::{
    EdgeId, EdgePath, Graph, Layout, NodeSpec, PathCommand, Point, Sankey, SankeyConfig, Size,
};

const EPS: f64 = 1e-9;

fn config(width: f64, height: f64) -> SankeyConfig {
    SankeyConfig {
        node_width: 20.0,
        node_padding: 5.0,
        size: Size::new(width, height),
        ..Default::default()
    }
}

fn pair(width: f64) -> Layout {
    let mut g = Graph::new();
    g.add_node(NodeSpec::new("a"));
    g.add_node(NodeSpec::new("b"));
    g.add_edge("a", "b", 10.0);
    Sankey::new(config(width, 100.0)).layout(&g).unwrap()
}

/// Splits a path into its six defining points: start, stub end, two controls, curve end, end.
fn points(path: &EdgePath) -> [Point; 6] {
    match path.commands.as_slice() {
        [
            PathCommand::MoveTo { to: p0 },
            PathCommand::LineTo { to: p1 },
            PathCommand::CubicTo {
                ctrl1: p2,
                ctrl2: p3,
                to: p4,
            },
            PathCommand::LineTo { to: p5 },
        ] => [*p0, *p1, *p2, *p3, *p4, *p5],
        other => panic!("unexpected path shape: {other:?}"),
    }
}

fn assert_point(actual: Point, x: f64, y: f64) {
    assert!(
        (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
        "expected ({x}, {y}), got ({}, {})",
        actual.x,
        actual.y
    );
}

#[test]
fn horizontal_link_between_two_nodes() {
    let layout = pair(200.0);
    let path = layout.edge_path(EdgeId(0));

    assert_eq!(
        path.to_svg_path_data(),
        "M20,50L40,50C100,50 100,50 160,50L180,50"
    );
    assert_eq!(path.start(), Some(Point::new(20.0, 50.0)));
    assert_eq!(path.end(), Some(Point::new(180.0, 50.0)));
}

#[test]
fn zero_curvature_degenerates_to_a_straight_diagonal() {
    let mut g = Graph::new();
    for id in ["a", "b", "c"] {
        g.add_node(NodeSpec::new(id));
    }
    g.add_edge("a", "b", 3.0);
    g.add_edge("a", "c", 7.0);
    let layout = Sankey::new(config(300.0, 200.0)).layout(&g).unwrap();

    for id in layout.edge_ids() {
        let [_, p1, p2, p3, p4, _] = points(&edge_path(&layout, id, 0.0));
        assert_eq!(p2, p1);
        assert_eq!(p3, p4);
    }
}

#[test]
fn control_points_interpolate_with_curvature() {
    let layout = pair(200.0);
    let [_, p1, p2, p3, p4, _] = points(&edge_path(&layout, EdgeId(0), 0.25));
    assert_point(p2, p1.x + (p4.x - p1.x) * 0.25, p1.y);
    assert_point(p3, p1.x + (p4.x - p1.x) * 0.75, p4.y);
}

#[test]
fn control_points_never_cross_into_the_stubs() {
    // Columns 30px apart: the stubs overlap, so interpolation alone would cross them.
    let layout = pair(50.0);
    let [p0, p1, p2, p3, p4, p5] = points(&layout.edge_path(EdgeId(0)));

    assert_point(p0, 20.0, 50.0);
    assert_point(p1, 40.0, 50.0);
    assert_point(p4, 10.0, 50.0);
    assert_point(p5, 30.0, 50.0);
    assert!(p2.x >= p1.x);
    assert!(p3.x <= p4.x);
}

fn vertical_pair() -> Layout {
    let mut g = Graph::new();
    g.add_node(NodeSpec::new("a"));
    g.add_node(NodeSpec::new("v").vertical());
    g.add_edge("a", "v", 2.0);
    Sankey::new(config(200.0, 100.0)).layout(&g).unwrap()
}

#[test]
fn vertical_entry_from_above() {
    let mut layout = vertical_pair();
    let v = layout.find_node("v").unwrap();
    layout.node_mut(v).depth = 400.0;
    layout.relayout();

    let edge = layout.edge(EdgeId(0)).clone();
    let target = layout.node(v).clone();
    let t = edge.thickness;
    let [_, p1, p2, p3, p4, p5] = points(&layout.edge_path(EdgeId(0)));

    assert_point(p5, target.column + t / 2.0, target.depth);
    assert_point(p4, target.column + t / 2.0, target.depth - target.column_width);
    assert_eq!(p3.x, p4.x);
    assert!(p3.y <= p4.y - 2.0 * t + EPS);
    assert_eq!(p2.y, p1.y);
    assert!(p2.x >= p1.x);
}

#[test]
fn vertical_entry_from_below() {
    let mut layout = vertical_pair();
    let v = layout.find_node("v").unwrap();
    layout.node_mut(v).depth = -400.0;
    layout.relayout();

    let edge = layout.edge(EdgeId(0)).clone();
    let target = layout.node(v).clone();
    let t = edge.thickness;
    let [_, _, _, p3, p4, p5] = points(&layout.edge_path(EdgeId(0)));

    assert_point(p5, target.column + t / 2.0, target.bottom());
    assert_point(
        p4,
        target.column + t / 2.0,
        target.bottom() + target.column_width,
    );
    assert!(p3.y >= p4.y + 2.0 * t - EPS);
}

#[test]
fn every_edge_gets_a_path() {
    let layout = pair(200.0);
    let paths: Vec<_> = layout.edge_paths().collect();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].0, EdgeId(0));
    assert_eq!(paths[0].1.commands.len(), 4);
}

#[test]
fn path_data_trims_coordinates_to_three_decimals() {
    let path = EdgePath {
        commands: vec![
            PathCommand::MoveTo {
                to: Point::new(1.0 / 3.0, -0.0),
            },
            PathCommand::LineTo {
                to: Point::new(2.5, -0.00001),
            },
            PathCommand::CubicTo {
                ctrl1: Point::new(10.0, 12.3456),
                ctrl2: Point::new(-4.0, 7.0),
                to: Point::new(100.1, 8.0),
            },
        ],
    };
    assert_eq!(path.to_string(), "M0.333,0L2.5,0C10,12.346 -4,7 100.1,8");
}

use qreye::render::cluster::{Adjacency, ColumnGroup};
use qreye::render::dots;
use qreye::{EcLevel, Geometry, MatrixSource, QrGraphic, QrcodeSource, RenderStyle, Renderer, Shape};

const WALLET_URI: &str = "wc:7f6e504bfad60b485450578e05678ed3e8e8c4751d3c6160be17160d63ec90f9@2?relay-protocol=irn&symKey=587d5484ce2a2a6ee3ba1962fdd7e8588e06200c46823bd18fbd67def96ad303";

fn render(payload: &str, size: f64, logo: f64) -> QrGraphic {
    Renderer::new()
        .render_graphic(payload, size, logo)
        .expect("render payload")
}

/// Module `(row, col)` whose center is `(cx, cy)`
fn module_at(geometry: &Geometry, cx: f64, cy: f64) -> (usize, usize) {
    (
        (cx / geometry.cell_size).floor() as usize,
        (cy / geometry.cell_size).floor() as usize,
    )
}

fn data_shapes(graphic: &QrGraphic) -> Vec<Shape> {
    graphic
        .shapes
        .iter()
        .filter(|shape| !shape.is_finder())
        .cloned()
        .collect()
}

#[test]
fn every_data_module_is_drawn_exactly_once() {
    for (payload, logo) in [("hello", 100.0), (WALLET_URI, 100.0), (WALLET_URI, 0.0)] {
        let style = RenderStyle::default();
        let matrix = QrcodeSource::new()
            .generate_matrix(payload, style.ec_level)
            .expect("encode payload");
        let graphic = Renderer::new()
            .render_matrix(&matrix, 500.0, logo)
            .expect("render matrix");
        let coords = dots::extract(&matrix, &graphic.geometry);
        assert!(!coords.is_empty());

        for coord in &coords {
            let covering = graphic
                .dots()
                .filter(|dot| dot.cx == coord.cx && dot.cy == coord.cy)
                .count()
                + graphic
                    .line_segments()
                    .filter(|line| line.covers(coord.cx, coord.cy))
                    .count();
            assert_eq!(
                covering, 1,
                "module ({}, {}) drawn {covering} times for {payload:?}",
                coord.row, coord.col
            );
        }

        // no shape without a module behind it
        for dot in graphic.dots() {
            assert!(coords.iter().any(|c| c.cx == dot.cx && c.cy == dot.cy));
        }
        for line in graphic.line_segments() {
            assert!(coords.iter().any(|c| c.cx == line.x && c.cy == line.y1));
            assert!(coords.iter().any(|c| c.cx == line.x && c.cy == line.y2));
            assert!(line.y2 > line.y1);
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let first = render(WALLET_URI, 500.0, 100.0);
    let second = render(WALLET_URI, 500.0, 100.0);
    assert_eq!(first, second);
    assert_eq!(
        qreye::render(WALLET_URI, 500.0, 100.0).expect("render"),
        first.shapes
    );
}

/// Style with every absolute pixel length doubled
fn doubled(style: &RenderStyle) -> RenderStyle {
    RenderStyle {
        finder_stroke_width: style.finder_stroke_width * 2.0,
        clear_zone_padding: style.clear_zone_padding * 2.0,
        ..style.clone()
    }
}

#[test]
fn doubling_size_doubles_data_shapes() {
    let style = RenderStyle::default();
    let small = Renderer::with_style(style.clone())
        .render_graphic(WALLET_URI, 500.0, 100.0)
        .expect("render small");
    // the finder stroke stays absolute here; only data shapes are compared
    let large = Renderer::with_style(RenderStyle {
        clear_zone_padding: style.clear_zone_padding * 2.0,
        ..style
    })
    .render_graphic(WALLET_URI, 1000.0, 200.0)
    .expect("render large");

    let expected: Vec<Shape> = data_shapes(&small).iter().map(|s| s.scaled(2.0)).collect();
    assert_eq!(data_shapes(&large), expected);
    assert_eq!(small.dots().count(), large.dots().count());
    assert_eq!(small.line_segments().count(), large.line_segments().count());
}

#[test]
fn doubling_size_and_pixel_lengths_doubles_everything() {
    let style = RenderStyle::default();
    let large_style = doubled(&style);
    let small = Renderer::with_style(style)
        .render_graphic("hello", 500.0, 100.0)
        .expect("render small");
    let large = Renderer::with_style(large_style)
        .render_graphic("hello", 1000.0, 200.0)
        .expect("render large");

    let expected: Vec<Shape> = small.shapes.iter().map(|s| s.scaled(2.0)).collect();
    assert_eq!(large.shapes, expected);
    assert_eq!(large.geometry.clear_modules, small.geometry.clear_modules);
}

#[test]
fn adjacency_threshold_is_inclusive() {
    let style = RenderStyle::default();
    let geometry = Geometry::compute(210.0, 21, 0.0, &style).expect("geometry");
    let adjacency = Adjacency::for_geometry(&geometry, &style);
    let threshold = geometry.cell_size + 0.1;
    assert_eq!(adjacency.threshold(), threshold);

    let touching = ColumnGroup {
        row: 8,
        cx: 85.0,
        cys: vec![0.0, threshold],
    };
    assert!(touching.isolated(adjacency).is_empty());
    assert_eq!(touching.runs(adjacency), vec![vec![0.0, threshold]]);

    let apart = ColumnGroup {
        row: 8,
        cx: 85.0,
        cys: vec![0.0, threshold + 1e-6],
    };
    assert_eq!(apart.isolated(adjacency).len(), 2);
    assert!(apart.runs(adjacency).is_empty());
}

#[test]
fn no_data_shape_touches_a_finder_region() {
    let graphic = render(WALLET_URI, 500.0, 100.0);
    let geometry = graphic.geometry;

    for dot in graphic.dots() {
        let (row, col) = module_at(&geometry, dot.cx, dot.cy);
        assert!(!geometry.in_finder_region(row, col), "dot in finder at ({row}, {col})");
    }
    for line in graphic.line_segments() {
        for y in [line.y1, line.y2] {
            let (row, col) = module_at(&geometry, line.x, y);
            assert!(!geometry.in_finder_region(row, col), "line in finder at ({row}, {col})");
        }
    }
}

#[test]
fn hello_at_quartile_scenario() {
    let graphic = render("hello", 500.0, 100.0);
    let geometry = graphic.geometry;

    assert_eq!(Renderer::new().style().ec_level, EcLevel::Q);
    assert_eq!(geometry.matrix_side, 21);
    assert_eq!(graphic.finder_rings().count(), 9);
    assert!(graphic.shapes[..9].iter().all(Shape::is_finder));
    assert!(graphic.line_segments().count() >= 1);

    let in_zone = |row: usize, col: usize| {
        let inside = |i: usize| (i as f64) > geometry.middle_start && (i as f64) < geometry.middle_end;
        inside(row) && inside(col)
    };
    for dot in graphic.dots() {
        let (row, col) = module_at(&geometry, dot.cx, dot.cy);
        assert!(!in_zone(row, col), "dot inside clear zone at ({row}, {col})");
    }
    for line in graphic.line_segments() {
        let (row, first) = module_at(&geometry, line.x, line.y1);
        let (_, last) = module_at(&geometry, line.x, line.y2);
        for col in first..=last {
            assert!(!in_zone(row, col), "line inside clear zone at ({row}, {col})");
        }
    }
}

#[test]
fn renders_run_in_parallel() {
    let renderer = Renderer::new();
    let payloads = ["alpha", "beta", "gamma", WALLET_URI];

    let results: Vec<Vec<Shape>> = std::thread::scope(|scope| {
        let handles: Vec<_> = payloads
            .iter()
            .map(|payload| {
                let renderer = &renderer;
                scope.spawn(move || renderer.render(payload, 400.0, 80.0))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("render thread").expect("render"))
            .collect()
    });

    for (payload, shapes) in payloads.iter().zip(results) {
        assert_eq!(shapes, renderer.render(payload, 400.0, 80.0).expect("render"));
    }
}

#[test]
fn rejects_degenerate_requests() {
    let renderer = Renderer::new();
    assert!(matches!(
        renderer.render("hello", 0.0, 100.0),
        Err(qreye::Error::DegenerateGeometry(_))
    ));
    assert!(matches!(
        renderer.render("hello", 500.0, -5.0),
        Err(qreye::Error::InvalidParameter(_))
    ));
    assert!(matches!(
        renderer.render(&"x".repeat(5000), 500.0, 100.0),
        Err(qreye::Error::EncodingFailure(_))
    ));
}

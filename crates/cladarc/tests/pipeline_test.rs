use cladarc::layout::PlacementOptions;
use cladarc::{AreaTable, Linkage, PresenceMatrix, SimilarityMatrix};

fn table() -> AreaTable {
    AreaTable::new(["J", "T", "Y", "N", "O", "Q"]).unwrap()
}

fn local_matrix(table: &AreaTable) -> SimilarityMatrix {
    SimilarityMatrix::from_pairs(
        table,
        &[
            ("J", "T", 0.90),
            ("J", "Y", 0.80),
            ("T", "Y", 0.80),
            ("J", "N", 0.40),
            ("T", "N", 0.38),
            ("Y", "N", 0.37),
            ("J", "O", 0.35),
            ("T", "O", 0.33),
            ("Y", "O", 0.32),
            ("J", "Q", 0.36),
            ("T", "Q", 0.34),
            ("Y", "Q", 0.33),
            ("N", "O", 0.75),
            ("N", "Q", 0.75),
            ("O", "Q", 0.85),
        ],
    )
    .unwrap()
}

fn global_matrix(table: &AreaTable) -> SimilarityMatrix {
    SimilarityMatrix::from_pairs(
        table,
        &[
            ("J", "T", 0.88),
            ("J", "Y", 0.82),
            ("T", "Y", 0.80),
            ("J", "N", 0.40),
            ("T", "N", 0.38),
            ("Y", "N", 0.37),
            ("J", "O", 0.35),
            ("T", "O", 0.33),
            ("Y", "O", 0.32),
            ("J", "Q", 0.36),
            ("T", "Q", 0.34),
            ("Y", "Q", 0.33),
            ("N", "O", 0.70),
            ("N", "Q", 0.68),
            ("O", "Q", 0.83),
        ],
    )
    .unwrap()
}

fn angle_between(a: &cladarc::layout::LayoutPoint, b: &cladarc::layout::LayoutPoint) -> f64 {
    let dot = a.x * b.x + a.y * b.y;
    let ra = (a.x * a.x + a.y * a.y).sqrt();
    let rb = (b.x * b.x + b.y * b.y).sqrt();
    (dot / (ra * rb)).clamp(-1.0, 1.0).acos().to_degrees()
}

#[test]
fn end_to_end_six_area_scenario() {
    let table = table();
    let diagram = cladarc::diagram_from_matrices(
        &local_matrix(&table),
        &global_matrix(&table),
        Linkage::Average,
        &PlacementOptions::default(),
    )
    .unwrap();

    assert_eq!(diagram.points.len(), 6);

    // J-T joined locally at 0.90 and globally at 0.88: the seed puts them
    // exactly 18 degrees apart on a circle of radius ~0.568.
    let j = &diagram.points["J"];
    let t = &diagram.points["T"];
    assert!((angle_between(j, t) - 18.0).abs() < 1e-9);
    let rj = (j.x * j.x + j.y * j.y).sqrt();
    assert!((rj - 0.568).abs() < 1e-3);
    assert!((rj - 1.0 / 0.88 / 2.0).abs() < 1e-12);

    let bounds = diagram.bounds().unwrap();
    assert!(bounds.min_x < 0.0 && bounds.max_x > 0.0);
    assert!(bounds.max_y > 0.5);
}

#[test]
fn the_first_trace_step_carries_the_seed_cluster_parameters() {
    let table = table();
    let steps = cladarc::trace_from_matrices(
        &local_matrix(&table),
        &global_matrix(&table),
        Linkage::Average,
        &PlacementOptions::default(),
    )
    .unwrap();

    let seed = &steps[0].structures[0];
    assert_eq!(seed.members, ["J", "T"]);
    assert!((seed.theta - 18.0).abs() < 1e-9);
    assert!((seed.diameter - 1.13636).abs() < 1e-5);
    assert!((seed.sim_local - 0.90).abs() < 1e-12);
    assert!((seed.sim_global - 0.88).abs() < 1e-12);
}

#[test]
fn repeated_runs_are_bit_identical() {
    let table = table();
    let run = || {
        cladarc::diagram_from_matrices(
            &local_matrix(&table),
            &global_matrix(&table),
            Linkage::Average,
            &PlacementOptions::default(),
        )
        .unwrap()
    };
    let (a, b) = (run(), run());
    for (label, p) in &a.points {
        let q = &b.points[label];
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.y.to_bits(), q.y.to_bits());
    }
}

#[test]
fn concentric_pipeline_produces_rings_for_every_level() {
    let table = table();
    let diagram = cladarc::concentric_from_matrices(
        &local_matrix(&table),
        &global_matrix(&table),
        Linkage::Average,
        &PlacementOptions::default(),
    )
    .unwrap();
    // 5 merge levels plus the area ring
    assert_eq!(diagram.circles.len(), 6);
    assert_eq!(diagram.positions.len(), 6);
    assert_eq!(diagram.merge_points.len(), 5);
}

#[test]
fn the_diagram_serializes_for_downstream_renderers() {
    let table = table();
    let diagram = cladarc::diagram_from_matrices(
        &local_matrix(&table),
        &global_matrix(&table),
        Linkage::Average,
        &PlacementOptions::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&diagram).unwrap();
    assert_eq!(json["points"].as_object().unwrap().len(), 6);
    assert!(json["points"]["J"]["x"].is_number());
    assert!(json["theta"].is_number());
}

#[test]
fn mismatched_universes_surface_as_layout_errors() {
    let table = table();
    let other = AreaTable::new(["A", "B"]).unwrap();
    let global =
        SimilarityMatrix::from_pairs(&other, &[("A", "B", 0.5)]).unwrap();
    let err = cladarc::diagram_from_matrices(
        &local_matrix(&table),
        &global,
        Linkage::Average,
        &PlacementOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, cladarc::Error::Layout(_)));
}

#[test]
fn presence_pipeline_goes_all_the_way_through() {
    let areas = ["A", "B", "C"];
    let local = PresenceMatrix::new(
        &areas,
        &["t1", "t2", "t3", "t4"],
        &[vec![1, 1, 0, 0], vec![1, 1, 1, 0], vec![0, 0, 0, 1]],
    )
    .unwrap();
    let global = PresenceMatrix::new(
        &areas,
        &["u1", "u2"],
        &[vec![1, 1], vec![0, 1], vec![1, 1]],
    )
    .unwrap();

    let diagram = cladarc::diagram_from_presence(
        &local,
        &global,
        Linkage::Average,
        &PlacementOptions::default(),
    )
    .unwrap();

    assert_eq!(diagram.points.len(), 3);
    // local Jaccard(A, B) = 2/3 -> the seed pair spans 60 degrees
    let a = &diagram.points["A"];
    let b = &diagram.points["B"];
    assert!((angle_between(a, b) - 60.0).abs() < 1e-9);
}

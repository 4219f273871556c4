use cladarc_core::{AreaTable, Dendrogram, DendrogramBuilder, MemberSet, SimilarityMatrix};
use limpet::{ClusterStub, Error, decorate, resolve};

fn table() -> AreaTable {
    AreaTable::new(["J", "T", "Y", "N", "O", "Q"]).unwrap()
}

fn global_dendro(table: &AreaTable) -> Dendrogram {
    let mut b = DendrogramBuilder::new(table);
    let j = b.leaf("J").unwrap();
    let t = b.leaf("T").unwrap();
    let y = b.leaf("Y").unwrap();
    let n = b.leaf("N").unwrap();
    let o = b.leaf("O").unwrap();
    let q = b.leaf("Q").unwrap();
    let jt = b.join(j, t, 0.88).unwrap();
    let jty = b.join(jt, y, 0.78).unwrap();
    let oq = b.join(o, q, 0.83).unwrap();
    let noq = b.join(n, oq, 0.7).unwrap();
    b.join(jty, noq, 0.55).unwrap();
    b.build().unwrap()
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

fn set(table: &AreaTable, labels: &[&str]) -> MemberSet {
    labels.iter().map(|l| table.id(l).unwrap()).collect()
}

#[test]
fn exact_hierarchy_match_wins_over_the_fallback() {
    let table = table();
    let dendro = global_dendro(&table);
    let matrix = global_matrix(&table);
    // the pairwise mean for {J, T, Y} would be (0.88 + 0.82 + 0.80) / 3;
    // the hierarchy node says 0.78 and must win.
    let sim = resolve(&set(&table, &["J", "T", "Y"]), &dendro, &matrix).unwrap();
    assert!((sim - 0.78).abs() < 1e-12);
}

#[test]
fn fallback_is_the_mean_over_unordered_pairs() {
    let table = table();
    let dendro = global_dendro(&table);
    let matrix = global_matrix(&table);
    // {T, Y, N} is no node of the hierarchy
    let sim = resolve(&set(&table, &["T", "Y", "N"]), &dendro, &matrix).unwrap();
    let expected = (0.80 + 0.38 + 0.37) / 3.0;
    assert!((sim - expected).abs() < 1e-12, "got {sim}");
}

#[test]
fn supersets_get_no_partial_credit() {
    let table = table();
    let dendro = global_dendro(&table);
    let matrix = global_matrix(&table);
    // {J, T, N} contains the (J, T) node but is not equal to any node
    let sim = resolve(&set(&table, &["J", "T", "N"]), &dendro, &matrix).unwrap();
    let expected = (0.88 + 0.40 + 0.38) / 3.0;
    assert!((sim - expected).abs() < 1e-12);
}

#[test]
fn a_leaf_member_set_resolves_through_the_hierarchy() {
    let table = table();
    let dendro = global_dendro(&table);
    let matrix = global_matrix(&table);
    let sim = resolve(&set(&table, &["J"]), &dendro, &matrix).unwrap();
    assert_eq!(sim, 1.0);
}

#[test]
fn an_empty_member_set_is_unresolvable() {
    let table = table();
    let dendro = global_dendro(&table);
    let matrix = global_matrix(&table);
    let err = resolve(&MemberSet::default(), &dendro, &matrix).unwrap_err();
    assert!(matches!(err, Error::UnresolvableMembers { .. }));
}

#[test]
fn decoration_applies_both_formulas() {
    let table = table();
    let dendro = global_dendro(&table);
    let matrix = global_matrix(&table);
    let stub = ClusterStub {
        members: set(&table, &["J", "T"]),
        sim_local: 0.9,
    };
    let cluster = decorate(&stub, &dendro, &matrix, 1.0).unwrap();
    assert!((cluster.sim_global - 0.88).abs() < 1e-12);
    assert!((cluster.diameter - 1.0 / 0.88).abs() < 1e-12);
    assert!((cluster.diameter - 1.13636).abs() < 1e-5);
    assert!((cluster.theta - 18.0).abs() < 1e-12);
    assert!(cluster.points.is_empty());
}

#[test]
fn decoration_scales_with_unit() {
    let table = table();
    let dendro = global_dendro(&table);
    let matrix = global_matrix(&table);
    let stub = ClusterStub {
        members: set(&table, &["J", "T"]),
        sim_local: 0.9,
    };
    let cluster = decorate(&stub, &dendro, &matrix, 2.5).unwrap();
    assert!((cluster.diameter - 2.5 / 0.88).abs() < 1e-12);
}

#[test]
fn zero_resolved_similarity_is_a_domain_error() {
    let table = AreaTable::new(["A", "B", "C"]).unwrap();
    let mut b = DendrogramBuilder::new(&table);
    let a = b.leaf("A").unwrap();
    let c = b.leaf("C").unwrap();
    let bb = b.leaf("B").unwrap();
    let ac = b.join(a, c, 0.9).unwrap();
    b.join(ac, bb, 0.5).unwrap();
    let dendro = b.build().unwrap();
    // (A, B) is no hierarchy node and the matrix carries no A-B entry
    let matrix = SimilarityMatrix::from_pairs(&table, &[("A", "C", 0.9)]).unwrap();
    let stub = ClusterStub {
        members: [0u32, 1].into_iter().collect(),
        sim_local: 0.9,
    };
    let err = decorate(&stub, &dendro, &matrix, 1.0).unwrap_err();
    assert!(matches!(err, Error::NonPositiveSimilarity { .. }));
}

//! Cross-module properties of the modifiers, checked on generated inputs.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use tessera::algo::analysis::{edge_count, fulfills_euler_characteristic, is_consistently_oriented, is_manifold};
use tessera::algo::bevel::Bevel;
use tessera::algo::conway::{ConwayOp, Kis, Poke, Seed};
use tessera::algo::repair::{RemoveDoubleVertices, UpdateFaceNormals};
use tessera::algo::subdivide::CatmullClark;
use tessera::io::obj;
use tessera::nalgebra::Point3;
use tessera::prelude::*;

const OPS: &[char] = &['d', 'k', 'a', 't', 'z', 'j', 'n', 'e', 'o', 'x'];
const SEEDS: &[char] = &['T', 'C', 'O', 'I', 'D'];

/// `(V, E, F)`.
fn counts(mesh: &Mesh) -> (usize, usize, usize) {
    (mesh.num_vertices(), edge_count(mesh), mesh.num_faces())
}

fn seed(pick: u8) -> Mesh {
    Seed::from_letter(SEEDS[pick as usize % SEEDS.len()]).unwrap().mesh()
}

fn op(pick: u8) -> ConwayOp {
    ConwayOp::from_letter(OPS[pick as usize % OPS.len()]).unwrap()
}

fn expected_counts(op: ConwayOp, (v, e, f): (usize, usize, usize)) -> (usize, usize, usize) {
    match op {
        ConwayOp::Dual => (f, e, v),
        ConwayOp::Kis | ConwayOp::Needle => (v + f, 3 * e, 2 * e),
        ConwayOp::Ambo => (e, 2 * e, v + f),
        ConwayOp::Truncate | ConwayOp::Zip => (2 * e, 3 * e, v + f),
        ConwayOp::Join => (v + f, 2 * e, e),
        ConwayOp::Expand => (2 * e, 4 * e, v + e + f),
        ConwayOp::Ortho => (v + e + f, 4 * e, 2 * e),
        ConwayOp::AmboKisDual => (v + e + f, 6 * e, 4 * e),
    }
}

fn closed(mesh: &Mesh) -> bool {
    is_manifold(mesh) && is_consistently_oriented(mesh) && fulfills_euler_characteristic(mesh)
}

#[quickcheck]
fn conway_operators_preserve_closed_surfaces(seed_pick: u8, ops: Vec<u8>) -> bool {
    let mut mesh = seed(seed_pick);
    for &pick in ops.iter().take(2) {
        let op = op(pick);
        let expected = expected_counts(op, counts(&mesh));
        mesh.apply(&op.modifier()).unwrap();
        if counts(&mesh) != expected || !closed(&mesh) {
            return false;
        }
    }
    true
}

#[quickcheck]
fn face_normals_are_unit_length(seed_pick: u8, op_pick: u8) -> bool {
    let mut mesh = seed(seed_pick);
    mesh.apply(&op(op_pick).modifier()).unwrap().apply(&UpdateFaceNormals).unwrap();
    mesh.faces()
        .iter()
        .all(|f| f.normal().map_or(false, |n| (n.norm() - 1.0).abs() < 1e-9))
}

#[quickcheck]
fn catmull_clark_counts(seed_pick: u8, op_pick: u8) -> bool {
    let mut mesh = seed(seed_pick);
    mesh.apply(&op(op_pick).modifier()).unwrap();
    let (v, e, f) = counts(&mesh);

    mesh.apply(&CatmullClark::new(1)).unwrap();
    counts(&mesh) == (v + e + f, 4 * e, 2 * e) && mesh.is_quad_mesh() && closed(&mesh)
}

#[quickcheck]
fn bevel_counts(seed_pick: u8, amount: u8) -> bool {
    let mut mesh = seed(seed_pick);
    let (v, e, f) = counts(&mesh);
    let bevel = Bevel::new((amount as f64 + 1.0) / 257.0).unwrap();

    mesh.apply(&bevel).unwrap();
    counts(&mesh) == (2 * e, 4 * e, v + e + f) && closed(&mesh)
}

#[quickcheck]
fn poke_counts(seed_pick: u8, height: i8) -> bool {
    let mut mesh = seed(seed_pick);
    let (v, e, f) = counts(&mesh);

    mesh.apply(&Poke::new(height as f64 / 16.0).unwrap()).unwrap();
    counts(&mesh) == (v + f, 3 * e, 2 * e) && is_manifold(&mesh)
}

#[quickcheck]
fn repeat_matches_repeated_application(seed_pick: u8, times: u8) -> bool {
    let times = times as usize % 3 + 1;
    let mut repeated = seed(seed_pick);
    let mut manual = repeated.clone();

    repeated.apply(&Repeat::new(times, Kis).unwrap()).unwrap();
    for _ in 0..times {
        manual.apply(&Kis).unwrap();
    }

    repeated.vertices() == manual.vertices()
        && repeated.faces().iter().zip(manual.faces()).all(|(a, b)| a.indices() == b.indices())
}

/// A soup of lattice points (so duplicates are common) and random triangles.
fn soup(points: &[(i8, i8, i8)], triangles: &[(u8, u8, u8)]) -> Option<Mesh> {
    if points.is_empty() {
        return None;
    }
    let mut mesh = Mesh::new();
    mesh.add_vertices(
        points
            .iter()
            .map(|&(x, y, z)| Point3::new((x % 3) as f64, (y % 3) as f64, (z % 3) as f64)),
    );
    let n = points.len();
    for &(a, b, c) in triangles {
        mesh.add_face(vec![a as usize % n, b as usize % n, c as usize % n]).ok()?;
    }
    Some(mesh)
}

#[quickcheck]
fn weld_is_idempotent(points: Vec<(i8, i8, i8)>, triangles: Vec<(u8, u8, u8)>) -> TestResult {
    let Some(mut mesh) = soup(&points, &triangles) else {
        return TestResult::discard();
    };

    mesh.apply(&RemoveDoubleVertices::new()).unwrap();
    let once = mesh.clone();
    mesh.apply(&RemoveDoubleVertices::new()).unwrap();

    let unique = once
        .vertices()
        .iter()
        .enumerate()
        .all(|(i, p)| once.vertices()[..i].iter().all(|q| q != p));

    TestResult::from_bool(
        unique
            && mesh.vertices() == once.vertices()
            && mesh.faces().iter().zip(once.faces()).all(|(a, b)| a.indices() == b.indices()),
    )
}

#[quickcheck]
fn weld_keeps_face_count_and_geometry(points: Vec<(i8, i8, i8)>, triangles: Vec<(u8, u8, u8)>) -> TestResult {
    let Some(original) = soup(&points, &triangles) else {
        return TestResult::discard();
    };
    let mut welded = original.clone();
    welded.apply(&RemoveDoubleVertices::new()).unwrap();

    let same_corners = original.faces().iter().zip(welded.faces()).all(|(a, b)| {
        a.indices()
            .iter()
            .zip(b.indices())
            .all(|(&i, &j)| original.vertex(i) == welded.vertex(j))
    });

    TestResult::from_bool(welded.num_faces() == original.num_faces() && same_corners)
}

#[quickcheck]
fn loader_rejects_out_of_range_index(extra_vertices: u8, overshoot: u8) -> bool {
    let count = 3 + extra_vertices as usize % 8;
    let bad = count + 1 + overshoot as usize % 4;

    let mut text = String::new();
    for i in 0..count {
        text.push_str(&format!("v {} 0 0\n", i));
    }
    text.push_str("f 1 2 3\n");
    text.push_str(&format!("f 1 2 {}\n", bad));

    matches!(obj::parse(&text), Err(MeshError::InvalidVertexIndex { face: 1, vertex }) if vertex == bad)
}

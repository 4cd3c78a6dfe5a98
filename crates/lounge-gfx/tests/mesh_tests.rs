// Mesh generation is pure CPU work and runs without a GPU.

use glam::Vec3;
use lounge_core::Shape;
use lounge_gfx::mesh::MeshData;

fn euler_characteristic(mesh: &MeshData) -> i64 {
    mesh.positions.len() as i64 - mesh.edges().len() as i64 + mesh.triangles.len() as i64
}

fn assert_outward(mesh: &MeshData) {
    for &tri in &mesh.triangles {
        let centroid: Vec3 = tri.iter().map(|&i| mesh.positions[i as usize]).sum();
        assert!(
            mesh.face_normal(tri).dot(centroid) > 0.0,
            "triangle {tri:?} faces inwards"
        );
    }
}

#[test]
fn icosahedron_counts_match_subdivision() {
    for (detail, verts, edges, faces) in [(0, 12, 30, 20), (1, 42, 120, 80), (3, 642, 1920, 1280)] {
        let mesh = MeshData::icosahedron(detail);
        assert_eq!(mesh.positions.len(), verts, "detail {detail}");
        assert_eq!(mesh.edges().len(), edges, "detail {detail}");
        assert_eq!(mesh.triangles.len(), faces, "detail {detail}");
        assert_eq!(euler_characteristic(&mesh), 2);
    }
}

#[test]
fn icosphere_vertices_lie_on_the_unit_sphere() {
    let mesh = MeshData::icosahedron(2);
    for p in &mesh.positions {
        assert!((p.length() - 1.0).abs() < 1e-5);
    }
    assert_outward(&mesh);
}

#[test]
fn octahedron_and_cube_are_closed_and_outward() {
    let oct = MeshData::octahedron();
    assert_eq!(oct.triangles.len(), 8);
    assert_eq!(oct.edges().len(), 12);
    assert_eq!(euler_characteristic(&oct), 2);
    assert_outward(&oct);

    let cube = MeshData::cube();
    assert_eq!(cube.positions.len(), 8);
    assert_eq!(cube.triangles.len(), 12);
    assert_eq!(euler_characteristic(&cube), 2);
    assert_outward(&cube);
}

#[test]
fn vertex_streams_have_expected_lengths() {
    let mesh = MeshData::for_shape(Shape::Icosahedron { detail: 1 });
    assert_eq!(mesh.flat_vertices().len(), 80 * 3);
    assert_eq!(mesh.edge_vertices().len(), 120 * 2);

    let cube = MeshData::for_shape(Shape::Cube);
    // one normal per face: both triangles of a side agree
    let v = cube.flat_vertices();
    for tri in v.chunks(3) {
        assert_eq!(tri[0].normal, tri[1].normal);
        assert_eq!(tri[1].normal, tri[2].normal);
    }
}

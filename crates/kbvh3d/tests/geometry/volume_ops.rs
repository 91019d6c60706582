use approx::assert_relative_eq;
use kbvh3d::bounding_volume::{
    self, degrees_of_freedom, Aabb, BoundingSphere, BoundingVolume, VolumeKind,
};
use kbvh3d::math::Real;
use kbvh3d::utils::Batch;
use kbvh3d::VolumeError;
use na::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_isaac::IsaacRng;

fn random_point(rng: &mut IsaacRng) -> Point3<Real> {
    Point3::new(
        rng.gen_range(-20.0..20.0),
        rng.gen_range(-20.0..20.0),
        rng.gen_range(-20.0..20.0),
    )
}

fn random_volumes(rng: &mut IsaacRng, kind: VolumeKind, count: usize) -> Vec<Real> {
    let mut data = vec![0.0; count * kind.dofs()];

    for out in data.chunks_exact_mut(kind.dofs()) {
        let center = random_point(rng);
        match kind {
            VolumeKind::Aabb => {
                let half_extents = Vector3::<Real>::new(rng.gen(), rng.gen(), rng.gen()) * 4.0;
                Aabb::from_half_extents(center, half_extents).write_to_slice(out);
            }
            VolumeKind::Sphere => {
                BoundingSphere::new(center, rng.gen::<Real>() * 4.0).write_to_slice(out);
            }
        }
    }

    data
}

#[test]
fn volume_kind_tags() {
    assert_eq!(degrees_of_freedom(VolumeKind::Aabb), 6);
    assert_eq!(degrees_of_freedom(VolumeKind::Sphere), 4);
    assert_eq!("AABB".parse::<VolumeKind>(), Ok(VolumeKind::Aabb));
    assert_eq!(VolumeKind::Sphere.to_string(), "sphere");
    assert_eq!(
        "capsule".parse::<VolumeKind>(),
        Err(VolumeError::InvalidVolumeKind("capsule".to_string()))
    );
}

#[test]
fn pairwise_union_is_commutative_and_enclosing() {
    let mut rng = IsaacRng::seed_from_u64(0);

    for kind in [VolumeKind::Aabb, VolumeKind::Sphere] {
        let shape = vec![5, 4, kind.dofs()];
        let a = Batch::new(random_volumes(&mut rng, kind, 20), shape.clone()).unwrap();
        let b = Batch::new(random_volumes(&mut rng, kind, 20), shape.clone()).unwrap();

        let ab = bounding_volume::pairwise_union(&a, &b, kind).unwrap();
        let ba = bounding_volume::pairwise_union(&b, &a, kind).unwrap();

        assert_eq!(ab.shape(), &shape[..]);
        assert_relative_eq!(ab.data(), ba.data(), epsilon = 1.0e-5);

        let n = kind.dofs();
        for ((u, a), b) in ab
            .data()
            .chunks_exact(n)
            .zip(a.data().chunks_exact(n))
            .zip(b.data().chunks_exact(n))
        {
            match kind {
                VolumeKind::Aabb => {
                    let u = Aabb::from_slice(u);
                    assert!(u.contains(&Aabb::from_slice(a)));
                    assert!(u.contains(&Aabb::from_slice(b)));
                }
                VolumeKind::Sphere => {
                    let u = BoundingSphere::from_slice(u);
                    for s in [a, b] {
                        let s = BoundingSphere::from_slice(s);
                        let reach = (s.center - u.center).norm() + s.radius;
                        assert!(reach <= u.radius * (1.0 + 1.0e-5));
                    }
                }
            }
        }
    }
}

#[test]
fn sphere_union_examples() {
    let a = Batch::new(vec![0.0, 0.0, 0.0, 1.0], vec![1, 4]).unwrap();
    let b = Batch::new(vec![4.0, 0.0, 0.0, 1.0], vec![1, 4]).unwrap();
    let u = bounding_volume::pairwise_union(&a, &b, VolumeKind::Sphere).unwrap();
    let expected: [Real; 4] = [2.0, 0.0, 0.0, 6.0];
    assert_relative_eq!(u.data(), &expected[..]);

    let set = Batch::new(vec![0.0, 0.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0], vec![2, 4]).unwrap();
    let u = bounding_volume::reduce_union(&set, VolumeKind::Sphere).unwrap();
    assert_eq!(u.shape(), &[4]);
    let expected: [Real; 4] = [2.0, 0.0, 0.0, 3.0];
    assert_relative_eq!(u.data(), &expected[..]);
}

#[test]
fn reduce_union_of_boxes() {
    let mut rng = IsaacRng::seed_from_u64(3);
    let data = random_volumes(&mut rng, VolumeKind::Aabb, 2 * 9);
    let boxes = Batch::new(data.clone(), vec![2, 9, 6]).unwrap();

    let u = bounding_volume::reduce_union(&boxes, VolumeKind::Aabb).unwrap();
    assert_eq!(u.shape(), &[2, 6]);

    for (u, set) in u.data().chunks_exact(6).zip(data.chunks_exact(9 * 6)) {
        let expected = set
            .chunks_exact(6)
            .map(Aabb::from_slice)
            .fold(Aabb::new_invalid(), |acc, aabb| acc.merged(&aabb));
        assert_eq!(Aabb::from_slice(u), expected);
    }

    let empty = Batch::new(vec![], vec![3, 0, 6]).unwrap();
    assert_eq!(
        bounding_volume::reduce_union(&empty, VolumeKind::Aabb),
        Err(VolumeError::EmptyVolumeSet)
    );
}

#[test]
fn reduce_union_of_one_volume_is_identity() {
    let mut rng = IsaacRng::seed_from_u64(5);

    for kind in [VolumeKind::Aabb, VolumeKind::Sphere] {
        let data = random_volumes(&mut rng, kind, 6);
        let singletons = Batch::new(data.clone(), vec![6, 1, kind.dofs()]).unwrap();
        let u = bounding_volume::reduce_union(&singletons, kind).unwrap();

        assert_eq!(u.shape(), &[6, kind.dofs()]);
        assert_eq!(u.data(), &data[..]);
    }
}

#[test]
fn intersection_tests() {
    let boxes1 = Batch::new(
        vec![
            0.0, 0.0, 0.0, 1.0, 1.0, 1.0, // touches the second box
            0.0, 0.0, 0.0, 1.0, 1.0, 1.0, // disjoint
        ],
        vec![2, 6],
    )
    .unwrap();
    let boxes2 = Batch::new(
        vec![
            1.0, 0.0, 0.0, 2.0, 1.0, 1.0, //
            1.5, 0.0, 0.0, 2.0, 1.0, 1.0, //
        ],
        vec![2, 6],
    )
    .unwrap();
    let hits = bounding_volume::intersects(&boxes1, &boxes2, VolumeKind::Aabb).unwrap();
    assert_eq!(hits.shape(), &[2]);
    assert_eq!(hits.data(), &[true, false]);

    let spheres1 = Batch::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], vec![2, 4]).unwrap();
    let spheres2 = Batch::new(vec![1.5, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 1.0], vec![2, 4]).unwrap();
    let hits = bounding_volume::intersects(&spheres1, &spheres2, VolumeKind::Sphere).unwrap();
    assert_eq!(hits.data(), &[true, false]);

    let mismatched = Batch::new(vec![0.0; 12], vec![3, 4]).unwrap();
    assert!(matches!(
        bounding_volume::intersects(&spheres1, &mismatched, VolumeKind::Sphere),
        Err(VolumeError::ShapeMismatch { .. })
    ));
}

#[test]
fn centers_of_random_boxes() {
    let mut rng = IsaacRng::seed_from_u64(11);
    let data = random_volumes(&mut rng, VolumeKind::Aabb, 8);
    let boxes = Batch::new(data.clone(), vec![2, 2, 2, 6]).unwrap();

    let centers = bounding_volume::center(&boxes, VolumeKind::Aabb).unwrap();
    assert_eq!(centers.shape(), &[2, 2, 2, 3]);

    for (c, aabb) in centers.data().chunks_exact(3).zip(data.chunks_exact(6)) {
        let expected = Aabb::from_slice(aabb).center();
        assert_relative_eq!(Point3::new(c[0], c[1], c[2]), expected);
    }
}

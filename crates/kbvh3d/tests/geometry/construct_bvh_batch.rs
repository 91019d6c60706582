use kbvh3d::bounding_volume::{Aabb, BoundingSphere, BoundingVolume, VolumeKind};
use kbvh3d::math::Real;
use kbvh3d::partitioning::{construct_bvh, tree_len, KaryBvh};
use kbvh3d::utils::Batch;
use kbvh3d::VolumeError;
use rand::{Rng, SeedableRng};
use rand_isaac::IsaacRng;

fn random_aabbs(rng: &mut IsaacRng, count: usize) -> Vec<Real> {
    let mut data = Vec::with_capacity(count * 6);

    for _ in 0..count {
        let center: [Real; 3] = [
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        ];
        let half_extents: [Real; 3] = [
            rng.gen_range(0.0..3.0),
            rng.gen_range(0.0..3.0),
            rng.gen_range(0.0..3.0),
        ];

        data.extend((0..3).map(|i| center[i] - half_extents[i]));
        data.extend((0..3).map(|i| center[i] + half_extents[i]));
    }

    data
}

fn random_spheres(rng: &mut IsaacRng, count: usize) -> Vec<Real> {
    let mut data = Vec::with_capacity(count * 4);

    for _ in 0..count {
        data.push(rng.gen_range(-50.0..50.0));
        data.push(rng.gen_range(-50.0..50.0));
        data.push(rng.gen_range(-50.0..50.0));
        data.push(rng.gen_range(0.0..3.0));
    }

    data
}

fn assert_is_permutation(perm: &[u32]) {
    let mut sorted = perm.to_vec();
    sorted.sort_unstable();
    assert!(sorted.iter().copied().eq(0..perm.len() as u32));
}

#[test]
fn four_unit_boxes() {
    let centers = [
        [0.0, 0.0, 0.0],
        [10.0, 0.0, 0.0],
        [0.0, 10.0, 0.0],
        [0.0, 0.0, 10.0],
    ];
    let data = centers
        .iter()
        .flat_map(|c| [c[0] - 0.5, c[1] - 0.5, c[2] - 0.5, c[0] + 0.5, c[1] + 0.5, c[2] + 0.5])
        .collect();
    let leaves = Batch::new(data, vec![4, 6]).unwrap();

    let (tree, perm) = construct_bvh(&leaves, VolumeKind::Aabb, 2).unwrap();

    assert_eq!(tree.shape(), &[7, 6]);
    assert_eq!(perm.shape(), &[4]);
    assert_is_permutation(perm.data());
    assert_eq!(&tree.data()[..6], &[-0.5, -0.5, -0.5, 10.5, 10.5, 10.5]);
}

#[test]
fn batched_trees_match_independent_builds() {
    let mut rng = IsaacRng::seed_from_u64(0);
    let (batch_shape, num_leaves, k) = ([2, 3], 13, 3);
    let num_trees = 6;
    let len = tree_len(num_leaves, k);

    let data = random_aabbs(&mut rng, num_trees * num_leaves);
    let leaves = Batch::new(data.clone(), vec![2, 3, num_leaves, 6]).unwrap();
    let (tree, perm) = construct_bvh(&leaves, VolumeKind::Aabb, k).unwrap();

    assert_eq!(tree.shape(), &[batch_shape[0], batch_shape[1], len, 6]);
    assert_eq!(perm.shape(), &[batch_shape[0], batch_shape[1], num_leaves]);

    for t in 0..num_trees {
        let instance: Vec<Aabb> = data[t * num_leaves * 6..(t + 1) * num_leaves * 6]
            .chunks_exact(6)
            .map(Aabb::from_slice)
            .collect();
        let nodes = &tree.data()[t * len * 6..(t + 1) * len * 6];
        let perm = &perm.data()[t * num_leaves..(t + 1) * num_leaves];

        let bvh = KaryBvh::from_leaves(&instance, k).unwrap();
        bvh.assert_well_formed();
        assert_eq!(bvh.leaf_permutation(), perm);
        assert_is_permutation(perm);

        let nodes: Vec<Aabb> = nodes.chunks_exact(6).map(Aabb::from_slice).collect();
        assert_eq!(bvh.nodes(), &nodes[..]);

        // The leaf level starts with the input leaves, in permutation order.
        let leaf_level = &nodes[len - k.pow(bvh.depth() as u32)..];
        for (leaf, &i) in leaf_level.iter().zip(perm) {
            assert_eq!(*leaf, instance[i as usize]);
        }

        for leaf in &instance {
            assert!(nodes[0].contains(leaf));
        }
    }
}

#[test]
fn sphere_root_contains_every_leaf() {
    let mut rng = IsaacRng::seed_from_u64(42);

    for num_leaves in [1, 2, 7, 16, 33] {
        for k in [2, 4] {
            let data = random_spheres(&mut rng, 3 * num_leaves);
            let leaves = Batch::new(data.clone(), vec![3, num_leaves, 4]).unwrap();
            let (tree, perm) = construct_bvh(&leaves, VolumeKind::Sphere, k).unwrap();
            let len = tree_len(num_leaves, k);

            assert_eq!(tree.shape(), &[3, len, 4]);

            for t in 0..3 {
                let root = BoundingSphere::from_slice(&tree.data()[t * len * 4..]);
                assert_is_permutation(&perm.data()[t * num_leaves..(t + 1) * num_leaves]);

                for leaf in data[t * num_leaves * 4..(t + 1) * num_leaves * 4].chunks_exact(4) {
                    let leaf = BoundingSphere::from_slice(leaf);
                    let reach = (leaf.center - root.center).norm() + leaf.radius;
                    assert!(reach <= root.radius * (1.0 + 1.0e-5));
                }
            }
        }
    }
}

#[test]
fn single_leaf_tree() {
    let leaves = Batch::new(vec![1.0, 2.0, 3.0, 4.0], vec![1, 4]).unwrap();
    let (tree, perm) = construct_bvh(&leaves, VolumeKind::Sphere, 2).unwrap();

    assert_eq!(tree.shape(), &[1, 4]);
    assert_eq!(tree.data(), leaves.data());
    assert_eq!(perm.data(), &[0]);
}

#[test]
fn empty_batch_dimension() {
    let leaves = Batch::new(vec![], vec![0, 5, 6]).unwrap();
    let (tree, perm) = construct_bvh(&leaves, VolumeKind::Aabb, 2).unwrap();

    assert_eq!(tree.shape(), &[0, tree_len(5, 2), 6]);
    assert!(tree.is_empty());
    assert_eq!(perm.shape(), &[0, 5]);
    assert!(perm.is_empty());
}

#[test]
fn construction_is_deterministic() {
    let mut rng = IsaacRng::seed_from_u64(7);
    let data = random_spheres(&mut rng, 4 * 50);
    let leaves = Batch::new(data, vec![4, 50, 4]).unwrap();

    let first = construct_bvh(&leaves, VolumeKind::Sphere, 3).unwrap();
    let second = construct_bvh(&leaves, VolumeKind::Sphere, 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn construction_preconditions() {
    let leaves = Batch::new(vec![0.0; 24], vec![4, 6]).unwrap();

    assert!(matches!(
        construct_bvh(&leaves, VolumeKind::Aabb, 1),
        Err(VolumeError::InvalidArgument(_))
    ));
    assert_eq!(
        construct_bvh(&leaves, VolumeKind::Sphere, 2),
        Err(VolumeError::DimensionMismatch {
            name: "leaf_volumes",
            expected: 4,
            found: 6
        })
    );

    let flat = Batch::new(vec![0.0; 6], vec![6]).unwrap();
    assert_eq!(
        construct_bvh(&flat, VolumeKind::Aabb, 2),
        Err(VolumeError::InsufficientRank {
            name: "leaf_volumes",
            expected: 2,
            found: 1
        })
    );

    assert_eq!(
        construct_bvh(&leaves, VolumeKind::Aabb, usize::MAX),
        Err(VolumeError::InvalidArgument("the tree size overflows usize"))
    );

    let empty = Batch::new(vec![], vec![2, 0, 6]).unwrap();
    assert_eq!(
        construct_bvh(&empty, VolumeKind::Aabb, 2),
        Err(VolumeError::EmptyVolumeSet)
    );

    assert!(matches!(
        "box".parse::<VolumeKind>(),
        Err(VolumeError::InvalidVolumeKind(_))
    ));
}

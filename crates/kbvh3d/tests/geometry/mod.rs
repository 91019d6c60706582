mod construct_bvh_batch;
mod volume_ops;

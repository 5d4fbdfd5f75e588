use approx::assert_abs_diff_eq;
use ferrite_mlp::data::{self, gates};
use ferrite_mlp::{train_loop, MlpError, Network, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn hand_coded_xor_network_computes_xor() {
    let mut network = Network::with_defaults(&[2, 2, 1], &mut StdRng::seed_from_u64(0)).unwrap();
    network.set_weights(gates::hand_coded_xor_weights()).unwrap();

    for sample in data::xor() {
        let output = network.forward(&sample.input).unwrap();
        assert_abs_diff_eq!(output[0], sample.target[0], epsilon = 0.1);
    }
}

#[test]
fn training_lowers_xor_mse() {
    for seed in [1, 7, 42] {
        let mut network =
            Network::with_defaults(&[2, 2, 1], &mut StdRng::seed_from_u64(seed)).unwrap();
        let history = train_loop(&mut network, &data::xor(), &TrainConfig::new(3000, 0)).unwrap();
        assert_eq!(history.len(), 3000);
        let first = history[0].mse;
        let last = history[2999].mse;
        assert!(last < first, "seed {seed}: mse went from {first} to {last}");
    }
}

#[test]
fn training_lowers_seven_segment_mse() {
    let mut network =
        Network::with_defaults(&[7, 7, 10], &mut StdRng::seed_from_u64(13)).unwrap();
    let history =
        train_loop(&mut network, &data::seven_segment(), &TrainConfig::new(1000, 0)).unwrap();
    assert!(history[999].mse < history[0].mse);
}

#[test]
fn weight_shapes_survive_training_and_inference() {
    let sizes = [3, 5, 4, 2];
    let mut rng = StdRng::seed_from_u64(99);
    let mut network = Network::new(&sizes, 0.5, 0.2, &mut rng).unwrap();

    for step in 0..200 {
        let x = step as f64 / 200.0;
        network.forward(&[x, 1.0 - x, 0.5]).unwrap();
        network.train_one_sample(&[x, 0.5, 1.0 - x], &[x, 1.0 - x]).unwrap();
    }

    let snapshot = network.weights_snapshot();
    assert_eq!(snapshot.len(), sizes.len() - 1);
    for (offset, layer) in snapshot.iter().enumerate() {
        assert_eq!(layer.len(), sizes[offset + 1]);
        assert!(layer.iter().all(|weights| weights.len() == sizes[offset] + 1));
    }
}

#[test]
fn bias_weight_moves_by_rate_times_delta_times_bias() {
    let bias = 1.0;
    let rate = 0.5;
    let mut network = Network::new(&[2, 2, 1], bias, rate, &mut StdRng::seed_from_u64(4)).unwrap();
    let before = network.weights_snapshot();
    network.train_one_sample(&[0.0, 1.0], &[1.0]).unwrap();
    let after = network.weights_snapshot();

    for layer in 1..network.layer_count() {
        for (n, delta) in network.error_terms()[layer].iter().enumerate() {
            let last = before[layer - 1][n].len() - 1;
            assert_abs_diff_eq!(
                after[layer - 1][n][last] - before[layer - 1][n][last],
                rate * delta * bias,
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn mismatched_shapes_are_rejected() {
    let mut network = Network::with_defaults(&[2, 2, 1], &mut StdRng::seed_from_u64(0)).unwrap();
    assert!(matches!(
        network.forward(&[1.0]),
        Err(MlpError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        network.set_weights(vec![vec![vec![1.0; 4]]]),
        Err(MlpError::DimensionMismatch { expected: 3, actual: 4, .. })
    ));
}

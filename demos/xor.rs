use ferrite_mlp::{data, train_epoch, Network};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> ferrite_mlp::Result<()> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::with_defaults(&[2, 2, 1], &mut rng)?;

    let samples = data::xor();
    let epochs = 3000;

    for epoch in 0..epochs {
        let mse = train_epoch(&mut network, &samples)?;
        if epoch % 100 == 0 {
            println!("Epoch {epoch}: mse = {mse:.6}");
        }
    }

    for sample in &samples {
        let output = network.forward(&sample.input)?;
        println!("Input: {:?} -> Output: {:.4}", sample.input, output[0]);
    }
    Ok(())
}

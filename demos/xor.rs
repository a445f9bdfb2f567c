//! Trains a small network on the XOR function, then round-trips the learned
//! parameters through the textual model format.

use ffnet::matrix::Matrix;
use ffnet::net::{Example, NetConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let examples = vec![
        Example {
            input: Matrix::column(&[0.0, 0.0]),
            output: Matrix::column(&[0.0]),
        },
        Example {
            input: Matrix::column(&[0.0, 1.0]),
            output: Matrix::column(&[1.0]),
        },
        Example {
            input: Matrix::column(&[1.0, 0.0]),
            output: Matrix::column(&[1.0]),
        },
        Example {
            input: Matrix::column(&[1.0, 1.0]),
            output: Matrix::column(&[0.0]),
        },
    ];

    let mut net = NetConfig::<f64>::new([2, 4, 1])
        .with_learning_rate(0.5)
        .build_seeded(0xf1234567)?;

    let max_epochs = 20_000;
    for epoch in 0..max_epochs {
        let avg = net.train(&examples)?;
        if epoch % 2000 == 0 || epoch == max_epochs - 1 {
            println!("epoch {epoch}: average error {avg:.6}");
        }
    }

    for example in &examples {
        let output = net.feed_forward(&example.input)?;
        println!(
            "{:?} -> {:.3} (expected {})",
            example.input.as_slice(),
            output[(0, 0)],
            example.output[(0, 0)]
        );
    }

    let blob = net.export()?;
    let mut restored = NetConfig::<f64>::new([2, 4, 1]).build_seeded(0)?;
    restored.import(&blob)?;
    let probe = Matrix::column(&[1.0, 0.0]);
    let same = net.feed_forward(&probe)? == restored.feed_forward(&probe)?;
    println!("round-tripped model agrees: {same}");
    Ok(())
}

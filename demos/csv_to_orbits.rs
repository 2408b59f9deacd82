//! Read a KOI CSV, map it to orbits and print where every body is after a few clock ticks.
//!
//! ```text
//! RUST_LOG=koiviz=debug cargo run --example csv_to_orbits -- tests/data/koi_sample.csv
//! ```
//!
//! With `--classify` the canonical rows are sent to the classifier at
//! `KOIVIZ_CLASSIFIER_URL` (default `http://localhost:8000`) and only bodies not flagged
//! as false positives are printed.
use std::{env, time::Duration};

use camino::Utf8PathBuf;
use koiviz::{
    clock::SimulationClock, env_state::ClassifierConfig, orbit::MapperParams, Koiviz,
    KoivizError,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), KoivizError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let path = Utf8PathBuf::from(
        args.next()
            .unwrap_or_else(|| "tests/data/koi_sample.csv".to_string()),
    );
    let classify = args.any(|a| a == "--classify");

    let base_url =
        env::var("KOIVIZ_CLASSIFIER_URL").unwrap_or_else(|_| "http://localhost:8000".into());
    let params = MapperParams::builder().seed(42).build()?;
    println!("{params:#}");

    let mut koiviz = Koiviz::new(params, ClassifierConfig::new(base_url))?;
    let rows = koiviz.import_csv_path(&path, classify)?;

    if classify {
        let predictions = koiviz.classify(&rows).await?;
        for (i, p) in predictions.iter().enumerate() {
            let label = p
                .label_name()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".into());
            println!("row {i}: {label} (confidence {:?})", p.confidence);
        }
    } else {
        let n = koiviz.snapshot().len();
        koiviz.store_mut().set_visibility(vec![true; n])?;
    }

    for orbit in &koiviz.snapshot().orbits {
        println!("{orbit}");
    }

    let mut clock = SimulationClock::new();
    clock.set_scale(10.0)?;
    for _ in 0..3 {
        let t = clock.advance(Duration::from_millis(500));
        for (index, position) in koiviz.positions_at(t) {
            println!(
                "t = {t:>6.2}  body {index}: ({:.3}, {:.3}, {:.3})",
                position.x, position.y, position.z
            );
        }
    }
    Ok(())
}

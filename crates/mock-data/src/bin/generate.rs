//! Generates the mock user document from the course catalog.
//!
//! Run with:
//! ```
//! cargo run -p mock-data --bin generate
//! ```
//!
//! Set `MOCK_DATA_SEED` for a reproducible run.

use mock_data::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GenerateConfig::from_env()?;

    let mut rng = match config.seed {
        Some(seed) => {
            tracing::info!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let catalog = CatalogLoader::load_file(&config.catalog_path)?;
    let courses = CourseGenerator::new().generate_pool(&catalog, &mut rng)?;
    let mut pool = CoursePool::new(courses)?;

    let user = UserBuilder::from_config(&config).build(&mut pool, &mut rng)?;

    // Summary output
    println!("{}", Summary::of(&user));

    UserExporter::write_file(&config.output_path, &user)?;

    Ok(())
}

// src/bin/write_openapi_snapshot.rs
use anyhow::Result;
use robotika_cms::presentation::http::openapi::{default_snapshot_path, write_openapi_snapshot};
use std::path::PathBuf;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let output_path = PathBuf::from(default_snapshot_path());
    write_openapi_snapshot(&output_path)?;
    println!("OpenAPI snapshot written to {}", output_path.display());
    Ok(())
}

//! Color Prediction Example
//!
//! Runs the public color model over an image URL and prints the dominant colors.
//!
//! Run with: CLARIFAI_API_KEY=... cargo run --example predict_colors -- <image-url>

use clarifai_rust::operations::models::predict;
use clarifai_rust::{ClarifaiClient, Input, ModelType, Prediction};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const COLOR_MODEL_ID: &str = "eeed0b6733a644cea07cf4c60f87ebb7";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://samples.clarifai.com/metro-north.jpg".to_string());
    let client = ClarifaiClient::from_env()?;
    let request = predict(ModelType::Color, COLOR_MODEL_ID, None, vec![Input::image_url(url)])?;

    // Give up after ten seconds.
    let token = CancellationToken::new();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        timer.cancel();
    });

    let response = client.execute_with_cancel(&request, &token).await?;
    println!("status: {}", response.status());

    for output in response.into_value().unwrap_or_default() {
        for color in output.predictions.iter().filter_map(Prediction::as_color) {
            let name = color.w3c.as_ref().map(|w| w.name.as_str()).unwrap_or("?");
            println!("{}  {:>5.1}%  {}", color.raw_hex, color.value * 100.0, name);
        }
    }
    Ok(())
}
